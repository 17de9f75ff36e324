//! Finite rectangular tiling
//!
//! Maps a query point into the local frame of the nearest cell of a
//! bounded grid. The cell index is clamped, so points beyond the array
//! edge see the outermost cell rather than a phantom neighbor.
//!
//! Author: Moroya Sakamoto

use glam::{DVec2, DVec4, UVec2};

/// Re-map a homogeneous point into cell-local coordinates
#[inline]
pub fn array_cell_point(x: DVec4, pitch: DVec2, size: UVec2, corner: DVec2) -> DVec4 {
    let u = (DVec2::new(x.x, x.y) - corner) / pitch;
    let index = u.floor().clamp(DVec2::ZERO, size.as_dvec2() - DVec2::ONE);
    let center = corner + (index + DVec2::splat(0.5)) * pitch;
    DVec4::new(x.x - center.x, x.y - center.y, x.z, x.w)
}
