//! Radial zone selection
//!
//! Author: Moroya Sakamoto

use glam::{DVec2, DVec4};

/// Transverse radius of a query point about the zone vertex
#[inline]
pub fn radial_coordinate(x: DVec4, vertex: DVec2) -> f64 {
    (DVec2::new(x.x, x.y) - vertex).length()
}

/// Index of the zone containing `rho`
///
/// Returns the first `i` with `rho <= radii[i]`, or `radii.len()` (the
/// fallback zone) when `rho` exceeds every boundary.
#[inline]
pub fn select_segment(rho: f64, radii: &[f64]) -> usize {
    radii
        .iter()
        .position(|&r| rho <= r)
        .unwrap_or(radii.len())
}
