//! Infinite cylinder primitive
//!
//! The transverse bound used to give round lenses their aperture.
//!
//! Author: Moroya Sakamoto

use glam::{DVec2, DVec3};

/// Signed distance to an infinite cylinder along the z axis (exact)
#[inline]
pub fn sdb_infinite_cylinder(x: DVec3, center: DVec2, radius: f64) -> f64 {
    (DVec2::new(x.x, x.y) - center).length() - radius
}
