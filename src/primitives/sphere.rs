//! Sphere primitive
//!
//! Author: Moroya Sakamoto

use glam::DVec3;

/// Signed distance to a solid sphere (exact)
#[inline]
pub fn sdb_sphere(x: DVec3, center: DVec3, radius: f64) -> f64 {
    (x - center).length() - radius
}
