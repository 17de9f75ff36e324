//! Container types: Ray
//!
//! Author: Moroya Sakamoto

use glam::DVec4;

/// Ray for sphere tracing
///
/// The direction need not be unit length; ray parameters are measured in
/// units of `direction.length()`.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin, a homogeneous position (`w == 1`)
    pub origin: DVec4,
    /// Ray direction, a homogeneous direction (`w == 0`)
    pub direction: DVec4,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: DVec4, direction: DVec4) -> Self {
        Ray { origin, direction }
    }

    /// Get the point along the ray at parameter t
    pub fn at(&self, t: f64) -> DVec4 {
        self.origin + self.direction * t
    }
}
