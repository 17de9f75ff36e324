//! Affine placement
//!
//! Query points are pulled back through the stored inverse transform;
//! child distances are pushed forward by the uniform scale factor.
//!
//! Author: Moroya Sakamoto

use glam::{DMat4, DVec4};

/// Pull a homogeneous query point back into child coordinates
#[inline]
pub fn affine_point(inv: &DMat4, x: DVec4) -> DVec4 {
    *inv * x
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_translation_pullback() {
        let inv = DMat4::from_translation(DVec3::new(-1.0, -2.0, -3.0));
        let p = affine_point(&inv, DVec4::new(1.0, 2.0, 3.0, 1.0));
        assert!((p - DVec4::new(0.0, 0.0, 0.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_direction_keeps_w_zero() {
        let inv = DMat4::from_translation(DVec3::new(5.0, 0.0, 0.0));
        let v = affine_point(&inv, DVec4::new(1.0, 0.0, 0.0, 0.0));
        // Directions are unaffected by translation.
        assert!((v - DVec4::new(1.0, 0.0, 0.0, 0.0)).length() < 1e-12);
    }
}
