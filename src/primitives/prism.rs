//! Infinite rectangular prism primitive
//!
//! The transverse bound for square apertures and lens array cells. The
//! distance uses the max of the per-axis offsets, which underestimates
//! near corners; a bound is all sphere tracing needs.
//!
//! Author: Moroya Sakamoto

use glam::{DVec2, DVec3};

/// Signed distance bound for an infinite rectangular prism along z
#[inline]
pub fn sdb_infinite_rectangular_prism(x: DVec3, center: DVec2, half_size: DVec2) -> f64 {
    let q = (DVec2::new(x.x, x.y) - center).abs() - half_size;
    q.x.max(q.y)
}
