//! Half-space primitive
//!
//! Author: Moroya Sakamoto

use glam::DVec3;

/// Signed distance to a half-space
///
/// The solid occupies `dot(normal, x) + constant <= 0`; the distance is
/// exact when `normal` is unit length.
#[inline]
pub fn sdb_plane(x: DVec3, normal: DVec3, constant: f64) -> f64 {
    normal.dot(x) + constant
}
