//! Distance combination rules for the boolean combinators
//!
//! Author: Moroya Sakamoto

/// Union of two distance bounds (minimum)
#[inline]
pub fn sdb_union(d1: f64, d2: f64) -> f64 {
    d1.min(d2)
}

/// Intersection of two distance bounds (maximum)
#[inline]
pub fn sdb_intersection(d1: f64, d2: f64) -> f64 {
    d1.max(d2)
}

/// Difference `a - b`: `max(d_a, -d_b)`
#[inline]
pub fn sdb_difference(d_a: f64, d_b: f64) -> f64 {
    d_a.max(-d_b)
}
