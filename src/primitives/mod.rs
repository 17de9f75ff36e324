//! Primitive signed distance bounds
//!
//! Closed-form bounds for the leaf surfaces a lens assembly is built
//! from. Each function takes the 3-vector part of a homogeneous query
//! point plus the primitive's parameters and returns a signed distance
//! bound: negative inside the solid, positive outside, magnitude never
//! exceeding the true distance to the zero set.
//!
//! Author: Moroya Sakamoto

mod cylinder;
mod plane;
mod prism;
mod sag;
mod sphere;

pub use cylinder::sdb_infinite_cylinder;
pub use plane::sdb_plane;
pub use prism::sdb_infinite_rectangular_prism;
pub use sag::{conic_gradient_bound, sag_conic, sag_spherical, sdb_spherical_sag, sdb_zemax_conic};
pub use sphere::sdb_sphere;
