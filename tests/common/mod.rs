//! Common test helpers for lenstrace integration tests
//!
//! Author: Moroya Sakamoto

// Each integration test binary uses its own subset of these helpers.
#![allow(dead_code)]

use lenstrace::prelude::*;

/// Homogeneous position
pub fn pos(x: f64, y: f64, z: f64) -> DVec4 {
    DVec4::new(x, y, z, 1.0)
}

/// Homogeneous direction
pub fn dir(x: f64, y: f64, z: f64) -> DVec4 {
    DVec4::new(x, y, z, 0.0)
}

// ============================================================================
// Standard test assemblies
// ============================================================================

/// Unit sphere at the origin
pub fn unit_sphere() -> Surface {
    Surface::sphere(DVec3::ZERO, 1.0)
}

/// Union of two unit spheres at (-2, 0, 0) and (2, 0, 0)
pub fn sphere_pair_union() -> Surface {
    Surface::sphere(DVec3::new(-2.0, 0.0, 0.0), 1.0)
        .union(Surface::sphere(DVec3::new(2.0, 0.0, 0.0), 1.0))
}

/// Intersection of the same two spheres (an empty solid)
pub fn sphere_pair_intersection() -> Surface {
    Surface::sphere(DVec3::new(-2.0, 0.0, 0.0), 1.0)
        .intersect(Surface::sphere(DVec3::new(2.0, 0.0, 0.0), 1.0))
}

/// Spherical shell: radius-2 sphere minus the unit sphere
pub fn shell() -> Surface {
    Surface::sphere(DVec3::ZERO, 2.0).subtract(Surface::sphere(DVec3::ZERO, 1.0))
}

/// Biconvex singlet: front and back refracting caps intersected with a
/// round aperture, the construction lens prescriptions lower to
pub fn biconvex_singlet() -> Surface {
    let front = Surface::spherical_sag(50.0, 1.0, DVec3::ZERO).unwrap();
    let back = Surface::spherical_sag(-50.0, -1.0, DVec3::new(0.0, 0.0, 5.0)).unwrap();
    let aperture = Surface::infinite_cylinder(DVec2::ZERO, 12.5);
    Surface::intersection_of(vec![front, back, aperture]).unwrap()
}

/// A handful of probe points spread over the test assemblies
pub fn probe_points() -> Vec<DVec4> {
    vec![
        pos(0.0, 0.0, 0.0),
        pos(1.0, 0.0, 0.0),
        pos(-2.5, 0.0, 0.0),
        pos(0.3, -0.7, 1.9),
        pos(5.0, 5.0, 5.0),
        pos(0.0, 0.0, -3.0),
    ]
}
