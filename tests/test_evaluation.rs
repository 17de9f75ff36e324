//! Evaluation, identification, and traversal invariants
//!
//! Author: Moroya Sakamoto

mod common;

use approx::assert_abs_diff_eq;
use common::*;
use lenstrace::prelude::*;

// ============================================================================
// Scenario: union of two unit spheres
// ============================================================================

#[test]
fn test_union_midpoint_distance() {
    let pair = sphere_pair_union();
    assert_abs_diff_eq!(eval(&pair, pos(0.0, 0.0, 0.0)), 1.0, epsilon = 1e-12);
}

#[test]
fn test_union_identify_left_sphere() {
    let pair = sphere_pair_union();
    let isdb = identify(&pair, pos(-2.5, 0.0, 0.0));

    let Surface::Union { children } = &pair else {
        panic!("expected union");
    };
    assert!(std::ptr::eq(isdb.surface, children[0].as_ref()));
    assert_eq!(isdb.face, 0);
    assert_abs_diff_eq!(isdb.d, -0.5, epsilon = 1e-12);
}

// ============================================================================
// Scenario: intersection of disjoint spheres is empty
// ============================================================================

#[test]
fn test_intersection_is_empty() {
    let empty = sphere_pair_intersection();
    assert_abs_diff_eq!(eval(&empty, pos(0.0, 0.0, 0.0)), 1.0, epsilon = 1e-12);
    for point in probe_points() {
        assert!(eval(&empty, point) >= 1.0 - 1e-12);
    }
}

// ============================================================================
// Scenario: difference shell
// ============================================================================

#[test]
fn test_difference_inside_shell() {
    let shell = shell();
    assert_abs_diff_eq!(eval(&shell, pos(1.5, 0.0, 0.0)), -0.5, epsilon = 1e-12);
}

#[test]
fn test_difference_identify_convention() {
    // Documented convention: a's leaf governs when d_a >= -d_b,
    // otherwise b's leaf with its distance negated.
    let shell = shell();
    let Surface::Difference { a, b } = &shell else {
        panic!("expected difference");
    };

    let in_wall = identify(&shell, pos(1.5, 0.0, 0.0));
    assert!(std::ptr::eq(in_wall.surface, a.as_ref()));
    assert_abs_diff_eq!(in_wall.d, -0.5, epsilon = 1e-12);

    let in_core = identify(&shell, pos(0.0, 0.0, 0.25));
    assert!(std::ptr::eq(in_core.surface, b.as_ref()));
    assert_abs_diff_eq!(in_core.d, 0.75, epsilon = 1e-12);
}

// ============================================================================
// Scenario: affine scaling
// ============================================================================

#[test]
fn test_scaled_sphere_distance() {
    let doubled = unit_sphere().scaled(2.0);
    assert_abs_diff_eq!(eval(&doubled, pos(3.0, 0.0, 0.0)), 1.0, epsilon = 1e-12);
}

#[test]
fn test_rigid_affine_invariance() {
    // For rigid M: eval(M tree, M x) == eval(tree, x).
    let m = DMat4::from_rotation_z(0.7) * DMat4::from_translation(DVec3::new(1.0, -2.0, 0.5));
    let base = sphere_pair_union();
    let placed = Surface::affine(base.clone(), m).unwrap();

    for point in probe_points() {
        let moved = m * point;
        assert_abs_diff_eq!(eval(&placed, moved), eval(&base, point), epsilon = 1e-9);
    }
}

#[test]
fn test_affine_general_matches_helper() {
    let m = DMat4::from_scale(DVec3::splat(2.0));
    let via_matrix = Surface::affine(unit_sphere(), m).unwrap();
    let via_helper = unit_sphere().scaled(2.0);

    for point in probe_points() {
        assert_abs_diff_eq!(
            eval(&via_matrix, point),
            eval(&via_helper, point),
            epsilon = 1e-12
        );
    }
}

// ============================================================================
// Scenario: segmented radial half-spaces
// ============================================================================

#[test]
fn test_segmented_radial_zones() {
    let a = Surface::plane(DVec3::Z, 0.0);
    let b = Surface::plane(DVec3::Z, -1.0);
    let seg = Surface::segmented_radial(vec![a, b], vec![1.0], DVec2::ZERO).unwrap();

    for z in [-0.5, 0.0, 0.5, 2.0] {
        // rho = 0.5 <= 1: zone A, bound is z.
        assert_abs_diff_eq!(eval(&seg, pos(0.5, 0.0, z)), z, epsilon = 1e-12);
        // rho = 2 > 1: fallback zone B, bound is z - 1.
        assert_abs_diff_eq!(eval(&seg, pos(2.0, 0.0, z)), z - 1.0, epsilon = 1e-12);
    }
}

// ============================================================================
// Invariants across operations
// ============================================================================

#[test]
fn test_traverse_terminal_matches_eval() {
    let assemblies = [
        unit_sphere(),
        sphere_pair_union(),
        sphere_pair_intersection(),
        shell(),
        biconvex_singlet(),
        sphere_pair_union().scaled(3.0).translate(DVec3::new(0.0, 1.0, 0.0)),
    ];

    for assembly in &assemblies {
        for point in probe_points() {
            let (_, d_root) = traverse_collect(assembly, point);
            assert_abs_diff_eq!(d_root, eval(assembly, point), epsilon = 1e-12);
        }
    }
}

#[test]
fn test_traverse_visits_all_leaves_postorder() {
    let singlet = biconvex_singlet();
    let (items, _) = traverse_collect(&singlet, pos(0.0, 0.0, 2.5));

    // Three primitives then the intersection root.
    assert_eq!(items.len(), 4);
    assert!(items[..3].iter().all(|(s, _)| s.is_primitive()));
    assert!(!items[3].0.is_primitive());
}

#[test]
fn test_identify_primitive_isdb() {
    let sphere = unit_sphere();
    for point in probe_points() {
        let isdb = identify(&sphere, point);
        assert!(std::ptr::eq(isdb.surface, &sphere));
        assert_eq!(isdb.face, 0);
        assert_abs_diff_eq!(isdb.d, eval(&sphere, point), epsilon = 1e-15);
    }
}

#[test]
fn test_identify_matches_argmin_path() {
    let pair = sphere_pair_union();
    for point in probe_points() {
        let isdb = identify(&pair, point);
        // The reported distance is the union's distance.
        assert_abs_diff_eq!(isdb.d, eval(&pair, point), epsilon = 1e-12);
        assert!(isdb.surface.is_primitive());
    }
}

// ============================================================================
// Lens assembly end-to-end
// ============================================================================

#[test]
fn test_singlet_interior_and_exterior() {
    let lens = biconvex_singlet();

    // Center of the lens body.
    assert!(eval(&lens, pos(0.0, 0.0, 2.5)) < 0.0);
    // In front of the front cap.
    assert!(eval(&lens, pos(0.0, 0.0, -1.0)) > 0.0);
    // Behind the back cap.
    assert!(eval(&lens, pos(0.0, 0.0, 6.0)) > 0.0);
    // Beyond the aperture.
    assert!(eval(&lens, pos(20.0, 0.0, 2.5)) > 0.0);
}

#[test]
fn test_singlet_identify_front_cap() {
    let lens = biconvex_singlet();
    let Surface::Intersection { children } = &lens else {
        panic!("expected intersection");
    };

    // Just in front of the vertex the front cap governs.
    let isdb = identify(&lens, pos(0.0, 0.0, -0.05));
    assert!(std::ptr::eq(isdb.surface, children[0].as_ref()));
}

#[test]
fn test_normal_points_along_gradient() {
    let pair = sphere_pair_union();
    let n = normal(&pair, pos(-3.0, 0.0, 0.0), 1e-6);
    assert_abs_diff_eq!(n.x, -1.0, epsilon = 1e-4);
    assert_eq!(n.w, 0.0);

    // Unit length by construction.
    assert_abs_diff_eq!(n.length(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_sag_query_on_lens_face() {
    let front = Surface::spherical_sag(50.0, 1.0, DVec3::ZERO).unwrap();
    let z0 = sag(&front, DVec2::ZERO).unwrap();
    assert_abs_diff_eq!(z0, 0.0, epsilon = 1e-15);

    // Paraxial sag ~ rho^2 / (2 roc).
    let z = sag(&front, DVec2::new(5.0, 0.0)).unwrap();
    assert_abs_diff_eq!(z, 25.0 / 100.0, epsilon = 1e-3);

    // Not a sag profile: unsupported.
    assert!(sag(&unit_sphere(), DVec2::ZERO).is_err());
}
