//! Scalar SDB evaluation
//!
//! Functions for evaluating Surface trees at homogeneous points:
//! signed distance bounds, active-leaf identification, tetrahedron
//! normals, and sag queries. The post-order walk lives in [`traverse`].
//!
//! `eval` is a structural recursion over the tree; recursion depth is
//! bounded by tree depth, and evaluation allocates nothing. Marked
//! `#[inline]` so small assemblies unroll.
//!
//! Author: Moroya Sakamoto

mod traversal;

pub use traversal::{traverse, traverse_collect};

use glam::{DVec2, DVec4};
use thiserror::Error;

use crate::operations::{
    affine_point, array_cell_point, radial_coordinate, sdb_difference, sdb_intersection,
    sdb_union, select_segment,
};
use crate::primitives::{
    sag_conic, sag_spherical, sdb_infinite_cylinder, sdb_infinite_rectangular_prism, sdb_plane,
    sdb_spherical_sag, sdb_sphere, sdb_zemax_conic,
};
use crate::types::Surface;

/// Default stencil half-width for [`normal`]
pub const DEFAULT_NORMAL_H: f64 = 1e-9;

/// Errors from partial evaluation operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    /// The operation has no handler for this surface kind
    #[error("operation not supported for this surface kind")]
    UnsupportedSurface,
}

/// Result of [`identify`]: the distance at a point together with the
/// leaf surface that governs it
#[derive(Debug, Clone, Copy)]
pub struct Isdb<'a> {
    /// Signed distance bound as seen through the compounds above the leaf
    pub d: f64,
    /// The governing leaf
    pub surface: &'a Surface,
    /// Face index on the leaf; 0 for every current primitive
    pub face: u32,
}

/// Evaluate the signed distance bound of a tree at a point
///
/// `x` is a homogeneous position (`x.w == 1`). Negative inside the
/// solid, positive outside, zero on the surface to numerical precision;
/// the magnitude never exceeds the true distance to the zero set.
#[inline]
pub fn eval(surface: &Surface, x: DVec4) -> f64 {
    debug_assert!(x.w == 1.0, "eval expects a homogeneous position");
    match surface {
        // === Primitives ===
        Surface::Plane { normal, constant } => sdb_plane(x.truncate(), *normal, *constant),
        Surface::Sphere { center, radius } => sdb_sphere(x.truncate(), *center, *radius),
        Surface::InfiniteCylinder { center, radius } => {
            sdb_infinite_cylinder(x.truncate(), *center, *radius)
        }
        Surface::InfiniteRectangularPrism { center, half_size } => {
            sdb_infinite_rectangular_prism(x.truncate(), *center, *half_size)
        }
        Surface::SphericalSag { roc, side, vertex } => {
            sdb_spherical_sag(x.truncate(), *roc, *side, *vertex)
        }
        Surface::ZemaxConic {
            roc,
            radius,
            side,
            kappa,
            alphas,
            vertex,
            lipschitz,
        } => sdb_zemax_conic(
            x.truncate(),
            *roc,
            *radius,
            *side,
            *kappa,
            alphas,
            *vertex,
            *lipschitz,
        ),

        // === Compounds ===
        Surface::Union { children } => children
            .iter()
            .map(|child| eval(child, x))
            .fold(f64::INFINITY, sdb_union),
        Surface::Intersection { children } => children
            .iter()
            .map(|child| eval(child, x))
            .fold(f64::NEG_INFINITY, sdb_intersection),
        Surface::Difference { a, b } => sdb_difference(eval(a, x), eval(b, x)),
        Surface::Affine { child, inv, scale } => eval(child, affine_point(inv, x)) * scale,
        Surface::SegmentedRadial {
            children,
            radii,
            vertex,
        } => {
            let rho = radial_coordinate(x, *vertex);
            let index = select_segment(rho, radii).min(children.len() - 1);
            eval(&children[index], x)
        }
        Surface::FiniteRectangularArray {
            child,
            pitch,
            size,
            corner,
        } => eval(child, array_cell_point(x, *pitch, *size, *corner)),
    }
}

/// Identify the leaf surface governing the distance at a point
///
/// For a primitive this is the primitive itself with `face = 0`. Unions
/// take the child of minimum distance, intersections the maximum, with
/// ties broken toward the lowest-indexed child. A difference returns
/// `a`'s leaf when `d_a >= -d_b` and otherwise `b`'s leaf with the
/// distance negated, so the reported `d` is always the one seen through
/// the difference. Affine nodes pre-transform the point and scale the
/// child's distance; radial and array nodes delegate to the selected
/// child.
pub fn identify<'a>(surface: &'a Surface, x: DVec4) -> Isdb<'a> {
    match surface {
        Surface::Union { children } => {
            let mut best: Option<Isdb<'a>> = None;
            for child in children {
                let isdb = identify(child, x);
                best = match best {
                    Some(current) if current.d <= isdb.d => Some(current),
                    _ => Some(isdb),
                };
            }
            best.unwrap_or(Isdb {
                d: f64::INFINITY,
                surface,
                face: 0,
            })
        }
        Surface::Intersection { children } => {
            let mut best: Option<Isdb<'a>> = None;
            for child in children {
                let isdb = identify(child, x);
                best = match best {
                    Some(current) if current.d >= isdb.d => Some(current),
                    _ => Some(isdb),
                };
            }
            best.unwrap_or(Isdb {
                d: f64::NEG_INFINITY,
                surface,
                face: 0,
            })
        }
        Surface::Difference { a, b } => {
            let isdb_a = identify(a, x);
            let isdb_b = identify(b, x);
            if isdb_a.d >= -isdb_b.d {
                isdb_a
            } else {
                Isdb {
                    d: -isdb_b.d,
                    ..isdb_b
                }
            }
        }
        Surface::Affine { child, inv, scale } => {
            let mut isdb = identify(child, affine_point(inv, x));
            isdb.d *= scale;
            isdb
        }
        Surface::SegmentedRadial {
            children,
            radii,
            vertex,
        } => {
            let rho = radial_coordinate(x, *vertex);
            let index = select_segment(rho, radii).min(children.len() - 1);
            identify(&children[index], x)
        }
        Surface::FiniteRectangularArray {
            child,
            pitch,
            size,
            corner,
        } => identify(child, array_cell_point(x, *pitch, *size, *corner)),

        primitive => Isdb {
            d: eval(primitive, x),
            surface: primitive,
            face: 0,
        },
    }
}

/// Estimate the outward surface normal at a point
///
/// Four-point tetrahedron stencil: the gradient is assembled from the
/// bounds at `x + k h` for the four displacements
/// `(+1,+1,+1,0), (+1,-1,-1,0), (-1,+1,-1,0), (-1,-1,+1,0)`. The result
/// is a normalized homogeneous direction (`w == 0`).
/// [`DEFAULT_NORMAL_H`] is the contracted stencil width.
pub fn normal(surface: &Surface, x: DVec4, h: f64) -> DVec4 {
    let ks = [
        DVec4::new(1.0, 1.0, 1.0, 0.0),
        DVec4::new(1.0, -1.0, -1.0, 0.0),
        DVec4::new(-1.0, 1.0, -1.0, 0.0),
        DVec4::new(-1.0, -1.0, 1.0, 0.0),
    ];
    let mut gradient = DVec4::ZERO;
    for k in ks {
        gradient += k * eval(surface, x + k * h);
    }
    gradient.normalize()
}

/// Axial sag of a profile surface at a transverse 2-vector
///
/// Supported for the sag-profile primitives ([`Surface::SphericalSag`],
/// [`Surface::ZemaxConic`]); every other kind reports
/// [`EvalError::UnsupportedSurface`].
pub fn sag(surface: &Surface, xy: DVec2) -> Result<f64, EvalError> {
    match surface {
        Surface::SphericalSag { roc, vertex, .. } => {
            let rho = (xy - DVec2::new(vertex.x, vertex.y)).length();
            Ok(vertex.z + sag_spherical(rho, *roc))
        }
        Surface::ZemaxConic {
            roc,
            radius,
            kappa,
            alphas,
            vertex,
            ..
        } => {
            let rho = (xy - DVec2::new(vertex.x, vertex.y)).length().min(*radius);
            Ok(vertex.z + sag_conic(rho, *roc, *kappa, alphas))
        }
        _ => Err(EvalError::UnsupportedSurface),
    }
}
