//! Post-order structural traversal
//!
//! Viewers attach per-node properties by walking every subsurface of an
//! assembly. [`traverse`] visits descendants before parents and hands the
//! caller `(surface, distance)` pairs as it goes; the return value is the
//! root's distance, which matches [`eval`] exactly. Spatial re-mapping
//! nodes (affine, array) and the radial selector contribute no entry of
//! their own; their children are what a viewer decorates.
//!
//! Author: Moroya Sakamoto

use glam::DVec4;

use crate::operations::{
    affine_point, array_cell_point, radial_coordinate, sdb_difference, select_segment,
};
use crate::types::Surface;

use super::eval;

/// Walk the tree depth-first, yielding `(surface, d)` for each node
///
/// Children are visited before their parent (post-order); the callback
/// may borrow the visited nodes for the lifetime of the tree. Returns the
/// root's signed distance bound.
pub fn traverse<'a, F>(surface: &'a Surface, x: DVec4, visit: &mut F) -> f64
where
    F: FnMut(&'a Surface, f64),
{
    match surface {
        Surface::Union { children } => {
            let mut d = f64::INFINITY;
            for child in children {
                d = d.min(traverse(child, x, visit));
            }
            visit(surface, d);
            d
        }
        Surface::Intersection { children } => {
            let mut d = f64::NEG_INFINITY;
            for child in children {
                d = d.max(traverse(child, x, visit));
            }
            visit(surface, d);
            d
        }
        Surface::Difference { a, b } => {
            let d_a = traverse(a, x, visit);
            let d_b = traverse(b, x, visit);
            let d = sdb_difference(d_a, d_b);
            visit(surface, d);
            d
        }
        Surface::Affine { child, inv, scale } => {
            traverse(child, affine_point(inv, x), visit) * scale
        }
        Surface::SegmentedRadial {
            children,
            radii,
            vertex,
        } => {
            // Every child is visited so listeners see all zones; the
            // returned distance is the radially selected child's.
            let rho = radial_coordinate(x, *vertex);
            let selected = select_segment(rho, radii).min(children.len() - 1);
            let mut d = f64::NAN;
            for (index, child) in children.iter().enumerate() {
                let d_child = traverse(child, x, visit);
                if index == selected {
                    d = d_child;
                }
            }
            d
        }
        Surface::FiniteRectangularArray {
            child,
            pitch,
            size,
            corner,
        } => traverse(child, array_cell_point(x, *pitch, *size, *corner), visit),

        primitive => {
            let d = eval(primitive, x);
            visit(primitive, d);
            d
        }
    }
}

/// Materialize a traversal into a vector of `(surface, d)` pairs
///
/// Returns the visited pairs in post-order together with the root's
/// distance. Streaming callers should prefer [`traverse`].
pub fn traverse_collect<'a>(surface: &'a Surface, x: DVec4) -> (Vec<(&'a Surface, f64)>, f64) {
    let mut items = Vec::new();
    let d = traverse(surface, x, &mut |s, d| items.push((s, d)));
    (items, d)
}
