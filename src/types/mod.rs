//! Core types for lenstrace
//!
//! Defines the Surface tree structure and related types.
//!
//! Author: Moroya Sakamoto

use glam::{DMat4, DVec2, DVec3, UVec2};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

mod constructors;
mod containers;

pub use containers::Ray;

/// Category of a Surface variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceCategory {
    /// Leaf geometry nodes with closed-form distance bounds
    Primitive,
    /// Internal nodes that combine or re-map child surfaces
    Compound,
}

/// Errors raised while assembling a Surface tree
#[derive(Error, Debug)]
pub enum TreeError {
    /// A compound node was given no children
    #[error("compound node requires at least one child")]
    EmptyCompound,

    /// Segmented-radial radii count does not match the child count
    #[error("segmented radial needs children - 1 radii, got {children} children and {radii} radii")]
    RadiiCount {
        /// Number of children supplied
        children: usize,
        /// Number of radii supplied
        radii: usize,
    },

    /// Segmented-radial radii are not non-decreasing
    #[error("segmented radial radii must be non-decreasing")]
    RadiiOrder,

    /// The affine basis is not a rigid motion with uniform scale
    #[error("affine transform must be rigid or uniformly scaled, basis norms {0:?}")]
    NonUniformScale([f64; 3]),

    /// The affine transform cannot be inverted
    #[error("affine transform is singular")]
    SingularTransform,

    /// A sag profile was given an unusable radius of curvature
    #[error("sag profile requires a finite nonzero radius of curvature, got {0}")]
    InvalidCurvature(f64),

    /// The conic sag is undefined somewhere inside its aperture
    #[error("conic sag undefined at the aperture edge (roc {roc}, kappa {kappa}, radius {radius})")]
    InvalidConic {
        /// Radius of curvature at the vertex
        roc: f64,
        /// Conic parameter (1 = sphere)
        kappa: f64,
        /// Aperture radius
        radius: f64,
    },

    /// A rectangular array was given a zero extent
    #[error("rectangular array size must be at least 1 x 1, got {0} x {1}")]
    EmptyArray(u32, u32),
}

/// A node of a signed-distance-bound tree
///
/// Primitives are leaves with closed-form bounds; compounds combine child
/// surfaces. Positions are homogeneous 4-vectors (`w == 1`). Trees are
/// built once and never mutated by evaluation, so any number of threads
/// may query the same tree concurrently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Surface {
    // === Primitives ===
    /// Half-space with the solid on the negative side of the plane
    Plane {
        /// Unit outward normal
        normal: DVec3,
        /// Signed offset: the bound is `dot(normal, x) + constant`
        constant: f64,
    },

    /// Solid sphere
    Sphere {
        /// Sphere center
        center: DVec3,
        /// Sphere radius
        radius: f64,
    },

    /// Solid cylinder of infinite extent along the z axis
    InfiniteCylinder {
        /// Axis position in the xy plane
        center: DVec2,
        /// Cylinder radius
        radius: f64,
    },

    /// Rectangular prism of infinite extent along the z axis
    ///
    /// The bound is the Chebyshev-style `max` of the per-axis distances,
    /// which underestimates near corners as a distance bound must.
    InfiniteRectangularPrism {
        /// Cross-section center in the xy plane
        center: DVec2,
        /// Half-widths of the cross-section
        half_size: DVec2,
    },

    /// Spherical refracting cap
    ///
    /// The zero set is the sag surface `z = vertex.z + sag(rho)` of a
    /// sphere with vertex radius of curvature `roc`. `side = +1` places
    /// the solid on the +z side of the cap. Valid as a bound within the
    /// hemisphere; bound it transversely (e.g. with an
    /// [`Surface::InfiniteCylinder`]) as lens constructions do.
    SphericalSag {
        /// Radius of curvature at the vertex; the center of curvature
        /// sits at `vertex + (0, 0, roc)`
        roc: f64,
        /// +1.0 or -1.0, selecting which side of the cap is solid
        side: f64,
        /// Cap vertex
        vertex: DVec3,
    },

    /// Conic sag profile with even aspheric terms (Zemax convention)
    ///
    /// `sag(rho) = c rho^2 / (1 + sqrt(1 - kappa c^2 rho^2)) +
    /// sum_i alphas[i] rho^(2i + 4)` with `c = 1/roc`; `kappa = 1` is a
    /// sphere. The axial distance is divided by a Lipschitz factor
    /// computed at construction so the result never overestimates the
    /// true distance inside the aperture.
    ZemaxConic {
        /// Radius of curvature at the vertex
        roc: f64,
        /// Aperture radius; the transverse coordinate is clamped to it
        radius: f64,
        /// +1.0 or -1.0, selecting which side of the profile is solid
        side: f64,
        /// Conic parameter (1 = sphere, 0 = paraboloid)
        kappa: f64,
        /// Even aspheric coefficients for rho^4, rho^6, ...
        alphas: Vec<f64>,
        /// Profile vertex
        vertex: DVec3,
        /// Gradient bound `sqrt(1 + g^2)` over the aperture, cached at
        /// construction
        lipschitz: f64,
    },

    // === Compounds ===
    /// Union of child solids (minimum distance)
    Union {
        /// Child surfaces, at least one
        children: Vec<Arc<Surface>>,
    },

    /// Intersection of child solids (maximum distance)
    Intersection {
        /// Child surfaces, at least one
        children: Vec<Arc<Surface>>,
    },

    /// Difference `a - b` (`max(d_a, -d_b)`)
    Difference {
        /// Solid to subtract from
        a: Arc<Surface>,
        /// Solid to subtract
        b: Arc<Surface>,
    },

    /// Rigid or uniformly scaled affine placement of a child
    Affine {
        /// Child surface
        child: Arc<Surface>,
        /// Inverse of the forward transform, applied to query points
        inv: DMat4,
        /// Uniform scale factor multiplied back onto child distances
        scale: f64,
    },

    /// Radial partition of the xy plane into concentric zones
    ///
    /// Zone `i` (bounded by `radii[i]`) selects `children[i]`; beyond the
    /// outermost radius the last child applies.
    SegmentedRadial {
        /// One child per zone; `radii.len() + 1` children
        children: Vec<Arc<Surface>>,
        /// Non-decreasing zone boundaries
        radii: Vec<f64>,
        /// Center of the zones in the xy plane
        vertex: DVec2,
    },

    /// Finite rectangular tiling of a child in the xy plane
    ///
    /// Query points are re-mapped into the nearest cell of an
    /// `size.x x size.y` grid of pitch `pitch` whose first cell corner is
    /// at `corner`; the child is evaluated in cell-local coordinates.
    FiniteRectangularArray {
        /// Child surface, tiled per cell
        child: Arc<Surface>,
        /// Cell pitch along x and y
        pitch: DVec2,
        /// Number of cells along x and y
        size: UVec2,
        /// Corner of the first cell
        corner: DVec2,
    },
}

impl Surface {
    /// Returns the category of this variant
    pub fn category(&self) -> SurfaceCategory {
        match self {
            Surface::Plane { .. }
            | Surface::Sphere { .. }
            | Surface::InfiniteCylinder { .. }
            | Surface::InfiniteRectangularPrism { .. }
            | Surface::SphericalSag { .. }
            | Surface::ZemaxConic { .. } => SurfaceCategory::Primitive,

            Surface::Union { .. }
            | Surface::Intersection { .. }
            | Surface::Difference { .. }
            | Surface::Affine { .. }
            | Surface::SegmentedRadial { .. }
            | Surface::FiniteRectangularArray { .. } => SurfaceCategory::Compound,
        }
    }

    /// True for leaf geometry nodes
    pub fn is_primitive(&self) -> bool {
        self.category() == SurfaceCategory::Primitive
    }

    /// Count total nodes in the tree
    pub fn node_count(&self) -> u32 {
        match self {
            Surface::Union { children } | Surface::Intersection { children } => {
                1 + children.iter().map(|c| c.node_count()).sum::<u32>()
            }
            Surface::SegmentedRadial { children, .. } => {
                1 + children.iter().map(|c| c.node_count()).sum::<u32>()
            }
            Surface::Difference { a, b } => 1 + a.node_count() + b.node_count(),
            Surface::Affine { child, .. } | Surface::FiniteRectangularArray { child, .. } => {
                1 + child.node_count()
            }
            _ => 1,
        }
    }
}
