//! Constructors and combinator methods for Surface
//!
//! Leaf builders are infallible; builders with structural invariants
//! (segmented radial, general affine, conic sag) return [`TreeError`].
//!
//! Author: Moroya Sakamoto

use glam::{DMat4, DVec2, DVec3, UVec2};
use std::sync::Arc;

use crate::primitives::conic_gradient_bound;

use super::{Surface, TreeError};

/// Relative tolerance for deciding that an affine basis is uniform
const UNIFORM_SCALE_TOL: f64 = 1e-9;

impl Surface {
    // === Primitive constructors ===

    /// Create a half-space; the solid occupies `dot(normal, x) + constant <= 0`
    #[must_use]
    #[inline]
    pub fn plane(normal: DVec3, constant: f64) -> Self {
        Surface::Plane {
            normal: normal.normalize(),
            constant,
        }
    }

    /// Create a solid sphere
    #[must_use]
    #[inline]
    pub fn sphere(center: DVec3, radius: f64) -> Self {
        Surface::Sphere { center, radius }
    }

    /// Create an infinite cylinder along the z axis
    #[must_use]
    #[inline]
    pub fn infinite_cylinder(center: DVec2, radius: f64) -> Self {
        Surface::InfiniteCylinder { center, radius }
    }

    /// Create an infinite rectangular prism along the z axis
    #[must_use]
    #[inline]
    pub fn infinite_rectangular_prism(center: DVec2, half_size: DVec2) -> Self {
        Surface::InfiniteRectangularPrism { center, half_size }
    }

    /// Create a spherical refracting cap
    ///
    /// `side > 0` places the solid on the +z side of the sag surface.
    pub fn spherical_sag(roc: f64, side: f64, vertex: DVec3) -> Result<Self, TreeError> {
        if !roc.is_finite() || roc == 0.0 {
            return Err(TreeError::InvalidCurvature(roc));
        }
        Ok(Surface::SphericalSag {
            roc,
            side: side.signum(),
            vertex,
        })
    }

    /// Create a conic sag profile with even aspheric terms
    ///
    /// The Lipschitz factor that keeps the axial distance a bound is
    /// computed here from the sag slope at the aperture edge.
    pub fn zemax_conic(
        roc: f64,
        radius: f64,
        side: f64,
        kappa: f64,
        alphas: Vec<f64>,
        vertex: DVec3,
    ) -> Result<Self, TreeError> {
        if !roc.is_finite() || roc == 0.0 {
            return Err(TreeError::InvalidCurvature(roc));
        }
        let grad = conic_gradient_bound(roc, radius, kappa, &alphas).ok_or(
            TreeError::InvalidConic { roc, kappa, radius },
        )?;
        Ok(Surface::ZemaxConic {
            roc,
            radius,
            side: side.signum(),
            kappa,
            alphas,
            vertex,
            lipschitz: (1.0 + grad * grad).sqrt(),
        })
    }

    // === Compound constructors ===

    /// Union of an arbitrary number of children
    pub fn union_of(children: Vec<Surface>) -> Result<Self, TreeError> {
        if children.is_empty() {
            return Err(TreeError::EmptyCompound);
        }
        Ok(Surface::Union {
            children: children.into_iter().map(Arc::new).collect(),
        })
    }

    /// Intersection of an arbitrary number of children
    pub fn intersection_of(children: Vec<Surface>) -> Result<Self, TreeError> {
        if children.is_empty() {
            return Err(TreeError::EmptyCompound);
        }
        Ok(Surface::Intersection {
            children: children.into_iter().map(Arc::new).collect(),
        })
    }

    /// Radial partition: `children[i]` applies inside `radii[i]`, the last
    /// child beyond the outermost radius
    pub fn segmented_radial(
        children: Vec<Surface>,
        radii: Vec<f64>,
        vertex: DVec2,
    ) -> Result<Self, TreeError> {
        if children.is_empty() {
            return Err(TreeError::EmptyCompound);
        }
        if radii.len() != children.len() - 1 {
            return Err(TreeError::RadiiCount {
                children: children.len(),
                radii: radii.len(),
            });
        }
        if radii.windows(2).any(|w| w[1] < w[0]) {
            return Err(TreeError::RadiiOrder);
        }
        Ok(Surface::SegmentedRadial {
            children: children.into_iter().map(Arc::new).collect(),
            radii,
            vertex,
        })
    }

    /// Place a child under a general affine transform
    ///
    /// `m` maps child coordinates to parent coordinates. It must be a
    /// rigid motion optionally composed with a uniform scale; anything
    /// else would break the distance bound property.
    pub fn affine(child: Surface, m: DMat4) -> Result<Self, TreeError> {
        let norms = [
            m.x_axis.truncate().length(),
            m.y_axis.truncate().length(),
            m.z_axis.truncate().length(),
        ];
        let scale = (norms[0] + norms[1] + norms[2]) / 3.0;
        if scale == 0.0 || !scale.is_finite() {
            return Err(TreeError::SingularTransform);
        }
        if norms
            .iter()
            .any(|&n| (n - scale).abs() > UNIFORM_SCALE_TOL * scale)
        {
            return Err(TreeError::NonUniformScale(norms));
        }
        if m.determinant().abs() < f64::EPSILON * scale.powi(3) {
            return Err(TreeError::SingularTransform);
        }
        Ok(Surface::Affine {
            child: Arc::new(child),
            inv: m.inverse(),
            scale,
        })
    }

    /// Tile a child over an `size.x x size.y` grid of the given pitch,
    /// with the first cell corner at `corner`
    pub fn rectangular_array(
        child: Surface,
        pitch: DVec2,
        size: UVec2,
        corner: DVec2,
    ) -> Result<Self, TreeError> {
        if size.x == 0 || size.y == 0 {
            return Err(TreeError::EmptyArray(size.x, size.y));
        }
        Ok(Surface::FiniteRectangularArray {
            child: Arc::new(child),
            pitch,
            size,
            corner,
        })
    }

    // === Chaining combinators ===

    /// Union with another surface
    #[must_use]
    pub fn union(self, other: Surface) -> Self {
        Surface::Union {
            children: vec![Arc::new(self), Arc::new(other)],
        }
    }

    /// Intersection with another surface
    #[must_use]
    pub fn intersect(self, other: Surface) -> Self {
        Surface::Intersection {
            children: vec![Arc::new(self), Arc::new(other)],
        }
    }

    /// Subtract another surface from this one
    #[must_use]
    pub fn subtract(self, other: Surface) -> Self {
        Surface::Difference {
            a: Arc::new(self),
            b: Arc::new(other),
        }
    }

    /// Translate by an offset (rigid placement)
    #[must_use]
    pub fn translate(self, offset: DVec3) -> Self {
        Surface::Affine {
            child: Arc::new(self),
            inv: DMat4::from_translation(-offset),
            scale: 1.0,
        }
    }

    /// Rotate about the z axis by `angle` radians (rigid placement)
    #[must_use]
    pub fn rotate_z(self, angle: f64) -> Self {
        Surface::Affine {
            child: Arc::new(self),
            inv: DMat4::from_rotation_z(-angle),
            scale: 1.0,
        }
    }

    /// Uniformly scale by a positive factor
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        debug_assert!(factor > 0.0);
        Surface::Affine {
            child: Arc::new(self),
            inv: DMat4::from_scale(DVec3::splat(1.0 / factor)),
            scale: factor,
        }
    }
}
