//! # lenstrace
//!
//! Signed distance bound (SDB) engine for axisymmetric optical assemblies.
//!
//! A lens train is modeled as a tree of [`Surface`] nodes: closed-form
//! primitives (planes, spheres, refracting caps, conic sag profiles) under
//! CSG combinators (union, intersection, difference, affine transforms,
//! radial segmentation, rectangular arrays). Every node supplies a *signed
//! distance bound*: negative inside the solid, positive outside, never
//! larger in magnitude than the true distance to the surface. The bound
//! property is what makes sphere tracing sound.
//!
//! ## Features
//!
//! - **Primitives**: plane, sphere, infinite cylinder, rectangular prism,
//!   spherical sag (refracting cap), Zemax-style conic sag
//! - **Combinators**: union, intersection, difference, affine,
//!   segmented-radial, finite rectangular array
//! - **Evaluation**: scalar distance, active-leaf identification,
//!   post-order traversal, tetrahedron-stencil normals
//! - **Ray analysis**: sphere tracing with signed and through-mode
//!   termination, batch tracing
//! - **Shader generation**: GLSL evaluator emission for GPU viewers
//!
//! ## Example
//!
//! ```rust
//! use lenstrace::prelude::*;
//!
//! // Two unit spheres joined into one solid.
//! let pair = Surface::sphere(DVec3::new(-2.0, 0.0, 0.0), 1.0)
//!     .union(Surface::sphere(DVec3::new(2.0, 0.0, 0.0), 1.0));
//!
//! // The midpoint is 1.0 away from either sphere.
//! let d = eval(&pair, DVec4::new(0.0, 0.0, 0.0, 1.0));
//! assert!((d - 1.0).abs() < 1e-12);
//!
//! // March a ray into the left sphere.
//! let config = TraceConfig::new(10.0, 1e-9, 100);
//! let x0 = DVec4::new(-5.0, 0.0, 0.0, 1.0);
//! let v = DVec4::new(1.0, 0.0, 0.0, 0.0);
//! let trace = sphere_trace(&pair, x0, v, &config).unwrap();
//! assert!((trace.t - 2.0).abs() < 1e-6);
//! ```
//!
//! Positions are homogeneous 4-vectors with `w == 1`, directions have
//! `w == 0`. All arithmetic is `f64`.
//!
//! Author: Moroya Sakamoto

#![warn(missing_docs)]

pub mod eval;
pub mod operations;
pub mod primitives;
pub mod shader;
pub mod trace;
pub mod types;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::eval::{
        eval, identify, normal, sag, traverse, traverse_collect, EvalError, Isdb,
        DEFAULT_NORMAL_H,
    };
    pub use crate::shader::GlslShader;
    pub use crate::trace::{
        sphere_trace, sphere_trace_batch, sphere_trace_batch_parallel, SphereTrace, TraceConfig,
        TraceError, TraceOutcome, TraceStep,
    };
    pub use crate::types::{Ray, Surface, SurfaceCategory, TreeError};
    pub use glam::{DMat4, DVec2, DVec3, DVec4};
}

// Re-exports for convenience
pub use eval::{eval, identify, traverse};
pub use trace::sphere_trace;
pub use types::Surface;
