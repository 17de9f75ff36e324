//! GLSL generation
//!
//! Emits a fragment-program evaluator for a Surface tree. The external
//! viewer consumes the generated source as an opaque string and sphere
//! traces it on the GPU; the generated `sdb_eval` agrees with the scalar
//! evaluator up to float precision and reordering.
//!
//! # Usage
//!
//! ```rust
//! use lenstrace::prelude::*;
//!
//! let lens = Surface::sphere(DVec3::ZERO, 1.0)
//!     .intersect(Surface::plane(DVec3::Z, 0.0));
//!
//! let shader = GlslShader::transpile(&lens);
//! assert!(shader.source.contains("float sdb_eval(vec4 x)"));
//!
//! // Complete fragment shader for a viewer window.
//! let fragment = shader.to_fragment_shader();
//! ```
//!
//! Author: Moroya Sakamoto

mod transpiler;

pub use transpiler::GlslShader;
