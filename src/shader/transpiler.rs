//! GLSL transpiler: Surface trees to fragment-program text
//!
//! The emitted `sdb_eval` performs the same structural recursion as the
//! scalar evaluator, flattened into SSA-style numbered locals. Constants
//! are folded at transpile time (unit affine scales are skipped, the
//! conic's `side / lipschitz` collapses to one multiply), and the radial
//! selector lowers to an `if/else` chain so the generated program
//! evaluates exactly the child the scalar path would.
//!
//! Author: Moroya Sakamoto

use std::fmt::Write;

use crate::types::Surface;

/// Skip emitting operations that fold to identity
const FOLD_EPSILON: f64 = 1e-12;

/// Generated GLSL evaluator
#[derive(Debug, Clone)]
pub struct GlslShader {
    /// The generated GLSL source of `float sdb_eval(vec4 x)`
    pub source: String,
    /// GLSL version used by the shader wrappers (default: 450)
    pub version: u32,
}

impl GlslShader {
    /// Transpile a Surface tree to a GLSL evaluator
    pub fn transpile(surface: &Surface) -> Self {
        Self::transpile_with_version(surface, 450)
    }

    /// Transpile with a specific GLSL version
    pub fn transpile_with_version(surface: &Surface, version: u32) -> Self {
        let mut transpiler = GlslTranspiler { var_counter: 0 };
        let mut body = String::new();
        let result = transpiler.emit(surface, "x", "    ", &mut body);

        let mut source = String::new();
        source.push_str("float sdb_eval(vec4 x) {\n");
        source.push_str(&body);
        writeln!(source, "    return {};", result).unwrap();
        source.push_str("}\n");

        GlslShader { source, version }
    }

    /// Get the evaluator function only (for embedding in custom shaders)
    pub fn eval_function(&self) -> &str {
        &self.source
    }

    /// Generate a complete fragment shader that sphere traces the
    /// assembly, for the viewer window
    pub fn to_fragment_shader(&self) -> String {
        format!(
            r#"#version {}

// lenstrace generated fragment shader

precision highp float;

uniform vec2 iResolution;
uniform vec3 iEye;

out vec4 fragColor;

{}

vec3 sdb_normal(vec3 p) {{
    const float h = 1e-4;
    const vec2 k = vec2(1.0, -1.0);
    return normalize(
        k.xxx * sdb_eval(vec4(p + k.xxx * h, 1.0)) +
        k.xyy * sdb_eval(vec4(p + k.xyy * h, 1.0)) +
        k.yxy * sdb_eval(vec4(p + k.yxy * h, 1.0)) +
        k.yyx * sdb_eval(vec4(p + k.yyx * h, 1.0))
    );
}}

void main() {{
    vec2 uv = (gl_FragCoord.xy - 0.5 * iResolution.xy) / iResolution.y;

    vec3 ro = iEye;
    vec3 rd = normalize(vec3(uv, -1.5));

    const float EPS = 1e-4;
    const float T_MAX = 100.0;

    float t = 0.0;
    float d = T_MAX;
    for (int i = 0; i < 256; i++) {{
        vec3 p = ro + rd * t;
        d = sdb_eval(vec4(p, 1.0));
        if (abs(d) < EPS || t > T_MAX) break;
        t += max(d, 0.5 * EPS);
    }}

    vec3 col = vec3(0.0);
    if (abs(d) < EPS) {{
        vec3 p = ro + rd * t;
        vec3 n = sdb_normal(p);
        vec3 light = normalize(vec3(1.0, 1.0, 1.0));
        float diff = max(dot(n, light), 0.0);
        col = vec3(0.7, 0.75, 0.8) * (0.2 + 0.8 * diff);
    }}

    fragColor = vec4(col, 1.0);
}}
"#,
            self.version, self.source
        )
    }
}

/// Internal transpiler state
struct GlslTranspiler {
    /// Counter for unique local names
    var_counter: usize,
}

/// Format an f64 as a GLSL float literal
fn lit(value: f64) -> String {
    format!("{:.9}", value)
}

impl GlslTranspiler {
    fn next_var(&mut self, prefix: &str) -> String {
        let var = format!("{}{}", prefix, self.var_counter);
        self.var_counter += 1;
        var
    }

    /// Emit statements evaluating `surface` at the point held in
    /// `point`, returning the name of the resulting distance local
    fn emit(&mut self, surface: &Surface, point: &str, indent: &str, code: &mut String) -> String {
        match surface {
            // ============ Primitives ============
            Surface::Plane { normal, constant } => {
                let var = self.next_var("d");
                writeln!(
                    code,
                    "{}float {} = dot({}.xyz, vec3({}, {}, {})) + {};",
                    indent,
                    var,
                    point,
                    lit(normal.x),
                    lit(normal.y),
                    lit(normal.z),
                    lit(*constant)
                )
                .unwrap();
                var
            }

            Surface::Sphere { center, radius } => {
                let var = self.next_var("d");
                writeln!(
                    code,
                    "{}float {} = length({}.xyz - vec3({}, {}, {})) - {};",
                    indent,
                    var,
                    point,
                    lit(center.x),
                    lit(center.y),
                    lit(center.z),
                    lit(*radius)
                )
                .unwrap();
                var
            }

            Surface::InfiniteCylinder { center, radius } => {
                let var = self.next_var("d");
                writeln!(
                    code,
                    "{}float {} = length({}.xy - vec2({}, {})) - {};",
                    indent,
                    var,
                    point,
                    lit(center.x),
                    lit(center.y),
                    lit(*radius)
                )
                .unwrap();
                var
            }

            Surface::InfiniteRectangularPrism { center, half_size } => {
                let q = self.next_var("q");
                let var = self.next_var("d");
                writeln!(
                    code,
                    "{}vec2 {} = abs({}.xy - vec2({}, {})) - vec2({}, {});",
                    indent,
                    q,
                    point,
                    lit(center.x),
                    lit(center.y),
                    lit(half_size.x),
                    lit(half_size.y)
                )
                .unwrap();
                writeln!(code, "{}float {} = max({}.x, {}.y);", indent, var, q, q).unwrap();
                var
            }

            Surface::SphericalSag { roc, side, vertex } => {
                let var = self.next_var("d");
                writeln!(
                    code,
                    "{}float {} = {} * (length({}.xyz - vec3({}, {}, {})) - {});",
                    indent,
                    var,
                    lit(side * roc.signum()),
                    point,
                    lit(vertex.x),
                    lit(vertex.y),
                    lit(vertex.z + roc),
                    lit(roc.abs())
                )
                .unwrap();
                var
            }

            Surface::ZemaxConic {
                roc,
                radius,
                side,
                kappa,
                alphas,
                vertex,
                lipschitz,
            } => {
                let c = 1.0 / roc;
                let rho = self.next_var("rho");
                let z = self.next_var("z");
                let var = self.next_var("d");
                writeln!(
                    code,
                    "{}float {} = min(length({}.xy - vec2({}, {})), {});",
                    indent,
                    rho,
                    point,
                    lit(vertex.x),
                    lit(vertex.y),
                    lit(*radius)
                )
                .unwrap();
                let mut sag_expr = format!(
                    "{} * {rho} * {rho} / (1.0 + sqrt(1.0 - {} * {rho} * {rho}))",
                    lit(c),
                    lit(kappa * c * c),
                );
                for (i, alpha) in alphas.iter().enumerate() {
                    write!(
                        sag_expr,
                        " + {} * pow({rho}, {}.0)",
                        lit(*alpha),
                        2 * i + 4
                    )
                    .unwrap();
                }
                writeln!(code, "{}float {} = {};", indent, z, sag_expr).unwrap();
                // side / lipschitz folds into one multiply
                writeln!(
                    code,
                    "{}float {} = {} * ({} + {} - {}.z);",
                    indent,
                    var,
                    lit(side / lipschitz),
                    lit(vertex.z),
                    z,
                    point
                )
                .unwrap();
                var
            }

            // ============ Combinators ============
            Surface::Union { children } => {
                self.emit_fold(children, "min", point, indent, code)
            }

            Surface::Intersection { children } => {
                self.emit_fold(children, "max", point, indent, code)
            }

            Surface::Difference { a, b } => {
                let d_a = self.emit(a, point, indent, code);
                let d_b = self.emit(b, point, indent, code);
                let var = self.next_var("d");
                writeln!(code, "{}float {} = max({}, -{});", indent, var, d_a, d_b).unwrap();
                var
            }

            Surface::Affine { child, inv, scale } => {
                let x = self.next_var("x");
                let cols = inv.to_cols_array();
                let mat: Vec<String> = cols.iter().map(|&v| lit(v)).collect();
                writeln!(
                    code,
                    "{}vec4 {} = mat4({}) * {};",
                    indent,
                    x,
                    mat.join(", "),
                    point
                )
                .unwrap();
                let d_child = self.emit(child, &x, indent, code);
                if (scale - 1.0).abs() < FOLD_EPSILON {
                    return d_child;
                }
                let var = self.next_var("d");
                writeln!(
                    code,
                    "{}float {} = {} * {};",
                    indent,
                    var,
                    d_child,
                    lit(*scale)
                )
                .unwrap();
                var
            }

            Surface::SegmentedRadial {
                children,
                radii,
                vertex,
            } => {
                if radii.is_empty() {
                    // Degenerate single-zone partition: the child covers
                    // the whole plane.
                    if let Some(only) = children.first() {
                        return self.emit(only, point, indent, code);
                    }
                }
                let rho = self.next_var("rho");
                let var = self.next_var("d");
                writeln!(
                    code,
                    "{}float {} = length({}.xy - vec2({}, {}));",
                    indent,
                    rho,
                    point,
                    lit(vertex.x),
                    lit(vertex.y)
                )
                .unwrap();
                writeln!(code, "{}float {};", indent, var).unwrap();
                let inner = format!("{}    ", indent);
                for (i, child) in children.iter().enumerate() {
                    match radii.get(i) {
                        Some(r) => {
                            let keyword = if i == 0 { "if" } else { "} else if" };
                            writeln!(code, "{}{} ({} <= {}) {{", indent, keyword, rho, lit(*r))
                                .unwrap();
                        }
                        None => writeln!(code, "{}}} else {{", indent).unwrap(),
                    }
                    let d_child = self.emit(child, point, &inner, code);
                    writeln!(code, "{}{} = {};", inner, var, d_child).unwrap();
                }
                writeln!(code, "{}}}", indent).unwrap();
                var
            }

            Surface::FiniteRectangularArray {
                child,
                pitch,
                size,
                corner,
            } => {
                let u = self.next_var("u");
                let cell = self.next_var("c");
                let x = self.next_var("x");
                writeln!(
                    code,
                    "{}vec2 {} = clamp(floor(({}.xy - vec2({}, {})) / vec2({}, {})), vec2(0.0), vec2({}, {}));",
                    indent,
                    u,
                    point,
                    lit(corner.x),
                    lit(corner.y),
                    lit(pitch.x),
                    lit(pitch.y),
                    lit(f64::from(size.x) - 1.0),
                    lit(f64::from(size.y) - 1.0)
                )
                .unwrap();
                writeln!(
                    code,
                    "{}vec2 {} = vec2({}, {}) + ({} + 0.5) * vec2({}, {});",
                    indent,
                    cell,
                    lit(corner.x),
                    lit(corner.y),
                    u,
                    lit(pitch.x),
                    lit(pitch.y)
                )
                .unwrap();
                writeln!(
                    code,
                    "{}vec4 {} = vec4({}.xy - {}, {}.z, {}.w);",
                    indent, x, point, cell, point, point
                )
                .unwrap();
                self.emit(child, &x, indent, code)
            }
        }
    }

    /// Emit children and fold their distances pairwise with `func`
    fn emit_fold(
        &mut self,
        children: &[std::sync::Arc<Surface>],
        func: &str,
        point: &str,
        indent: &str,
        code: &mut String,
    ) -> String {
        let mut result: Option<String> = None;
        for child in children {
            let d_child = self.emit(child, point, indent, code);
            result = Some(match result {
                None => d_child,
                Some(acc) => {
                    let var = self.next_var("d");
                    writeln!(
                        code,
                        "{}float {} = {}({}, {});",
                        indent, var, func, acc, d_child
                    )
                    .unwrap();
                    var
                }
            });
        }
        result.unwrap_or_else(|| {
            // An empty compound never passes construction; emit an inert
            // constant rather than invalid GLSL if one sneaks through.
            let var = self.next_var("d");
            let value = if func == "min" { "1e30" } else { "-1e30" };
            writeln!(code, "{}float {} = {};", indent, var, value).unwrap();
            var
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DVec2, DVec3};

    #[test]
    fn test_sphere_shader() {
        let shader = GlslShader::transpile(&Surface::sphere(DVec3::ZERO, 1.0));
        assert!(shader.source.contains("float sdb_eval(vec4 x)"));
        assert!(shader.source.contains("length(x.xyz"));
        assert!(shader.source.contains("return d0;"));
    }

    #[test]
    fn test_union_folds_min() {
        let tree = Surface::sphere(DVec3::ZERO, 1.0)
            .union(Surface::sphere(DVec3::new(2.0, 0.0, 0.0), 1.0));
        let shader = GlslShader::transpile(&tree);
        assert!(shader.source.contains("min(d0, d1)"));
    }

    #[test]
    fn test_difference_negates_second() {
        let tree = Surface::sphere(DVec3::ZERO, 2.0).subtract(Surface::sphere(DVec3::ZERO, 1.0));
        let shader = GlslShader::transpile(&tree);
        assert!(shader.source.contains("max(d0, -d1)"));
    }

    #[test]
    fn test_rigid_affine_folds_scale() {
        let tree = Surface::sphere(DVec3::ZERO, 1.0).translate(DVec3::new(1.0, 0.0, 0.0));
        let shader = GlslShader::transpile(&tree);
        assert!(shader.source.contains("mat4("));
        // Unit scale: no trailing multiply is emitted.
        assert!(!shader.source.contains("* 1.000000000;"));
    }

    #[test]
    fn test_segmented_radial_branches() {
        let seg = Surface::segmented_radial(
            vec![
                Surface::plane(DVec3::Z, 0.0),
                Surface::plane(DVec3::Z, -1.0),
            ],
            vec![1.0],
            DVec2::ZERO,
        )
        .unwrap();
        let shader = GlslShader::transpile(&seg);
        assert!(shader.source.contains("if (rho0 <= 1.000000000) {"));
        assert!(shader.source.contains("} else {"));
    }

    #[test]
    fn test_array_emits_cell_map() {
        let array = Surface::rectangular_array(
            Surface::sphere(DVec3::ZERO, 0.4),
            DVec2::splat(2.0),
            glam::UVec2::new(3, 3),
            DVec2::splat(-3.0),
        )
        .unwrap();
        let shader = GlslShader::transpile(&array);
        assert!(shader.source.contains("clamp(floor("));
    }

    #[test]
    fn test_fragment_shader_wrapper() {
        let shader = GlslShader::transpile(&Surface::sphere(DVec3::ZERO, 1.0));
        let fragment = shader.to_fragment_shader();
        assert!(fragment.starts_with("#version 450"));
        assert!(fragment.contains("sdb_normal"));
        assert!(fragment.contains("void main()"));
    }

    #[test]
    fn test_conic_shader_has_lipschitz_fold() {
        let conic =
            Surface::zemax_conic(2.0, 1.0, 1.0, 1.0, vec![0.01], DVec3::ZERO).unwrap();
        let shader = GlslShader::transpile(&conic);
        assert!(shader.source.contains("sqrt(1.0 -"));
        assert!(shader.source.contains("pow(rho0, 4.0)"));
    }
}
