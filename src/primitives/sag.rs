//! Sag profile primitives: spherical caps and conic aspheres
//!
//! A sag profile is a surface `z = vertex.z + sag(rho)` over the
//! transverse radius `rho`, the shape of a refracting lens face. The
//! spherical cap reuses the exact sphere distance; the conic profile
//! divides the axial offset by a Lipschitz factor so the result stays a
//! distance bound over the whole aperture.
//!
//! Author: Moroya Sakamoto

use glam::{DVec2, DVec3};

/// Sag of a spherical profile at transverse radius `rho`
///
/// Uses the numerically stable form `rho^2 / (roc (1 + sqrt(1 - (rho/roc)^2)))`,
/// valid for either sign of `roc` out to `|rho| = |roc|`.
#[inline]
pub fn sag_spherical(rho: f64, roc: f64) -> f64 {
    let u = 1.0 - (rho / roc) * (rho / roc);
    rho * rho / (roc * (1.0 + u.sqrt()))
}

/// Sag of a conic profile with even aspheric terms (Zemax convention)
///
/// `sag(rho) = c rho^2 / (1 + sqrt(1 - kappa c^2 rho^2)) + sum_i alphas[i] rho^(2i+4)`
/// with `c = 1/roc`. `kappa = 1` reduces to [`sag_spherical`].
#[inline]
pub fn sag_conic(rho: f64, roc: f64, kappa: f64, alphas: &[f64]) -> f64 {
    let c = 1.0 / roc;
    let u = 1.0 - kappa * c * c * rho * rho;
    let mut sag = c * rho * rho / (1.0 + u.sqrt());
    let rho2 = rho * rho;
    let mut power = rho2 * rho2;
    for alpha in alphas {
        sag += alpha * power;
        power *= rho2;
    }
    sag
}

/// Upper bound on `|d sag / d rho|` over the aperture `[0, radius]`
///
/// Returns `None` when the conic term is undefined somewhere inside the
/// aperture (`kappa c^2 radius^2 >= 1`). The slope of both the conic term
/// and each aspheric monomial is maximal at the aperture edge, so the
/// edge values bound the whole aperture.
pub fn conic_gradient_bound(roc: f64, radius: f64, kappa: f64, alphas: &[f64]) -> Option<f64> {
    let c = 1.0 / roc;
    let u = 1.0 - kappa * c * c * radius * radius;
    if u <= 0.0 {
        return None;
    }
    let mut grad = (c * radius).abs() / u.sqrt();
    let mut power = radius * radius * radius;
    for (i, alpha) in alphas.iter().enumerate() {
        let exponent = 2 * i as i32 + 4;
        grad += f64::from(exponent) * alpha.abs() * power;
        power *= radius * radius;
    }
    Some(grad)
}

/// Signed distance bound for a spherical refracting cap
///
/// The zero set is the sag surface of a sphere whose center of curvature
/// sits at `vertex + (0, 0, roc)`; `side = +1` places the solid on the
/// +z side. Exact within the hemisphere around the vertex.
#[inline]
pub fn sdb_spherical_sag(x: DVec3, roc: f64, side: f64, vertex: DVec3) -> f64 {
    let center = vertex + DVec3::new(0.0, 0.0, roc);
    side * roc.signum() * ((x - center).length() - roc.abs())
}

/// Signed distance bound for a conic sag profile
///
/// The transverse radius is clamped to the aperture, the axial offset to
/// the sag is divided by the precomputed Lipschitz factor.
#[inline]
pub fn sdb_zemax_conic(
    x: DVec3,
    roc: f64,
    radius: f64,
    side: f64,
    kappa: f64,
    alphas: &[f64],
    vertex: DVec3,
    lipschitz: f64,
) -> f64 {
    let rho = (DVec2::new(x.x, x.y) - DVec2::new(vertex.x, vertex.y))
        .length()
        .min(radius);
    let z = vertex.z + sag_conic(rho, roc, kappa, alphas);
    side * (z - x.z) / lipschitz
}
