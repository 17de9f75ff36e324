//! Sphere tracing (Deep Fried Edition)
//!
//! Marches rays through a Surface tree by stepping the current signed
//! distance bound. Because the bound never overestimates the distance to
//! the zero set, a ray can never cross the surface inside a step.
//!
//! # Deep Fried Optimizations
//! - **Constant-space marching**: the loop keeps two samples, nothing else.
//! - **Step floor**: `max(d, epsilon/2)` kills zero-step stalls when the
//!   bound dips to zero between samples.
//! - **Batch tracing**: rayon `par_iter` over ray bundles.
//!
//! Author: Moroya Sakamoto

use glam::DVec4;
use rayon::prelude::*;
use thiserror::Error;

use crate::eval::eval;
use crate::types::{Ray, Surface};

/// Sphere trace precondition errors
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TraceError {
    /// The start point is not a homogeneous position
    #[error("ray origin must have w = 1, got w = {0}")]
    OriginNotPosition(f64),

    /// The direction is not a homogeneous direction
    #[error("ray direction must have w = 0, got w = {0}")]
    DirectionNotDirection(f64),

    /// The ray range is not positive
    #[error("t_max must be positive, got {0}")]
    NonPositiveRange(f64),

    /// The hit tolerance is not positive
    #[error("epsilon must be positive, got {0}")]
    NonPositiveEpsilon(f64),
}

/// How a sphere trace stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceOutcome {
    /// The surface was reached (within epsilon; in through mode, the ray
    /// crossed the zero set)
    Hit,
    /// The iteration cap was reached without a hit
    MaxSteps,
    /// The ray parameter exceeded `t_max`
    OutOfRange,
}

/// One recorded marching sample
#[derive(Debug, Clone, Copy)]
pub struct TraceStep {
    /// Signed distance bound at the sample
    pub d: f64,
    /// Ray parameter of the sample
    pub t: f64,
    /// Sample position
    pub x: DVec4,
}

/// Sphere trace configuration
#[derive(Debug, Clone, Copy)]
pub struct TraceConfig {
    /// Maximum ray parameter, in units of the direction's length
    pub t_max: f64,
    /// Hit tolerance
    pub epsilon: f64,
    /// Iteration cap
    pub max_steps: u32,
    /// Marching orientation; inferred from the start point's bound when
    /// `None`, so the ray always marches toward the zero set from the
    /// side it starts on
    pub sign: Option<f64>,
    /// Require the ray to cross the zero set before terminating; used to
    /// trace into a solid and find the exit point
    pub through: bool,
}

impl TraceConfig {
    /// Create a configuration with inferred sign and first-hit
    /// termination
    pub fn new(t_max: f64, epsilon: f64, max_steps: u32) -> Self {
        TraceConfig {
            t_max,
            epsilon,
            max_steps,
            sign: None,
            through: false,
        }
    }

    /// Fix the marching orientation instead of inferring it
    #[must_use]
    pub fn with_sign(mut self, sign: f64) -> Self {
        self.sign = Some(sign);
        self
    }

    /// Terminate only after the ray crosses the zero set
    #[must_use]
    pub fn through(mut self) -> Self {
        self.through = true;
        self
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        TraceConfig {
            t_max: 100.0,
            epsilon: 1e-6,
            max_steps: 256,
            sign: None,
            through: false,
        }
    }
}

/// Result of a sphere trace
///
/// `d`, `t`, `x` hold the final sample; `last` the one before it (`None`
/// when the trace stopped at step 0). `xm`/`tm` are a weighted midpoint
/// of the two samples, a cheap refinement of the crossing estimate.
/// `outcome` classifies the stop; callers needing finer distinctions
/// (step-0 hit, say) inspect `steps`, `t`, `d` and `last` directly.
#[derive(Debug, Clone, Copy)]
pub struct SphereTrace {
    /// Signed distance bound at the final position
    pub d: f64,
    /// Final ray parameter
    pub t: f64,
    /// Final position
    pub x: DVec4,
    /// Number of marching steps executed
    pub steps: u32,
    /// The sample before the final one
    pub last: Option<TraceStep>,
    /// Weighted midpoint position between `last` and the final sample
    pub xm: DVec4,
    /// Weighted midpoint ray parameter
    pub tm: f64,
    /// How the trace stopped
    pub outcome: TraceOutcome,
}

impl SphereTrace {
    /// True when the trace terminated on the surface
    pub fn hit(&self) -> bool {
        self.outcome == TraceOutcome::Hit
    }
}

/// March a ray against a Surface tree
///
/// The ray is `x0 + t v` with `x0.w == 1`, `v.w == 0`; `v` need not be
/// unit length; parameters are measured in units of `|v|`. Each step
/// advances by the current bound (floored at `epsilon/2`), which cannot
/// overshoot the surface. Termination:
///
/// - *through mode*: the bound goes negative while the previous sample
///   sat inside the epsilon band, meaning the ray crossed the zero set.
/// - otherwise: the bound falls to `epsilon` or below.
/// - the step cap or `t_max` is exhausted (a miss, not an error).
pub fn sphere_trace(
    surface: &Surface,
    x0: DVec4,
    v: DVec4,
    config: &TraceConfig,
) -> Result<SphereTrace, TraceError> {
    if x0.w != 1.0 {
        return Err(TraceError::OriginNotPosition(x0.w));
    }
    if v.w != 0.0 {
        return Err(TraceError::DirectionNotDirection(v.w));
    }
    if !(config.t_max > 0.0) {
        return Err(TraceError::NonPositiveRange(config.t_max));
    }
    if !(config.epsilon > 0.0) {
        return Err(TraceError::NonPositiveEpsilon(config.epsilon));
    }

    let epsilon = config.epsilon;
    let sign = match config.sign {
        Some(s) => s.signum(),
        None => eval(surface, x0).signum(),
    };

    let mut t = 0.0;
    let mut steps = 0u32;
    let mut x = x0;
    let mut last: Option<TraceStep> = None;
    let mut dp;

    let outcome = loop {
        dp = eval(surface, x) * sign;
        if dp < 0.0 && last.map_or(false, |step| step.d * sign <= epsilon) {
            // Crossed the zero set out of the epsilon band. Only
            // reachable in through mode: otherwise the band itself
            // already terminated the previous iteration.
            debug_assert!(config.through);
            debug_assert!(dp >= -epsilon, "bound property violated: {dp}");
            break TraceOutcome::Hit;
        } else if dp <= epsilon && !config.through {
            break TraceOutcome::Hit;
        } else if steps == config.max_steps {
            break TraceOutcome::MaxSteps;
        }
        last = Some(TraceStep {
            d: dp * sign,
            t,
            x,
        });
        // With infinite precision the smallest useful step would be
        // epsilon; the floor keeps the march moving when dp dips to zero.
        t += dp.max(epsilon * 0.5);
        x = x0 + v * t;
        steps += 1;
        if t > config.t_max {
            break TraceOutcome::OutOfRange;
        }
    };

    let d = dp * sign;
    let (xm, tm) = match last {
        Some(step) => {
            let w_x = d.abs();
            let w_last = step.d.abs();
            let total = w_x + w_last;
            if total > 0.0 {
                (
                    (x * w_x + step.x * w_last) / total,
                    (t * w_x + step.t * w_last) / total,
                )
            } else {
                (x, t)
            }
        }
        None => (x, t),
    };

    Ok(SphereTrace {
        d,
        t,
        x,
        steps,
        last,
        xm,
        tm,
        outcome,
    })
}

/// Trace a bundle of rays sequentially
pub fn sphere_trace_batch(
    surface: &Surface,
    rays: &[Ray],
    config: &TraceConfig,
) -> Result<Vec<SphereTrace>, TraceError> {
    rays.iter()
        .map(|ray| sphere_trace(surface, ray.origin, ray.direction, config))
        .collect()
}

/// Trace a bundle of rays in parallel
///
/// Safe because trees are immutable: every worker reads the same tree
/// without synchronization.
pub fn sphere_trace_batch_parallel(
    surface: &Surface,
    rays: &[Ray],
    config: &TraceConfig,
) -> Result<Vec<SphereTrace>, TraceError> {
    rays.par_iter()
        .map(|ray| sphere_trace(surface, ray.origin, ray.direction, config))
        .collect()
}
