//! Elevation functions over a position range.
//!
//! An edge either has no recorded profile (its elevation is NaN everywhere)
//! or a uniformly spaced sample array covering `[0, x_max]`. Both cases are
//! one value type so callers never branch on presence.

use crate::math;

/// A function from a position in meters to an elevation in meters.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileFunction {
    /// The same value everywhere (NaN for "no profile").
    Constant(f64),
    /// Linear interpolation between uniformly spaced samples over
    /// `[0, x_max]`, clamped at both ends.
    Sampled { samples: Vec<f32>, x_max: f64 },
}

impl ProfileFunction {
    /// The constant function `x -> y`.
    pub fn constant(y: f64) -> Self {
        ProfileFunction::Constant(y)
    }

    /// A sampled function with `samples` spaced `x_max / (samples.len() - 1)`
    /// apart.
    ///
    /// # Panics
    ///
    /// Panics unless `samples.len() >= 2` and `x_max > 0`.
    pub fn sampled(samples: Vec<f32>, x_max: f64) -> Self {
        assert!(
            samples.len() >= 2 && x_max > 0.0,
            "sampled function needs at least two samples and a positive range"
        );
        ProfileFunction::Sampled { samples, x_max }
    }

    /// Evaluate the function at `x`.
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            ProfileFunction::Constant(y) => *y,
            ProfileFunction::Sampled { samples, x_max } => {
                if x < 0.0 {
                    return f64::from(samples[0]);
                }
                if x >= *x_max {
                    return f64::from(samples[samples.len() - 1]);
                }
                let interval = x_max / (samples.len() - 1) as f64;
                let i = (x / interval).floor() as usize;
                math::interpolate(
                    f64::from(samples[i]),
                    f64::from(samples[i + 1]),
                    x / interval - i as f64,
                )
            }
        }
    }
}
