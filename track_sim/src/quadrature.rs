/*
 * Copyright (c):
 * 2024 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of strategy-sim.
 *
 * strategy-sim is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * strategy-sim is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with strategy-sim. If not, see <https://www.gnu.org/licenses/>.
 */

use thiserror::Error;
use utils::numeric::is_even;


#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuadratureError {
    #[error("simpson's rule needs a positive, even number of subintervals. Got {0}")]
    OddStepCount(usize),
    #[error("denominator vanishes at x = {x}")]
    VanishingDenominator { x: f64 },
    #[error("denominator changes sign at x = {x}")]
    SignChange { x: f64 },
    #[error("integrand is not finite at x = {x}")]
    NonFinite { x: f64 },
}

/// `q·x³ + w·x² + e·x + r`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubic {
    pub q: f64,
    pub w: f64,
    pub e: f64,
    pub r: f64,
}

impl Cubic {
    pub fn new(q: f64, w: f64, e: f64, r: f64) -> Cubic {
        Cubic { q, w, e, r }
    }

    pub fn constant(r: f64) -> Cubic {
        Cubic::new(0.0, 0.0, 0.0, r)
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        ((self.q * x + self.w) * x + self.e) * x + self.r
    }
}

/// Composite Simpson's rule over `[lower, upper]` with `steps` subintervals
pub fn simpson<F>(integrand: F, lower: f64, upper: f64, steps: usize) -> Result<f64, QuadratureError>
    where F: Fn(f64) -> Result<f64, QuadratureError>
{
    if steps == 0 || !is_even(steps) {
        return Err(QuadratureError::OddStepCount(steps));
    }
    let h = (upper - lower) / steps as f64;
    // nodes are visited in order so a failure reports the first bad point
    let mut sum = integrand(lower)?;
    for i in 1..steps {
        let weight = if is_even(i) { 2.0 } else { 4.0 };
        sum += weight * integrand(lower + i as f64 * h)?;
    }
    sum += integrand(upper)?;
    Ok((h / 3.0) * sum)
}

/// Approximates `∫ 1 / cubic(x) dx` over `[lower, upper]`.
///
/// Every node is checked before it is used: the denominator must stay
/// non-zero, finite and keep the sign it has at `lower`.
pub fn integrate_reciprocal(lower: f64, upper: f64, cubic: &Cubic, steps: usize) -> Result<f64, QuadratureError> {
    let reference = cubic.evaluate(lower);
    simpson(|x| {
        let denominator = cubic.evaluate(x);
        if !denominator.is_finite() {
            return Err(QuadratureError::NonFinite { x });
        }
        if denominator == 0.0 {
            return Err(QuadratureError::VanishingDenominator { x });
        }
        if denominator.signum() != reference.signum() {
            return Err(QuadratureError::SignChange { x });
        }
        Ok(1.0 / denominator)
    }, lower, upper, steps)
}
