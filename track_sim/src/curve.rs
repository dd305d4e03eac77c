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

use serde::{Deserialize, Serialize};
use crate::quadrature::Cubic;


/// User supplied `(a, b)` of a segment's `a·x² + b·x + c` acceleration curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveParameters {
    pub a: f64,
    pub b: f64,
}

impl CurveParameters {
    pub fn new(a: f64, b: f64) -> CurveParameters {
        CurveParameters { a, b }
    }
}

impl From<(f64, f64)> for CurveParameters {
    fn from((a, b): (f64, f64)) -> Self {
        CurveParameters::new(a, b)
    }
}

/// Acceleration as a quadratic of the global track position `x`.
///
/// `x` is never relative to the segment start: feeding the same `(a, b)` to
/// two consecutive segments yields one continuous parabola.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelerationCurve {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl AccelerationCurve {
    /// Solves `c` so the curve evaluated at `start` reproduces `entry_acceleration`
    pub fn chained(params: CurveParameters, start: f64, entry_acceleration: f64) -> AccelerationCurve {
        let CurveParameters { a, b } = params;
        let c = entry_acceleration - a * start.powi(2) - b * start;
        AccelerationCurve { a, b, c }
    }

    pub fn acceleration_at(&self, x: f64) -> f64 {
        self.a * x.powi(2) + self.b * x + self.c
    }

    /// Closed form velocity obtained by integrating the curve once over `x`,
    /// with the constant chosen so that `v(start) == entry_velocity`
    pub fn velocity_polynomial(&self, start: f64, entry_velocity: f64) -> Cubic {
        let q = self.a / 3.0;
        let w = self.b / 2.0;
        let e = self.c;
        let d = entry_velocity - (q * start.powi(3) + w * start.powi(2) + e * start);
        Cubic::new(q, w, e, d)
    }
}
