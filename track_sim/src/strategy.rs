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
use crate::simulator::SimulationSummary;


/// Operating envelope a race strategy is expected to stay inside
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyLimits {
    pub max_velocity: f64,
    pub max_acceleration: f64,
    pub max_deceleration: f64,
    /// Cap on average power (W)
    pub max_energy_rate: f64,
    pub max_centripetal_acceleration: f64,
    pub penalty_weight: f64,
}

impl Default for StrategyLimits {
    fn default() -> Self {
        StrategyLimits {
            max_velocity: 40.0,
            max_acceleration: 3.0,
            max_deceleration: 3.0,
            max_energy_rate: 1300.0,
            max_centripetal_acceleration: 3.0,
            penalty_weight: 100.0,
        }
    }
}

/// Lap time plus weighted penalties for every limit the run broke and for
/// any difference between start and finish velocity. Lower is better.
/// Unusable objectives collapse to `f64::MAX`.
pub fn score(summary: &SimulationSummary, limits: &StrategyLimits) -> f64 {
    let weight = limits.penalty_weight;
    let mut objective = summary.total_time;

    let energy_rate = summary.average_power();
    if energy_rate > limits.max_energy_rate || energy_rate < 0.0 {
        objective += (energy_rate - limits.max_energy_rate).abs() * weight;
    }
    if summary.velocity.max > limits.max_velocity {
        objective += (summary.velocity.max - limits.max_velocity) * weight;
    }
    if summary.velocity.min < 0.0 {
        objective += summary.velocity.min.abs() * weight;
    }
    if summary.acceleration.max > limits.max_acceleration {
        objective += (summary.acceleration.max - limits.max_acceleration) * weight;
    }
    if summary.acceleration.min < -limits.max_deceleration {
        objective += (summary.acceleration.min.abs() - limits.max_deceleration) * weight;
    }
    if summary.max_centripetal_acceleration > limits.max_centripetal_acceleration {
        objective += (summary.max_centripetal_acceleration - limits.max_centripetal_acceleration) * weight;
    }
    objective += (summary.final_velocity - summary.initial_velocity).abs() * weight;

    if !objective.is_finite() || objective < 0.0 {
        return f64::MAX;
    }
    objective
}
