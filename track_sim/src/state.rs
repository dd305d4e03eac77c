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


/// Running minimum and maximum of an observed quantity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extrema {
    pub min: f64,
    pub max: f64,
}

impl Default for Extrema {
    fn default() -> Self {
        Extrema { min: f64::INFINITY, max: f64::NEG_INFINITY }
    }
}

impl Extrema {
    pub fn observe(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }
}

/// Everything carried from one step, and one segment, to the next.
/// Owned by a single simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    pub position: f64,
    pub velocity: f64,
    pub acceleration: f64,
    pub elapsed_time: f64,
    pub cumulative_energy: f64,
    pub velocity_range: Extrema,
    pub acceleration_range: Extrema,
    pub max_centripetal_acceleration: f64,
    pub step_count: usize,
}

impl SimulationState {
    pub fn new(initial_velocity: f64, initial_acceleration: f64) -> SimulationState {
        let mut velocity_range = Extrema::default();
        velocity_range.observe(initial_velocity);
        let mut acceleration_range = Extrema::default();
        acceleration_range.observe(initial_acceleration);
        SimulationState {
            position: 0.0,
            velocity: initial_velocity,
            acceleration: initial_acceleration,
            elapsed_time: 0.0,
            cumulative_energy: 0.0,
            velocity_range,
            acceleration_range,
            max_centripetal_acceleration: 0.0,
            step_count: 0,
        }
    }
}
