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
use utils::units::wheel_rpm;


/// Maps motor current to the fraction applied to the mechanical work done.
///
/// Motor current is derived linearly from wheel RPM. Above `current_threshold`
/// the efficiency climbs linearly from `high_current_base`; at or below it the
/// efficiency follows `low_current_peak * I / (I + low_current_knee)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorEfficiencyCurve {
    pub current_per_rpm: f64,
    pub current_offset: f64,
    pub current_threshold: f64,
    pub high_current_base: f64,
    pub high_current_slope: f64,
    pub low_current_peak: f64,
    pub low_current_knee: f64,
}

impl Default for MotorEfficiencyCurve {
    fn default() -> Self {
        MotorEfficiencyCurve {
            current_per_rpm: 0.05,
            current_offset: 0.0,
            current_threshold: 14.0,
            high_current_base: 0.905,
            high_current_slope: 0.001,
            low_current_peak: 0.97,
            low_current_knee: 1.0,
        }
    }
}

impl MotorEfficiencyCurve {
    pub fn motor_current(&self, motor_rpm: f64) -> f64 {
        self.current_per_rpm * motor_rpm + self.current_offset
    }

    pub fn efficiency_at_current(&self, current: f64) -> f64 {
        if current > self.current_threshold {
            self.high_current_base + self.high_current_slope * (current - self.current_threshold)
        } else {
            self.low_current_peak * current / (current + self.low_current_knee)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleParameters {
    pub mass_kg: f64,
    pub drag_coefficient: f64,
    pub wheel_circumference_m: f64,
    pub efficiency: MotorEfficiencyCurve,
}

impl Default for VehicleParameters {
    fn default() -> Self {
        VehicleParameters {
            mass_kg: 298.0,
            drag_coefficient: 0.1275,
            wheel_circumference_m: 1.75,
            efficiency: MotorEfficiencyCurve::default(),
        }
    }
}

impl VehicleParameters {
    /// Quadratic aerodynamic drag. The sign of `velocity` is not considered.
    pub fn drag_force(&self, velocity: f64) -> f64 {
        self.drag_coefficient * velocity.powi(2)
    }

    /// Force needed to hold the vehicle on a curve of radius `curvature`.
    /// A curvature of exactly zero is a straight.
    pub fn centripetal_force(&self, velocity: f64, curvature: f64) -> f64 {
        if curvature == 0.0 {
            return 0.0;
        }
        centripetal_acceleration(velocity, curvature) * self.mass_kg
    }

    pub fn resistive_force(&self, velocity: f64, curvature: f64) -> f64 {
        self.drag_force(velocity) + self.centripetal_force(velocity, curvature)
    }

    pub fn motor_rpm(&self, velocity: f64) -> f64 {
        wheel_rpm(velocity, self.wheel_circumference_m)
    }

    pub fn motor_efficiency(&self, velocity: f64) -> f64 {
        let current = self.efficiency.motor_current(self.motor_rpm(velocity));
        self.efficiency.efficiency_at_current(current)
    }

    /// Energy (J) spent moving `step_distance` metres at `velocity` through a
    /// zone of the given curvature
    pub fn work(&self, velocity: f64, curvature: f64, step_distance: f64) -> f64 {
        let raw_work = self.resistive_force(velocity, curvature) * step_distance;
        self.motor_efficiency(velocity) * raw_work
    }
}

pub fn centripetal_acceleration(velocity: f64, curvature: f64) -> f64 {
    if curvature == 0.0 {
        return 0.0;
    }
    velocity.powi(2) / curvature.abs()
}
