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

use std::fmt::{Display, Formatter};
use statrs::statistics::Statistics;


#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub position: f64,
    pub acceleration: f64,
    pub velocity: f64,
    pub force: f64,
    pub cumulative_energy: f64,
    pub curvature: f64,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SeriesKind {
    Acceleration,
    Velocity,
    Force,
    Energy,
    Curvature
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 5] = [
        SeriesKind::Acceleration,
        SeriesKind::Velocity,
        SeriesKind::Force,
        SeriesKind::Energy,
        SeriesKind::Curvature
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesKind::Acceleration => "acceleration",
            SeriesKind::Velocity => "velocity",
            SeriesKind::Force => "force",
            SeriesKind::Energy => "energy",
            SeriesKind::Curvature => "curvature"
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SeriesKind::Acceleration => "m/s^2",
            SeriesKind::Velocity => "m/s",
            SeriesKind::Force => "N",
            SeriesKind::Energy => "J",
            SeriesKind::Curvature => "m"
        }
    }
}

impl Display for SeriesKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Five parallel `(position, value)` sequences, one entry per step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSeries {
    acceleration: Vec<(f64, f64)>,
    velocity: Vec<(f64, f64)>,
    force: Vec<(f64, f64)>,
    energy: Vec<(f64, f64)>,
    curvature: Vec<(f64, f64)>,
}

impl SampleSeries {
    pub fn new() -> SampleSeries {
        SampleSeries::default()
    }

    pub fn with_capacity(capacity: usize) -> SampleSeries {
        SampleSeries {
            acceleration: Vec::with_capacity(capacity),
            velocity: Vec::with_capacity(capacity),
            force: Vec::with_capacity(capacity),
            energy: Vec::with_capacity(capacity),
            curvature: Vec::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, sample: Sample) {
        let x = sample.position;
        self.acceleration.push((x, sample.acceleration));
        self.velocity.push((x, sample.velocity));
        self.force.push((x, sample.force));
        self.energy.push((x, sample.cumulative_energy));
        self.curvature.push((x, sample.curvature));
    }

    pub fn extend(&mut self, other: SampleSeries) {
        self.acceleration.extend(other.acceleration);
        self.velocity.extend(other.velocity);
        self.force.extend(other.force);
        self.energy.extend(other.energy);
        self.curvature.extend(other.curvature);
    }

    pub fn len(&self) -> usize {
        self.velocity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.velocity.is_empty()
    }

    pub fn get(&self, kind: SeriesKind) -> &[(f64, f64)] {
        match kind {
            SeriesKind::Acceleration => &self.acceleration,
            SeriesKind::Velocity => &self.velocity,
            SeriesKind::Force => &self.force,
            SeriesKind::Energy => &self.energy,
            SeriesKind::Curvature => &self.curvature
        }
    }

    pub fn acceleration(&self) -> &[(f64, f64)] {
        &self.acceleration
    }

    pub fn velocity(&self) -> &[(f64, f64)] {
        &self.velocity
    }

    pub fn energy(&self) -> &[(f64, f64)] {
        &self.energy
    }

    /// Mean of the sampled velocities. NaN when there are no samples.
    pub fn mean_velocity(&self) -> f64 {
        self.velocity.iter().map(|(_, v)| *v).mean()
    }

    pub fn velocity_std_dev(&self) -> f64 {
        self.velocity.iter().map(|(_, v)| *v).std_dev()
    }
}
