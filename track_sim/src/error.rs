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

use crate::quadrature::QuadratureError;

pub type Result<T> = std::result::Result<T, SimulationError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("expected {expected} arguments, received {received}")]
    ArgumentCount { expected: usize, received: usize },
    #[error("failed to parse argument {index} ('{token}') as a number")]
    ArgumentParse { index: usize, token: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("transit time integration failed in segment {segment}. {source}")]
    IntegrationDomain {
        segment: usize,
        #[source]
        source: QuadratureError
    },
    #[error("vehicle stalled in segment {segment} at {position:.3}m (velocity {velocity})")]
    StalledVehicle { segment: usize, position: f64, velocity: f64 },
    #[error("velocity or energy overflowed in segment {segment} at {position:.3}m")]
    NonFiniteState { segment: usize, position: f64 },
    #[error("invalid track. {0}")]
    InvalidTrack(String),
    #[error("invalid simulation settings. {0}")]
    InvalidSettings(String),
    #[error("expected {expected} curve parameter pairs, received {received}")]
    CurveCount { expected: usize, received: usize },
    #[error("simulation exceeded the step budget of {limit} steps")]
    StepBudgetExceeded { limit: usize },
}

impl SimulationError {
    /// Index of the segment the failure happened in, if it is tied to one
    pub fn segment(&self) -> Option<usize> {
        match self {
            SimulationError::IntegrationDomain { segment, .. } => Some(*segment),
            SimulationError::StalledVehicle { segment, .. } => Some(*segment),
            SimulationError::NonFiniteState { segment, .. } => Some(*segment),
            _ => None
        }
    }
}
