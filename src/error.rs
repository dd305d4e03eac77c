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
use track_sim::{InputError, SimulationError};


#[derive(Error, Debug)]
pub enum AppError {
    #[error("failed to load settings. {0}")]
    Settings(#[from] config::ConfigError),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Input(#[from] InputError),
    #[error("{0}")]
    Simulation(#[from] SimulationError),
    #[error("failed to write summary. {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to draw {kind} plot. {reason}")]
    Plot { kind: String, reason: String },
    #[error("optimiser failed. {0}")]
    Optimiser(String),
}

impl AppError {
    /// Track segment a simulation failure happened in
    pub fn failed_segment(&self) -> Option<usize> {
        match self {
            AppError::Simulation(e) => e.segment(),
            _ => None
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
