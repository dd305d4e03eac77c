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

pub mod curve;
pub mod error;
pub mod gradient;
pub mod input;
pub mod quadrature;
pub mod series;
pub mod simulator;
pub mod state;
pub mod stepper;
pub mod strategy;
pub mod track;
pub mod vehicle;

pub use curve::{AccelerationCurve, CurveParameters};
pub use error::{InputError, SimulationError};
pub use input::{parse_strategy_args, StrategyInput};
pub use quadrature::{Cubic, QuadratureError};
pub use series::{SampleSeries, SeriesKind};
pub use simulator::{SimulationResult, SimulationSettings, SimulationSummary, TrackSimulator};
pub use strategy::StrategyLimits;
pub use track::{Track, TrackLayout};
pub use vehicle::{MotorEfficiencyCurve, VehicleParameters};
