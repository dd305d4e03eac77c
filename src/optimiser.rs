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

use argmin::core::{CostFunction, Error, Executor, State};
use argmin::solver::neldermead::NelderMead;
use tracing::{debug, info};
use track_sim::strategy::score;
use track_sim::{StrategyInput, StrategyLimits, TrackSimulator};

use crate::error::{AppError, Result};


/// Relative perturbation used to build the starting simplex
const SIMPLEX_SCALE: f64 = 0.05;
/// Perturbation used for coordinates that start at zero
const SIMPLEX_ZERO_STEP: f64 = 1e-4;
const SD_TOLERANCE: f64 = 1e-8;

/// Minimises the strategy score over the flat input vector
/// `{v0, a0, a1, b1, ..., an, bn}`. Every cost evaluation is an independent
/// simulation run; a run that fails scores `f64::MAX`.
pub struct StrategyCost<'a> {
    simulator: &'a TrackSimulator,
    limits: StrategyLimits,
}

impl<'a> StrategyCost<'a> {
    pub fn new(simulator: &'a TrackSimulator, limits: StrategyLimits) -> StrategyCost<'a> {
        StrategyCost { simulator, limits }
    }

    pub fn evaluate(&self, values: &[f64]) -> f64 {
        let input = match StrategyInput::from_values(values, self.simulator.track().segment_count()) {
            Ok(input) => input,
            Err(_) => return f64::MAX
        };
        match self.simulator.run(&input) {
            Ok(result) => score(&result.summary, &self.limits),
            Err(e) => {
                debug!("Candidate rejected. {}", e);
                f64::MAX
            }
        }
    }
}

impl CostFunction for StrategyCost<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, param: &Self::Param) -> std::result::Result<Self::Output, Error> {
        Ok(self.evaluate(param))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptimisedStrategy {
    pub input: StrategyInput,
    pub score: f64,
    pub iterations: u64,
}

/// Starting simplex: the start vector plus one vertex per coordinate with
/// that coordinate nudged.
pub fn initial_simplex(start: &[f64]) -> Vec<Vec<f64>> {
    let mut simplex = Vec::with_capacity(start.len() + 1);
    simplex.push(start.to_vec());
    for idx in 0..start.len() {
        let mut vertex = start.to_vec();
        vertex[idx] = if vertex[idx] == 0.0 {
            SIMPLEX_ZERO_STEP
        } else {
            vertex[idx] * (1.0 + SIMPLEX_SCALE)
        };
        simplex.push(vertex);
    }
    simplex
}

pub fn optimise(simulator: &TrackSimulator,
                limits: StrategyLimits,
                start: &StrategyInput,
                max_iterations: u64) -> Result<OptimisedStrategy>
{
    let start_values = start.to_values();
    let cost = StrategyCost::new(simulator, limits);
    info!("Optimising strategy from score {}", cost.evaluate(&start_values));

    let solver = NelderMead::new(initial_simplex(&start_values))
        .with_sd_tolerance(SD_TOLERANCE)
        .map_err(|e| AppError::Optimiser(e.to_string()))?;
    let res = Executor::new(cost, solver)
        .configure(|state| state.max_iters(max_iterations))
        .run()
        .map_err(|e| AppError::Optimiser(e.to_string()))?;

    let state = res.state();
    let best = state.get_best_param()
        .ok_or_else(|| AppError::Optimiser("no candidate was evaluated".to_string()))?;
    let mut input = StrategyInput::from_values(best, simulator.track().segment_count())?;
    input.suppress_output = start.suppress_output;
    input.trailing_token = start.trailing_token.clone();

    info!("Optimiser finished after {} iterations with score {}", state.get_iter(), state.get_best_cost());
    Ok(OptimisedStrategy {
        input,
        score: state.get_best_cost(),
        iterations: state.get_iter(),
    })
}
