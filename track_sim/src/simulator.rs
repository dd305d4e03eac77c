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
use tracing::{debug, error};
use utils::numeric::is_even;

use crate::curve::{AccelerationCurve, CurveParameters};
use crate::error::{Result, SimulationError};
use crate::input::StrategyInput;
use crate::quadrature::integrate_reciprocal;
use crate::series::{Sample, SampleSeries};
use crate::state::{Extrema, SimulationState};
use crate::stepper::{step_segment, StepContext};
use crate::track::Track;
use crate::vehicle::{centripetal_acceleration, VehicleParameters};


#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Number of steps the whole track is divided into
    pub num_ticks: usize,
    /// Simpson subintervals used per segment for the transit time
    pub quadrature_steps: usize,
    /// Hard cap on the number of steps in one run
    pub max_steps: usize,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            num_ticks: 1000,
            quadrature_steps: 50,
            max_steps: 10_000_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub initial_velocity: f64,
    pub final_velocity: f64,
    pub velocity: Extrema,
    pub acceleration: Extrema,
    pub max_centripetal_acceleration: f64,
    pub total_time: f64,
    pub total_energy: f64,
    pub segment_times: Vec<f64>,
    pub step_count: usize,
}

impl SimulationSummary {
    /// Average power drawn over the lap (W)
    pub fn average_power(&self) -> f64 {
        self.total_energy / self.total_time
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub series: SampleSeries,
    pub summary: SimulationSummary,
    /// Acceleration curve each segment was driven with, `c` already chained
    pub curves: Vec<AccelerationCurve>,
}

pub struct TrackSimulator {
    track: Track,
    vehicle: VehicleParameters,
    settings: SimulationSettings,
}

impl TrackSimulator {
    pub fn new(track: Track, vehicle: VehicleParameters, settings: SimulationSettings) -> Result<TrackSimulator> {
        if settings.num_ticks == 0 {
            return Err(SimulationError::InvalidSettings("num_ticks must be greater than 0".to_string()));
        }
        if settings.quadrature_steps == 0 || !is_even(settings.quadrature_steps) {
            return Err(SimulationError::InvalidSettings(
                format!("quadrature_steps must be a positive even number. Got {}", settings.quadrature_steps)
            ));
        }
        let step_size = track.total_length() / settings.num_ticks as f64;
        if !(step_size.is_finite() && step_size > 0.0) {
            return Err(SimulationError::InvalidSettings(format!("invalid step size {}", step_size)));
        }
        // each segment can add at most one shortened step on top of num_ticks
        let worst_case_steps = settings.num_ticks.saturating_add(track.segment_count());
        if worst_case_steps > settings.max_steps {
            return Err(SimulationError::StepBudgetExceeded { limit: settings.max_steps });
        }
        Ok(TrackSimulator { track, vehicle, settings })
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Distance covered by one step
    pub fn graph_resolution(&self) -> f64 {
        self.track.total_length() / self.settings.num_ticks as f64
    }

    pub fn run(&self, input: &StrategyInput) -> Result<SimulationResult> {
        self.simulate(input.initial_velocity, input.initial_acceleration, &input.curves)
    }

    /// Drives the vehicle over every segment in order, threading the state
    /// from each segment's exit into the next segment's entry.
    pub fn simulate(&self,
                    initial_velocity: f64,
                    initial_acceleration: f64,
                    curves: &[CurveParameters]) -> Result<SimulationResult>
    {
        if curves.len() != self.track.segment_count() {
            return Err(SimulationError::CurveCount {
                expected: self.track.segment_count(),
                received: curves.len()
            });
        }

        let ctx = StepContext {
            track: &self.track,
            vehicle: &self.vehicle,
            step_size: self.graph_resolution(),
            max_steps: self.settings.max_steps,
        };

        let mut series = SampleSeries::with_capacity(self.settings.num_ticks + self.track.segment_count() + 1);
        let mut state = SimulationState::new(initial_velocity, initial_acceleration);
        let start_curvature = self.track.curvature_at(0.0);
        state.max_centripetal_acceleration = centripetal_acceleration(initial_velocity, start_curvature);
        series.record(Sample {
            position: 0.0,
            acceleration: initial_acceleration,
            velocity: initial_velocity,
            force: self.vehicle.resistive_force(initial_velocity, start_curvature),
            cumulative_energy: 0.0,
            curvature: start_curvature,
        });

        let mut segment_times = Vec::with_capacity(self.track.segment_count());
        let mut chained_curves = Vec::with_capacity(self.track.segment_count());
        for (segment, params) in self.track.placed_segments().into_iter().zip(curves.iter()) {
            let curve = AccelerationCurve::chained(*params, segment.start, state.acceleration);
            let entry_velocity = state.velocity;

            let outcome = step_segment(&ctx, segment, &curve, state).map_err(|e| {
                error!("Simulation failed. {}", e);
                e
            })?;

            let velocity_polynomial = curve.velocity_polynomial(segment.start, entry_velocity);
            let transit_time = integrate_reciprocal(segment.start,
                                                    segment.end(),
                                                    &velocity_polynomial,
                                                    self.settings.quadrature_steps)
                .map_err(|source| {
                    error!("Transit time integration failed for segment {}. {}", segment.index, source);
                    SimulationError::IntegrationDomain { segment: segment.index, source }
                })?;

            state = outcome.state;
            state.elapsed_time += transit_time;
            segment_times.push(transit_time);
            series.extend(outcome.samples);
            chained_curves.push(curve);
            debug!("Segment {} done: exit velocity {:.3} m/s, exit acceleration {:.3} m/s^2, \
                    transit time {:.3}s, energy {:.1}J",
                   segment.index, state.velocity, state.acceleration, transit_time, outcome.energy_delta);
        }

        Ok(SimulationResult {
            series,
            curves: chained_curves,
            summary: SimulationSummary {
                initial_velocity,
                final_velocity: state.velocity,
                velocity: state.velocity_range,
                acceleration: state.acceleration_range,
                max_centripetal_acceleration: state.max_centripetal_acceleration,
                total_time: state.elapsed_time,
                total_energy: state.cumulative_energy,
                segment_times,
                step_count: state.step_count,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use itertools::Itertools;
    use super::{SimulationSettings, TrackSimulator};
    use crate::curve::CurveParameters;
    use crate::error::SimulationError;
    use crate::quadrature::QuadratureError;
    use crate::track::{Segment, Track, TrackLayout};
    use crate::vehicle::VehicleParameters;

    fn default_simulator() -> TrackSimulator {
        TrackSimulator::new(TrackLayout::default().build().unwrap(),
                            VehicleParameters::default(),
                            SimulationSettings::default()).unwrap()
    }

    fn gentle_curves() -> Vec<CurveParameters> {
        vec![
            CurveParameters::new(0.0, 1e-4),
            CurveParameters::new(0.0, -1e-4),
            CurveParameters::new(0.0, 0.0),
            CurveParameters::new(0.0, 0.0),
        ]
    }

    #[test]
    fn straight_coast() {
        let track = Track::new(vec![Segment::new(600.0)], vec![0.0], 500.0).unwrap();
        let vehicle = VehicleParameters::default();
        let sim = TrackSimulator::new(track, vehicle, SimulationSettings::default()).unwrap();
        let result = sim.simulate(9.0, 0.0, &[CurveParameters::new(0.0, 0.0)]).unwrap();

        assert!(result.series.velocity().iter().all(|(_, v)| *v == 9.0));
        let expected_energy = vehicle.motor_efficiency(9.0) * vehicle.drag_force(9.0) * 600.0;
        assert_relative_eq!(result.summary.total_energy, expected_energy, max_relative = 1e-9);
        assert_relative_eq!(result.summary.total_time, 600.0 / 9.0, max_relative = 1e-9);
        assert_relative_eq!(result.summary.average_power(), expected_energy * 9.0 / 600.0, max_relative = 1e-9);
        assert_eq!(result.summary.step_count, 1000);
        assert_eq!(result.series.len(), 1001);
    }

    #[test]
    fn chained_segments_are_continuous() {
        let sim = default_simulator();
        let result = sim.simulate(9.0, 0.25, &gentle_curves()).unwrap();
        let segments = sim.track().placed_segments();
        assert_eq!(result.curves.len(), segments.len());
        assert_eq!(result.curves[0].acceleration_at(0.0), 0.25);

        for (idx, (prev, next)) in result.curves.iter().tuple_windows().enumerate() {
            let boundary = segments[idx + 1].start;
            let exit_acceleration = prev.acceleration_at(boundary);
            assert_relative_eq!(next.acceleration_at(boundary), exit_acceleration, epsilon = 1e-12);

            // the sample on the boundary carries the previous segment's exit acceleration
            let accel = result.series.acceleration();
            let (_, sampled) = accel[accel.iter().position(|(x, _)| *x == boundary).unwrap()];
            assert_eq!(sampled, exit_acceleration);
        }
        assert_relative_eq!(result.summary.acceleration.max, 0.27, epsilon = 1e-9);
    }

    #[test]
    fn energy_is_non_decreasing() {
        let sim = default_simulator();
        let result = sim.simulate(9.0, 0.0, &gentle_curves()).unwrap();
        assert!(result.series.energy().iter().tuple_windows().all(|(a, b)| a.1 <= b.1));
        assert!(result.series.energy().iter().tuple_windows().all(|(a, b)| a.0 < b.0));
    }

    #[test]
    fn summary_matches_series() {
        let sim = default_simulator();
        let result = sim.simulate(9.0, 0.0, &gentle_curves()).unwrap();
        let summary = &result.summary;
        assert_eq!(result.series.velocity()[0], (0.0, 9.0));
        assert_eq!(summary.initial_velocity, 9.0);
        assert_eq!(summary.final_velocity, result.series.velocity().last().unwrap().1);
        assert_eq!(summary.total_energy, result.series.energy().last().unwrap().1);
        assert!(summary.velocity.max >= summary.velocity.min);
        assert_eq!(summary.segment_times.len(), 4);
        assert_relative_eq!(summary.segment_times.iter().sum::<f64>(), summary.total_time, max_relative = 1e-12);
        assert!(summary.max_centripetal_acceleration > 2.0);
    }

    #[test]
    fn reproducible() {
        let sim = default_simulator();
        let first = sim.simulate(9.0, 0.0, &gentle_curves()).unwrap();
        let second = sim.simulate(9.0, 0.0, &gentle_curves()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_wrong_curve_count() {
        let sim = default_simulator();
        let err = sim.simulate(9.0, 0.0, &gentle_curves()[..3]).unwrap_err();
        assert_eq!(err, SimulationError::CurveCount { expected: 4, received: 3 });
    }

    #[test]
    fn integration_domain_error_names_segment() {
        // stepping survives but the closed form velocity turns negative inside segment 1
        let sim = default_simulator();
        let curves = vec![
            CurveParameters::new(0.0, 0.0),
            CurveParameters::new(0.0, -0.002),
            CurveParameters::new(0.0, 0.0),
            CurveParameters::new(0.0, 0.0),
        ];
        match sim.simulate(9.0, 0.0, &curves) {
            Err(SimulationError::IntegrationDomain { segment, source }) => {
                assert_eq!(segment, 1);
                assert!(matches!(source, QuadratureError::SignChange { .. }));
            }
            other => panic!("unexpected result {:?}", other.map(|r| r.summary))
        }
    }

    #[test]
    fn huge_entry_velocity_is_an_error() {
        let sim = default_simulator();
        let err = sim.simulate(1e200, 0.0, &gentle_curves()).unwrap_err();
        assert!(matches!(err, SimulationError::NonFiniteState { segment: 0, .. }));
        assert_eq!(err.segment(), Some(0));
    }

    #[test]
    fn rejects_invalid_settings() {
        let track = TrackLayout::default().build().unwrap();
        let odd = SimulationSettings { quadrature_steps: 49, ..SimulationSettings::default() };
        assert!(matches!(TrackSimulator::new(track.clone(), VehicleParameters::default(), odd),
                         Err(SimulationError::InvalidSettings(_))));
        let no_ticks = SimulationSettings { num_ticks: 0, ..SimulationSettings::default() };
        assert!(matches!(TrackSimulator::new(track.clone(), VehicleParameters::default(), no_ticks),
                         Err(SimulationError::InvalidSettings(_))));
        let tiny_budget = SimulationSettings { max_steps: 100, ..SimulationSettings::default() };
        assert_eq!(TrackSimulator::new(track, VehicleParameters::default(), tiny_budget).err(),
                   Some(SimulationError::StepBudgetExceeded { limit: 100 }));
    }
}
