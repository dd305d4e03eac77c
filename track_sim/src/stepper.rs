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

use utils::numeric::nearly_equal;

use crate::curve::AccelerationCurve;
use crate::error::{Result, SimulationError};
use crate::series::{Sample, SampleSeries};
use crate::state::SimulationState;
use crate::track::{PlacedSegment, Track};
use crate::vehicle::{centripetal_acceleration, VehicleParameters};


/// Shared, read-only inputs for stepping through any segment of a run
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub track: &'a Track,
    pub vehicle: &'a VehicleParameters,
    pub step_size: f64,
    pub max_steps: usize,
}

#[derive(Debug, Clone)]
pub struct SegmentOutcome {
    pub state: SimulationState,
    pub samples: SampleSeries,
    pub energy_delta: f64,
}

/// Walks `segment` in fixed distance steps starting from `state`.
///
/// Each step uses the acceleration at the start of the step and the current
/// velocity to work out how long the step takes, then advances the velocity
/// by `acceleration * time`. The final step is shortened so the segment ends
/// exactly on its boundary. The returned state sits on the boundary with the
/// acceleration of `curve` evaluated there.
pub fn step_segment(ctx: &StepContext,
                    segment: PlacedSegment,
                    curve: &AccelerationCurve,
                    mut state: SimulationState) -> Result<SegmentOutcome>
{
    let end = segment.end();
    let energy_at_entry = state.cumulative_energy;
    let expected_steps = (segment.length / ctx.step_size).ceil() as usize;
    let mut samples = SampleSeries::with_capacity(expected_steps);

    let mut x = segment.start;
    while x < end && !nearly_equal(x, end) {
        if state.step_count >= ctx.max_steps {
            return Err(SimulationError::StepBudgetExceeded { limit: ctx.max_steps });
        }
        if !(state.velocity > 0.0) {
            return Err(SimulationError::StalledVehicle {
                segment: segment.index,
                position: x,
                velocity: state.velocity
            });
        }

        let step = ctx.step_size.min(end - x);
        let time_to_travel = step / state.velocity;
        let velocity = state.velocity + curve.acceleration_at(x) * time_to_travel;

        let mut next_x = x + step;
        if nearly_equal(next_x, end) {
            next_x = end;
        }
        if !(velocity > 0.0) {
            return Err(SimulationError::StalledVehicle {
                segment: segment.index,
                position: next_x,
                velocity
            });
        }

        let curvature = ctx.track.curvature_at(x);
        let force = ctx.vehicle.resistive_force(velocity, curvature);
        let work = ctx.vehicle.work(velocity, curvature, step);
        if !(velocity.is_finite() && work.is_finite()) {
            return Err(SimulationError::NonFiniteState { segment: segment.index, position: next_x });
        }
        state.cumulative_energy += work;
        state.velocity = velocity;
        state.acceleration = curve.acceleration_at(next_x);
        state.position = next_x;
        state.step_count += 1;
        state.velocity_range.observe(state.velocity);
        state.acceleration_range.observe(state.acceleration);
        state.max_centripetal_acceleration =
            state.max_centripetal_acceleration.max(centripetal_acceleration(velocity, curvature));

        samples.record(Sample {
            position: next_x,
            acceleration: state.acceleration,
            velocity,
            force,
            cumulative_energy: state.cumulative_energy,
            curvature,
        });
        x = next_x;
    }

    state.position = end;
    state.acceleration = curve.acceleration_at(end);
    Ok(SegmentOutcome {
        energy_delta: state.cumulative_energy - energy_at_entry,
        state,
        samples,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use super::{step_segment, StepContext};
    use crate::curve::{AccelerationCurve, CurveParameters};
    use crate::error::SimulationError;
    use crate::state::SimulationState;
    use crate::track::{Segment, Track};
    use crate::vehicle::VehicleParameters;

    fn straight_track(length: f64) -> Track {
        Track::new(vec![Segment::new(length)], vec![0.0], 500.0).unwrap()
    }

    #[test]
    fn coasting_keeps_velocity() {
        let track = straight_track(100.0);
        let vehicle = VehicleParameters::default();
        let ctx = StepContext { track: &track, vehicle: &vehicle, step_size: 0.5, max_steps: 10_000 };
        let segment = track.placed_segments()[0];
        let curve = AccelerationCurve::chained(CurveParameters::new(0.0, 0.0), 0.0, 0.0);

        let outcome = step_segment(&ctx, segment, &curve, SimulationState::new(9.0, 0.0)).unwrap();
        assert_eq!(outcome.samples.len(), 200);
        assert!(outcome.samples.velocity().iter().all(|(_, v)| *v == 9.0));
        assert_eq!(outcome.state.position, 100.0);
        assert_eq!(outcome.state.velocity, 9.0);

        let expected = vehicle.motor_efficiency(9.0) * vehicle.drag_force(9.0) * 100.0;
        assert_relative_eq!(outcome.energy_delta, expected, max_relative = 1e-9);
    }

    #[test]
    fn last_step_is_clamped_to_the_boundary() {
        let track = straight_track(1.0);
        let vehicle = VehicleParameters::default();
        let ctx = StepContext { track: &track, vehicle: &vehicle, step_size: 0.3, max_steps: 100 };
        let curve = AccelerationCurve::chained(CurveParameters::new(0.0, 0.0), 0.0, 0.0);

        let outcome = step_segment(&ctx, track.placed_segments()[0], &curve, SimulationState::new(5.0, 0.0)).unwrap();
        let positions: Vec<f64> = outcome.samples.velocity().iter().map(|(x, _)| *x).collect();
        assert_eq!(positions.len(), 4);
        assert_eq!(*positions.last().unwrap(), 1.0);
        assert_relative_eq!(positions[3] - positions[2], 0.1, epsilon = 1e-12);
    }

    #[test]
    fn forward_euler_in_distance() {
        let track = straight_track(2.0);
        let vehicle = VehicleParameters::default();
        let ctx = StepContext { track: &track, vehicle: &vehicle, step_size: 1.0, max_steps: 100 };
        let curve = AccelerationCurve::chained(CurveParameters::new(0.0, 1.0), 0.0, 2.0);

        let outcome = step_segment(&ctx, track.placed_segments()[0], &curve, SimulationState::new(4.0, 2.0)).unwrap();
        // step 1: a(0) = 2, dt = 1/4 -> v = 4.5
        // step 2: a(1) = 3, dt = 1/4.5 -> v = 4.5 + 3/4.5
        assert_relative_eq!(outcome.samples.velocity()[0].1, 4.5);
        assert_relative_eq!(outcome.state.velocity, 4.5 + 3.0 / 4.5);
        assert_eq!(outcome.state.acceleration, 4.0);
        assert_eq!(outcome.state.acceleration_range.max, 4.0);
        assert_eq!(outcome.state.velocity_range.min, 4.0);
    }

    #[test]
    fn stalls_when_velocity_drops_to_zero() {
        let track = straight_track(50.0);
        let vehicle = VehicleParameters::default();
        let ctx = StepContext { track: &track, vehicle: &vehicle, step_size: 1.0, max_steps: 1000 };
        let curve = AccelerationCurve::chained(CurveParameters::new(0.0, 0.0), 0.0, -5.0);

        let err = step_segment(&ctx, track.placed_segments()[0], &curve, SimulationState::new(3.0, -5.0)).unwrap_err();
        match err {
            SimulationError::StalledVehicle { segment, position, velocity } => {
                assert_eq!(segment, 0);
                assert!(position <= 2.0);
                assert!(velocity <= 0.0);
            }
            e => panic!("unexpected error {}", e)
        }
    }

    #[test]
    fn stalls_on_zero_entry_velocity() {
        let track = straight_track(10.0);
        let vehicle = VehicleParameters::default();
        let ctx = StepContext { track: &track, vehicle: &vehicle, step_size: 1.0, max_steps: 1000 };
        let curve = AccelerationCurve::chained(CurveParameters::new(0.0, 0.0), 0.0, 1.0);

        let err = step_segment(&ctx, track.placed_segments()[0], &curve, SimulationState::new(0.0, 1.0)).unwrap_err();
        assert_eq!(err, SimulationError::StalledVehicle { segment: 0, position: 0.0, velocity: 0.0 });
    }

    #[test]
    fn rejects_overflowing_energy() {
        let track = straight_track(10.0);
        let vehicle = VehicleParameters::default();
        let ctx = StepContext { track: &track, vehicle: &vehicle, step_size: 1.0, max_steps: 1000 };
        let curve = AccelerationCurve::chained(CurveParameters::new(0.0, 0.0), 0.0, 0.0);

        // drag at 1e200 m/s is past f64::MAX
        let err = step_segment(&ctx, track.placed_segments()[0], &curve, SimulationState::new(1e200, 0.0)).unwrap_err();
        assert_eq!(err, SimulationError::NonFiniteState { segment: 0, position: 1.0 });
    }

    #[test]
    fn respects_step_budget() {
        let track = straight_track(10.0);
        let vehicle = VehicleParameters::default();
        let ctx = StepContext { track: &track, vehicle: &vehicle, step_size: 1.0, max_steps: 5 };
        let curve = AccelerationCurve::chained(CurveParameters::new(0.0, 0.0), 0.0, 0.0);

        let err = step_segment(&ctx, track.placed_segments()[0], &curve, SimulationState::new(3.0, 0.0)).unwrap_err();
        assert_eq!(err, SimulationError::StepBudgetExceeded { limit: 5 });
    }
}
