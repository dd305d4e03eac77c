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

use approx::assert_relative_eq;
use track_sim::track::{resolve_zone, Segment};
use track_sim::{parse_strategy_args, CurveParameters, SimulationError, SimulationSettings, Track, TrackLayout, TrackSimulator, VehicleParameters};

fn default_lap() -> TrackSimulator {
    TrackSimulator::new(TrackLayout::default().build().unwrap(),
                        VehicleParameters::default(),
                        SimulationSettings::default()).unwrap()
}

#[test]
fn default_lap_with_gentle_strategy() {
    let sim = default_lap();
    let args = ["9", "0", "-1e-6", "3e-4", "0", "-1e-4", "0", "0", "0", "0", "none"];
    let input = parse_strategy_args(&args, sim.track().segment_count()).unwrap();
    assert!(input.suppress_output);

    let result = sim.run(&input).unwrap();
    let summary = &result.summary;
    assert!(summary.total_time.is_finite() && summary.total_time > 0.0);
    assert!(summary.total_energy.is_finite() && summary.total_energy > 0.0);
    assert!(summary.velocity.max >= summary.velocity.min);
    assert_eq!(result.series.velocity()[0].1, 9.0);
    assert_eq!(summary.initial_velocity, 9.0);

    let zone_count = sim.track().zone_count();
    let total_length = sim.track().total_length();
    for zone in 0..zone_count {
        let in_zone = result.series.velocity().iter()
            .filter(|(x, _)| resolve_zone(*x, total_length, zone_count) == zone)
            .count();
        assert!(in_zone > 0, "zone {} has no samples", zone);
    }
}

#[test]
fn aggressive_parabolas_stall_the_vehicle() {
    // with x measured in metres these curves decelerate hard within the first few metres
    let sim = default_lap();
    let args = ["9", "0", "-1", "2", "-1", "0.55", "-3.5", "-1.4", "-3.5", "-1.4"];
    let input = parse_strategy_args(&args, 4).unwrap();
    match sim.run(&input) {
        Err(SimulationError::StalledVehicle { segment, position, velocity }) => {
            assert_eq!(segment, 0);
            assert!(position > 0.0 && position < 20.0);
            assert!(velocity <= 0.0);
        }
        other => panic!("expected a stall, got {:?}", other.map(|r| r.summary))
    }
}

#[test]
fn straight_threshold_is_exclusive() {
    let vehicle = VehicleParameters::default();
    let run = |curvature: f64| {
        let track = Track::new(vec![Segment::new(100.0)], vec![curvature], 500.0).unwrap();
        let sim = TrackSimulator::new(track, vehicle, SimulationSettings::default()).unwrap();
        sim.simulate(10.0, 0.0, &[CurveParameters::new(0.0, 0.0)]).unwrap().summary
    };

    let at_threshold = run(500.0);
    let above_threshold = run(500.0 + 1e-9);
    let straight = run(0.0);

    assert_relative_eq!(at_threshold.max_centripetal_acceleration, 100.0 / 500.0);
    assert_eq!(above_threshold.max_centripetal_acceleration, 0.0);
    assert_eq!(above_threshold.total_energy, straight.total_energy);
    assert!(at_threshold.total_energy > straight.total_energy);

    let drag_only = vehicle.motor_efficiency(10.0) * vehicle.drag_force(10.0) * 100.0;
    let with_corner = vehicle.motor_efficiency(10.0) * (vehicle.drag_force(10.0) + 0.2 * vehicle.mass_kg) * 100.0;
    assert_relative_eq!(straight.total_energy, drag_only, max_relative = 1e-9);
    assert_relative_eq!(at_threshold.total_energy, with_corner, max_relative = 1e-9);
}

#[test]
fn independent_runs_agree_across_threads() {
    let sim = default_lap();
    let input = parse_strategy_args(&["9", "0.01", "0", "0", "0", "0", "0", "0", "0", "0"], 4).unwrap();
    let reference = sim.run(&input).unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| sim.run(&input).unwrap())).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), reference);
        }
    });
}
