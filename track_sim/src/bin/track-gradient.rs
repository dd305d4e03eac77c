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

// Prints SVG gradient stops colouring the default lap by speed.
// Takes the same numeric strategy vector as strategy-sim.

use track_sim::gradient::{to_svg_stops, velocity_gradient, DEFAULT_FULL_SCALE_VELOCITY};
use track_sim::{parse_strategy_args, SimulationSettings, TrackLayout, TrackSimulator, VehicleParameters};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let track = TrackLayout::default().build()?;
    let input = parse_strategy_args(&args, track.segment_count())?;
    let total_length = track.total_length();

    let sim = TrackSimulator::new(track, VehicleParameters::default(), SimulationSettings::default())?;
    let result = sim.run(&input)?;
    let stops = velocity_gradient(result.series.velocity(), total_length, DEFAULT_FULL_SCALE_VELOCITY);
    print!("{}", to_svg_stops(&stops));
    Ok(())
}
