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

use std::fs;
use std::path::Path;
use track_sim::{SimulationResult, SimulationSummary};

use crate::error::Result;


/// Console report of a finished run. The labels are scraped by external
/// tooling so they must stay stable.
pub fn format_report(result: &SimulationResult) -> String {
    let summary = &result.summary;
    let lines = [
        ("Initial Velocity (m/s)", summary.initial_velocity),
        ("Final Velocity (m/s)", summary.final_velocity),
        ("Max Velocity (m/s)", summary.velocity.max),
        ("Min Velocity (m/s)", summary.velocity.min),
        ("Mean Velocity (m/s)", result.series.mean_velocity()),
        ("Velocity Std Dev (m/s)", result.series.velocity_std_dev()),
        ("Max Acceleration (m/s^2)", summary.acceleration.max),
        ("Min Acceleration (m/s^2)", summary.acceleration.min),
        ("Max Centripetal Acceleration (m/s^2)", summary.max_centripetal_acceleration),
        ("Time Elapsed (s)", summary.total_time),
        ("Energy Consumed (J)", summary.total_energy),
        ("Energy Consumption (W)", summary.average_power()),
    ];
    lines.iter().map(|(label, value)| format!("{}: {}\n", label, value)).collect()
}

pub fn write_json_summary(summary: &SimulationSummary, path: &Path) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(summary)?)?;
    Ok(())
}
