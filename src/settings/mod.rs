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
use std::path::{Path, PathBuf};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use track_sim::{SimulationSettings, StrategyLimits, Track, TrackLayout, VehicleParameters};


#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    output_dir: String,
    plot_size_px: u32,
    pub simulation: SimulationSettings,
    pub track: TrackLayout,
    pub vehicle: VehicleParameters,
    pub limits: StrategyLimits,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            output_dir: Settings::DEFAULT_OUTPUT_DIR.to_string(),
            plot_size_px: Settings::DEFAULT_PLOT_SIZE_PX,
            simulation: SimulationSettings::default(),
            track: TrackLayout::default(),
            vehicle: VehicleParameters::default(),
            limits: StrategyLimits::default(),
        }
    }
}

impl Settings {
    const OUTPUT_DIR: &'static str = "output_dir";
    const PLOT_SIZE_PX: &'static str = "plot_size_px";
    const NUM_TICKS: &'static str = "simulation.num_ticks";
    const QUADRATURE_STEPS: &'static str = "simulation.quadrature_steps";
    const MAX_STEPS: &'static str = "simulation.max_steps";
    const SEGMENT_LENGTHS: &'static str = "track.segment_lengths";
    const CURVATURE_ZONES: &'static str = "track.curvature_zones";
    const STRAIGHT_THRESHOLD: &'static str = "track.straight_threshold";
    const CONFIG_FILENAME: &'static str = "strategy-sim-conf";
    const CONFIG_EXTENSIONS: [&'static str; 7] = ["toml", "json", "yaml", "yml", "ini", "ron", "json5"];
    const ENV_PREFIX: &'static str = "STRATEGY_SIM";

    const DEFAULT_OUTPUT_DIR: &'static str = "./plots";
    const DEFAULT_PLOT_SIZE_PX: u32 = 400;

    /// Loads settings from `strategy-sim-conf.*` in the working directory and
    /// `STRATEGY_SIM_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Settings::load_in(Path::new("."))
    }

    /// A missing settings file means defaults, and the defaults are written
    /// out so there is a file to edit next time. A file that exists but does
    /// not parse is an error and is left untouched.
    fn load_in(dir: &Path) -> Result<Self, ConfigError> {
        let base = dir.join(Settings::CONFIG_FILENAME);
        let settings: Settings = Settings::with_defaults()?
            .add_source(config::File::with_name(&base.to_string_lossy()).required(false))
            .add_source(Settings::environment())
            .build()?
            .try_deserialize()?;

        if Settings::existing_config_file(dir).is_none() {
            match Settings::default().write_to(dir) {
                Ok(path) => info!("No settings file found. Wrote defaults to {}", path.display()),
                Err(e) => error!("Failed to write settings. {}", e.to_string())
            }
        }
        Ok(settings)
    }

    fn existing_config_file(dir: &Path) -> Option<PathBuf> {
        Settings::CONFIG_EXTENSIONS.iter()
            .map(|ext| dir.join(format!("{}.{}", Settings::CONFIG_FILENAME, ext)))
            .find(|path| path.is_file())
    }

    /// Loads settings from an explicit file. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Settings::with_defaults()?
            .add_source(config::File::from(path))
            .add_source(Settings::environment())
            .build()?
            .try_deserialize()
    }

    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let sim = SimulationSettings::default();
        let track = TrackLayout::default();
        Config::builder()
            .set_default(Settings::OUTPUT_DIR, Settings::DEFAULT_OUTPUT_DIR)?
            .set_default(Settings::PLOT_SIZE_PX, Settings::DEFAULT_PLOT_SIZE_PX as i64)?
            .set_default(Settings::NUM_TICKS, sim.num_ticks as i64)?
            .set_default(Settings::QUADRATURE_STEPS, sim.quadrature_steps as i64)?
            .set_default(Settings::MAX_STEPS, sim.max_steps as i64)?
            .set_default(Settings::SEGMENT_LENGTHS, track.segment_lengths)?
            .set_default(Settings::CURVATURE_ZONES, track.curvature_zones)?
            .set_default(Settings::STRAIGHT_THRESHOLD, track.straight_threshold)
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(Settings::ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
    }

    pub fn build_track(&self) -> track_sim::error::Result<Track> {
        self.track.build()
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
    }

    pub fn set_output_dir(&mut self, new_path: &Path) {
        self.output_dir = new_path.to_string_lossy().into_owned();
    }

    pub fn plot_size_px(&self) -> u32 {
        self.plot_size_px
    }

    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(format!("{}.toml", Settings::CONFIG_FILENAME));
        fs::write(&path, self.to_toml()?)?;
        Ok(path)
    }

    fn to_toml(&self) -> std::io::Result<String> {
        toml::to_string(&self).map_err(|_e|{
            std::io::Error::new(std::io::ErrorKind::Other, "Failed to encode settings to toml")
        })
    }
}
