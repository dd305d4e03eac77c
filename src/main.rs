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

mod error;
mod optimiser;
mod plot;
mod report;
mod settings;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use clap::{ArgAction, Parser, ValueHint};
use itertools::Itertools;
use tracing::{error, info};

use track_sim::{parse_strategy_args, InputError, TrackSimulator};
use crate::error::Result;
use crate::settings::Settings;


#[derive(Parser, Debug)]
#[command(author, version, about = "Simulates a vehicle lapping a track under a piecewise acceleration strategy", long_about = None)]
struct Cli {
    /// Settings file to use instead of strategy-sim-conf.* in the working directory
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Also write the run summary to this file as JSON
    #[arg(long, value_hint = ValueHint::FilePath)]
    json: Option<PathBuf>,

    /// Directory to write the plots to, overriding the settings file
    #[arg(long, value_hint = ValueHint::DirPath)]
    output_dir: Option<PathBuf>,

    /// Search for a better strategy starting from VALUES before simulating
    #[arg(long, action = ArgAction::SetTrue)]
    optimise: bool,

    /// Iteration cap for --optimise
    #[arg(long, default_value_t = 200, requires = "optimise")]
    iterations: u64,

    /// v0 a0 a1 b1 ... an bn, optionally followed by `none` to skip plotting
    #[arg(allow_negative_numbers = true, allow_hyphen_values = true)]
    values: Vec<String>,
}

fn main() -> ExitCode {
    match env::current_dir() {
        Ok(current_dir) => {
            let file_appender = tracing_appender::rolling::never(current_dir, "strategy_sim.log");
            let subscriber = tracing_subscriber::fmt()
                .with_writer(file_appender)
                .with_ansi(false)
                .compact()
                .finish();
            match tracing::subscriber::set_global_default(subscriber) {
                Ok(_) => {
                    info!("Logging initialised");
                }
                Err(e) => {
                    eprintln!("Failed to init logging. {}", e.to_string());
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to init logging. Couldn't determine current dir {}", e.to_string());
        }
    }

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            if let Some(segment) = e.failed_segment() {
                eprintln!("Failed Segment: {}", segment);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?
    };
    if let Some(dir) = &cli.output_dir {
        settings.set_output_dir(dir);
    }
    let track = settings.build_track()?;

    let mut input = match parse_strategy_args(&cli.values, track.segment_count()) {
        Ok(input) => input,
        Err(InputError::ArgumentCount { expected, received }) => {
            println!("Expected argument count: {}", expected);
            println!("Received: {}", received);
            return Ok(ExitCode::FAILURE);
        }
        Err(e @ InputError::ArgumentParse { .. }) => {
            println!("{}", e);
            return Ok(ExitCode::SUCCESS);
        }
    };

    let simulator = TrackSimulator::new(track, settings.vehicle, settings.simulation)?;
    info!("Simulating {} segments over {}m with a resolution of {}m, straight above {}m curvature",
          simulator.track().segment_count(), simulator.track().total_length(),
          simulator.graph_resolution(), simulator.track().straight_threshold());

    if cli.optimise {
        let best = optimiser::optimise(&simulator, settings.limits, &input, cli.iterations)?;
        println!("Optimised Strategy: {}", best.input.to_values().iter().join(" "));
        println!("Strategy Score: {}", best.score);
        println!("Optimiser Iterations: {}", best.iterations);
        input = best.input;
    }

    let result = simulator.run(&input)?;
    if !input.suppress_output {
        plot::render_all(&result.series, &settings.output_dir(), settings.plot_size_px())?;
    }
    print!("{}", report::format_report(&result));

    if let Some(path) = &cli.json {
        report::write_json_summary(&result.summary, path)?;
        info!("Wrote summary to {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}
