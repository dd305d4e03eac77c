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
use std::ops::Range;
use std::path::{Path, PathBuf};
use plotters::prelude::*;
use tracing::info;
use track_sim::{SampleSeries, SeriesKind};

use crate::error::{AppError, Result};


/// Draws one PNG per series kind into `output_dir`, creating it if needed.
/// Returns the paths of the written files.
pub fn render_all(series: &SampleSeries, output_dir: &Path, size_px: u32) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)?;
    let mut written = Vec::with_capacity(SeriesKind::ALL.len());
    for kind in SeriesKind::ALL {
        let path = output_dir.join(format!("{}.png", kind.as_str()));
        draw_series(series.get(kind), kind, &path, size_px).map_err(|e| AppError::Plot {
            kind: kind.to_string(),
            reason: e.to_string()
        })?;
        info!("Wrote {} plot to {}", kind, path.display());
        written.push(path);
    }
    Ok(written)
}

fn draw_series(data: &[(f64, f64)],
               kind: SeriesKind,
               path: &Path,
               size_px: u32) -> std::result::Result<(), Box<dyn std::error::Error>>
{
    let root = BitMapBackend::new(path, (size_px, size_px)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_range = axis_range(data.iter().map(|(x, _)| *x));
    let y_range = axis_range(data.iter().map(|(_, y)| *y));
    let mut context = ChartBuilder::on(&root)
        .margin(10)
        .caption(format!("{} vs position", kind), ("sans-serif", 18))
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .build_cartesian_2d(x_range, y_range)?;

    context
        .configure_mesh()
        .x_labels(10)
        .x_desc("Position (m)")
        .y_labels(10)
        .y_desc(format!("{} ({})", kind, kind.unit()))
        .bold_line_style(&BLACK.mix(0.2))
        .light_line_style(&BLACK.mix(0.05))
        .draw()?;

    context.draw_series(LineSeries::new(data.iter().copied(), &BLUE))?;
    root.present()?;
    Ok(())
}

/// Bounds covering every finite value with a little headroom. Flat or
/// empty data gets a unit-wide range so the chart can still be built.
fn axis_range(values: impl Iterator<Item=f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if min > max {
        return 0.0..1.0;
    }
    let span = max - min;
    if span == 0.0 {
        return (min - 0.5)..(max + 0.5);
    }
    let pad = span * 0.05;
    (min - pad)..(max + pad)
}
