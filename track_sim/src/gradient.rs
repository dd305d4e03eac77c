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

use std::fmt::{Display, Formatter};
use utils::numeric::{clamp_to_u8, round_float_to};


/// Velocity that maps to full red on the track drawing
pub const DEFAULT_FULL_SCALE_VELOCITY: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Display for GradientStop {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,
               "<stop offset=\"{:.4}\" style=\"stop-color:rgb({},{},{});stop-opacity:1\"/>",
               self.offset, self.red, self.green, self.blue)
    }
}

/// Colours the track by speed: one stop per velocity sample, red channel
/// proportional to `velocity / full_scale_velocity`. Samples that fall past
/// the end of the track are dropped.
pub fn velocity_gradient(velocity_series: &[(f64, f64)],
                         total_length: f64,
                         full_scale_velocity: f64) -> Vec<GradientStop>
{
    velocity_series.iter().filter_map(|(position, velocity)| {
        let offset = round_float_to(position / total_length, 4);
        if !(offset <= 1.0) {
            return None;
        }
        Some(GradientStop {
            offset,
            red: clamp_to_u8(255.0 * velocity / full_scale_velocity),
            green: 0,
            blue: 0,
        })
    }).collect()
}

pub fn to_svg_stops(stops: &[GradientStop]) -> String {
    stops.iter().map(|s| format!("{}\n", s)).collect()
}

#[cfg(test)]
mod tests {
    use super::{to_svg_stops, velocity_gradient, DEFAULT_FULL_SCALE_VELOCITY};

    #[test]
    fn red_scales_with_velocity() {
        let series = [(0.0, 0.0), (300.0, 8.0), (600.0, 16.0), (600.6, 16.0)];
        let stops = velocity_gradient(&series, 600.0, DEFAULT_FULL_SCALE_VELOCITY);
        assert_eq!(stops.len(), 3);
        assert_eq!(stops[0].red, 0);
        assert_eq!(stops[1].red, 128);
        assert_eq!(stops[1].offset, 0.5);
        assert_eq!(stops[2].red, 255);
        assert_eq!(stops[2].offset, 1.0);
    }

    #[test]
    fn out_of_range_velocities_saturate() {
        let stops = velocity_gradient(&[(0.0, 40.0), (1.0, -3.0)], 10.0, DEFAULT_FULL_SCALE_VELOCITY);
        assert_eq!(stops[0].red, 255);
        assert_eq!(stops[1].red, 0);
    }

    #[test]
    fn svg_rendering() {
        let stops = velocity_gradient(&[(150.0, 9.0)], 600.0, DEFAULT_FULL_SCALE_VELOCITY);
        assert_eq!(to_svg_stops(&stops),
                   "<stop offset=\"0.2500\" style=\"stop-color:rgb(143,0,0);stop-opacity:1\"/>\n");
    }
}
