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

pub fn round_float_to(float: f64, decimal_places: u32) -> f64 {
    let precision_base: u64 = 10;
    let precision_factor = precision_base.pow(decimal_places) as f64;
    (float * precision_factor).round() / precision_factor
}

/// Distances closer than this are treated as the same point along the track
pub const POSITION_EPSILON: f64 = 1e-9;

/// Scale-aware closeness check used when walking along the track.
/// The tolerance grows with the magnitude of the values being compared.
pub fn nearly_equal(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= POSITION_EPSILON * scale
}

pub fn clamp_to_u8(val: f64) -> u8 {
    if val.is_nan() {
        return 0;
    }
    val.round().clamp(0.0, u8::MAX as f64) as u8
}

pub fn is_even(val: usize) -> bool {
    val % 2 == 0
}
