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

/// Revolutions per minute of a wheel with the given circumference (m)
/// travelling at `speed_ms`
pub fn wheel_rpm(speed_ms: f64, wheel_circumference: f64) -> f64 {
    60.0 * speed_ms / wheel_circumference
}

#[cfg(test)]
mod tests {
    use crate::units::wheel_rpm;

    #[test]
    fn wheel_rpm_tests() {
        assert_eq!(wheel_rpm(0.0, 1.75), 0.0);
        assert_eq!(wheel_rpm(1.75, 1.75), 60.0);
        assert_eq!(wheel_rpm(7.0, 1.75), 240.0);
    }
}
