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

use itertools::Itertools;
use tracing::warn;

use crate::curve::CurveParameters;
use crate::error::InputError;


/// Trailing token that turns off plot generation
pub const SUPPRESS_OUTPUT_TOKEN: &'static str = "none";

/// A parsed strategy: `{v0, a0, (a1, b1), ..., (an, bn)}` plus whether a
/// trailing non-numeric token was supplied
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyInput {
    pub initial_velocity: f64,
    pub initial_acceleration: f64,
    pub curves: Vec<CurveParameters>,
    pub suppress_output: bool,
    pub trailing_token: Option<String>,
}

impl StrategyInput {
    pub fn expected_value_count(segment_count: usize) -> usize {
        2 + 2 * segment_count
    }

    /// Builds an input from a flat numeric vector. The vector must hold
    /// exactly `2 + 2 * segment_count` values.
    pub fn from_values(values: &[f64], segment_count: usize) -> Result<StrategyInput, InputError> {
        let expected = StrategyInput::expected_value_count(segment_count);
        if values.len() != expected {
            return Err(InputError::ArgumentCount { expected, received: values.len() });
        }
        Ok(StrategyInput {
            initial_velocity: values[0],
            initial_acceleration: values[1],
            curves: values[2..].iter().copied().tuples::<(f64, f64)>().map(CurveParameters::from).collect(),
            suppress_output: false,
            trailing_token: None,
        })
    }

    /// Inverse of `from_values`
    pub fn to_values(&self) -> Vec<f64> {
        let mut values = Vec::with_capacity(2 + 2 * self.curves.len());
        values.push(self.initial_velocity);
        values.push(self.initial_acceleration);
        for params in &self.curves {
            values.push(params.a);
            values.push(params.b);
        }
        values
    }
}

/// Parses the raw command line vector.
///
/// Every token must be numeric except the last one. A non-numeric last token
/// is accepted and raises the expected count by one; only `none` has any
/// effect (it suppresses plot output), anything else is kept but ignored.
/// A parse failure is reported before a count mismatch.
pub fn parse_strategy_args<S: AsRef<str>>(raw_args: &[S], segment_count: usize) -> Result<StrategyInput, InputError> {
    let mut values = Vec::with_capacity(raw_args.len());
    let mut trailing_token = None;
    for (index, arg) in raw_args.iter().enumerate() {
        let token = arg.as_ref();
        match token.trim().parse::<f64>() {
            Ok(val) => values.push(val),
            Err(_) if index == raw_args.len() - 1 => trailing_token = Some(token.to_string()),
            Err(_) => return Err(InputError::ArgumentParse { index, token: token.to_string() })
        }
    }

    let mut expected = StrategyInput::expected_value_count(segment_count);
    if trailing_token.is_some() {
        expected += 1;
    }
    if raw_args.len() != expected {
        return Err(InputError::ArgumentCount { expected, received: raw_args.len() });
    }

    let mut input = StrategyInput::from_values(&values, segment_count)?;
    if let Some(token) = trailing_token {
        input.suppress_output = token == SUPPRESS_OUTPUT_TOKEN;
        if !input.suppress_output {
            warn!("Ignoring unrecognised trailing argument '{}'", token);
        }
        input.trailing_token = Some(token);
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::{parse_strategy_args, StrategyInput};
    use crate::curve::CurveParameters;
    use crate::error::InputError;

    #[test]
    fn parses_full_vector() {
        let args = ["9", "0", "-1", "2", "-1", "0.55", "-3.5", "-1.4", "0", "0"];
        let input = parse_strategy_args(&args, 4).unwrap();
        assert_eq!(input.initial_velocity, 9.0);
        assert_eq!(input.initial_acceleration, 0.0);
        assert_eq!(input.curves, vec![
            CurveParameters::new(-1.0, 2.0),
            CurveParameters::new(-1.0, 0.55),
            CurveParameters::new(-3.5, -1.4),
            CurveParameters::new(0.0, 0.0),
        ]);
        assert!(!input.suppress_output);
        assert_eq!(input.trailing_token, None);
    }

    #[test]
    fn none_sentinel_suppresses_output() {
        let args = ["9", "0", "0", "0", "none"];
        let input = parse_strategy_args(&args, 1).unwrap();
        assert!(input.suppress_output);
        assert_eq!(input.trailing_token.as_deref(), Some("none"));
    }

    #[test]
    fn other_trailing_tokens_are_accepted_and_ignored() {
        let args = ["9", "0", "0", "0", "plots"];
        let input = parse_strategy_args(&args, 1).unwrap();
        assert!(!input.suppress_output);
        assert_eq!(input.trailing_token.as_deref(), Some("plots"));
    }

    #[test]
    fn count_mismatch() {
        let args = ["9", "0", "0"];
        assert_eq!(parse_strategy_args(&args, 1),
                   Err(InputError::ArgumentCount { expected: 4, received: 3 }));
        let with_sentinel = ["9", "0", "0", "none"];
        assert_eq!(parse_strategy_args(&with_sentinel, 1),
                   Err(InputError::ArgumentCount { expected: 5, received: 4 }));
        let empty: [&str; 0] = [];
        assert_eq!(parse_strategy_args(&empty, 4),
                   Err(InputError::ArgumentCount { expected: 10, received: 0 }));
    }

    #[test]
    fn parse_errors_win_over_count_errors() {
        let args = ["9", "fast", "0"];
        assert_eq!(parse_strategy_args(&args, 1),
                   Err(InputError::ArgumentParse { index: 1, token: "fast".to_string() }));
    }

    #[test]
    fn values_round_trip() {
        let values = [9.0, 0.5, -1.0, 2.0, 3.0, 4.0];
        let input = StrategyInput::from_values(&values, 2).unwrap();
        assert_eq!(input.to_values(), values.to_vec());
        assert!(StrategyInput::from_values(&values, 3).is_err());
    }
}
