//! Answer values and player input parsing.
//!
//! Division answers are kept as fixed-point hundredths so that comparing the
//! player's input with the expected quotient never depends on binary float
//! equality.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Nudge applied before rounding typed input so a decimal tie such as `0.125`
/// (stored as `0.12499999…`) still rounds away from zero.
///
/// It applies to every input, so a value within `1e-9` below a tie also rounds
/// up: `6.9949999999` reads as `7.00`.
const TIE_NUDGE: f64 = 1e-7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    /// Exact result of add, subtract or multiply.
    Integer(i64),
    /// Quotient rounded to 2 decimal places, scaled by 100.
    Hundredths(i64),
}

impl Answer {
    /// `dividend / divisor` rounded half away from zero to 2 decimals.
    ///
    /// Returns `None` when `divisor` is zero.
    pub fn quotient(dividend: i64, divisor: i64) -> Option<Self> {
        if divisor == 0 {
            return None;
        }
        let num = i128::from(dividend) * 100;
        let den = i128::from(divisor);
        let negative = (num < 0) != (den < 0);
        let (n, d) = (num.abs(), den.abs());
        let rounded = (2 * n + d) / (2 * d);
        let signed = if negative { -rounded } else { rounded };
        i64::try_from(signed).ok().map(Answer::Hundredths)
    }

    /// Interpret raw player input with the same kind as `self`.
    ///
    /// Integer answers truncate the parsed number toward zero; hundredths
    /// answers round it to 2 decimals, treating anything within `1e-9` of a
    /// tie as the tie. Returns `None` when the input is not a finite number.
    pub fn parse_like(&self, raw: &str) -> Option<Answer> {
        let value: f64 = raw.trim().parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some(match self {
            Answer::Integer(_) => Answer::Integer(value.trunc() as i64),
            Answer::Hundredths(_) => Answer::Hundredths(round_hundredths(value)),
        })
    }
}

fn round_hundredths(value: f64) -> i64 {
    let scaled = value * 100.0;
    (scaled + scaled.signum() * TIE_NUDGE).round() as i64
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Answer::Integer(v) => write!(f, "{v}"),
            Answer::Hundredths(h) => {
                let sign = if h < 0 { "-" } else { "" };
                let abs = h.unsigned_abs();
                write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotient_rounds_to_two_decimals() {
        assert_eq!(Answer::quotient(29, 4), Some(Answer::Hundredths(725)));
        assert_eq!(Answer::quotient(1, 3), Some(Answer::Hundredths(33)));
        assert_eq!(Answer::quotient(2, 3), Some(Answer::Hundredths(67)));
        assert_eq!(Answer::quotient(1, 8), Some(Answer::Hundredths(13)));
        assert_eq!(Answer::quotient(-1, 8), Some(Answer::Hundredths(-13)));
        assert_eq!(Answer::quotient(12, 1), Some(Answer::Hundredths(1200)));
        assert_eq!(Answer::quotient(12, 0), None);
    }

    #[test]
    fn integer_input_truncates_toward_zero() {
        let expected = Answer::Integer(42);
        assert_eq!(expected.parse_like("42"), Some(Answer::Integer(42)));
        assert_eq!(expected.parse_like(" 42.9 "), Some(Answer::Integer(42)));
        assert_eq!(expected.parse_like("-3.7"), Some(Answer::Integer(-3)));
        assert_eq!(expected.parse_like("4.2e1"), Some(Answer::Integer(42)));
    }

    #[test]
    fn hundredths_input_rounds() {
        let expected = Answer::Hundredths(725);
        assert_eq!(expected.parse_like("7.25"), Some(Answer::Hundredths(725)));
        assert_eq!(expected.parse_like("7.2"), Some(Answer::Hundredths(720)));
        assert_eq!(expected.parse_like("7.254"), Some(Answer::Hundredths(725)));
        assert_eq!(expected.parse_like("0.125"), Some(Answer::Hundredths(13)));
        assert_eq!(expected.parse_like("7"), Some(Answer::Hundredths(700)));
    }

    #[test]
    fn near_tie_tolerance_is_bounded() {
        let expected = Answer::Hundredths(700);
        assert_eq!(expected.parse_like("6.9949999999"), Some(Answer::Hundredths(700)));
        assert_eq!(expected.parse_like("6.9949998"), Some(Answer::Hundredths(699)));
    }

    #[test]
    fn unparseable_input() {
        let expected = Answer::Integer(1);
        assert_eq!(expected.parse_like("abc"), None);
        assert_eq!(expected.parse_like(""), None);
        assert_eq!(expected.parse_like("NaN"), None);
        assert_eq!(expected.parse_like("inf"), None);
    }

    #[test]
    fn display() {
        assert_eq!(Answer::Integer(-6).to_string(), "-6");
        assert_eq!(Answer::Hundredths(725).to_string(), "7.25");
        assert_eq!(Answer::Hundredths(900).to_string(), "9.00");
        assert_eq!(Answer::Hundredths(-5).to_string(), "-0.05");
    }
}
