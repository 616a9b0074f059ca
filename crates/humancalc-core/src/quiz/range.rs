//! Operand sampling intervals.

use super::question::{Difficulty, Operator};

/// Upper bound applied to multiply and divide operands at every tier.
const MULTIPLICATIVE_CAP: i64 = 50;

/// Minimum width kept for multiply and divide intervals.
const MULTIPLICATIVE_MIN_SPAN: i64 = 5;

/// Inclusive `(low, high)` interval operands are drawn from.
///
/// Add and subtract use the difficulty's base interval. Multiply and divide
/// are narrowed to `[max(1, low), max(low + 5, min(high, 50))]` so products
/// and quotients stay tractable even on Hard.
pub fn range_for(operator: Operator, difficulty: Difficulty) -> (i64, i64) {
    let (low, high) = difficulty.base_range();
    if operator.is_multiplicative() {
        (
            low.max(1),
            (low + MULTIPLICATIVE_MIN_SPAN).max(high.min(MULTIPLICATIVE_CAP)),
        )
    } else {
        (low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn additive_ranges_follow_difficulty() {
        assert_eq!(range_for(Operator::Add, Difficulty::Easy), (1, 10));
        assert_eq!(range_for(Operator::Subtract, Difficulty::Normal), (1, 50));
        assert_eq!(range_for(Operator::Add, Difficulty::Hard), (1, 200));
    }

    #[test]
    fn multiplicative_ranges_are_capped() {
        assert_eq!(range_for(Operator::Multiply, Difficulty::Easy), (1, 10));
        assert_eq!(range_for(Operator::Divide, Difficulty::Normal), (1, 50));
        assert_eq!(range_for(Operator::Multiply, Difficulty::Hard), (1, 50));
        assert_eq!(range_for(Operator::Divide, Difficulty::Hard), (1, 50));
    }

    #[test]
    fn every_range_starts_positive() {
        for op in Operator::ALL {
            for d in Difficulty::ALL {
                let (low, high) = range_for(op, d);
                assert!(low >= 1);
                assert!(high > low);
            }
        }
    }
}
