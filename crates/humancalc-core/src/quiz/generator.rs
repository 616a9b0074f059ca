//! Random question generation.
//!
//! The random source is injected so a session can be replayed from a seed.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use super::question::{Difficulty, Operator, Question};
use super::range::range_for;
use crate::error::RoundError;

/// Probability that subtraction operands are reordered so the result is
/// non-negative.
const SUBTRACT_ORDERED_PROBABILITY: f64 = 0.8;

/// Player-selected game settings read before each round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    pub difficulty: Difficulty,
    pub operators: Vec<Operator>,
}

impl QuizConfig {
    pub fn new(difficulty: Difficulty, operators: impl IntoIterator<Item = Operator>) -> Self {
        Self {
            difficulty,
            operators: operators.into_iter().collect(),
        }
    }

    /// Selected operators with duplicates removed, in selection order.
    pub fn distinct_operators(&self) -> Vec<Operator> {
        distinct(&self.operators)
    }
}

fn distinct(operators: &[Operator]) -> Vec<Operator> {
    let mut out = Vec::with_capacity(operators.len());
    for op in operators {
        if !out.contains(op) {
            out.push(*op);
        }
    }
    out
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self::new(Difficulty::default(), [Operator::Add])
    }
}

#[derive(Debug, Clone)]
pub struct QuestionGenerator<R = Mcg128Xsl64> {
    rng: R,
}

impl QuestionGenerator<Mcg128Xsl64> {
    /// Deterministic generator: the same seed yields the same questions.
    pub fn seeded(seed: u64) -> Self {
        Self::new(Mcg128Xsl64::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(Mcg128Xsl64::from_entropy())
    }
}

impl<R: Rng> QuestionGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a question for the given settings.
    ///
    /// `operators` is treated as a set: repeated entries do not weight the
    /// pick.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::NoOperatorSelected`] when `operators` is empty.
    pub fn generate(
        &mut self,
        difficulty: Difficulty,
        operators: &[Operator],
    ) -> Result<Question, RoundError> {
        let operator = *distinct(operators)
            .choose(&mut self.rng)
            .ok_or(RoundError::NoOperatorSelected)?;
        let (low, high) = range_for(operator, difficulty);

        let operands = match operator {
            Operator::Add | Operator::Multiply => self.pair(low, high),
            Operator::Subtract => {
                let (a, b) = self.pair(low, high);
                if self.rng.gen_bool(SUBTRACT_ORDERED_PROBABILITY) {
                    (a.max(b), a.min(b))
                } else {
                    (a, b)
                }
            }
            Operator::Divide => {
                let divisor = self.rng.gen_range(low..=low.max(1));
                let dividend = self.rng.gen_range(low..=high);
                (dividend, divisor)
            }
        };

        let question =
            Question::new(operator, operands, difficulty).ok_or(RoundError::ZeroDivisor)?;
        tracing::debug!(
            operator = ?operator,
            difficulty = ?difficulty,
            operands = ?operands,
            "generated question"
        );
        Ok(question)
    }

    /// Generate using the settings in `config`.
    pub fn generate_for(&mut self, config: &QuizConfig) -> Result<Question, RoundError> {
        self.generate(config.difficulty, &config.operators)
    }

    fn pair(&mut self, low: i64, high: i64) -> (i64, i64) {
        (
            self.rng.gen_range(low..=high),
            self.rng.gen_range(low..=high),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::answer::Answer;

    #[test]
    fn empty_selection_is_a_configuration_error() {
        let mut generator = QuestionGenerator::seeded(1);
        let result = generator.generate(Difficulty::Easy, &[]);
        assert_eq!(result, Err(RoundError::NoOperatorSelected));
    }

    #[test]
    fn easy_addition_stays_in_range() {
        let mut generator = QuestionGenerator::seeded(7);
        for _ in 0..200 {
            let q = generator.generate(Difficulty::Easy, &[Operator::Add]).unwrap();
            let (a, b) = q.operands();
            assert_eq!(q.operator(), Operator::Add);
            assert!((1..=10).contains(&a) && (1..=10).contains(&b));
            assert_eq!(q.expected_answer(), Answer::Integer(a + b));
            assert_eq!(q.time_limit_secs(), 10);
        }
    }

    #[test]
    fn same_seed_same_questions() {
        let ops = Operator::ALL;
        let mut first = QuestionGenerator::seeded(42);
        let mut second = QuestionGenerator::seeded(42);
        for _ in 0..50 {
            assert_eq!(
                first.generate(Difficulty::Hard, &ops).unwrap(),
                second.generate(Difficulty::Hard, &ops).unwrap()
            );
        }
    }

    #[test]
    fn subtraction_is_mostly_non_negative() {
        let mut generator = QuestionGenerator::seeded(3);
        let mut non_negative = 0;
        let total = 2000;
        for _ in 0..total {
            let q = generator
                .generate(Difficulty::Normal, &[Operator::Subtract])
                .unwrap();
            if let Answer::Integer(v) = q.expected_answer() {
                if v >= 0 {
                    non_negative += 1;
                }
            }
        }
        // 0.8 ordered plus roughly half of the remaining unordered draws.
        let ratio = non_negative as f64 / total as f64;
        assert!(ratio > 0.85, "ratio was {ratio}");
        assert!(ratio < 0.95, "ratio was {ratio}");
    }

    #[test]
    fn division_uses_unit_divisor() {
        let mut generator = QuestionGenerator::seeded(11);
        for d in Difficulty::ALL {
            let q = generator.generate(d, &[Operator::Divide]).unwrap();
            let (dividend, divisor) = q.operands();
            assert_eq!(divisor, 1);
            assert_eq!(q.expected_answer(), Answer::Hundredths(dividend * 100));
        }
    }

    #[test]
    fn duplicate_operators_are_collapsed() {
        let config = QuizConfig::new(
            Difficulty::Easy,
            [Operator::Add, Operator::Add, Operator::Divide, Operator::Add],
        );
        assert_eq!(
            config.distinct_operators(),
            vec![Operator::Add, Operator::Divide]
        );
    }

    #[test]
    fn repeated_operators_do_not_weight_the_pick() {
        let mut generator = QuestionGenerator::seeded(5);
        let ops = [Operator::Add, Operator::Add, Operator::Add, Operator::Divide];
        let total = 3000;
        let adds = (0..total)
            .filter(|_| {
                let q = generator.generate(Difficulty::Easy, &ops).unwrap();
                q.operator() == Operator::Add
            })
            .count();
        let share = adds as f64 / total as f64;
        assert!((0.45..0.55).contains(&share), "add share was {share}");
    }

    #[test]
    fn all_operators_are_eventually_picked() {
        let mut generator = QuestionGenerator::seeded(99);
        let mut seen = Vec::new();
        for _ in 0..400 {
            let q = generator.generate(Difficulty::Normal, &Operator::ALL).unwrap();
            if !seen.contains(&q.operator()) {
                seen.push(q.operator());
            }
        }
        assert_eq!(seen.len(), 4);
    }
}
