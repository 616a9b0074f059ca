//! Question value types: operators, difficulty tiers, and the immutable
//! question handed to the display driver.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::answer::Answer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    #[serde(alias = "+")]
    Add,
    #[serde(alias = "-", alias = "sub")]
    Subtract,
    #[serde(alias = "×", alias = "x", alias = "*", alias = "mul")]
    Multiply,
    #[serde(alias = "÷", alias = "/", alias = "div")]
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }

    /// Multiply and divide get a narrowed operand interval.
    pub fn is_multiplicative(self) -> bool {
        matches!(self, Operator::Multiply | Operator::Divide)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "+" | "add" | "plus" => Ok(Operator::Add),
            "-" | "sub" | "subtract" | "minus" => Ok(Operator::Subtract),
            "×" | "x" | "*" | "mul" | "multiply" | "times" => Ok(Operator::Multiply),
            "÷" | "/" | "div" | "divide" => Ok(Operator::Divide),
            other => Err(format!("unknown operator: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Base operand interval before any operator-specific narrowing.
    pub fn base_range(self) -> (i64, i64) {
        match self {
            Difficulty::Easy => (1, 10),
            Difficulty::Normal => (1, 50),
            Difficulty::Hard => (1, 200),
        }
    }

    /// Seconds the player has to answer once the question is hidden.
    pub fn time_limit_secs(self) -> u32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Normal => 7,
            Difficulty::Hard => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A generated arithmetic problem.
///
/// Fields are private so a question cannot be altered once the generator
/// hands it out; the time limit is a snapshot of the difficulty table taken
/// at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    operator: Operator,
    operands: (i64, i64),
    expected_answer: Answer,
    difficulty: Difficulty,
    time_limit_secs: u32,
}

impl Question {
    /// Build a question from operands, deriving the expected answer.
    ///
    /// Returns `None` for a zero divisor or when the result overflows `i64`.
    pub fn new(operator: Operator, operands: (i64, i64), difficulty: Difficulty) -> Option<Self> {
        let (a, b) = operands;
        let expected_answer = match operator {
            Operator::Add => Answer::Integer(a.checked_add(b)?),
            Operator::Subtract => Answer::Integer(a.checked_sub(b)?),
            Operator::Multiply => Answer::Integer(a.checked_mul(b)?),
            Operator::Divide => Answer::quotient(a, b)?,
        };
        Some(Self {
            operator,
            operands,
            expected_answer,
            difficulty,
            time_limit_secs: difficulty.time_limit_secs(),
        })
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// `(left, right)`, or `(dividend, divisor)` for division.
    pub fn operands(&self) -> (i64, i64) {
        self.operands
    }

    pub fn expected_answer(&self) -> Answer {
        self.expected_answer
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    /// Text shown to the player during the memorize phase.
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = self.operands;
        write!(f, "{a} {} {b}", self.operator)?;
        if self.operator == Operator::Divide {
            f.write_str(" (round to 2 decimals)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_parses_symbols_and_names() {
        assert_eq!("+".parse::<Operator>(), Ok(Operator::Add));
        assert_eq!("SUB".parse::<Operator>(), Ok(Operator::Subtract));
        assert_eq!("×".parse::<Operator>(), Ok(Operator::Multiply));
        assert_eq!("x".parse::<Operator>(), Ok(Operator::Multiply));
        assert_eq!("/".parse::<Operator>(), Ok(Operator::Divide));
        assert!("%".parse::<Operator>().is_err());
    }

    #[test]
    fn difficulty_tables() {
        assert_eq!(Difficulty::Easy.base_range(), (1, 10));
        assert_eq!(Difficulty::Normal.base_range(), (1, 50));
        assert_eq!(Difficulty::Hard.base_range(), (1, 200));
        assert_eq!(Difficulty::Easy.time_limit_secs(), 10);
        assert_eq!(Difficulty::Normal.time_limit_secs(), 7);
        assert_eq!(Difficulty::Hard.time_limit_secs(), 4);
        assert_eq!(Difficulty::default(), Difficulty::Normal);
    }

    #[test]
    fn question_derives_expected_answer() {
        let q = Question::new(Operator::Multiply, (6, 7), Difficulty::Normal).unwrap();
        assert_eq!(q.expected_answer(), Answer::Integer(42));
        assert_eq!(q.time_limit_secs(), 7);

        let q = Question::new(Operator::Subtract, (3, 9), Difficulty::Easy).unwrap();
        assert_eq!(q.expected_answer(), Answer::Integer(-6));

        let q = Question::new(Operator::Divide, (29, 4), Difficulty::Hard).unwrap();
        assert_eq!(q.expected_answer(), Answer::Hundredths(725));
    }

    #[test]
    fn zero_divisor_is_rejected() {
        assert!(Question::new(Operator::Divide, (5, 0), Difficulty::Easy).is_none());
    }

    #[test]
    fn overflowing_operands_are_rejected() {
        assert!(Question::new(Operator::Multiply, (i64::MAX, 2), Difficulty::Easy).is_none());
        assert!(Question::new(Operator::Add, (i64::MAX, 1), Difficulty::Easy).is_none());
        assert!(Question::new(Operator::Subtract, (i64::MIN, 1), Difficulty::Easy).is_none());
    }

    #[test]
    fn question_text() {
        let q = Question::new(Operator::Add, (3, 4), Difficulty::Easy).unwrap();
        assert_eq!(q.text(), "3 + 4");
        let q = Question::new(Operator::Divide, (9, 1), Difficulty::Easy).unwrap();
        assert_eq!(q.text(), "9 ÷ 1 (round to 2 decimals)");
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Operator::Multiply).unwrap();
        assert_eq!(json, "\"multiply\"");
        let d: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(d, Difficulty::Hard);
        let ops: Vec<Operator> = serde_json::from_str(r#"["+", "div", "×"]"#).unwrap();
        assert_eq!(ops, vec![Operator::Add, Operator::Divide, Operator::Multiply]);
    }
}
