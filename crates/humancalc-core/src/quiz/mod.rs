mod answer;
mod engine;
mod generator;
mod question;
pub mod range;
pub mod scoring;

pub use answer::Answer;
pub use engine::{Outcome, Phase, Resolution, RoundEngine, RoundSnapshot};
pub use generator::{QuestionGenerator, QuizConfig};
pub use question::{Difficulty, Operator, Question};
