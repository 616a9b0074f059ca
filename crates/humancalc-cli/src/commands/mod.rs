pub mod config;
pub mod play;
pub mod question;
pub mod rules;

use clap::Args;
use humancalc_core::{Config, Difficulty, Operator, QuestionGenerator, QuizConfig};

/// Game settings that override the configuration file for one invocation.
#[derive(Args, Debug)]
pub struct GameArgs {
    /// Difficulty: easy, normal or hard
    #[arg(long, short)]
    pub difficulty: Option<Difficulty>,
    /// Comma-separated operators, e.g. "+,-,x,/" or "add,divide"
    #[arg(long, short, value_delimiter = ',')]
    pub ops: Option<Vec<Operator>>,
    /// Seed for a reproducible question sequence
    #[arg(long)]
    pub seed: Option<u64>,
}

impl GameArgs {
    pub fn quiz_config(&self, config: &Config) -> QuizConfig {
        let mut quiz = config.quiz_config();
        if let Some(difficulty) = self.difficulty {
            quiz.difficulty = difficulty;
        }
        if let Some(ops) = &self.ops {
            quiz.operators = ops.clone();
        }
        quiz
    }

    pub fn generator(&self, config: &Config) -> QuestionGenerator {
        match self.seed.or(config.game.seed) {
            Some(seed) => QuestionGenerator::seeded(seed),
            None => QuestionGenerator::from_entropy(),
        }
    }
}
