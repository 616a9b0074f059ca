use clap::Args;
use humancalc_core::{Config, Question};
use serde::Serialize;

use super::GameArgs;

#[derive(Args)]
pub struct QuestionArgs {
    #[command(flatten)]
    game: GameArgs,
}

#[derive(Serialize)]
struct QuestionOutput<'a> {
    text: String,
    question: &'a Question,
}

pub fn run(args: QuestionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let quiz = args.game.quiz_config(&config);
    let mut generator = args.game.generator(&config);

    let question = generator.generate_for(&quiz)?;
    let output = QuestionOutput {
        text: question.text(),
        question: &question,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
