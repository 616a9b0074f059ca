use std::io::{self, BufRead};

use chrono::Utc;
use clap::Args;
use humancalc_core::{Config, SessionDb};

use super::GameArgs;
use crate::screen::Screen;

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    game: GameArgs,
    /// Stop after this many rounds
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    rounds: Option<u32>,
    /// Print events as JSON lines instead of text
    #[arg(long)]
    json: bool,
}

/// Read one trimmed line; `None` at end of input.
fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

pub fn run(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let quiz = args.game.quiz_config(&config);
    let mut generator = args.game.generator(&config);
    let screen = Screen::new(config.display.clone(), args.json);
    let db = SessionDb::open_memory()?;
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let mut engine = db.load_engine()?;
    if let Some(event) = engine.unlock(&config.access.unlocked, Utc::now()) {
        screen.event(&event)?;
    }
    db.save_engine(&engine)?;

    let mut played = 0;
    loop {
        let mut engine = db.load_engine()?;
        let started = engine.start_round(&quiz, &mut generator, Utc::now())?;
        db.save_engine(&engine)?;
        screen.memorize(&started)?;

        let mut engine = db.load_engine()?;
        let opened = engine.reveal_deadline(Utc::now())?;
        db.save_engine(&engine)?;
        screen.answer_prompt(&opened)?;

        let answer = read_line(&mut input)?;
        let mut engine = db.load_engine()?;
        let question = engine.question().cloned();
        let resolution = engine.submit_answer(answer.as_deref().unwrap_or(""), Utc::now())?;
        if let Some(question) = &question {
            db.record_round(question, &resolution)?;
        }
        db.save_engine(&engine)?;
        screen.resolution(&resolution)?;

        played += 1;
        if answer.is_none() || args.rounds.is_some_and(|limit| played >= limit) {
            break;
        }

        screen.next_prompt()?;
        match read_line(&mut input)? {
            Some(choice) if matches!(choice.to_lowercase().as_str(), "q" | "quit") => break,
            Some(_) => {}
            None => break,
        }
    }

    let mut engine = db.load_engine()?;
    let reset = engine.reset(Utc::now());
    db.save_engine(&engine)?;
    tracing::debug!(rounds = played, "session finished");

    screen.summary(&db.summary()?)?;
    screen.event(&reset)?;
    Ok(())
}
