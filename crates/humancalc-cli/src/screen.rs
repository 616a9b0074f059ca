//! Terminal display: owns every delay the round engine leaves to its driver.

use std::io::{self, IsTerminal, Write};
use std::thread;
use std::time::Duration;

use humancalc_core::storage::DisplayConfig;
use humancalc_core::{Event, Outcome, Resolution, SessionSummary};

pub struct Screen {
    timing: DisplayConfig,
    json: bool,
    ansi: bool,
}

impl Screen {
    pub fn new(timing: DisplayConfig, json: bool) -> Self {
        Self {
            timing,
            json,
            ansi: !json && io::stdout().is_terminal(),
        }
    }

    /// Print an event as a JSON line, or a short text line for the events
    /// that have no dedicated view.
    pub fn event(&self, event: &Event) -> io::Result<()> {
        if self.json {
            return self.json_line(event);
        }
        match event {
            Event::SessionUnlocked { .. } => println!("Unlocked. Good luck!"),
            Event::SessionReset {
                cumulative_score, ..
            } => println!("Session over. Total score: {cumulative_score}"),
            _ => {}
        }
        Ok(())
    }

    /// Show the question, wait out the memorize window and countdown, then
    /// hide it.
    pub fn memorize(&self, event: &Event) -> io::Result<()> {
        if self.json {
            self.json_line(event)?;
        } else if let Event::RoundStarted { text, .. } = event {
            println!("Memorize: {text}");
        }
        self.pause(self.timing.memorize_ms);

        let mut out = io::stdout();
        for tick in (1..=self.timing.countdown_ticks).rev() {
            if !self.json {
                write!(out, "\rShowing for {tick}...")?;
                out.flush()?;
            }
            self.pause(self.timing.tick_ms);
        }
        if self.ansi {
            // Clear the countdown line and the question above it.
            write!(out, "\r\x1b[2K\x1b[1A\x1b[2K\r")?;
        } else if !self.json && self.timing.countdown_ticks > 0 {
            writeln!(out)?;
        }
        out.flush()
    }

    pub fn answer_prompt(&self, event: &Event) -> io::Result<()> {
        if self.json {
            return self.json_line(event);
        }
        if let Event::AnswerWindowOpened {
            time_limit_secs, ..
        } = event
        {
            print!("Your answer ({time_limit_secs}s): ");
        }
        io::stdout().flush()
    }

    pub fn resolution(&self, resolution: &Resolution) -> io::Result<()> {
        if self.json {
            return self.json_line(&Event::from(resolution));
        }
        match resolution.outcome {
            Outcome::Correct => println!(
                "You got it! +{} (score {})",
                resolution.points_awarded, resolution.cumulative_score
            ),
            Outcome::Timeout => println!(
                "Time's up! Answer was {}",
                resolution.expected_answer
            ),
            Outcome::InvalidFormat => println!(
                "Invalid answer, numbers only. Answer was {}",
                resolution.expected_answer
            ),
            Outcome::Incorrect => println!(
                "Not quite! Answer was {}",
                resolution.expected_answer
            ),
        }
        Ok(())
    }

    pub fn next_prompt(&self) -> io::Result<()> {
        if self.json {
            return Ok(());
        }
        print!("[n]ext round / [q]uit: ");
        io::stdout().flush()
    }

    pub fn summary(&self, summary: &SessionSummary) -> io::Result<()> {
        if self.json {
            return self.json_line(summary);
        }
        println!(
            "Rounds: {}  correct: {}  wrong: {}  timeouts: {}  invalid: {}  points: {}",
            summary.rounds,
            summary.correct,
            summary.incorrect,
            summary.timeouts,
            summary.invalid,
            summary.points
        );
        Ok(())
    }

    fn json_line<T: serde::Serialize>(&self, value: &T) -> io::Result<()> {
        let line = serde_json::to_string(value).map_err(io::Error::other)?;
        println!("{line}");
        Ok(())
    }

    fn pause(&self, ms: u64) {
        if ms > 0 {
            thread::sleep(Duration::from_millis(ms));
        }
    }
}
