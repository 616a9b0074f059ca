//! Round engine implementation.
//!
//! The round engine is a timestamp-driven state machine. It never sleeps or
//! runs timers of its own: the caller supplies `now` on every transition and
//! owns all display timing between memorization and answering.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Memorize -> Answering -> Resolved -> (Memorize | Idle)
//! ```
//!
//! `reset()` returns to `Idle` from any phase and keeps the score.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = RoundEngine::new();
//! engine.unlock(&FreePlay, Utc::now());
//! engine.start_round(&config, &mut generator, Utc::now())?;
//! // display shows the question, then hides it
//! engine.reveal_deadline(Utc::now())?;
//! let resolution = engine.submit_answer("42", Utc::now())?;
//! ```

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::answer::Answer;
use super::generator::{QuestionGenerator, QuizConfig};
use super::question::Question;
use super::scoring;
use crate::entitlement::Entitlement;
use crate::error::RoundError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    /// Question is visible; the answer clock has not started.
    Memorize,
    /// Question is hidden and the deadline is running.
    Answering,
    Resolved,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Idle => "idle",
            Phase::Memorize => "memorizing",
            Phase::Answering => "answering",
            Phase::Resolved => "resolved",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
    Timeout,
    InvalidFormat,
}

impl Outcome {
    pub fn is_correct(self) -> bool {
        self == Outcome::Correct
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Correct => "correct",
            Outcome::Incorrect => "incorrect",
            Outcome::Timeout => "timeout",
            Outcome::InvalidFormat => "invalid_format",
        }
    }
}

/// Verdict of one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub outcome: Outcome,
    /// Always reported so the driver can show it on a miss.
    pub expected_answer: Answer,
    pub points_awarded: u64,
    pub cumulative_score: u64,
    pub at: DateTime<Utc>,
}

/// Read-only view of the engine for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub phase: Phase,
    pub question: Option<Question>,
    pub answer_deadline: Option<DateTime<Utc>>,
    pub cumulative_score: u64,
    pub last_resolution: Option<Resolution>,
}

/// Session round state.
///
/// One instance lives for the whole session; only its fields change.
/// Serializable so a session store can hold it between driver calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundEngine {
    phase: Phase,
    question: Option<Question>,
    /// Set exactly once per round, on entering `Answering`.
    #[serde(default)]
    answer_deadline: Option<DateTime<Utc>>,
    cumulative_score: u64,
    /// Entitlement already granted; the gate is not consulted again.
    #[serde(default)]
    unlocked: bool,
    #[serde(default)]
    last_resolution: Option<Resolution>,
}

impl RoundEngine {
    /// Fresh locked session: score 0, phase `Idle`.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn answer_deadline(&self) -> Option<DateTime<Utc>> {
        self.answer_deadline
    }

    pub fn cumulative_score(&self) -> u64 {
        self.cumulative_score
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn last_resolution(&self) -> Option<&Resolution> {
        self.last_resolution.as_ref()
    }

    /// Seconds left to answer at `now`, if the answer clock is running.
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> Option<i64> {
        match self.phase {
            Phase::Answering => self
                .answer_deadline
                .map(|deadline| (deadline - now).num_seconds().max(0)),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase,
            question: self.question.clone(),
            answer_deadline: self.answer_deadline,
            cumulative_score: self.cumulative_score,
            last_resolution: self.last_resolution.clone(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Consult the entitlement gate unless play was already granted.
    ///
    /// Returns `Some(Event::SessionUnlocked)` the first time play is granted.
    pub fn unlock(&mut self, gate: &dyn Entitlement, now: DateTime<Utc>) -> Option<Event> {
        if self.unlocked || !gate.may_play() {
            return None;
        }
        self.unlocked = true;
        tracing::debug!("session unlocked");
        Some(Event::SessionUnlocked { at: now })
    }

    /// Generate the next question and enter `Memorize`.
    ///
    /// The new question is carried by the returned [`Event::RoundStarted`]
    /// and is also available from [`RoundEngine::question`].
    ///
    /// Valid from `Idle` and `Resolved`. On any error the phase is unchanged.
    pub fn start_round<R: Rng>(
        &mut self,
        config: &QuizConfig,
        generator: &mut QuestionGenerator<R>,
        now: DateTime<Utc>,
    ) -> Result<Event, RoundError> {
        self.ensure_can_start()?;
        let question = generator.generate_for(config)?;
        Ok(self.begin(question, now))
    }

    /// Enter `Memorize` with a question prepared by the caller, e.g. to
    /// replay a round. Same phase and entitlement rules as `start_round`.
    pub fn start_round_with(
        &mut self,
        question: Question,
        now: DateTime<Utc>,
    ) -> Result<Event, RoundError> {
        self.ensure_can_start()?;
        Ok(self.begin(question, now))
    }

    /// Hide the question and start the answer clock.
    pub fn reveal_deadline(&mut self, now: DateTime<Utc>) -> Result<Event, RoundError> {
        let time_limit_secs = match (self.phase, &self.question) {
            (Phase::Memorize, Some(question)) => question.time_limit_secs(),
            (phase, _) => {
                return Err(RoundError::InvalidTransition {
                    phase,
                    action: "reveal the deadline",
                })
            }
        };

        let deadline = now + Duration::seconds(i64::from(time_limit_secs));
        self.phase = Phase::Answering;
        self.answer_deadline = Some(deadline);
        tracing::debug!(%deadline, time_limit_secs, "answer window opened");
        Ok(Event::AnswerWindowOpened {
            deadline,
            time_limit_secs,
            at: now,
        })
    }

    /// Evaluate the player's answer and resolve the round.
    ///
    /// Rules, first match wins: past the deadline is `Timeout`; input that is
    /// not a number is `InvalidFormat`; a match is `Correct` and scores;
    /// anything else is `Incorrect`. Only valid while `Answering`, so a round
    /// is judged exactly once.
    pub fn submit_answer(
        &mut self,
        raw_input: &str,
        now: DateTime<Utc>,
    ) -> Result<Resolution, RoundError> {
        let (question, deadline) = match (self.phase, &self.question, self.answer_deadline) {
            (Phase::Answering, Some(question), Some(deadline)) => (question, deadline),
            (phase, _, _) => {
                return Err(RoundError::InvalidTransition {
                    phase,
                    action: "submit an answer",
                })
            }
        };

        let expected_answer = question.expected_answer();
        let outcome = if now > deadline {
            Outcome::Timeout
        } else {
            match expected_answer.parse_like(raw_input) {
                None => Outcome::InvalidFormat,
                Some(given) if given == expected_answer => Outcome::Correct,
                Some(_) => Outcome::Incorrect,
            }
        };

        let points_awarded = if outcome.is_correct() {
            scoring::points(question.difficulty())
        } else {
            0
        };
        tracing::info!(
            operator = ?question.operator(),
            difficulty = ?question.difficulty(),
            outcome = ?outcome,
            points = points_awarded,
            "round resolved"
        );

        self.cumulative_score = self.cumulative_score.saturating_add(points_awarded);
        self.phase = Phase::Resolved;
        let resolution = Resolution {
            outcome,
            expected_answer,
            points_awarded,
            cumulative_score: self.cumulative_score,
            at: now,
        };
        self.last_resolution = Some(resolution.clone());
        Ok(resolution)
    }

    /// Abandon the current round and return to `Idle`. Score is kept.
    pub fn reset(&mut self, now: DateTime<Utc>) -> Event {
        tracing::debug!(from = %self.phase, "session reset");
        self.phase = Phase::Idle;
        self.question = None;
        self.answer_deadline = None;
        self.last_resolution = None;
        Event::SessionReset {
            cumulative_score: self.cumulative_score,
            at: now,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn ensure_can_start(&self) -> Result<(), RoundError> {
        match self.phase {
            Phase::Idle | Phase::Resolved => {}
            phase => {
                return Err(RoundError::InvalidTransition {
                    phase,
                    action: "start a round",
                })
            }
        }
        if !self.unlocked {
            return Err(RoundError::Locked);
        }
        Ok(())
    }

    fn begin(&mut self, question: Question, now: DateTime<Utc>) -> Event {
        let text = question.text();
        tracing::debug!(from = %self.phase, question = %text, "round started");

        self.phase = Phase::Memorize;
        self.answer_deadline = None;
        self.last_resolution = None;
        self.question = Some(question.clone());
        Event::RoundStarted {
            question,
            text,
            at: now,
        }
    }
}
