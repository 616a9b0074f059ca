use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quiz::{Answer, Outcome, Question, Resolution};

/// Every state change in a quiz session produces an Event.
/// Drivers render them; the CLI prints them as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The entitlement gate granted play for this session.
    SessionUnlocked {
        at: DateTime<Utc>,
    },
    /// A new question is on screen for memorization.
    RoundStarted {
        question: Question,
        text: String,
        at: DateTime<Utc>,
    },
    /// The question is hidden and the answer clock is running.
    AnswerWindowOpened {
        deadline: DateTime<Utc>,
        time_limit_secs: u32,
        at: DateTime<Utc>,
    },
    RoundResolved {
        outcome: Outcome,
        expected_answer: Answer,
        points_awarded: u64,
        cumulative_score: u64,
        at: DateTime<Utc>,
    },
    /// The current round was abandoned; score is kept.
    SessionReset {
        cumulative_score: u64,
        at: DateTime<Utc>,
    },
}

impl From<&Resolution> for Event {
    fn from(resolution: &Resolution) -> Self {
        Event::RoundResolved {
            outcome: resolution.outcome,
            expected_answer: resolution.expected_answer,
            points_awarded: resolution.points_awarded,
            cumulative_score: resolution.cumulative_score,
            at: resolution.at,
        }
    }
}
