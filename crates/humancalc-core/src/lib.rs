//! # humancalc Core Library
//!
//! This library provides the core logic for humancalc, a timed
//! mental-arithmetic quiz. A question is shown, hidden after a short
//! memorization window, and must be answered before a difficulty-dependent
//! deadline. Drivers (the CLI, or any other front end) own rendering and
//! display timing; the core only compares timestamps it is handed.
//!
//! ## Architecture
//!
//! - **Round Engine**: A timestamp-driven state machine
//!   (`Idle -> Memorize -> Answering -> Resolved`) with no internal timers
//! - **Question Generator**: Range-shaped random arithmetic problems with an
//!   injected, seedable random source
//! - **Storage**: TOML-based configuration and an in-memory SQLite session
//!   store
//! - **Entitlement**: Trait for the "may play" gate checked before the first
//!   round
//!
//! ## Key Components
//!
//! - [`RoundEngine`]: Core round state machine
//! - [`QuestionGenerator`]: Question sampling
//! - [`SessionDb`]: Per-process session store
//! - [`Config`]: Application configuration management

pub mod entitlement;
pub mod error;
pub mod events;
pub mod quiz;
pub mod storage;

pub use entitlement::{Entitlement, FreePlay, Locked};
pub use error::{ConfigError, CoreError, RoundError};
pub use events::Event;
pub use quiz::{
    Answer, Difficulty, Operator, Outcome, Phase, Question, QuestionGenerator, QuizConfig,
    Resolution, RoundEngine, RoundSnapshot,
};
pub use storage::{Config, SessionDb, SessionSummary};
