//! Core engine for a geography trivia game.
//!
//! Everything here is synchronous and in-process: a host (CLI, server,
//! desktop shell) drives a [`SessionController`] and renders whatever the
//! engine hands back. The engine owns answer matching, hints, per-question
//! state, the score ledger and progress analysis; it performs no I/O.

pub mod countries;
pub mod error;
pub mod hints;
pub mod ledger;
pub mod matching;
pub mod progress;
pub mod question;
pub mod scoring;
pub mod session;
pub mod types;

pub use countries::{CountryProvider, StaticCountries};
pub use error::{GameError, Result};
pub use hints::{HintProvider, MAX_HINTS};
pub use ledger::{ScoreEntry, ScoreLedger, ScoreStats, ScoringBreakdown};
pub use matching::{AnswerMatcher, ValidationResult};
pub use progress::{
    DetailedProgress, PerformanceTrend, ProgressAnalyzer, ProgressDisplay, StreakInfo, StreakType,
};
pub use question::{Question, QuestionState, QuestionStats};
pub use scoring::{get_policy, policy_for, QuestionOutcome, ScoringPolicy};
pub use session::{
    AnswerOutcome, GameSession, GameSnapshot, QuestionView, SessionController, TimerCallback,
};
pub use types::{Country, GameConfig, GameStatus, QuizCategory, ScoringScheme};
