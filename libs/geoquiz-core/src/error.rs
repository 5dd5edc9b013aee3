//! Error types for geoquiz-core.

use thiserror::Error;

/// Result type alias using GameError.
pub type Result<T> = std::result::Result<T, GameError>;

/// Precondition violations raised by the game engine.
///
/// These indicate a caller driving the state machine wrongly (answering
/// outside an active game, completing a question twice, and so on), not
/// recoverable runtime conditions. Blank input and hint exhaustion are
/// ordinary outcomes and never surface here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("game is not in playing state")]
    NotPlaying,

    #[error("no active question")]
    NoActiveQuestion,

    #[error("question is already completed")]
    QuestionCompleted,

    #[error("game is already ended")]
    GameAlreadyEnded,

    #[error("invalid hint level: {level}, must be between 1 and {max}")]
    InvalidHintLevel { level: usize, max: usize },

    #[error("country provider has no countries")]
    NoCountriesAvailable,
}
