//! Core types for the capitals trivia engine.

use serde::{Deserialize, Serialize};

/// A single country record from the data provider. Immutable external data,
/// keyed by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub capital: String,
    pub continent: String,
    pub sub_continent: String,
    pub population: u64,
    pub main_language: String,
    pub main_airport: String,
    pub currency: String,
    /// Land area in square kilometres.
    pub area: u64,
    pub flag_emoji: String,
}

/// Which attribute pairing a question tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizCategory {
    CountryToCapital,
    CapitalToCountry,
    FlagToCountry,
    /// Resolved to one of the concrete categories per question.
    Random,
}

impl Default for QuizCategory {
    fn default() -> Self {
        Self::CountryToCapital
    }
}

impl QuizCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CountryToCapital => "country_to_capital",
            Self::CapitalToCountry => "capital_to_country",
            Self::FlagToCountry => "flag_to_country",
            Self::Random => "random",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "country_to_capital" => Some(Self::CountryToCapital),
            "capital_to_country" => Some(Self::CapitalToCountry),
            "flag_to_country" => Some(Self::FlagToCountry),
            "random" => Some(Self::Random),
            _ => None,
        }
    }
}

/// Lifecycle of a play session. One-way; only an explicit reset returns to
/// Waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Waiting,
    Playing,
    Ended,
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Waiting
    }
}

/// Scoring policy options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringScheme {
    Tiered,
    TimeWeighted,
}

impl Default for ScoringScheme {
    fn default() -> Self {
        Self::Tiered
    }
}

impl ScoringScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tiered => "tiered",
            Self::TimeWeighted => "time_weighted",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "tiered" => Some(Self::Tiered),
            "time_weighted" => Some(Self::TimeWeighted),
            _ => None,
        }
    }
}

/// Game configuration. Every knob has a sensible default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub max_hints: usize,
    pub scoring: ScoringScheme,
    /// Similarity at or above which a wrong answer counts as "close".
    pub close_threshold: f64,
    /// Minimum length (of the longer string) for close-match detection.
    pub min_close_len: usize,
    /// Size of the recently-used-country window.
    pub recent_country_cap: usize,
    /// Random-draw retries before the recently-used window is cleared.
    pub selection_retry_cap: u32,
    /// Question counts at which a milestone notice fires (exact equality).
    pub milestones: Vec<u32>,
    pub perfect_streak_notice: u32,
    pub correct_streak_notice: u32,
    /// Mean-point difference below which the trend reads as stable.
    pub trend_stability_band: f64,
    /// Per-question countdown in seconds; None disables the timed variant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_hints: 3,
            scoring: ScoringScheme::default(),
            close_threshold: 0.7,
            min_close_len: 3,
            recent_country_cap: 15,
            selection_retry_cap: 50,
            milestones: vec![10, 25, 50],
            perfect_streak_notice: 3,
            correct_streak_notice: 5,
            trend_stability_band: 0.3,
            time_limit: None,
        }
    }
}
