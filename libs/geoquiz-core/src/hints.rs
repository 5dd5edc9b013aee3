//! Progressive hint generation.
//!
//! The structural catalog reveals properties of the answer string (length,
//! first letter, first and last letters) in a fixed order. Flag questions use
//! [`factual_hints`] instead, which reveal facts about the country rather
//! than the shape of its name.

use crate::error::{GameError, Result};
use crate::types::Country;

/// Size of the structural hint catalog.
pub const MAX_HINTS: usize = 3;

/// Deterministic, ordered hint generator for one answer string.
///
/// The noun parameterizes the hint text so that "What is the capital of
/// France?" hints about "the capital" while "Which country has the capital
/// Paris?" hints about "the country".
#[derive(Debug, Clone)]
pub struct HintProvider {
    noun: &'static str,
}

impl Default for HintProvider {
    fn default() -> Self {
        Self { noun: "capital" }
    }
}

impl HintProvider {
    pub fn for_noun(noun: &'static str) -> Self {
        Self { noun }
    }

    pub fn max_hints(&self) -> usize {
        MAX_HINTS
    }

    pub fn is_valid_level(&self, level: usize) -> bool {
        (1..=MAX_HINTS).contains(&level)
    }

    /// Short description of what a hint level reveals.
    pub fn description(&self, level: usize) -> Result<&'static str> {
        match level {
            1 => Ok("Number of letters"),
            2 => Ok("First letter"),
            3 => Ok("First and last letters"),
            _ => Err(GameError::InvalidHintLevel {
                level,
                max: MAX_HINTS,
            }),
        }
    }

    /// Generate the hint for a single level. Levels outside the catalog are
    /// a caller contract violation.
    pub fn generate(&self, target: &str, level: usize) -> Result<String> {
        if !self.is_valid_level(level) {
            return Err(GameError::InvalidHintLevel {
                level,
                max: MAX_HINTS,
            });
        }
        Ok(self.render(target, level))
    }

    /// Generate hints for levels 1 through `max_level`, clamped to the
    /// catalog size. A `max_level` of 0 yields an empty sequence.
    pub fn generate_up_to(&self, target: &str, max_level: usize) -> Vec<String> {
        (1..=max_level.min(MAX_HINTS))
            .map(|level| self.render(target, level))
            .collect()
    }

    fn render(&self, target: &str, level: usize) -> String {
        let chars: Vec<char> = target.chars().collect();
        let first = chars
            .first()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default();
        match level {
            1 => format!("The {} has {} letters.", self.noun, chars.len()),
            2 => format!("The {} starts with \"{}\".", self.noun, first),
            _ => {
                let last = chars
                    .last()
                    .map(|c| c.to_uppercase().to_string())
                    .unwrap_or_default();
                format!(
                    "The {} starts with \"{}\" and ends with \"{}\".",
                    self.noun, first, last
                )
            }
        }
    }
}

/// Factual hint sequence for flag questions: continent, capital, language.
pub fn factual_hints(country: &Country) -> Vec<String> {
    vec![
        format!("This country is in {}.", country.continent),
        format!("Its capital is {}.", country.capital),
        format!("The main language is {}.", country.main_language),
    ]
}
