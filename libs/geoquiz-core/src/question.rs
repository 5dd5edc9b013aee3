//! Per-question state machine.
//!
//! At most one question is live at a time. Hints revealed are always a
//! prefix of hints available; attempts and revealed hints only grow while
//! the question is open, and nothing mutates after completion.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::hints::{factual_hints, HintProvider};
use crate::scoring::{QuestionOutcome, ScoringPolicy};
use crate::types::{Country, QuizCategory};

/// One quiz question and everything that happened to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub country: Country,
    pub category: QuizCategory,
    pub question_text: String,
    pub correct_answer: String,
    pub hints_available: Vec<String>,
    pub hints_revealed: Vec<String>,
    /// Raw user submissions, verbatim and append-only.
    pub attempts: Vec<String>,
    pub is_completed: bool,
    /// Valid only once `is_completed` is set.
    pub points_awarded: u32,
    /// Seconds spent, recorded at completion in the timed variant.
    pub time_used: u32,
}

/// Snapshot of the live question's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionStats {
    pub hints_used: usize,
    pub hints_remaining: usize,
    pub attempts: usize,
    pub is_completed: bool,
}

/// Holder of the single live question.
#[derive(Debug, Default)]
pub struct QuestionState {
    current: Option<Question>,
}

impl QuestionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and activate a question for the country and (already resolved)
    /// category. An unfinished prior question is silently replaced; its
    /// attempts and hints are discarded.
    pub fn create_question(&mut self, country: Country, category: QuizCategory) -> &Question {
        let (question_text, correct_answer, hints_available) = match category {
            QuizCategory::CapitalToCountry => {
                let hints = HintProvider::for_noun("country");
                (
                    format!("Which country has the capital {}?", country.capital),
                    country.name.clone(),
                    hints.generate_up_to(&country.name, hints.max_hints()),
                )
            }
            QuizCategory::FlagToCountry => (
                format!("Which country does this flag belong to? {}", country.flag_emoji),
                country.name.clone(),
                factual_hints(&country),
            ),
            // Random is resolved by the session controller before a question
            // is created; treat it as the default pairing if it slips through.
            QuizCategory::CountryToCapital | QuizCategory::Random => {
                let hints = HintProvider::default();
                (
                    format!("What is the capital of {}?", country.name),
                    country.capital.clone(),
                    hints.generate_up_to(&country.capital, hints.max_hints()),
                )
            }
        };

        &*self.current.insert(Question {
            country,
            category,
            question_text,
            correct_answer,
            hints_available,
            hints_revealed: Vec::new(),
            attempts: Vec::new(),
            is_completed: false,
            points_awarded: 0,
            time_used: 0,
        })
    }

    /// Reveal the next unrevealed hint, in catalog order. Exhaustion is not
    /// an error: `Ok(None)` once every hint is out.
    pub fn request_hint(&mut self) -> Result<Option<String>> {
        let question = self.open_question_mut()?;

        let next_index = question.hints_revealed.len();
        if next_index >= question.hints_available.len() {
            return Ok(None);
        }

        let hint = question.hints_available[next_index].clone();
        question.hints_revealed.push(hint.clone());
        Ok(Some(hint))
    }

    /// Record a raw submission against the live question.
    pub fn add_attempt(&mut self, attempt: &str) -> Result<()> {
        let question = self.open_question_mut()?;
        question.attempts.push(attempt.to_string());
        Ok(())
    }

    /// Seal the question and derive its point award from the policy.
    pub fn complete_question(
        &mut self,
        is_correct: bool,
        policy: &dyn ScoringPolicy,
        time_used: Option<u32>,
    ) -> Result<u32> {
        let question = self.open_question_mut()?;

        question.is_completed = true;
        question.time_used = time_used.unwrap_or(0);
        question.points_awarded = policy.points(QuestionOutcome {
            hints_used: question.hints_revealed.len(),
            is_correct,
            time_used,
        });
        Ok(question.points_awarded)
    }

    pub fn current(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    pub fn hints_used(&self) -> usize {
        self.current
            .as_ref()
            .map(|q| q.hints_revealed.len())
            .unwrap_or(0)
    }

    pub fn hints_remaining(&self) -> usize {
        self.current
            .as_ref()
            .map(|q| q.hints_available.len() - q.hints_revealed.len())
            .unwrap_or(0)
    }

    pub fn has_more_hints(&self) -> bool {
        self.hints_remaining() > 0
    }

    pub fn revealed_hints(&self) -> &[String] {
        self.current
            .as_ref()
            .map(|q| q.hints_revealed.as_slice())
            .unwrap_or(&[])
    }

    pub fn stats(&self) -> QuestionStats {
        match &self.current {
            Some(q) => QuestionStats {
                hints_used: q.hints_revealed.len(),
                hints_remaining: q.hints_available.len() - q.hints_revealed.len(),
                attempts: q.attempts.len(),
                is_completed: q.is_completed,
            },
            None => QuestionStats::default(),
        }
    }

    pub fn reset(&mut self) {
        self.current = None;
    }

    fn open_question_mut(&mut self) -> Result<&mut Question> {
        let question = self.current.as_mut().ok_or(GameError::NoActiveQuestion)?;
        if question.is_completed {
            return Err(GameError::QuestionCompleted);
        }
        Ok(question)
    }
}
