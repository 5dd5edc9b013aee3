//! Append-only score ledger.
//!
//! Entries are immutable once recorded and sequence numbers strictly
//! increase; a full reset is the only way history ever shrinks. Every
//! aggregate statistic is derived from the history on demand.

use serde::{Deserialize, Serialize};

use crate::scoring::{QuestionOutcome, ScoringPolicy};

/// One completed question, sealed at record time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub question_number: u32,
    pub country_name: String,
    pub hints_used: usize,
    pub points_awarded: u32,
    pub is_correct: bool,
}

/// Aggregate statistics over the recorded history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreStats {
    pub total_score: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub average_hints_used: f64,
    /// Correct answers that used no hints.
    pub perfect_answers: u32,
    /// Total over maximum possible, as a percentage rounded to 2 decimals.
    pub score_percentage: f64,
}

/// Entry counts bucketed by hint usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringBreakdown {
    pub no_hints: u32,
    pub one_hint: u32,
    pub multiple_hints: u32,
    pub incorrect: u32,
}

/// Sole owner of the completed-question history.
pub struct ScoreLedger {
    policy: Box<dyn ScoringPolicy>,
    history: Vec<ScoreEntry>,
    total: u32,
    counter: u32,
}

impl ScoreLedger {
    pub fn new(policy: Box<dyn ScoringPolicy>) -> Self {
        Self {
            policy,
            history: Vec::new(),
            total: 0,
            counter: 0,
        }
    }

    pub fn policy(&self) -> &dyn ScoringPolicy {
        self.policy.as_ref()
    }

    /// Price a completed question via the policy and append it. Returns the
    /// points awarded.
    pub fn record(
        &mut self,
        country_name: &str,
        hints_used: usize,
        is_correct: bool,
        time_used: Option<u32>,
    ) -> u32 {
        let points = self.policy.points(QuestionOutcome {
            hints_used,
            is_correct,
            time_used,
        });

        self.total += points;
        self.counter += 1;
        self.history.push(ScoreEntry {
            question_number: self.counter,
            country_name: country_name.to_string(),
            hints_used,
            points_awarded: points,
            is_correct,
        });
        points
    }

    pub fn current_score(&self) -> u32 {
        self.total
    }

    pub fn total_questions(&self) -> u32 {
        self.counter
    }

    /// Recorded entries times the policy's per-question maximum.
    pub fn max_possible_score(&self) -> u32 {
        self.counter * self.policy.max_per_question()
    }

    pub fn history(&self) -> &[ScoreEntry] {
        &self.history
    }

    pub fn last_entry(&self) -> Option<&ScoreEntry> {
        self.history.last()
    }

    pub fn stats(&self) -> ScoreStats {
        if self.history.is_empty() {
            return ScoreStats {
                total_score: 0,
                total_questions: 0,
                correct_answers: 0,
                average_hints_used: 0.0,
                perfect_answers: 0,
                score_percentage: 0.0,
            };
        }

        let correct_answers = self.history.iter().filter(|e| e.is_correct).count() as u32;
        let total_hints: usize = self.history.iter().map(|e| e.hints_used).sum();
        let perfect_answers = self
            .history
            .iter()
            .filter(|e| e.is_correct && e.hints_used == 0)
            .count() as u32;
        let max_possible = self.max_possible_score();
        let score_percentage = if max_possible > 0 {
            self.total as f64 / max_possible as f64 * 100.0
        } else {
            0.0
        };

        ScoreStats {
            total_score: self.total,
            total_questions: self.counter,
            correct_answers,
            average_hints_used: total_hints as f64 / self.counter as f64,
            perfect_answers,
            score_percentage: round2(score_percentage),
        }
    }

    pub fn breakdown(&self) -> ScoringBreakdown {
        let mut breakdown = ScoringBreakdown::default();
        for entry in &self.history {
            if !entry.is_correct {
                breakdown.incorrect += 1;
            } else if entry.hints_used == 0 {
                breakdown.no_hints += 1;
            } else if entry.hints_used == 1 {
                breakdown.one_hint += 1;
            } else {
                breakdown.multiple_hints += 1;
            }
        }
        breakdown
    }

    pub fn is_perfect_score(&self) -> bool {
        self.counter > 0 && self.total == self.max_possible_score()
    }

    /// Score efficiency as a percentage of the maximum, unrounded.
    pub fn efficiency(&self) -> f64 {
        let max_possible = self.max_possible_score();
        if max_possible > 0 {
            self.total as f64 / max_possible as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Formatted multi-line summary for display.
    pub fn summary(&self) -> String {
        let stats = self.stats();
        if stats.total_questions == 0 {
            return "No questions answered yet.".to_string();
        }

        [
            format!(
                "Final Score: {}/{} ({}%)",
                stats.total_score,
                self.max_possible_score(),
                stats.score_percentage
            ),
            format!("Questions Answered: {}", stats.total_questions),
            format!("Correct Answers: {}", stats.correct_answers),
            format!("Perfect Answers: {}", stats.perfect_answers),
            format!("Average Hints Used: {}", round2(stats.average_hints_used)),
        ]
        .join("\n")
    }

    /// Drop all history and start over.
    pub fn reset(&mut self) {
        self.history.clear();
        self.total = 0;
        self.counter = 0;
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
