//! Time-weighted scoring.
//!
//! Correct answers earn a base score plus a bonus that shrinks linearly with
//! time spent, minus one point per hint, never below one point. Incorrect
//! answers earn nothing.

use super::{QuestionOutcome, ScoringPolicy};

/// Time-weighted scoring with configurable parameters.
#[derive(Debug, Clone)]
pub struct TimeWeighted {
    pub base_score: u32,
    pub max_time_bonus: u32,
    pub hint_penalty: u32,
    /// Countdown length in seconds; also the time assumed when no timer ran.
    pub time_limit: u32,
}

impl Default for TimeWeighted {
    fn default() -> Self {
        Self {
            base_score: 2,
            max_time_bonus: 5,
            hint_penalty: 1,
            time_limit: 10,
        }
    }
}

impl ScoringPolicy for TimeWeighted {
    fn name(&self) -> &'static str {
        "time_weighted"
    }

    fn points(&self, outcome: QuestionOutcome) -> u32 {
        if !outcome.is_correct {
            return 0;
        }

        let time_used = outcome
            .time_used
            .unwrap_or(self.time_limit)
            .min(self.time_limit);
        let bonus = (self.max_time_bonus as f64 * (self.time_limit - time_used) as f64
            / self.time_limit as f64)
            .round() as u32;

        let points = self.base_score + bonus;
        let penalty = outcome.hints_used as u32 * self.hint_penalty;
        points.saturating_sub(penalty).max(1)
    }

    fn max_per_question(&self) -> u32 {
        self.base_score + self.max_time_bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(hints_used: usize, is_correct: bool, time_used: Option<u32>) -> QuestionOutcome {
        QuestionOutcome {
            hints_used,
            is_correct,
            time_used,
        }
    }

    #[test]
    fn instant_answer_earns_full_bonus() {
        let policy = TimeWeighted::default();
        assert_eq!(policy.points(outcome(0, true, Some(0))), 7);
    }

    #[test]
    fn bonus_shrinks_with_time() {
        let policy = TimeWeighted::default();
        assert_eq!(policy.points(outcome(0, true, Some(5))), 5); // 2 + round(2.5)
        assert_eq!(policy.points(outcome(0, true, Some(10))), 2);
    }

    #[test]
    fn hints_cost_points() {
        let policy = TimeWeighted::default();
        assert_eq!(policy.points(outcome(2, true, Some(0))), 5);
    }

    #[test]
    fn correct_answers_floor_at_one_point() {
        let policy = TimeWeighted::default();
        // Full time and three hints would go below zero without the floor.
        assert_eq!(policy.points(outcome(3, true, Some(10))), 1);
    }

    #[test]
    fn incorrect_scores_zero_even_when_fast() {
        let policy = TimeWeighted::default();
        assert_eq!(policy.points(outcome(0, false, Some(0))), 0);
    }

    #[test]
    fn missing_time_counts_as_full_time() {
        let policy = TimeWeighted::default();
        assert_eq!(policy.points(outcome(0, true, None)), 2);
    }

    #[test]
    fn max_is_base_plus_full_bonus() {
        assert_eq!(TimeWeighted::default().max_per_question(), 7);
    }
}
