//! Fixed-tier scoring.
//!
//! Correct answers earn a tier keyed on hints used: none, exactly one, or
//! two and more. Incorrect answers earn nothing regardless of hints.

use super::{QuestionOutcome, ScoringPolicy};

/// Tiered scoring with configurable point values.
#[derive(Debug, Clone)]
pub struct Tiered {
    pub first_try: u32,
    pub one_hint: u32,
    pub multiple_hints: u32,
}

impl Default for Tiered {
    fn default() -> Self {
        Self {
            first_try: 3,
            one_hint: 2,
            multiple_hints: 1,
        }
    }
}

impl ScoringPolicy for Tiered {
    fn name(&self) -> &'static str {
        "tiered"
    }

    fn points(&self, outcome: QuestionOutcome) -> u32 {
        if !outcome.is_correct {
            return 0;
        }
        match outcome.hints_used {
            0 => self.first_try,
            1 => self.one_hint,
            _ => self.multiple_hints,
        }
    }

    fn max_per_question(&self) -> u32 {
        self.first_try
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(hints_used: usize, is_correct: bool) -> QuestionOutcome {
        QuestionOutcome {
            hints_used,
            is_correct,
            time_used: None,
        }
    }

    #[test]
    fn tiers_decrease_with_hints() {
        let policy = Tiered::default();
        assert_eq!(policy.points(outcome(0, true)), 3);
        assert_eq!(policy.points(outcome(1, true)), 2);
        assert_eq!(policy.points(outcome(2, true)), 1);
        assert_eq!(policy.points(outcome(3, true)), 1);
    }

    #[test]
    fn incorrect_always_scores_zero() {
        let policy = Tiered::default();
        for hints in 0..4 {
            assert_eq!(policy.points(outcome(hints, false)), 0);
        }
    }

    #[test]
    fn max_is_the_no_hint_tier() {
        assert_eq!(Tiered::default().max_per_question(), 3);
    }
}
