//! Scoring policy implementations.
//!
//! Two incompatible schemes exist in the wild for this game: fixed point
//! tiers keyed on hints used, and a time-weighted score with a hint penalty.
//! Both live behind one trait; [`Tiered`](tiered::Tiered) is the default and
//! the two are never blended.

pub mod tiered;
pub mod time_weighted;

use crate::types::ScoringScheme;

/// Inputs a policy needs to price one completed question.
#[derive(Debug, Clone, Copy)]
pub struct QuestionOutcome {
    pub hints_used: usize,
    pub is_correct: bool,
    /// Seconds spent on the question, when the timed variant is active.
    pub time_used: Option<u32>,
}

/// Trait for scoring policies.
pub trait ScoringPolicy: Send + Sync {
    /// Policy identifier.
    fn name(&self) -> &'static str;

    /// Points awarded for a completed question.
    fn points(&self, outcome: QuestionOutcome) -> u32;

    /// Highest score a single question can earn under this policy.
    fn max_per_question(&self) -> u32;
}

/// Get the policy for a configured scheme.
pub fn policy_for(scheme: ScoringScheme) -> Box<dyn ScoringPolicy> {
    match scheme {
        ScoringScheme::Tiered => Box::new(tiered::Tiered::default()),
        ScoringScheme::TimeWeighted => Box::new(time_weighted::TimeWeighted::default()),
    }
}

/// Get a policy by name.
pub fn get_policy(name: &str) -> Option<Box<dyn ScoringPolicy>> {
    ScoringScheme::from_str(name).map(policy_for)
}
