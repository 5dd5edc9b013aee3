//! Answer matching: alias-aware exact comparison with a Levenshtein fallback.

use serde::{Deserialize, Serialize};

/// Accepted alternative spellings, keyed by the normalized canonical answer.
/// A plain lookup table; entries and lookups are both normalized.
const ALTERNATIVE_NAMES: &[(&str, &[&str])] = &[
    ("washington d.c.", &["washington", "dc", "washington dc"]),
    ("new delhi", &["delhi"]),
    ("cape town", &["capetown"]),
    ("buenos aires", &["buenos aires city"]),
    ("mexico city", &["ciudad de mexico", "cdmx"]),
    ("rio de janeiro", &["rio"]),
    ("sao paulo", &["são paulo"]),
    ("saint petersburg", &["st petersburg", "petersburg"]),
    ("los angeles", &["la", "los angeles city"]),
    ("new york", &["nyc", "new york city"]),
];

/// Result of validating a submitted answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// Whether a wrong answer was within the close-match threshold.
    pub is_close: bool,
    /// The original correct answer, offered when the input was close.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// User-facing feedback for this outcome.
    pub message: String,
}

/// Compares free-text answers against the correct answer and its aliases.
#[derive(Debug, Clone)]
pub struct AnswerMatcher {
    /// Similarity at or above which a miss counts as close.
    pub close_threshold: f64,
    /// Minimum length of the longer string before closeness applies.
    pub min_close_len: usize,
}

impl Default for AnswerMatcher {
    fn default() -> Self {
        Self {
            close_threshold: 0.7,
            min_close_len: 3,
        }
    }
}

impl AnswerMatcher {
    /// True iff the input has any non-whitespace content. Callers use this as
    /// a pre-filter so blank submissions never reach `validate`.
    pub fn is_valid_input(&self, input: &str) -> bool {
        !input.trim().is_empty()
    }

    /// Validate a submission against the correct answer.
    ///
    /// Priority order: exact/alias match, close match to the canonical
    /// answer, close match to any alias, miss. The first satisfied rule wins.
    pub fn validate(&self, input: &str, correct: &str) -> ValidationResult {
        let normalized_input = normalize(input);
        let normalized_correct = normalize(correct);
        let aliases = alternatives(&normalized_correct);

        if normalized_input == normalized_correct
            || aliases.iter().any(|alias| normalized_input == normalize(alias))
        {
            return ValidationResult {
                is_correct: true,
                is_close: false,
                suggestion: None,
                message: "Correct! Well done!".to_string(),
            };
        }

        if self.is_close_match(&normalized_input, &normalized_correct) {
            return ValidationResult {
                is_correct: false,
                is_close: true,
                suggestion: Some(correct.to_string()),
                message: format!("Very close! Did you mean \"{correct}\"?"),
            };
        }

        for alias in aliases {
            if self.is_close_match(&normalized_input, &normalize(alias)) {
                return ValidationResult {
                    is_correct: false,
                    is_close: true,
                    suggestion: Some(correct.to_string()),
                    message: format!("Close! The answer is \"{correct}\"."),
                };
            }
        }

        ValidationResult {
            is_correct: false,
            is_close: false,
            suggestion: None,
            message: "Incorrect. Try again or request a hint!".to_string(),
        }
    }

    fn is_close_match(&self, input: &str, correct: &str) -> bool {
        let max_len = input.chars().count().max(correct.chars().count());
        max_len >= self.min_close_len
            && normalized_similarity(input, correct) >= self.close_threshold
    }
}

/// Trim surrounding whitespace and lower-case. Diacritics and punctuation
/// are deliberately left intact; the alias table covers the common cases.
fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn alternatives(normalized_correct: &str) -> &'static [&'static str] {
    ALTERNATIVE_NAMES
        .iter()
        .find(|(canonical, _)| *canonical == normalized_correct)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}

/// Calculate Levenshtein distance between two strings, unit cost for
/// insertion, deletion and substitution.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows instead of the full matrix.
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };

            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Similarity in [0.0, 1.0]: 1 − distance / max(char length).
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(a, b);
    1.0 - (distance as f64 / max_len as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("paris", "paris"), 0);
        assert_eq!(levenshtein_distance("paris", ""), 5);
        assert_eq!(levenshtein_distance("", "paris"), 5);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("saturday", "sunday"), 3);
    }

    #[test]
    fn levenshtein_is_symmetric() {
        assert_eq!(
            levenshtein_distance("madrid", "madird"),
            levenshtein_distance("madird", "madrid")
        );
    }

    #[test]
    fn test_normalized_similarity() {
        assert_eq!(normalized_similarity("paris", "paris"), 1.0);
        assert_eq!(normalized_similarity("", ""), 1.0);
        assert!(normalized_similarity("kitten", "sitting") > 0.5);
        assert!(normalized_similarity("abc", "xyz") < 0.5);
    }

    #[test]
    fn exact_match_ignores_case_and_whitespace() {
        let matcher = AnswerMatcher::default();
        let result = matcher.validate("  LONDON  ", "London");
        assert!(result.is_correct);
        assert!(!result.is_close);
        assert_eq!(result.message, "Correct! Well done!");
        assert_eq!(result.suggestion, None);
    }

    #[test]
    fn alias_counts_as_correct() {
        let matcher = AnswerMatcher::default();
        assert!(matcher.validate("dc", "Washington D.C.").is_correct);
        assert!(matcher.validate("Washington DC", "Washington D.C.").is_correct);
        assert!(matcher.validate("NYC", "New York").is_correct);
        assert!(matcher.validate("Delhi", "New Delhi").is_correct);
    }

    #[test]
    fn near_miss_is_close_with_suggestion() {
        let matcher = AnswerMatcher::default();
        let result = matcher.validate("Pariss", "Paris");
        assert!(!result.is_correct);
        assert!(result.is_close);
        assert_eq!(result.suggestion.as_deref(), Some("Paris"));
        assert_eq!(result.message, "Very close! Did you mean \"Paris\"?");
    }

    #[test]
    fn close_to_alias_uses_alias_message() {
        let matcher = AnswerMatcher::default();
        // "washingtonn" is too far from "washington d.c." (similarity 10/15)
        // but one edit from the "washington" alias (similarity 10/11).
        let result = matcher.validate("washingtonn", "Washington D.C.");
        assert!(!result.is_correct);
        assert!(result.is_close);
        assert_eq!(result.suggestion.as_deref(), Some("Washington D.C."));
        assert_eq!(result.message, "Close! The answer is \"Washington D.C.\".");
    }

    #[test]
    fn distant_input_is_a_plain_miss() {
        let matcher = AnswerMatcher::default();
        let result = matcher.validate("Madrid", "Paris");
        assert!(!result.is_correct);
        assert!(!result.is_close);
        assert_eq!(result.suggestion, None);
        assert_eq!(result.message, "Incorrect. Try again or request a hint!");
    }

    #[test]
    fn short_strings_never_count_as_close() {
        let matcher = AnswerMatcher::default();
        // max length below 3 guards trivially similar short inputs.
        let result = matcher.validate("ab", "ac");
        assert!(!result.is_correct);
        assert!(!result.is_close);
    }

    #[test]
    fn similarity_below_threshold_is_not_close() {
        let matcher = AnswerMatcher::default();
        // "rome" vs "lima": distance 3 over max length 4 => similarity 0.25.
        let result = matcher.validate("rome", "Lima");
        assert!(!result.is_close);
    }

    #[test]
    fn diacritics_are_not_stripped() {
        let matcher = AnswerMatcher::default();
        // "Brasilia" differs from "Brasília" by one character, so it falls
        // into the close branch rather than matching exactly.
        let result = matcher.validate("Brasilia", "Brasília");
        assert!(!result.is_correct);
        assert!(result.is_close);
    }

    #[test]
    fn blank_input_is_invalid() {
        let matcher = AnswerMatcher::default();
        assert!(!matcher.is_valid_input(""));
        assert!(!matcher.is_valid_input("   "));
        assert!(matcher.is_valid_input(" Oslo "));
    }
}
