//! Three-way caller sentiment and its normalization rules.

use serde::{Deserialize, Serialize};
use std::fmt;

const NEGATIVE_LABELS: [&str; 4] = ["negative", "neg", "frustrated", "angry"];
const POSITIVE_LABELS: [&str; 4] = ["positive", "pos", "satisfied", "happy"];

/// Coarse classification of the caller's emotional tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    /// All sentiment values, in display order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Maps an arbitrary token onto the closed sentiment set.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace. A few
    /// synonyms are accepted (`neg`, `angry`, `pos`, `happy`, ...). Missing,
    /// blank and unrecognized tokens all map to [`Sentiment::Neutral`].
    pub fn normalize(token: Option<&str>) -> Self {
        let Some(token) = token else {
            return Sentiment::Neutral;
        };

        let folded = token.trim().to_lowercase();
        if NEGATIVE_LABELS.contains(&folded.as_str()) {
            Sentiment::Negative
        } else if POSITIVE_LABELS.contains(&folded.as_str()) {
            Sentiment::Positive
        } else {
            Sentiment::Neutral
        }
    }

    /// Canonical label, as written to the log and returned to callers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn missing_token_is_neutral() {
        assert_eq!(Sentiment::normalize(None), Sentiment::Neutral);
    }

    #[test]
    fn blank_token_is_neutral() {
        assert_eq!(Sentiment::normalize(Some("")), Sentiment::Neutral);
        assert_eq!(Sentiment::normalize(Some("   ")), Sentiment::Neutral);
    }

    #[test]
    fn negative_synonyms_map_to_negative() {
        for token in ["Negative", "NEG", " frustrated ", "Angry"] {
            assert_eq!(Sentiment::normalize(Some(token)), Sentiment::Negative, "{}", token);
        }
    }

    #[test]
    fn positive_synonyms_map_to_positive() {
        for token in ["positive", "Pos", "SATISFIED", "happy\n"] {
            assert_eq!(Sentiment::normalize(Some(token)), Sentiment::Positive, "{}", token);
        }
    }

    #[test]
    fn unrecognized_tokens_are_neutral() {
        for token in ["neutral", "mixed", "upset", "very positive", "3"] {
            assert_eq!(Sentiment::normalize(Some(token)), Sentiment::Neutral, "{}", token);
        }
    }

    #[test]
    fn serializes_as_capitalized_label() {
        let json = serde_json::to_string(&Sentiment::Negative).unwrap();
        assert_eq!(json, "\"Negative\"");
        assert_eq!(Sentiment::Positive.to_string(), "Positive");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(token in ".*") {
            let once = Sentiment::normalize(Some(&token));
            let twice = Sentiment::normalize(Some(once.as_str()));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn normalize_stays_in_closed_set(token in ".*") {
            let sentiment = Sentiment::normalize(Some(&token));
            prop_assert!(Sentiment::ALL.contains(&sentiment));
        }
    }
}
