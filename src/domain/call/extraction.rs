//! Reply parsing for model output.
//!
//! The model is asked for a bare JSON object but replies are not guaranteed
//! to comply. Parsing is a chain of total functions: each step either yields
//! a result or `None`, and the caller moves on to the next step. Nothing here
//! returns an error; a miss is an expected outcome, not a failure.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static SUMMARY_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)summary[:\-\s]+(.+)").expect("summary pattern is valid"));

static SENTIMENT_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)sentiment[:\-\s]+(\w+)").expect("sentiment pattern is valid"));

const NEGATIVE_KEYWORDS: [&str; 6] = ["angry", "frustrat", "upset", "not happy", "rude", "bad"];
const POSITIVE_KEYWORDS: [&str; 6] = ["thank", "good", "great", "happy", "satisfied", "awesome"];

/// Number of leading sentences used when no summary line is present.
const FALLBACK_SUMMARY_SENTENCES: usize = 2;

type ExtractionStep = fn(&str) -> Option<Map<String, Value>>;

/// Structured extraction steps, in priority order.
const EXTRACTION_STEPS: [ExtractionStep; 2] = [parse_whole_reply, parse_embedded_block];

/// Loosely-typed fields recovered from a model reply.
///
/// Values are raw text; sentiment still has to be normalized and the summary
/// still has to be trimmed and defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyFields {
    pub summary: Option<String>,
    pub sentiment: Option<String>,
}

impl ReplyFields {
    /// Reads `summary` and `sentiment` from a decoded JSON object.
    ///
    /// Fields that are missing or not strings are treated as absent.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let text_field = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            summary: text_field("summary"),
            sentiment: text_field("sentiment"),
        }
    }
}

/// Recovers a JSON object from raw model text.
///
/// Tries the whole trimmed reply first, then the span from the first `{` to
/// the last `}`. Only objects count; arrays and scalars are misses.
pub fn extract_json_object(raw: &str) -> Option<Map<String, Value>> {
    EXTRACTION_STEPS.iter().find_map(|step| step(raw))
}

fn parse_whole_reply(raw: &str) -> Option<Map<String, Value>> {
    parse_object(raw.trim())
}

fn parse_embedded_block(raw: &str) -> Option<Map<String, Value>> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    parse_object(&raw[start..=end])
}

fn parse_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate).ok()? {
        Value::Object(object) => Some(object),
        _ => None,
    }
}

/// Heuristic parse for replies that carry no JSON object.
///
/// Always yields a sentiment token. The summary is `None` only when the reply
/// has no text at all.
pub fn fallback_parse(raw: &str) -> ReplyFields {
    let summary = labelled_summary(raw).or_else(|| leading_sentences(raw));
    let sentiment = labelled_sentiment(raw).unwrap_or_else(|| keyword_sentiment(raw).to_string());

    ReplyFields {
        summary,
        sentiment: Some(sentiment),
    }
}

fn labelled_summary(raw: &str) -> Option<String> {
    let captured = SUMMARY_LINE.captures(raw)?.get(1)?.as_str().trim();
    (!captured.is_empty()).then(|| captured.to_string())
}

fn leading_sentences(raw: &str) -> Option<String> {
    let sentences = split_sentences(raw.trim());
    let take = sentences.len().min(FALLBACK_SUMMARY_SENTENCES);
    let summary = sentences[..take].join(" ");
    let summary = summary.trim();
    (!summary.is_empty()).then(|| summary.to_string())
}

fn labelled_sentiment(raw: &str) -> Option<String> {
    let word = SENTIMENT_WORD.captures(raw)?.get(1)?.as_str();
    Some(capitalize(word))
}

fn keyword_sentiment(raw: &str) -> &'static str {
    let lowered = raw.to_lowercase();
    if NEGATIVE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        "Negative"
    } else if POSITIVE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        "Positive"
    } else {
        "Neutral"
    }
}

/// Splits text at whitespace runs that follow `.`, `!` or `?`.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut previous: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if ch.is_whitespace() && matches!(previous, Some('.' | '!' | '?')) {
            sentences.push(&text[start..idx]);

            start = text.len();
            while let Some(&(next_idx, next_ch)) = chars.peek() {
                if !next_ch.is_whitespace() {
                    start = next_idx;
                    break;
                }
                chars.next();
            }
            previous = None;
            continue;
        }
        previous = Some(ch);
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    // ───────────────────────────────────────────────────────────────
    // extract_json_object
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn bare_json_reply_is_returned_unchanged() {
        let raw = r#"{"summary":"Customer wants a refund.","sentiment":"angry"}"#;

        let object = extract_json_object(raw).unwrap();

        assert_eq!(
            Value::Object(object),
            json!({"summary": "Customer wants a refund.", "sentiment": "angry"})
        );
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let raw = "\n\n  {\"summary\": \"Late delivery.\", \"sentiment\": \"Negative\"}  \n";
        let object = extract_json_object(raw).unwrap();
        assert_eq!(object["summary"], "Late delivery.");
    }

    #[test]
    fn embedded_json_is_recovered_from_prose() {
        let raw = "Sure! Here is the analysis:\n\
                   {\"summary\": \"Router keeps dropping.\", \"sentiment\": \"Negative\"}\n\
                   Let me know if you need anything else.";

        let object = extract_json_object(raw).unwrap();

        assert_eq!(
            Value::Object(object),
            json!({"summary": "Router keeps dropping.", "sentiment": "Negative"})
        );
    }

    #[test]
    fn fenced_json_is_recovered() {
        let raw = "```json\n{\"summary\": \"Plan upgrade.\", \"sentiment\": \"Positive\"}\n```";
        let object = extract_json_object(raw).unwrap();
        assert_eq!(object["sentiment"], "Positive");
    }

    #[test]
    fn plain_text_yields_none() {
        assert!(extract_json_object("The caller asked about billing.").is_none());
    }

    #[test]
    fn json_scalar_or_array_is_not_an_object() {
        assert!(extract_json_object("\"just a string\"").is_none());
        assert!(extract_json_object("[1, 2, 3]").is_none());
        assert!(extract_json_object("42").is_none());
    }

    #[test]
    fn unbalanced_braces_yield_none() {
        assert!(extract_json_object("} backwards {").is_none());
        assert!(extract_json_object("{\"summary\": \"cut off").is_none());
    }

    #[test]
    fn greedy_span_across_two_objects_is_a_miss() {
        // First `{` to last `}` covers both objects, which is not valid JSON.
        let raw = "a {\"summary\": \"one\"} b {\"summary\": \"two\"}";
        assert!(extract_json_object(raw).is_none());
    }

    // ───────────────────────────────────────────────────────────────
    // ReplyFields::from_object
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn from_object_reads_string_fields() {
        let object = extract_json_object(r#"{"summary":"S","sentiment":"happy"}"#).unwrap();
        let fields = ReplyFields::from_object(&object);
        assert_eq!(fields.summary.as_deref(), Some("S"));
        assert_eq!(fields.sentiment.as_deref(), Some("happy"));
    }

    #[test]
    fn from_object_treats_wrong_types_as_absent() {
        let object =
            extract_json_object(r#"{"summary":["a","b"],"sentiment":3}"#).unwrap();
        assert_eq!(ReplyFields::from_object(&object), ReplyFields::default());
    }

    #[test]
    fn from_object_handles_missing_keys() {
        let object = extract_json_object(r#"{"result":"ok"}"#).unwrap();
        assert_eq!(ReplyFields::from_object(&object), ReplyFields::default());
    }

    // ───────────────────────────────────────────────────────────────
    // fallback_parse
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn labelled_lines_are_parsed() {
        let fields = fallback_parse("Summary: Customer is satisfied with service.\nSentiment: Happy");
        assert_eq!(
            fields.summary.as_deref(),
            Some("Customer is satisfied with service.")
        );
        assert_eq!(fields.sentiment.as_deref(), Some("Happy"));
    }

    #[test]
    fn labels_are_case_insensitive_and_word_is_capitalized() {
        let fields = fallback_parse("SUMMARY - Billing dispute over fees\nsentiment -  NEGATIVE.");
        assert_eq!(fields.summary.as_deref(), Some("Billing dispute over fees"));
        assert_eq!(fields.sentiment.as_deref(), Some("Negative"));
    }

    #[test]
    fn summary_label_on_its_own_line_takes_following_line() {
        let fields = fallback_parse("Summary:\nThe caller wants a callback.");
        assert_eq!(fields.summary.as_deref(), Some("The caller wants a callback."));
    }

    #[test]
    fn unstructured_text_uses_first_two_sentences() {
        let raw = "The caller asked about billing. They want a new invoice sent! \
                   Is the address correct? The agent confirmed it.";
        let fields = fallback_parse(raw);
        assert_eq!(
            fields.summary.as_deref(),
            Some("The caller asked about billing. They want a new invoice sent!")
        );
        assert_eq!(fields.sentiment.as_deref(), Some("Neutral"));
    }

    #[test]
    fn single_sentence_is_used_whole() {
        let fields = fallback_parse("  Caller requested a password reset  ");
        assert_eq!(fields.summary.as_deref(), Some("Caller requested a password reset"));
    }

    #[test]
    fn negative_keywords_win_over_positive() {
        let fields = fallback_parse("Thanks for nothing. I am frustrated with the wait.");
        assert_eq!(fields.sentiment.as_deref(), Some("Negative"));
    }

    #[test]
    fn positive_keywords_detected() {
        let fields = fallback_parse("The customer said THANK YOU for the quick fix.");
        assert_eq!(fields.sentiment.as_deref(), Some("Positive"));
    }

    #[test]
    fn empty_reply_has_no_summary_but_has_sentiment() {
        let fields = fallback_parse("   ");
        assert_eq!(fields.summary, None);
        assert_eq!(fields.sentiment.as_deref(), Some("Neutral"));
    }

    // ───────────────────────────────────────────────────────────────
    // helpers
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn split_sentences_collapses_whitespace_runs() {
        let sentences = split_sentences("One.  Two!\n\nThree? Four");
        assert_eq!(sentences, vec!["One.", "Two!", "Three?", "Four"]);
    }

    #[test]
    fn split_sentences_keeps_unpunctuated_breaks() {
        let sentences = split_sentences("no punctuation here\nstill same sentence");
        assert_eq!(sentences, vec!["no punctuation here\nstill same sentence"]);
    }

    #[test]
    fn capitalize_lowers_the_tail() {
        assert_eq!(capitalize("hAPPY"), "Happy");
        assert_eq!(capitalize(""), "");
    }

    proptest! {
        #[test]
        fn fallback_always_yields_sentiment(raw in ".*") {
            let fields = fallback_parse(&raw);
            prop_assert!(fields.sentiment.is_some());
        }

        #[test]
        fn fallback_summary_present_for_text(raw in "[A-Za-z]{1,20}( [A-Za-z]{1,20}){0,10}[.!?]?") {
            let fields = fallback_parse(&raw);
            prop_assert!(fields.summary.map(|s| !s.is_empty()).unwrap_or(false));
        }

        #[test]
        fn extraction_never_panics(raw in ".*") {
            let _ = extract_json_object(&raw);
        }

        #[test]
        fn object_reply_is_returned_unchanged(
            object in reply_object(),
            pad in "[ \t\n]{0,3}",
        ) {
            let raw = format!("{pad}{}{pad}", Value::Object(object.clone()));
            prop_assert_eq!(extract_json_object(&raw), Some(object));
        }

        #[test]
        fn embedded_object_is_recovered_exactly(
            object in reply_object(),
            before in "[^{}]{0,40}",
            after in "[^{}]{0,40}",
        ) {
            let raw = format!("{before}{}{after}", Value::Object(object.clone()));
            let recovered = extract_json_object(&raw);
            prop_assert_eq!(recovered.as_ref(), Some(&object));

            let fields = ReplyFields::from_object(&object);
            prop_assert_eq!(fields.summary.as_deref(), object["summary"].as_str());
            prop_assert_eq!(fields.sentiment.as_deref(), object["sentiment"].as_str());
        }
    }

    fn reply_object() -> impl Strategy<Value = Map<String, Value>> {
        (".{0,60}", "[A-Za-z]{0,12}").prop_map(|(summary, sentiment)| {
            let mut object = Map::new();
            object.insert("summary".to_string(), Value::String(summary));
            object.insert("sentiment".to_string(), Value::String(sentiment));
            object
        })
    }
}
