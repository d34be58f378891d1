//! Prompt text for transcript analysis.

/// System instruction sent with every analysis request.
pub const ANALYSIS_SYSTEM_PROMPT: &str = "\
You are a concise assistant that reads a customer call transcript and returns a JSON object \
with EXACTLY two fields: 'summary' and 'sentiment'.
- 'summary': 2-3 sentence concise summary of the customer's main issue.
- 'sentiment': one of 'Positive', 'Neutral', or 'Negative'.
Return only valid JSON with those keys. Do not add extra commentary.
";

/// Builds the user message embedding the verbatim transcript.
pub fn analysis_user_prompt(transcript: &str) -> String {
    format!("Transcript:\n{}\n\nReturn the JSON described above.", transcript)
}
