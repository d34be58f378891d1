//! HTML rendering for the transcript form.

use std::fmt::Write;

use super::dto::AnalyzeResponse;

const PAGE_HEAD: &str = r#"<!doctype html>
<title>Call Transcript Analyzer</title>
<h2>Paste a customer call transcript</h2>
<form method="post" action="/analyze">
  <textarea name="transcript" rows="12" cols="100" placeholder="Paste transcript here..."></textarea><br>
  <button type="submit">Analyze</button>
</form>
"#;

/// Renders the form page, with the analysis result below it when present.
pub fn render_page(result: Option<&AnalyzeResponse>) -> String {
    let mut html = String::from(PAGE_HEAD);

    if let Some(result) = result {
        // Writing to a String cannot fail.
        let _ = write!(
            html,
            "<hr>\n<h3>Result</h3>\n<b>Transcript:</b>\n<pre>{}</pre>\n\
             <b>Summary:</b> {} <br>\n<b>Sentiment:</b> {}\n",
            escape_html(&result.transcript),
            escape_html(&result.summary),
            result.sentiment,
        );
    }

    html
}

/// Escapes text for safe inclusion in HTML element content and attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
