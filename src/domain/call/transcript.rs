//! Transcript value object.

use std::fmt;

use crate::domain::foundation::ValidationError;

/// Raw customer-call text submitted for analysis.
///
/// Guaranteed non-empty after trimming. The text itself is kept verbatim:
/// it is what gets sent to the model, written to the log, and echoed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript(String);

impl Transcript {
    /// Creates a new Transcript, returning error if blank.
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("transcript"));
        }
        Ok(Self(text))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
