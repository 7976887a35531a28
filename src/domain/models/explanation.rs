use serde::{Deserialize, Serialize};

/// A word together with the passage it was found in.
///
/// Both fields are required on the wire; a body missing either one (or
/// carrying a non-string value) is rejected before any provider call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationRequest {
    word: String,
    context: String,
}

impl ExplanationRequest {
    pub fn new(word: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            context: context.into(),
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn context(&self) -> &str {
        &self.context
    }
}

/// Wire shape of a successful `/explain` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationResult {
    pub explanation: String,
}

impl From<Explanation> for ExplanationResult {
    fn from(explanation: Explanation) -> Self {
        Self {
            explanation: explanation.text,
        }
    }
}

/// Outcome of the retry loop: the last provider answer and how many calls it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    text: String,
    attempts: u32,
}

impl Explanation {
    pub fn new(text: impl Into<String>, attempts: u32) -> Self {
        Self {
            text: text.into(),
            attempts,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// True when every attempt came back empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
