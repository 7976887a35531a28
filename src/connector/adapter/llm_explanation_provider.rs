use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::ExplanationProvider;
use crate::connector::adapter::ChatClient;
use crate::domain::DomainError;

/// System prompt casting the model as a vocabulary tutor that answers in JSON.
const SYSTEM_PROMPT: &str = "\
You are an English vocabulary tutor. The user sends a word followed by the \
sentence it was found in, formatted as: word: \"context\".

Explain the word as it is used in that context, in four parts:
- direct_explanation: a concise, accurate definition tied to the context. \
Wrap the core meaning in <b></b>.
- simple_analogy: an informal, everyday comparison that makes the meaning click.
- etymology: where the word comes from, with source-language forms in <i></i> \
and related words that share the root.
- mnemonic: a short memory trick for recalling the word.

Rules:
1. Return ONLY a JSON object with exactly the keys \"direct_explanation\", \
\"simple_analogy\", \"etymology\" and \"mnemonic\". No prose, no markdown, no code fences.
2. Do not repeat the user's sentence back.
3. Do not add section headings inside the values.

Example input:  fawning: \"I put on the air of a fawning young lad.\"
Example output: {\"direct_explanation\": \"Being \\\"fawning\\\" means being <b>overly \
flattering</b> to win favour.\", \"simple_analogy\": \"Like a puppy wagging its tail \
for a treat.\", \"etymology\": \"From Old English <i>fagnian</i>, to rejoice.\", \
\"mnemonic\": \"A fawn is a young deer, gentle and eager to please.\"}";

/// The four sections the tutor prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TutorNotes {
    #[serde(default)]
    pub direct_explanation: String,
    #[serde(default)]
    pub simple_analogy: String,
    #[serde(default)]
    pub etymology: String,
    #[serde(default)]
    pub mnemonic: String,
}

impl TutorNotes {
    pub fn is_complete(&self) -> bool {
        [
            &self.direct_explanation,
            &self.simple_analogy,
            &self.etymology,
            &self.mnemonic,
        ]
        .iter()
        .all(|s| !s.trim().is_empty())
    }

    /// Flashcard-ready HTML with one headed block per section.
    pub fn to_html(&self) -> String {
        format!(
            "<b>Direct Explanation:</b><br/><br/>{}<br/><br/>\
             <b>Simple Analogy:</b><br/><br/>{}<br/><br/>\
             <b>Etymology:</b><br/><br/>{}<br/><br/>\
             <b>Mnemonic:</b><br/><br/>{}",
            self.direct_explanation.trim(),
            self.simple_analogy.trim(),
            self.etymology.trim(),
            self.mnemonic.trim()
        )
    }
}

/// An [`ExplanationProvider`] that prompts an LLM through a [`ChatClient`].
///
/// The model's answer is searched for a JSON object with all four tutor
/// sections. A complete answer is rendered to HTML; anything else (prose,
/// truncated JSON, a missing section) yields an empty explanation so the
/// caller's retry loop asks again. Transport failures propagate as errors.
pub struct LlmExplanationProvider {
    client: Arc<dyn ChatClient>,
    name: String,
}

impl LlmExplanationProvider {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        let name = format!("llm:{}", client.model());
        Self { client, name }
    }

    /// `word: "context"`, the shape the system prompt documents.
    pub fn user_prompt(word: &str, context: &str) -> String {
        format!("{}: \"{}\"", word.trim(), context.trim())
    }

    /// Extract and validate the first `{…}` span of the model's text.
    fn parse_notes(text: &str) -> Option<TutorNotes> {
        let start = text.find('{')?;
        let end = text.rfind('}')?;
        if end < start {
            return None;
        }

        match serde_json::from_str::<TutorNotes>(&text[start..=end]) {
            Ok(notes) if notes.is_complete() => Some(notes),
            Ok(_) => {
                debug!("LlmExplanationProvider: model answer is missing a section");
                None
            }
            Err(e) => {
                warn!("LlmExplanationProvider: could not parse model answer as JSON: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl ExplanationProvider for LlmExplanationProvider {
    async fn explain(&self, word: &str, context: &str) -> Result<String, DomainError> {
        let prompt = Self::user_prompt(word, context);
        let raw = self.client.complete(SYSTEM_PROMPT, &prompt).await?;
        debug!("LlmExplanationProvider raw response: {}", raw);

        Ok(Self::parse_notes(&raw)
            .map(|notes| notes.to_html())
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
