use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::ExplanationProvider;
use crate::domain::DomainError;

#[derive(Debug, Clone)]
enum Step {
    Text(String),
    Error(String),
}

/// In-process provider that replays a scripted sequence of answers.
///
/// Once the script runs out every further call gets the fallback answer
/// (an empty string unless built with [`ScriptedExplanationProvider::always`]).
/// Used by `--mock-provider` and throughout the tests.
pub struct ScriptedExplanationProvider {
    script: Mutex<VecDeque<Step>>,
    fallback: Step,
    calls: AtomicU32,
}

impl ScriptedExplanationProvider {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Step::Text(String::new()),
            calls: AtomicU32::new(0),
        }
    }

    /// A provider that gives the same answer on every call.
    pub fn always(text: impl Into<String>) -> Self {
        Self {
            fallback: Step::Text(text.into()),
            ..Self::new()
        }
    }

    pub fn then_text(self, text: impl Into<String>) -> Self {
        self.push(Step::Text(text.into()))
    }

    pub fn then_empty(self, times: usize) -> Self {
        (0..times).fold(self, |provider, _| provider.push(Step::Text(String::new())))
    }

    pub fn then_error(self, msg: impl Into<String>) -> Self {
        self.push(Step::Error(msg.into()))
    }

    fn push(mut self, step: Step) -> Self {
        self.script.get_mut().push_back(step);
        self
    }

    /// Number of `explain` calls made so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedExplanationProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExplanationProvider for ScriptedExplanationProvider {
    async fn explain(&self, word: &str, _context: &str) -> Result<String, DomainError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let step = self
            .script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        debug!("Scripted provider call {} for '{}': {:?}", call, word, step);

        match step {
            Step::Text(text) => Ok(text),
            Step::Error(msg) => Err(DomainError::provider(msg)),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
