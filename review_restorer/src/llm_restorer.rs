//! LLM-backed restoration with an explicit fallback outcome.

use crate::llm_client::{LlmClient, LlmError};
use crate::mapping::TrainingPair;
use crate::metrics::Metrics;
use crate::prompt::PromptBuilder;
use tracing::warn;

const RESULT_LABEL: &str = "복원 결과: ";

/// Outcome of one LLM restoration request.
#[derive(Debug)]
pub enum Restoration {
    Restored(String),
    /// The request failed; `original` is the unrestored input.
    FellBack { original: String, error: LlmError },
}

impl Restoration {
    /// The text to use downstream: restored text or the original input.
    pub fn text(&self) -> &str {
        match self {
            Restoration::Restored(text) => text,
            Restoration::FellBack { original, .. } => original,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Restoration::Restored(text) => text,
            Restoration::FellBack { original, .. } => original,
        }
    }

    pub fn is_restored(&self) -> bool {
        matches!(self, Restoration::Restored(_))
    }
}

/// Trims the completion, drops a leading result label and surrounding quotes.
pub fn clean_completion(raw: &str) -> String {
    raw.trim()
        .replace(RESULT_LABEL, "")
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string()
}

pub struct LlmRestorer {
    client: LlmClient,
    prompts: PromptBuilder,
    metrics: Metrics,
}

impl LlmRestorer {
    /// Uses the first `few_shot_examples` pairs of `examples` as the
    /// prompt's demonstrations.
    pub fn new(client: LlmClient, examples: &[TrainingPair], metrics: Metrics) -> Self {
        let prompts = PromptBuilder::new(examples, client.settings().few_shot_examples);
        Self {
            client,
            prompts,
            metrics,
        }
    }

    pub async fn restore(&self, text: &str) -> Restoration {
        let prompt = self.prompts.build(self.client.settings().provider, text);
        self.metrics.llm_requests.inc();
        match self.client.complete(prompt).await {
            Ok(raw) => Restoration::Restored(clean_completion(&raw)),
            Err(error) => {
                warn!(%error, "restoration request failed, keeping input");
                self.metrics.llm_fallbacks.inc();
                Restoration::FellBack {
                    original: text.to_string(),
                    error,
                }
            }
        }
    }
}
