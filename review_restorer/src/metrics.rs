use prometheus::{IntCounter, Registry};

#[derive(Clone)]
pub struct Metrics {
    pub records_restored: IntCounter,
    pub tokens_substituted: IntCounter,
    pub llm_requests: IntCounter,
    pub llm_fallbacks: IntCounter,
}

impl Metrics {
    pub fn new(registry: &Registry) -> prometheus::Result<Self> {
        let records_restored =
            IntCounter::new("records_restored_total", "Number of records restored")?;
        let tokens_substituted = IntCounter::new(
            "tokens_substituted_total",
            "Number of tokens replaced from the word mapping",
        )?;
        let llm_requests = IntCounter::new("llm_requests_total", "Number of LLM requests")?;
        let llm_fallbacks = IntCounter::new(
            "llm_fallbacks_total",
            "Number of LLM requests that fell back to the unrestored input",
        )?;
        registry.register(Box::new(records_restored.clone()))?;
        registry.register(Box::new(tokens_substituted.clone()))?;
        registry.register(Box::new(llm_requests.clone()))?;
        registry.register(Box::new(llm_fallbacks.clone()))?;
        Ok(Self {
            records_restored,
            tokens_substituted,
            llm_requests,
            llm_fallbacks,
        })
    }

    /// Counters registered on a private registry, for callers that never export.
    pub fn unregistered() -> prometheus::Result<Self> {
        Self::new(&Registry::new())
    }
}

/// Renders the registry in the Prometheus text format.
pub fn render(registry: &Registry) -> prometheus::Result<String> {
    prometheus::TextEncoder::new().encode_to_string(&registry.gather())
}
