//! Dataset-level drivers: load, restore every target record, save.

use crate::dataset::{load_target, load_training_pairs, DatasetError, INPUT_COLUMN};
use crate::llm_restorer::LlmRestorer;
use crate::mapping::WordMapping;
use crate::metrics::Metrics;
use crate::restorer::{LexicalRestorer, RestoreStats};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct LexicalJob {
    pub train: PathBuf,
    pub test: PathBuf,
    pub output: PathBuf,
    pub hint_fallback: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub records: usize,
    pub mapping_entries: usize,
    pub tokens_substituted: usize,
    pub tokens_passed_through: usize,
    pub fallbacks: usize,
}

/// Builds the word mapping from the training set once, then restores the
/// `input` column of the target set and writes it to `job.output`.
pub fn run_lexical(job: &LexicalJob, metrics: &Metrics) -> Result<BatchSummary, DatasetError> {
    let pairs = load_training_pairs(&job.train)?;
    let mapping = WordMapping::build(&pairs);
    info!(
        pairs = pairs.len(),
        entries = mapping.len(),
        "built word mapping"
    );

    let mut target = load_target(&job.test)?;
    let restorer = LexicalRestorer::new(mapping).with_hint_fallback(job.hint_fallback);

    let mut totals = RestoreStats::default();
    let restored: Vec<String> = target
        .column(INPUT_COLUMN)?
        .into_iter()
        .map(|input| {
            let (text, stats) = restorer.restore(input);
            debug!(substituted = stats.substituted, "restored record");
            totals.merge(stats);
            text
        })
        .collect();

    let records = restored.len();
    target.replace_column(INPUT_COLUMN, restored)?;
    target.write(&job.output)?;

    metrics.records_restored.inc_by(records as u64);
    metrics.tokens_substituted.inc_by(totals.substituted as u64);
    info!(records, output = %job.output.display(), "wrote restored dataset");

    Ok(BatchSummary {
        records,
        mapping_entries: restorer.mapping().len(),
        tokens_substituted: totals.substituted,
        tokens_passed_through: totals.passed_through,
        fallbacks: 0,
    })
}

#[derive(Debug, Clone)]
pub struct LlmJob {
    pub test: PathBuf,
    pub output: PathBuf,
}

/// Restores each target record with one sequential LLM request. Failed
/// requests keep the original input and are counted as fallbacks.
pub async fn run_llm(
    job: &LlmJob,
    restorer: &LlmRestorer,
    metrics: &Metrics,
) -> Result<BatchSummary, DatasetError> {
    let mut target = load_target(&job.test)?;
    let inputs: Vec<String> = target
        .column(INPUT_COLUMN)?
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut restored = Vec::with_capacity(inputs.len());
    let mut fallbacks = 0;
    for (row, input) in inputs.iter().enumerate() {
        let outcome = restorer.restore(input).await;
        if !outcome.is_restored() {
            fallbacks += 1;
        }
        debug!(row, restored = outcome.is_restored(), "processed record");
        restored.push(outcome.into_text());
    }

    let records = restored.len();
    target.replace_column(INPUT_COLUMN, restored)?;
    target.write(&job.output)?;

    metrics.records_restored.inc_by(records as u64);
    info!(records, fallbacks, output = %job.output.display(), "wrote restored dataset");

    Ok(BatchSummary {
        records,
        fallbacks,
        ..BatchSummary::default()
    })
}
