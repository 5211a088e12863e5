//! Exact-match accuracy over a random sample of training rows.

use crate::llm_restorer::LlmRestorer;
use crate::mapping::TrainingPair;
use crate::restorer::LexicalRestorer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleOutcome {
    pub index: usize,
    pub input: String,
    pub restored: String,
    pub expected: String,
    pub matched: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EvaluationReport {
    pub samples: Vec<SampleOutcome>,
}

impl EvaluationReport {
    /// Records one sample; surrounding whitespace is ignored when matching.
    pub fn record(&mut self, index: usize, pair: &TrainingPair, restored: String) {
        let matched = restored.trim() == pair.original.trim();
        self.samples.push(SampleOutcome {
            index,
            input: pair.obfuscated.clone(),
            restored,
            expected: pair.original.clone(),
            matched,
        });
    }

    pub fn correct(&self) -> usize {
        self.samples.iter().filter(|s| s.matched).count()
    }

    /// Percentage of matched samples; 0 when nothing was sampled.
    pub fn accuracy(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.correct() as f64 / self.samples.len() as f64 * 100.0
    }
}

/// Picks `amount` distinct indices below `len`, capped at `len`.
///
/// A seed makes the draw reproducible.
pub fn sample_indices(len: usize, amount: usize, seed: Option<u64>) -> Vec<usize> {
    let amount = amount.min(len);
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    rand::seq::index::sample(&mut rng, len, amount).into_vec()
}

pub fn evaluate_lexical(
    pairs: &[TrainingPair],
    restorer: &LexicalRestorer,
    amount: usize,
    seed: Option<u64>,
) -> EvaluationReport {
    let mut report = EvaluationReport::default();
    for index in sample_indices(pairs.len(), amount, seed) {
        let pair = &pairs[index];
        let (restored, _) = restorer.restore(&pair.obfuscated);
        report.record(index, pair, restored);
    }
    report
}

pub async fn evaluate_llm(
    pairs: &[TrainingPair],
    restorer: &LlmRestorer,
    amount: usize,
    seed: Option<u64>,
) -> EvaluationReport {
    let mut report = EvaluationReport::default();
    for index in sample_indices(pairs.len(), amount, seed) {
        let pair = &pairs[index];
        let outcome = restorer.restore(&pair.obfuscated).await;
        report.record(index, pair, outcome.into_text());
    }
    report
}
