//! Restores obfuscated Korean review text, either with a word mapping learned
//! from aligned training pairs or by asking an LLM with few-shot examples.

pub mod batch;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod evaluation;
pub mod hints;
pub mod llm_client;
pub mod llm_restorer;
pub mod logger;
pub mod mapping;
pub mod metrics;
pub mod patterns;
pub mod prompt;
pub mod restorer;

pub use batch::{run_lexical, run_llm, BatchSummary, LexicalJob, LlmJob};
pub use dataset::{load_target, load_training_pairs, DatasetError, Table};
pub use errors::AppError;
pub use llm_restorer::{LlmRestorer, Restoration};
pub use mapping::{token_count, tokens, TrainingPair, WordMapping};
pub use restorer::{restore_text, restore_with_stats, LexicalRestorer, RestoreStats};
