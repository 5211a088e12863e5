use crate::batch::{run_lexical, run_llm, BatchSummary, LexicalJob, LlmJob};
use crate::config::{load_config, ConfigOverrides, Provider};
use crate::dataset::load_training_pairs;
use crate::errors::AppError;
use crate::evaluation::{evaluate_lexical, evaluate_llm, EvaluationReport};
use crate::llm_client::LlmClient;
use crate::llm_restorer::LlmRestorer;
use crate::logger::LogFormat;
use crate::mapping::{TrainingPair, WordMapping};
use crate::metrics::{render, Metrics};
use crate::restorer::LexicalRestorer;
use clap::{Args, Parser, Subcommand, ValueEnum};
use prometheus::Registry;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "review-restorer", version)]
#[command(about = "Restore obfuscated Korean reviews")]
pub struct Cli {
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    /// Optional TOML/JSON settings file for the LLM commands
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Restore a dataset with the word mapping learned from training pairs
    Lexical {
        #[arg(long)]
        train: PathBuf,
        #[arg(long)]
        test: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Rewrite unmapped tokens with the built-in syllable hints
        #[arg(long)]
        hint_fallback: bool,
        /// Print Prometheus counters after the run
        #[arg(long)]
        metrics: bool,
    },
    /// Restore a dataset with an LLM, using training pairs as few-shot examples
    Llm {
        #[arg(long)]
        train: PathBuf,
        #[arg(long)]
        test: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[command(flatten)]
        provider: ProviderArgs,
        #[arg(long)]
        metrics: bool,
    },
    /// Exact-match accuracy on a random sample of training rows
    Evaluate {
        #[arg(long)]
        train: PathBuf,
        #[arg(short, long, default_value = "5")]
        samples: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = Method::Lexical)]
        method: Method,
        #[arg(long)]
        hint_fallback: bool,
        #[command(flatten)]
        provider: ProviderArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProviderArgs {
    #[arg(long, value_enum)]
    pub provider: Option<Provider>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,
    #[arg(long)]
    pub endpoint: Option<String>,
    /// dotenv file to read the provider API key from
    #[arg(long)]
    pub env_file: Option<PathBuf>,
}

impl From<ProviderArgs> for ConfigOverrides {
    fn from(args: ProviderArgs) -> Self {
        Self {
            provider: args.provider,
            endpoint: args.endpoint,
            api_key: args.api_key,
            model: args.model,
            env_file: args.env_file,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    Lexical,
    Llm,
}

pub async fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Commands::Lexical {
            train,
            test,
            output,
            hint_fallback,
            metrics,
        } => {
            let job = LexicalJob {
                train,
                test,
                output,
                hint_fallback,
            };
            lexical_command(&job, metrics)
        }
        Commands::Llm {
            train,
            test,
            output,
            provider,
            metrics,
        } => {
            let job = LlmJob { test, output };
            llm_command(cli.config.as_deref(), &train, &job, provider, metrics).await
        }
        Commands::Evaluate {
            train,
            samples,
            seed,
            method,
            hint_fallback,
            provider,
        } => {
            let pairs = load_training_pairs(&train)?;
            let report = match method {
                Method::Lexical => {
                    let restorer = LexicalRestorer::new(WordMapping::build(&pairs))
                        .with_hint_fallback(hint_fallback);
                    evaluate_lexical(&pairs, &restorer, samples, seed)
                }
                Method::Llm => {
                    let metrics = Metrics::unregistered()?;
                    let restorer =
                        build_llm_restorer(cli.config.as_deref(), &pairs, provider, metrics)?;
                    evaluate_llm(&pairs, &restorer, samples, seed).await
                }
            };
            print_report(&report);
            Ok(())
        }
    }
}

pub fn lexical_command(job: &LexicalJob, show_metrics: bool) -> Result<(), AppError> {
    info!(train = %job.train.display(), test = %job.test.display(), "running lexical restoration");
    let registry = Registry::new();
    let metrics = Metrics::new(&registry)?;
    let summary = run_lexical(job, &metrics)?;
    print_summary(&summary, &registry, show_metrics)
}

pub async fn llm_command(
    config_path: Option<&Path>,
    train: &Path,
    job: &LlmJob,
    provider: ProviderArgs,
    show_metrics: bool,
) -> Result<(), AppError> {
    let pairs = load_training_pairs(train)?;
    let registry = Registry::new();
    let metrics = Metrics::new(&registry)?;
    let restorer = build_llm_restorer(config_path, &pairs, provider, metrics.clone())?;
    let summary = run_llm(job, &restorer, &metrics).await?;
    print_summary(&summary, &registry, show_metrics)
}

fn build_llm_restorer(
    config_path: Option<&Path>,
    pairs: &[TrainingPair],
    provider: ProviderArgs,
    metrics: Metrics,
) -> Result<LlmRestorer, AppError> {
    let cfg = load_config(config_path, &provider.into())?;
    let settings = cfg.llm_settings()?;
    info!(
        provider = settings.provider.as_str(),
        model = %settings.model,
        examples = settings.few_shot_examples.min(pairs.len()),
        "configured LLM restorer"
    );
    Ok(LlmRestorer::new(LlmClient::new(settings), pairs, metrics))
}

fn print_summary(
    summary: &BatchSummary,
    registry: &Registry,
    show_metrics: bool,
) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(summary)
        .map_err(|e| AppError::Other(e.to_string()))?;
    println!("{json}");
    if show_metrics {
        print!("{}", render(registry)?);
    }
    Ok(())
}

fn print_report(report: &EvaluationReport) {
    for (n, sample) in report.samples.iter().enumerate() {
        println!("\n{}번째 샘플 (row {})", n + 1, sample.index);
        println!("원본: {}", sample.input);
        println!("복원 결과: {}", sample.restored);
        println!("정답: {}", sample.expected);
        println!("정확도: {}", if sample.matched { "일치" } else { "불일치" });
        println!("{}", "-".repeat(50));
    }
    println!(
        "\n전체 정확도: {:.2}% ({}/{})",
        report.accuracy(),
        report.correct(),
        report.samples.len()
    );
}
