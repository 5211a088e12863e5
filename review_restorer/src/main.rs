use clap::Parser;
use review_restorer::cli::{self, Cli};
use review_restorer::errors::AppError;
use review_restorer::logger;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    logger::init_logging(cli.log_format);
    cli::run(cli).await
}
