use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wiki_quiz::Config;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the quiz-generation backend
    #[arg(long, env = "WIKI_QUIZ_API_BASE_URL")]
    api_base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "WIKI_QUIZ_TIMEOUT_SECS", default_value_t = 120)]
    timeout_secs: u64,

    /// File to append logs to. Nothing is logged without it
    #[arg(long, env = "WIKI_QUIZ_LOG_FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = Config::new(&args.api_base_url)?
        .with_timeout(Duration::from_secs(args.timeout_secs));

    wiki_quiz::run(config).await?;
    Ok(())
}

/// Logs go to a file because the terminal UI owns stdout and stderr.
fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wiki_quiz=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
