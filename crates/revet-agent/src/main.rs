use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use revet_agent::config::model;
use revet_agent::gemini::{Client, GeminiModel};
use revet_agent::{run_review, ReviewStatus};

/// Run one AI code review from the command line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory to review.
    #[arg(long)]
    dir: PathBuf,

    /// Model identifier; falls back to REVET_MODEL, then the default.
    #[arg(long)]
    model: Option<String>,

    /// Declare the write_file tool so the model may apply fixes.
    #[arg(long)]
    apply_fixes: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "revet_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let model_name = cli
        .model
        .or_else(|| std::env::var(model::MODEL_ENV).ok())
        .unwrap_or_else(|| model::DEFAULT_MODEL.to_string());

    let client = Client::from_env()?;
    let backend = GeminiModel::new(client, model_name);

    let directory = cli.dir.to_string_lossy();
    let outcome = run_review(&backend, &directory, cli.apply_fixes).await?;

    info!("[revet-agent] {}", outcome.status.message());
    println!("{}", outcome.summary_file.display());

    if outcome.status == ReviewStatus::Failed {
        anyhow::bail!("Review session failed; see logs for details");
    }
    Ok(())
}
