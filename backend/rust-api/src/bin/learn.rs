use std::sync::Arc;

use clap::Parser;
use learning_api::{
    config::Config,
    services::{content_service::ContentService, gemini::GeminiProvider},
    telemetry,
    wizard::Wizard,
};

/// Interactive learning assistant: pick a topic, read a lesson, take a quiz.
#[derive(Parser, Debug)]
#[command(name = "learn", version)]
struct Cli {
    /// Gemini model to use instead of the configured one
    #[arg(long)]
    model: Option<String>,

    /// Log provider calls and session transitions to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "learning_api=debug"
    } else {
        "warn"
    };
    let _telemetry = telemetry::init(filter, "learning-cli")?;

    // Refuse to start without an API key
    let mut config = Config::load()?;
    if let Some(model) = cli.model {
        config.provider.model = model;
    }

    let provider = GeminiProvider::new(&config.provider)?;
    let content = ContentService::with_cache(Arc::new(provider));

    Wizard::new(content).run().await
}
