use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use sensorline::feeds::{Feed, FileFeed, StdinFeed};
use sensorline::{pipeline, AppConfig, Normalizer, OutputFormat, SystemClock};
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "sensorline", about = "Normalise raw sensor readings into tagged time-series records")]
struct Cli {
    /// Config file (default: ~/.config/sensorline/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Newline-delimited JSON readings to process (default: stdin).
    #[arg(long)]
    input: Option<PathBuf>,
    /// Output format, overriding the config file: json | line-protocol.
    #[arg(long)]
    format: Option<OutputFormat>,
    /// Append rejected and malformed lines here as JSON.
    #[arg(long)]
    dead_letter: Option<PathBuf>,
    /// Log at debug level on stderr.
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let format = cli.format.unwrap_or(config.output.format);
    let normalizer = Normalizer::new(config.stage, Arc::new(SystemClock))
        .context("invalid [stage] configuration")?;
    tracing::debug!(?normalizer, ?format, "stage ready");

    let (tx, rx) = mpsc::channel(1024);
    let feed = match cli.input {
        Some(path) => FileFeed::new(path).spawn(tx),
        None => StdinFeed.spawn(tx),
    };

    let mut dead_letter = match &cli.dead_letter {
        Some(path) => Some(
            tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .await
                .with_context(|| format!("opening dead-letter file {}", path.display()))?,
        ),
        None => None,
    };

    let mut stdout = tokio::io::stdout();
    let stats = pipeline::run(
        &normalizer,
        rx,
        format,
        &mut stdout,
        dead_letter
            .as_mut()
            .map(|f| f as &mut (dyn tokio::io::AsyncWrite + Unpin + Send)),
    )
    .await?;

    feed.await.context("feed task panicked")??;

    if stats.rejected + stats.malformed > 0 {
        tracing::warn!(
            rejected = stats.rejected,
            malformed = stats.malformed,
            "some readings were not normalised"
        );
    }
    Ok(())
}
