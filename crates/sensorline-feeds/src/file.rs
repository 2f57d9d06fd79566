//! File feed — reads raw readings from a newline-delimited JSON file.

use std::path::PathBuf;

use anyhow::Context;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::{pump, Feed, FeedKind, FeedLine};

#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Feed for FileFeed {
    fn kind(&self) -> FeedKind {
        FeedKind::File
    }

    fn spawn(self, tx: mpsc::Sender<FeedLine>) -> JoinHandle<anyhow::Result<()>> {
        tokio::spawn(async move {
            let file = tokio::fs::File::open(&self.path)
                .await
                .with_context(|| format!("opening {}", self.path.display()))?;
            let producer = self.path.display().to_string();
            let sent = pump(file, &producer, &tx).await?;
            tracing::info!(feed = %FeedKind::File, producer = %producer, lines = sent, "feed exhausted");
            Ok(())
        })
    }
}
