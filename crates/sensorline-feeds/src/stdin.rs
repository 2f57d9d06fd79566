//! Stdin feed — reads raw readings piped into the process.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::{pump, Feed, FeedKind, FeedLine};

#[derive(Debug, Default)]
pub struct StdinFeed;

impl Feed for StdinFeed {
    fn kind(&self) -> FeedKind {
        FeedKind::Stdin
    }

    fn spawn(self, tx: mpsc::Sender<FeedLine>) -> JoinHandle<anyhow::Result<()>> {
        tokio::spawn(async move {
            let sent = pump(tokio::io::stdin(), "stdin", &tx).await?;
            tracing::info!(feed = %FeedKind::Stdin, lines = sent, "feed exhausted");
            Ok(())
        })
    }
}
