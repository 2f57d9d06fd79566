//! sensorline-feeds — raw reading feed sources for sensorline.
//!
//! Each feed reads newline-delimited JSON from its source and pushes
//! [`FeedLine`] values onto an async channel for the host pipeline, which
//! decodes them with [`decode`] and hands the result to the normalizer.

pub mod file;
pub mod stdin;

use sensorline_core::RawReading;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub use file::FileFeed;
pub use stdin::StdinFeed;

/// Which feed produced a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Stdin,
    File,
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedKind::Stdin => write!(f, "stdin"),
            FeedKind::File => write!(f, "file"),
        }
    }
}

/// One non-blank line read from a feed, with enough provenance to dead-letter it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedLine {
    /// Feed-specific name of the source (`stdin`, file path, ...).
    pub producer: String,
    /// 1-based line number within the source.
    pub line_no: u64,
    pub text: String,
}

/// Trait implemented by each raw reading source.
pub trait Feed: Send {
    fn kind(&self) -> FeedKind;

    /// Start reading on a background task. The task ends when the source is
    /// exhausted or the receiver is dropped.
    fn spawn(self, tx: mpsc::Sender<FeedLine>) -> JoinHandle<anyhow::Result<()>>;
}

/// A line that is not a raw reading.
#[derive(Error, Debug)]
#[error("{producer}:{line_no}: not a raw reading: {source}")]
pub struct DecodeError {
    pub producer: String,
    pub line_no: u64,
    #[source]
    pub source: serde_json::Error,
}

/// Parse one feed line as a JSON [`RawReading`].
pub fn decode(line: &FeedLine) -> Result<RawReading, DecodeError> {
    serde_json::from_str(&line.text).map_err(|source| DecodeError {
        producer: line.producer.clone(),
        line_no: line.line_no,
        source,
    })
}

/// Forward every non-blank line of `reader` to `tx`. Returns the number of
/// lines sent.
pub(crate) async fn pump<R>(
    reader: R,
    producer: &str,
    tx: &mpsc::Sender<FeedLine>,
) -> anyhow::Result<u64>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    let mut line_no = 0u64;
    let mut sent = 0u64;

    while let Some(text) = lines.next_line().await? {
        line_no += 1;
        if text.trim().is_empty() {
            continue;
        }
        let line = FeedLine {
            producer: producer.to_string(),
            line_no,
            text,
        };
        if tx.send(line).await.is_err() {
            tracing::debug!(producer, line_no, "receiver dropped, stopping feed");
            break;
        }
        sent += 1;
    }

    Ok(sent)
}
