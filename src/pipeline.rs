//! Pipeline — hosts the normalizer between a feed and a sink.
//!
//! Lines arrive on an mpsc channel from a [`Feed`](sensorline_feeds::Feed).
//! Each is decoded, normalised and rendered; anything that fails along the way
//! is written to the optional dead-letter writer and counted, and the run
//! carries on with the next line. The run ends when every sender is dropped.

use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use sensorline_core::{export, Normalizer, OutputFormat};
use sensorline_feeds::{decode, FeedLine};

/// Outcome counts for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Records written to the sink.
    pub accepted: u64,
    /// Readings the stage (or the renderer) turned down.
    pub rejected: u64,
    /// Lines that were not raw readings at all.
    pub malformed: u64,
}

#[derive(Serialize)]
struct DeadLetter<'a> {
    producer: &'a str,
    line_no: u64,
    reason: String,
    line: &'a str,
}

/// Drain `rx`, writing one rendered record per line to `out`.
pub async fn run<W>(
    normalizer: &Normalizer,
    mut rx: mpsc::Receiver<FeedLine>,
    format: OutputFormat,
    out: &mut W,
    mut dead_letter: Option<&mut (dyn AsyncWrite + Unpin + Send)>,
) -> anyhow::Result<PipelineStats>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut stats = PipelineStats::default();

    while let Some(line) = rx.recv().await {
        let raw = match decode(&line) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(producer = %line.producer, line_no = line.line_no, error = %err, "malformed line");
                stats.malformed += 1;
                write_dead_letter(&mut dead_letter, &line, err.source.to_string()).await?;
                continue;
            }
        };

        let rendered = normalizer
            .normalize(&raw)
            .map_err(|e| e.to_string())
            .and_then(|record| export::render(&record, format).map_err(|e| e.to_string()));

        match rendered {
            Ok(text) => {
                tracing::debug!(producer = %line.producer, line_no = line.line_no, "record accepted");
                out.write_all(text.as_bytes()).await?;
                out.write_all(b"\n").await?;
                stats.accepted += 1;
            }
            Err(reason) => {
                tracing::warn!(producer = %line.producer, line_no = line.line_no, %reason, "reading rejected");
                stats.rejected += 1;
                write_dead_letter(&mut dead_letter, &line, reason).await?;
            }
        }
    }

    out.flush().await?;
    if let Some(dl) = dead_letter {
        dl.flush().await?;
    }

    tracing::info!(
        accepted = stats.accepted,
        rejected = stats.rejected,
        malformed = stats.malformed,
        "pipeline finished"
    );
    Ok(stats)
}

async fn write_dead_letter(
    dead_letter: &mut Option<&mut (dyn AsyncWrite + Unpin + Send)>,
    line: &FeedLine,
    reason: String,
) -> anyhow::Result<()> {
    let Some(dl) = dead_letter.as_mut() else {
        return Ok(());
    };
    let entry = DeadLetter {
        producer: &line.producer,
        line_no: line.line_no,
        reason,
        line: &line.text,
    };
    let mut bytes = serde_json::to_vec(&entry)?;
    bytes.push(b'\n');
    dl.write_all(&bytes).await?;
    Ok(())
}
