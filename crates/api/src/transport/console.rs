//! Line-delimited JSON transport over stdin/stdout
//!
//! Every input line is one [`InboundMessage`]; every reply is written as one
//! [`OutboundReply`] line. Each message is handled on its own task, so a slow
//! calendar never holds up the next line, and a handler that panics is logged
//! without stopping the loop.

use std::sync::Arc;

use async_trait::async_trait;
use awaydesk_core::{AssistantService, ReplySink};
use awaydesk_domain::{AwayDeskError, DecisionOutcome, InboundMessage, OutboundReply, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, warn};

use crate::utils::logging::{log_handler_error, log_handler_fault, log_serve_summary};

/// Counters for one run of [`serve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeStats {
    /// Non-blank input lines.
    pub received: usize,
    /// Lines that were not a valid message.
    pub malformed: usize,
    /// Messages whose handler completed.
    pub handled: usize,
    /// Completed messages that produced a reply.
    pub replied: usize,
    /// Handlers that returned an error or panicked.
    pub failed: usize,
}

/// [`ReplySink`] that hands replies to a writer task.
#[derive(Debug, Clone)]
pub struct ChannelReplySink {
    tx: mpsc::UnboundedSender<OutboundReply>,
}

/// Sink plus the receiving end to drain with [`write_replies`].
pub fn reply_channel() -> (ChannelReplySink, mpsc::UnboundedReceiver<OutboundReply>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelReplySink { tx }, rx)
}

#[async_trait]
impl ReplySink for ChannelReplySink {
    async fn send_reply(&self, reply: OutboundReply) -> Result<()> {
        self.tx
            .send(reply)
            .map_err(|_| AwayDeskError::Internal("reply writer has shut down".to_string()))
    }
}

/// Write each reply as a JSON line until every sink is dropped.
///
/// Returns the number of replies written.
pub async fn write_replies<W>(
    mut rx: mpsc::UnboundedReceiver<OutboundReply>,
    mut writer: W,
) -> std::io::Result<usize>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0;
    while let Some(reply) = rx.recv().await {
        let mut line = serde_json::to_string(&reply)?;
        line.push('\n');
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
        written += 1;
    }
    Ok(written)
}

/// Read messages from `reader` until EOF and dispatch each to `assistant`.
///
/// Lines that are not UTF-8 or not a valid message are logged and skipped.
/// Waits for every in-flight handler before returning, also when reading
/// fails.
pub async fn serve<R>(
    assistant: Arc<AssistantService>,
    mut reader: R,
) -> std::io::Result<ServeStats>
where
    R: AsyncBufRead + Unpin,
{
    let mut stats = ServeStats::default();
    let mut tasks: JoinSet<Result<DecisionOutcome>> = JoinSet::new();
    // Survives a lost `select!` race: `read_until` resumes appending to it.
    let mut buf = Vec::new();

    let read_result = loop {
        tokio::select! {
            read = reader.read_until(b'\n', &mut buf) => match read {
                Ok(0) => {
                    dispatch(&buf, &assistant, &mut tasks, &mut stats);
                    break Ok(());
                }
                Ok(_) => {
                    dispatch(&buf, &assistant, &mut tasks, &mut stats);
                    buf.clear();
                }
                Err(err) => {
                    error!(error = %err, "failed to read input, finishing in-flight handlers");
                    break Err(err);
                }
            },
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                record(joined, &mut stats);
            }
        }
    };

    debug!(in_flight = tasks.len(), "input closed, waiting for handlers");
    while let Some(joined) = tasks.join_next().await {
        record(joined, &mut stats);
    }

    log_serve_summary(&stats);
    read_result.map(|()| stats)
}

fn dispatch(
    raw: &[u8],
    assistant: &Arc<AssistantService>,
    tasks: &mut JoinSet<Result<DecisionOutcome>>,
    stats: &mut ServeStats,
) {
    let line = match std::str::from_utf8(raw) {
        Ok(line) => line.trim(),
        Err(err) => {
            stats.received += 1;
            stats.malformed += 1;
            warn!(error = %err, bytes = raw.len(), "skipping message that is not valid UTF-8");
            return;
        }
    };
    if line.is_empty() {
        return;
    }
    stats.received += 1;

    match serde_json::from_str::<InboundMessage>(line) {
        Ok(message) => {
            let assistant = assistant.clone();
            tasks.spawn(async move { assistant.handle(&message).await });
        }
        Err(err) => {
            stats.malformed += 1;
            warn!(
                error = %err,
                line = err.line(),
                column = err.column(),
                "skipping malformed message"
            );
        }
    }
}

fn record(joined: std::result::Result<Result<DecisionOutcome>, JoinError>, stats: &mut ServeStats) {
    match joined {
        Ok(Ok(outcome)) => {
            stats.handled += 1;
            if outcome.is_reply() {
                stats.replied += 1;
            }
        }
        Ok(Err(err)) => {
            stats.failed += 1;
            log_handler_error(&err);
        }
        Err(err) => {
            stats.failed += 1;
            log_handler_fault(&err);
        }
    }
}
