//! AwayDesk entry point
//!
//! Reads messages as JSON lines on stdin and writes replies as JSON lines on
//! stdout. Logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use awaydesk_api::utils::logging::{init_logging, LogFormat};
use awaydesk_api::{reply_channel, serve, write_replies, AppContext};
use tokio::io::BufReader;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_logging(LogFormat::from_env())?;

    let config = match std::env::args_os().nth(1) {
        Some(path) => awaydesk_infra::config::load_from_file(Some(PathBuf::from(path))),
        None => awaydesk_infra::config::load(),
    }
    .context("failed to load configuration")?;

    let (sink, rx) = reply_channel();
    let context =
        AppContext::new(config, Arc::new(sink)).context("failed to initialise assistant")?;
    let writer = tokio::spawn(write_replies(rx, tokio::io::stdout()));

    info!(owner = %context.config.assistant.owner_user_id, "awaydesk listening on stdin");
    let stats = serve(context.assistant.clone(), BufReader::new(tokio::io::stdin()))
        .await
        .context("failed to read messages")?;

    let last_busy_reply = context.cooldown.last_busy_reply();
    // Last sink goes with the context; the writer then drains and exits.
    drop(context);
    let written = writer.await.context("reply writer task failed")??;

    info!(
        received = stats.received,
        replies = written,
        last_busy_reply = ?last_busy_reply,
        "awaydesk stopped"
    );
    Ok(())
}
