//! Port interfaces for delivering replies

use async_trait::async_trait;
use awaydesk_domain::{OutboundReply, Result};

/// Trait for sending a reply back over the chat transport
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send_reply(&self, reply: OutboundReply) -> Result<()>;
}
