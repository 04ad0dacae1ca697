//! Assistant service - one inbound message in, at most one reply out

use std::sync::Arc;

use awaydesk_domain::{DecisionOutcome, InboundMessage, OutboundReply, Result};
use tracing::{debug, instrument};

use super::ports::ReplySink;
use crate::availability::{DecisionEngine, ResponseFormatter};

/// Assistant service
pub struct AssistantService {
    engine: DecisionEngine,
    formatter: ResponseFormatter,
    sink: Arc<dyn ReplySink>,
}

impl AssistantService {
    pub fn new(
        engine: DecisionEngine,
        formatter: ResponseFormatter,
        sink: Arc<dyn ReplySink>,
    ) -> Self {
        Self { engine, formatter, sink }
    }

    /// Evaluate `message` and deliver the rendered reply, if any.
    ///
    /// Returns the decision. Only a failure of the reply sink is an error;
    /// every collaborator failure upstream is absorbed by the engine.
    #[instrument(skip_all, fields(sender_id = %message.sender_id, chat_kind = ?message.chat_kind))]
    pub async fn handle(&self, message: &InboundMessage) -> Result<DecisionOutcome> {
        debug!(text = %message.text, "handling inbound message");

        let outcome = self.engine.evaluate(message).await;
        if let Some(text) = self.formatter.render(&outcome) {
            let reply =
                OutboundReply { conversation_id: message.reply_target().to_string(), text };
            self.sink.send_reply(reply).await?;
        }
        Ok(outcome)
    }
}
