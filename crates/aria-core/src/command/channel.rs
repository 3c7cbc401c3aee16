//! The command round trip.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::backend::CommandBackend;
use crate::error::AriaError;
use crate::transcript::{Message, Transcript};

/// Owns the request/response cycle between user input and the transcript.
///
/// One request per send action, no retry, no queueing, no cancellation.
/// Nothing prevents a second submit before the first resolves: each loading
/// placeholder pairs only with its own request, so out-of-order completions
/// are tolerated by the transcript.
pub struct CommandChannel {
    backend: Arc<dyn CommandBackend>,
    transcript: Arc<RwLock<Transcript>>,
}

impl CommandChannel {
    pub fn new(backend: Arc<dyn CommandBackend>, transcript: Arc<RwLock<Transcript>>) -> Self {
        Self {
            backend,
            transcript,
        }
    }

    /// The transcript this channel appends to.
    pub fn transcript(&self) -> Arc<RwLock<Transcript>> {
        self.transcript.clone()
    }

    /// Submits one command.
    ///
    /// Empty or whitespace-only input is a no-op: no transcript mutation, no
    /// request. Otherwise the trimmed text is appended as a user message, a
    /// loading placeholder follows it, exactly one request goes out, and the
    /// placeholder is replaced by the reply or by a synthesized error
    /// message. Completion is observed via the transcript.
    pub async fn submit(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        let pending = {
            let mut transcript = self.transcript.write().await;
            transcript.push(Message::user(text));
            transcript.begin_pending()
        };

        let message = match self.backend.send_command(text).await {
            Ok(reply) => Message::ai(reply.kind, reply.reply),
            Err(AriaError::Server { status }) => {
                Message::error(format!("Server error: {status}"))
            }
            Err(AriaError::NetworkUnreachable { endpoint }) => Message::error(format!(
                "Connection error: backend not responding on {endpoint}. \
                 Please ensure the backend server is running."
            )),
            Err(err) => Message::error(err.to_string()),
        };

        self.transcript.write().await.resolve_pending(pending, message);
    }
}
