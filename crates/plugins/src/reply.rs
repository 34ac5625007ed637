//! Per-dispatch reply channel handed to plugin handlers.

use std::sync::Mutex;

use tokio::sync::oneshot;

/// What a handler chose to send back.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Plain text, rendered by the gateway as `{fail:false, message}`.
    Text(String),
    /// A raw JSON payload, rendered verbatim.
    Json(serde_json::Value),
}

/// Write end of one dispatch call's reply channel.
///
/// Exactly one is built per dispatch and moved into the handler context;
/// the first write wins and later writes are dropped.
pub struct ReplyContext {
    tx: Mutex<Option<oneshot::Sender<Reply>>>,
}

impl ReplyContext {
    /// Build a context plus the receiver the endpoint drains after the
    /// handler returns.
    #[must_use]
    pub fn channel() -> (Self, oneshot::Receiver<Reply>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                tx: Mutex::new(Some(tx)),
            },
            rx,
        )
    }

    /// Reply with plain text. Returns `false` when a reply was already
    /// recorded or nothing is listening.
    pub fn send(&self, text: impl Into<String>) -> bool {
        self.deliver(Reply::Text(text.into()))
    }

    /// Reply with a raw JSON payload. Same first-write-wins rule as
    /// [`send`](Self::send).
    pub fn send_json(&self, value: serde_json::Value) -> bool {
        self.deliver(Reply::Json(value))
    }

    fn deliver(&self, reply: Reply) -> bool {
        let tx = self.tx.lock().unwrap_or_else(|e| e.into_inner()).take();
        match tx {
            Some(tx) => tx.send(reply).is_ok(),
            None => false,
        }
    }
}

impl std::fmt::Debug for ReplyContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let replied = self.tx.lock().unwrap_or_else(|e| e.into_inner()).is_none();
        f.debug_struct("ReplyContext")
            .field("replied", &replied)
            .finish()
    }
}
