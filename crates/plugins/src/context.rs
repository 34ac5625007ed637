//! Per-request data handed to plugin handlers.

use std::collections::HashMap;

use crate::reply::ReplyContext;

/// Chat coordinates a dispatch call is replying into.
///
/// Synthesized per request from caller-supplied fields and discarded with
/// it; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEnvelope {
    pub chat_id: String,
    pub chat_type: String,
    pub message_id: i64,
}

impl MessageEnvelope {
    pub const DEFAULT_CHAT_ID: &'static str = "defaultChatId";
    pub const DEFAULT_CHAT_TYPE: &'static str = "private";
    pub const DEFAULT_MESSAGE_ID: i64 = 1;

    /// Build from optional caller-supplied fields, defaulting the rest.
    #[must_use]
    pub fn new(
        chat_id: Option<String>,
        chat_type: Option<String>,
        message_id: Option<i64>,
    ) -> Self {
        Self {
            chat_id: chat_id.unwrap_or_else(|| Self::DEFAULT_CHAT_ID.into()),
            chat_type: chat_type.unwrap_or_else(|| Self::DEFAULT_CHAT_TYPE.into()),
            message_id: message_id.unwrap_or(Self::DEFAULT_MESSAGE_ID),
        }
    }
}

impl Default for MessageEnvelope {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

/// Everything a command handler receives for one invocation.
#[derive(Debug)]
pub struct CommandContext {
    /// Resolved command name (first token after prefix handling).
    pub command: String,
    pub args: Vec<String>,
    /// Raw body as received, before trimming and prefix stripping.
    pub body: String,
    pub envelope: MessageEnvelope,
    pub reply: ReplyContext,
}

/// Everything an event handler receives for one invocation.
#[derive(Debug)]
pub struct EventContext {
    pub event: String,
    /// Query parameters beyond the recognized ones, passed through as-is.
    pub data: HashMap<String, String>,
    pub envelope: MessageEnvelope,
    pub reply: ReplyContext,
}
