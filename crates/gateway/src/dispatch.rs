//! Command and event dispatch endpoints, plus registry introspection.
//!
//! Both dispatch routes share the same shape: gate on the session token,
//! look up a handler, hand it a reply channel, and render whatever it
//! recorded. A command that matches nothing is not an error; the caller
//! gets an empty acknowledgment and the message is treated as ordinary
//! chat traffic.

use std::{collections::HashMap, sync::Arc};

use {
    axum::{
        Json,
        extract::{Query, State},
        response::{IntoResponse, Response},
    },
    serde::Serialize,
    tokio::sync::oneshot,
    tracing::{debug, warn},
};

use switchboard_plugins::{
    CommandContext, EventContext, MessageEnvelope, NO_DESCRIPTION, PrefixPolicy, Reply,
    ReplyContext, resolve,
};

use crate::{error::GatewayError, state::GatewayState};

// ── Endpoints ────────────────────────────────────────────────────────────────

/// GET `/api/command` — resolve `body` against the command registry and run
/// the matching handler, if any.
pub async fn command(
    State(state): State<Arc<GatewayState>>,
    Query(mut params): Query<HashMap<String, String>>,
) -> Result<Response, GatewayError> {
    require_session(&state, params.remove("session")).await?;

    let envelope = envelope_from(&mut params);
    let body = params.remove("body").unwrap_or_default();
    let resolved = resolve(&body, &state.prefix);

    let Some(handler) = state.commands.get(&resolved.name) else {
        debug!(command = %resolved.name, "no matching command");
        return Ok(empty_ack());
    };
    if !handler.meta().prefix.allows(resolved.has_prefix) {
        debug!(
            command = %resolved.name,
            has_prefix = resolved.has_prefix,
            "prefix policy rejected"
        );
        return Ok(empty_ack());
    }

    let (reply, rx) = ReplyContext::channel();
    let ctx = CommandContext {
        command: resolved.name.clone(),
        args: resolved.args,
        body,
        envelope,
        reply,
    };
    if let Err(e) = handler.handle(ctx).await {
        warn!(command = %resolved.name, error = %e, "command handler failed");
    }
    Ok(render_reply(rx))
}

/// GET `/api/event` — look up `eventName` and run its handler.
///
/// Event-name validation precedes the session check: a nameless request is
/// a client error even when the session is also bad.
pub async fn event(
    State(state): State<Arc<GatewayState>>,
    Query(mut params): Query<HashMap<String, String>>,
) -> Result<Response, GatewayError> {
    let name = params
        .remove("eventName")
        .filter(|n| !n.is_empty())
        .ok_or_else(|| GatewayError::BadRequest("No event specified.".into()))?;

    require_session(&state, params.remove("session")).await?;

    let envelope = envelope_from(&mut params);
    let Some(handler) = state.events.get(&name) else {
        debug!(event = %name, "unknown event");
        return Err(GatewayError::UnknownEvent(name));
    };

    let (reply, rx) = ReplyContext::channel();
    let ctx = EventContext {
        event: name.clone(),
        data: params,
        envelope,
        reply,
    };
    if let Err(e) = handler.handle(ctx).await {
        warn!(event = %name, error = %e, "event handler failed");
    }
    Ok(render_reply(rx))
}

#[derive(Debug, Serialize)]
pub struct CommandListing {
    name: String,
    description: String,
    prefix: PrefixPolicy,
}

/// GET `/api/commands` — the command registry in registration order.
pub async fn list_commands(State(state): State<Arc<GatewayState>>) -> Json<Vec<CommandListing>> {
    let listing = state
        .commands
        .iter()
        .map(|handler| {
            let meta = handler.meta();
            CommandListing {
                name: meta.name.clone(),
                description: meta
                    .description
                    .clone()
                    .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
                prefix: meta.prefix,
            }
        })
        .collect();
    Json(listing)
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Session gate shared by both dispatch endpoints.
async fn require_session(
    state: &GatewayState,
    token: Option<String>,
) -> Result<(), GatewayError> {
    let token = token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| GatewayError::Unauthorized("No session provided.".into()))?;
    if !state.accounts.check_session(&token).await? {
        debug!("session token rejected");
        return Err(GatewayError::Unauthorized(
            "Invalid or expired session.".into(),
        ));
    }
    Ok(())
}

/// Pull the envelope fields out of the query, defaulting whatever is absent.
/// Empty strings count as absent, as does an unparseable message id.
fn envelope_from(params: &mut HashMap<String, String>) -> MessageEnvelope {
    let chat_id = params.remove("chatId").filter(|v| !v.is_empty());
    let chat_type = params.remove("chatType").filter(|v| !v.is_empty());
    let message_id = params
        .remove("messageId")
        .and_then(|v| v.parse::<i64>().ok());
    MessageEnvelope::new(chat_id, chat_type, message_id)
}

/// The silent-miss acknowledgment: HTTP 200, `fail: false`, empty message.
fn empty_ack() -> Response {
    Json(serde_json::json!({"fail": false, "message": ""})).into_response()
}

/// Render whatever the handler recorded. Text replies get the standard
/// envelope, JSON replies pass through verbatim, and an untouched channel
/// degrades to the empty acknowledgment.
fn render_reply(mut rx: oneshot::Receiver<Reply>) -> Response {
    match rx.try_recv() {
        Ok(Reply::Text(text)) => {
            Json(serde_json::json!({"fail": false, "message": text})).into_response()
        }
        Ok(Reply::Json(value)) => Json(value).into_response(),
        Err(_) => empty_ack(),
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn envelope_defaults_when_absent() {
        let mut p = params(&[("body", "/ping")]);
        let envelope = envelope_from(&mut p);
        assert_eq!(envelope.chat_id, "defaultChatId");
        assert_eq!(envelope.chat_type, "private");
        assert_eq!(envelope.message_id, 1);
        // Unrelated params survive for event data.
        assert!(p.contains_key("body"));
    }

    #[test]
    fn envelope_takes_supplied_fields() {
        let mut p = params(&[
            ("chatId", "room-7"),
            ("chatType", "group"),
            ("messageId", "42"),
        ]);
        let envelope = envelope_from(&mut p);
        assert_eq!(envelope.chat_id, "room-7");
        assert_eq!(envelope.chat_type, "group");
        assert_eq!(envelope.message_id, 42);
        assert!(p.is_empty());
    }

    #[test]
    fn envelope_treats_empty_and_garbage_as_absent() {
        let mut p = params(&[("chatId", ""), ("chatType", ""), ("messageId", "soon")]);
        let envelope = envelope_from(&mut p);
        assert_eq!(envelope.chat_id, "defaultChatId");
        assert_eq!(envelope.chat_type, "private");
        assert_eq!(envelope.message_id, 1);
    }
}
