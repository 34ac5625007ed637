//! `welcome` event: greets a chat, optionally by name.

use async_trait::async_trait;

use crate::{
    context::EventContext,
    registry::{EventHandler, EventMeta},
};

pub struct WelcomeEvent {
    meta: EventMeta,
}

impl WelcomeEvent {
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: EventMeta {
                name: "welcome".into(),
                description: Some("Greets a chat when it connects.".into()),
            },
        }
    }
}

impl Default for WelcomeEvent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventHandler for WelcomeEvent {
    fn meta(&self) -> &EventMeta {
        &self.meta
    }

    async fn handle(&self, ctx: EventContext) -> anyhow::Result<()> {
        let greeting = match ctx.data.get("name") {
            Some(name) => format!("Welcome, {name}!"),
            None => "Welcome!".to_string(),
        };
        ctx.reply
            .send(format!("{greeting} You are in chat {}.", ctx.envelope.chat_id));
        Ok(())
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{
        context::MessageEnvelope,
        reply::{Reply, ReplyContext},
    };

    fn ctx(data: HashMap<String, String>, reply: ReplyContext) -> EventContext {
        EventContext {
            event: "welcome".into(),
            data,
            envelope: MessageEnvelope::default(),
            reply,
        }
    }

    #[tokio::test]
    async fn greets_by_name() {
        let (reply, mut rx) = ReplyContext::channel();
        let data = HashMap::from([("name".to_string(), "mira".to_string())]);
        WelcomeEvent::new().handle(ctx(data, reply)).await.unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            Reply::Text("Welcome, mira! You are in chat defaultChatId.".into())
        );
    }

    #[tokio::test]
    async fn greets_anonymously_without_name() {
        let (reply, mut rx) = ReplyContext::channel();
        WelcomeEvent::new()
            .handle(ctx(HashMap::new(), reply))
            .await
            .unwrap();
        let Reply::Text(text) = rx.try_recv().unwrap() else {
            panic!("expected text reply");
        };
        assert!(text.starts_with("Welcome!"));
    }
}
