//! `ping`: liveness check, usable with or without the prefix.

use async_trait::async_trait;

use crate::{
    context::CommandContext,
    policy::PrefixPolicy,
    registry::{CommandHandler, CommandMeta},
};

pub struct PingCommand {
    meta: CommandMeta,
}

impl PingCommand {
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: CommandMeta {
                name: "ping".into(),
                description: Some("Replies with pong.".into()),
                prefix: PrefixPolicy::Either,
            },
        }
    }
}

impl Default for PingCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandHandler for PingCommand {
    fn meta(&self) -> &CommandMeta {
        &self.meta
    }

    async fn handle(&self, ctx: CommandContext) -> anyhow::Result<()> {
        ctx.reply.send("pong");
        Ok(())
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        context::MessageEnvelope,
        reply::{Reply, ReplyContext},
    };

    #[tokio::test]
    async fn replies_pong() {
        let (reply, mut rx) = ReplyContext::channel();
        let ctx = CommandContext {
            command: "ping".into(),
            args: vec![],
            body: "/ping".into(),
            envelope: MessageEnvelope::default(),
            reply,
        };
        PingCommand::new().handle(ctx).await.unwrap();
        assert_eq!(rx.try_recv().unwrap(), Reply::Text("pong".into()));
    }
}
