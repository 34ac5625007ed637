//! `echo`: repeats its arguments. Prefix-required so bare chatter that
//! happens to start with "echo" stays untouched.

use async_trait::async_trait;

use crate::{
    context::CommandContext,
    policy::PrefixPolicy,
    registry::{CommandHandler, CommandMeta},
};

pub struct EchoCommand {
    meta: CommandMeta,
}

impl EchoCommand {
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: CommandMeta {
                name: "echo".into(),
                description: Some("Echoes the given arguments.".into()),
                prefix: PrefixPolicy::Required,
            },
        }
    }
}

impl Default for EchoCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandHandler for EchoCommand {
    fn meta(&self) -> &CommandMeta {
        &self.meta
    }

    async fn handle(&self, ctx: CommandContext) -> anyhow::Result<()> {
        if ctx.args.is_empty() {
            ctx.reply.send("Nothing to echo.");
        } else {
            ctx.reply.send(ctx.args.join(" "));
        }
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

    fn ctx_with_args(args: &[&str], reply: ReplyContext) -> CommandContext {
        CommandContext {
            command: "echo".into(),
            args: args.iter().map(|s| (*s).to_string()).collect(),
            body: format!("/echo {}", args.join(" ")),
            envelope: MessageEnvelope::default(),
            reply,
        }
    }

    #[tokio::test]
    async fn joins_args_with_single_spaces() {
        let (reply, mut rx) = ReplyContext::channel();
        EchoCommand::new()
            .handle(ctx_with_args(&["hello", "there"], reply))
            .await
            .unwrap();
        assert_eq!(rx.try_recv().unwrap(), Reply::Text("hello there".into()));
    }

    #[tokio::test]
    async fn empty_args_get_a_notice() {
        let (reply, mut rx) = ReplyContext::channel();
        EchoCommand::new()
            .handle(ctx_with_args(&[], reply))
            .await
            .unwrap();
        assert_eq!(rx.try_recv().unwrap(), Reply::Text("Nothing to echo.".into()));
    }
}
