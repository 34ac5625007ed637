//! `uptime`: how long the gateway has been running. Deliberately carries no
//! description, exercising the listing fallback.

use std::time::Instant;

use async_trait::async_trait;

use crate::{
    context::CommandContext,
    policy::PrefixPolicy,
    registry::{CommandHandler, CommandMeta},
};

pub struct UptimeCommand {
    meta: CommandMeta,
    started: Instant,
}

impl UptimeCommand {
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: CommandMeta {
                name: "uptime".into(),
                description: None,
                prefix: PrefixPolicy::Forbidden,
            },
            started: Instant::now(),
        }
    }
}

impl Default for UptimeCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandHandler for UptimeCommand {
    fn meta(&self) -> &CommandMeta {
        &self.meta
    }

    async fn handle(&self, ctx: CommandContext) -> anyhow::Result<()> {
        ctx.reply
            .send(format!("up {}", format_duration(self.started.elapsed().as_secs())));
        Ok(())
    }
}

/// Render seconds as the largest applicable units, e.g. "2d 5h 3m 10s".
fn format_duration(total_secs: u64) -> String {
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(format!("{seconds}s"));
    }
    parts.join(" ")
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        context::MessageEnvelope,
        reply::{Reply, ReplyContext},
    };

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(61), "1m 1s");
        assert_eq!(format_duration(3_600), "1h");
        assert_eq!(format_duration(90_061), "1d 1h 1m 1s");
    }

    #[tokio::test]
    async fn replies_with_uptime() {
        let (reply, mut rx) = ReplyContext::channel();
        let ctx = CommandContext {
            command: "uptime".into(),
            args: vec![],
            body: "uptime".into(),
            envelope: MessageEnvelope::default(),
            reply,
        };
        UptimeCommand::new().handle(ctx).await.unwrap();
        let Reply::Text(text) = rx.try_recv().unwrap() else {
            panic!("expected text reply");
        };
        assert!(text.starts_with("up "));
    }
}
