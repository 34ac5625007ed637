use std::sync::Arc;

use switchboard_plugins::{CommandRegistry, EventRegistry};

use crate::accounts::AccountStore;

// ── Gateway state ────────────────────────────────────────────────────────────

/// Shared state behind the gateway routes, wrapped in Arc for use across
/// async tasks. Registries are frozen at startup; the account store carries
/// its own connection pool.
pub struct GatewayState {
    pub commands: CommandRegistry,
    pub events: EventRegistry,
    pub accounts: AccountStore,
    /// Configured command prefix, matched literally at the start of the
    /// trimmed message body.
    pub prefix: String,
}

impl GatewayState {
    #[must_use]
    pub fn new(
        commands: CommandRegistry,
        events: EventRegistry,
        accounts: AccountStore,
        prefix: impl Into<String>,
    ) -> Arc<Self> {
        Arc::new(Self {
            commands,
            events,
            accounts,
            prefix: prefix.into(),
        })
    }

    /// Crate version reported by `/health`.
    #[must_use]
    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
