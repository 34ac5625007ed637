//! Built-in plugins registered at startup.
//!
//! These are the finalized descriptor lists the gateway hands to the
//! registry constructors; dispatch itself never discovers plugins.

mod echo;
mod ping;
mod uptime;
mod welcome;

pub use {echo::EchoCommand, ping::PingCommand, uptime::UptimeCommand, welcome::WelcomeEvent};

use std::sync::Arc;

use crate::registry::{CommandHandler, EventHandler};

/// The built-in command set, in listing order.
#[must_use]
pub fn commands() -> Vec<Arc<dyn CommandHandler>> {
    vec![
        Arc::new(PingCommand::new()),
        Arc::new(EchoCommand::new()),
        Arc::new(UptimeCommand::new()),
    ]
}

/// The built-in event set.
#[must_use]
pub fn events() -> Vec<Arc<dyn EventHandler>> {
    vec![Arc::new(WelcomeEvent::new())]
}
