//! Plugin descriptors, handler traits, and the lookup registries.

use std::{collections::HashMap, sync::Arc};

use {
    async_trait::async_trait,
    serde::{Deserialize, Serialize},
    tracing::debug,
};

use crate::{
    context::{CommandContext, EventContext},
    error::{Error, Result},
    policy::PrefixPolicy,
};

/// Fallback shown by listings when a descriptor carries no description.
pub const NO_DESCRIPTION: &str = "No description available";

/// Descriptor for a command plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandMeta {
    /// Unique registry key. Case-sensitive.
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub prefix: PrefixPolicy,
}

/// Descriptor for a named-event plugin. Events carry no prefix semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMeta {
    /// Unique registry key. Case-sensitive.
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A command plugin: descriptor plus behavior.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    fn meta(&self) -> &CommandMeta;

    /// Invoked once per policy-valid dispatch. Output goes through
    /// `ctx.reply`; a returned error is logged by the gateway, never
    /// surfaced to the caller.
    async fn handle(&self, ctx: CommandContext) -> anyhow::Result<()>;
}

/// An event plugin: descriptor plus behavior.
#[async_trait]
pub trait EventHandler: Send + Sync {
    fn meta(&self) -> &EventMeta;

    async fn handle(&self, ctx: EventContext) -> anyhow::Result<()>;
}

/// Registration-ordered command lookup.
///
/// Populated before the server accepts traffic, read-only afterwards, so
/// concurrent dispatches share it without locking.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: Vec<Arc<dyn CommandHandler>>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a finalized handler list.
    pub fn from_handlers(
        handlers: impl IntoIterator<Item = Arc<dyn CommandHandler>>,
    ) -> Result<Self> {
        let mut registry = Self::new();
        for handler in handlers {
            registry.register(handler)?;
        }
        Ok(registry)
    }

    /// Add a handler. Names are unique; re-registering one is an error.
    pub fn register(&mut self, handler: Arc<dyn CommandHandler>) -> Result<()> {
        let name = handler.meta().name.clone();
        if self.index.contains_key(&name) {
            return Err(Error::duplicate("command", name));
        }
        debug!(command = %name, "registered command plugin");
        self.index.insert(name, self.handlers.len());
        self.handlers.push(handler);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn CommandHandler>> {
        self.index.get(name).map(|&i| &self.handlers[i])
    }

    /// Handlers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn CommandHandler>> {
        self.handlers.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Registration-ordered event lookup. Same contract as [`CommandRegistry`],
/// independent namespace.
#[derive(Default)]
pub struct EventRegistry {
    handlers: Vec<Arc<dyn EventHandler>>,
    index: HashMap<String, usize>,
}

impl EventRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a finalized handler list.
    pub fn from_handlers(handlers: impl IntoIterator<Item = Arc<dyn EventHandler>>) -> Result<Self> {
        let mut registry = Self::new();
        for handler in handlers {
            registry.register(handler)?;
        }
        Ok(registry)
    }

    /// Add a handler. Names are unique; re-registering one is an error.
    pub fn register(&mut self, handler: Arc<dyn EventHandler>) -> Result<()> {
        let name = handler.meta().name.clone();
        if self.index.contains_key(&name) {
            return Err(Error::duplicate("event", name));
        }
        debug!(event = %name, "registered event plugin");
        self.index.insert(name, self.handlers.len());
        self.handlers.push(handler);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn EventHandler>> {
        self.index.get(name).map(|&i| &self.handlers[i])
    }

    /// Handlers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn EventHandler>> {
        self.handlers.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
