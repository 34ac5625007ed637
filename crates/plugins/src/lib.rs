//! Plugin model for the switchboard gateway.
//!
//! A plugin is a descriptor (name, optional description, prefix policy for
//! commands) plus an async handler. Two registries exist, one for text
//! commands and one for named events; both are populated before the server
//! accepts traffic and are read-only afterwards. Handlers reply through a
//! per-dispatch [`ReplyContext`] rather than touching the transport.

pub mod bundled;
pub mod context;
pub mod error;
pub mod policy;
pub mod registry;
pub mod reply;
pub mod resolve;

pub use {
    context::{CommandContext, EventContext, MessageEnvelope},
    error::{Error, Result},
    policy::PrefixPolicy,
    registry::{
        CommandHandler, CommandMeta, CommandRegistry, EventHandler, EventMeta, EventRegistry,
        NO_DESCRIPTION,
    },
    reply::{Reply, ReplyContext},
    resolve::{ResolvedCommand, resolve},
};
