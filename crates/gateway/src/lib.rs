//! Gateway: HTTP server, command/event dispatch, account and session store.
//!
//! Lifecycle:
//! 1. Load config (prefix, bind address, database path)
//! 2. Open the SQLite account store
//! 3. Freeze the plugin registries into shared state
//! 4. Serve the dispatch and account routes
//!
//! Handler logic lives in the plugins crate and is invoked through the
//! registries held by [`state::GatewayState`].

pub mod account_routes;
pub mod accounts;
pub mod dispatch;
pub mod error;
pub mod server;
pub mod state;

pub use {
    accounts::{AccountStore, User},
    error::GatewayError,
    server::{GatewayOptions, build_gateway_app, start_gateway},
    state::GatewayState,
};
