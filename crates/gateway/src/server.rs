use std::{sync::Arc, time::Duration};

use {
    axum::{
        Json, Router,
        extract::State,
        response::IntoResponse,
        routing::{get, post},
    },
    tower_http::cors::{Any, CorsLayer},
    tracing::{info, warn},
};

use {
    switchboard_config::SwitchboardConfig,
    switchboard_plugins::{CommandRegistry, EventRegistry},
};

use crate::{account_routes, accounts::AccountStore, dispatch, state::GatewayState};

/// How often expired session rows are swept.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(3600);

// ── Server startup ───────────────────────────────────────────────────────────

/// Build the gateway router (shared between production startup and tests).
pub fn build_gateway_app(state: Arc<GatewayState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/command", get(dispatch::command))
        .route("/api/event", get(dispatch::event))
        .route("/api/commands", get(dispatch::list_commands))
        .route("/api/create-account", post(account_routes::create_account))
        .route("/api/login", post(account_routes::login))
        .layer(cors)
        .with_state(state)
}

/// Listener overrides resolved by the CLI before startup. Anything left
/// `None` falls back to the config file, then to the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct GatewayOptions {
    pub bind: Option<String>,
    pub port: Option<u16>,
}

/// Start the gateway HTTP server: open the database, freeze the registries
/// into shared state, and serve until shutdown.
pub async fn start_gateway(
    opts: GatewayOptions,
    config: SwitchboardConfig,
    commands: CommandRegistry,
    events: EventRegistry,
) -> anyhow::Result<()> {
    let db_path = config
        .database
        .path
        .clone()
        .unwrap_or_else(|| switchboard_config::data_dir().join("switchboard.db"));
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
    let pool = sqlx::SqlitePool::connect(&db_url).await?;
    let accounts = AccountStore::new(pool).await?;

    info!(
        commands = commands.len(),
        events = events.len(),
        db = %db_path.display(),
        "gateway starting"
    );

    let state = GatewayState::new(commands, events, accounts, config.dispatch.prefix.clone());
    spawn_session_sweeper(Arc::clone(&state));

    let bind = opts.bind.unwrap_or(config.server.bind);
    let port = opts.port.unwrap_or(config.server.port);
    let addr = format!("{bind}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, build_gateway_app(state)).await?;
    Ok(())
}

/// Periodic cleanup of expired session rows.
fn spawn_session_sweeper(state: Arc<GatewayState>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        // The first tick fires immediately; skip it so startup stays quiet.
        interval.tick().await;
        loop {
            interval.tick().await;
            match state.accounts.sweep_expired_sessions().await {
                Ok(0) => {}
                Ok(n) => info!(deleted = n, "swept expired sessions"),
                Err(e) => warn!(error = %e, "session sweep failed"),
            }
        }
    });
}

// ── Handlers ─────────────────────────────────────────────────────────────────

async fn health_handler(State(state): State<Arc<GatewayState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": GatewayState::version(),
        "commands": state.commands.len(),
        "events": state.events.len(),
    }))
}
