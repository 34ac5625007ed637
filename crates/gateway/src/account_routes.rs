//! Account creation and login endpoints.

use std::sync::Arc;

use {
    axum::{Json, extract::State},
    serde::Deserialize,
    tracing::info,
};

use crate::{error::GatewayError, state::GatewayState};

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// POST `/api/create-account` — register a new account.
pub async fn create_account(
    State(state): State<Arc<GatewayState>>,
    Json(req): Json<CreateAccountRequest>,
) -> Result<Json<serde_json::Value>, GatewayError> {
    let (username, password) = require_credentials(req.username, req.password)?;
    state
        .accounts
        .create_user(&username, &password, req.email.as_deref())
        .await?;
    info!(username = %username, "account created");
    Ok(Json(serde_json::json!({
        "fail": false,
        "message": "Account created successfully.",
    })))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

/// POST `/api/login` — verify credentials and issue a session token.
pub async fn login(
    State(state): State<Arc<GatewayState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, GatewayError> {
    let (username, password) = require_credentials(req.username, req.password)?;
    let Some(user) = state.accounts.authenticate(&username, &password).await? else {
        return Err(GatewayError::Unauthorized("Invalid credentials.".into()));
    };
    let token = state.accounts.issue_session(user.id).await?;
    info!(username = %user.username, "login");
    Ok(Json(serde_json::json!({
        "fail": false,
        "session": token,
        "message": "Login successful.",
    })))
}

/// Both fields must be present and non-empty.
fn require_credentials(
    username: Option<String>,
    password: Option<String>,
) -> Result<(String, String), GatewayError> {
    match (username, password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Ok((u, p)),
        _ => Err(GatewayError::BadRequest(
            "Username and password are required.".into(),
        )),
    }
}
