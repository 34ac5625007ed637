use {
    axum::{
        Json,
        http::StatusCode,
        response::{IntoResponse, Response},
    },
    thiserror::Error,
};

/// Error taxonomy for the HTTP boundary.
///
/// Every variant renders as the `{fail: true, message}` envelope with its
/// mapped status code, so handlers can bail with `?` and still produce the
/// wire shape callers expect.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required parameter is missing or empty.
    #[error("{0}")]
    BadRequest(String),

    /// Session missing, invalid, or expired; bad credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Event name not present in the registry.
    #[error("Unknown event: {0}.")]
    UnknownEvent(String),

    /// Persistence failure, duplicate usernames included.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl GatewayError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::UnknownEvent(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        if let Self::Store(ref e) = self {
            tracing::error!(error = %e, "store failure");
        }
        let body = Json(serde_json::json!({
            "fail": true,
            "message": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            GatewayError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::Unauthorized("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            GatewayError::UnknownEvent("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            GatewayError::Store(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unknown_event_message_names_the_event() {
        let err = GatewayError::UnknownEvent("welcome".into());
        assert_eq!(err.to_string(), "Unknown event: welcome.");
    }

    #[test]
    fn store_errors_keep_their_message() {
        let err = GatewayError::from(anyhow::anyhow!("UNIQUE constraint failed"));
        assert_eq!(err.to_string(), "UNIQUE constraint failed");
    }
}
