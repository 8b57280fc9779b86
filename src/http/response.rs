//! Rejection responses.
//!
//! # Design Decisions
//! - Credential and subscription failures are 401 Unauthorized
//! - Chain lookup failures are 502 Bad Gateway, without internal detail
//! - Every rejection carries a stable `kind` for clients to branch on

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthorizationError;

/// JSON body of a rejected request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RejectionBody {
    pub status_code: u16,
    pub error: String,
    pub kind: String,
    pub message: String,
}

/// HTTP status for an authorization failure.
pub fn status_for(err: &AuthorizationError) -> StatusCode {
    match err {
        AuthorizationError::LookupFailed(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::UNAUTHORIZED,
    }
}

impl From<&AuthorizationError> for RejectionBody {
    fn from(err: &AuthorizationError) -> Self {
        let status = status_for(err);
        let message = match err {
            AuthorizationError::LookupFailed(_) => "Access time lookup failed".to_string(),
            other => other.to_string(),
        };
        Self {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            kind: err.kind().to_string(),
            message,
        }
    }
}

impl IntoResponse for AuthorizationError {
    fn into_response(self) -> Response {
        (status_for(&self), Json(RejectionBody::from(&self))).into_response()
    }
}
