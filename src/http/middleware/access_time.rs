//! Access Time Middleware.
//! Enforces a minimum remaining subscription time for the request signer.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::{AccessAuthorizer, AuthorizationError};
use crate::http::request::credentials_from_headers;

/// Authorize the request and attach its [`AuthorizationContext`] before
/// calling the inner service. Rejected requests never reach `next`.
///
/// Install with `axum::middleware::from_fn_with_state(authorizer, access_time_middleware)`.
///
/// [`AuthorizationContext`]: crate::auth::AuthorizationContext
pub async fn access_time_middleware(
    State(authorizer): State<AccessAuthorizer>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let credentials = credentials_from_headers(req.headers());

    match authorizer.authorize(&credentials).await {
        Ok(ctx) => {
            req.extensions_mut().insert(ctx);
            next.run(req).await
        }
        Err(e) => {
            log_rejection(&e, req.uri().path());
            e.into_response()
        }
    }
}

/// Log a rejected request. Lookup failures carry the chain error, which the
/// response body deliberately omits.
pub(crate) fn log_rejection(err: &AuthorizationError, path: &str) {
    match err {
        AuthorizationError::LookupFailed(e) => {
            tracing::error!(error = %e, path = %path, "Rejecting request: access time lookup failed");
        }
        _ => tracing::debug!(kind = err.kind(), path = %path, "Request rejected"),
    }
}
