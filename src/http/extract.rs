//! Handler-level access to the authorization context.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::auth::{AccessAuthorizer, AuthorizationContext, AuthorizationError};
use crate::http::middleware::access_time::log_rejection;
use crate::http::request::credentials_from_headers;

/// The caller's [`AuthorizationContext`].
///
/// Behind [`access_time_middleware`](crate::http::middleware::access_time_middleware)
/// this returns the context the middleware attached. On routes without the
/// middleware it authorizes the request itself, acting as a per-handler guard.
#[derive(Debug, Clone)]
pub struct AccessTime(pub AuthorizationContext);

impl<S> FromRequestParts<S> for AccessTime
where
    AccessAuthorizer: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthorizationError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<AuthorizationContext>() {
            return Ok(Self(ctx.clone()));
        }

        let authorizer = AccessAuthorizer::from_ref(state);
        let credentials = credentials_from_headers(&parts.headers);
        let ctx = authorizer
            .authorize(&credentials)
            .await
            .inspect_err(|e| log_rejection(e, parts.uri.path()))?;
        parts.extensions.insert(ctx.clone());
        Ok(Self(ctx))
    }
}
