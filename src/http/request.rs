//! Request handling.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4) for tracing
//! - Extract wallet credentials from request headers
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Header lookup is case-insensitive (header names are normalized to lowercase)
//! - A header that is not valid visible ASCII counts as absent

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::auth::types::AuthorizationRequest;

/// Correlation header set on every request and echoed on the response.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Hex-encoded wallet signature.
pub const SIGNATURE_HEADER: HeaderName = HeaderName::from_static("x-accesstime-auth-signature");

/// Message covered by the signature, used verbatim.
pub const MESSAGE_HEADER: HeaderName = HeaderName::from_static("x-accesstime-auth-message");

/// Issues UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdMaker;

impl MakeRequestId for RequestIdMaker {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Build an authorization request from the credential headers.
pub fn credentials_from_headers(headers: &HeaderMap) -> AuthorizationRequest {
    AuthorizationRequest {
        signature: header_str(headers, &SIGNATURE_HEADER),
        message: header_str(headers, &MESSAGE_HEADER),
    }
}

fn header_str(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
