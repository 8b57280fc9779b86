use axum::Json;
use serde::Serialize;

use crate::auth::AuthorizationContext;
use crate::http::extract::AccessTime;

#[derive(Serialize)]
pub struct HealthStatus {
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
    })
}

/// Echo the caller's authorization context.
pub async fn get_access(AccessTime(ctx): AccessTime) -> Json<AuthorizationContext> {
    Json(ctx)
}
