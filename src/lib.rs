//! AccessTime wallet-signature authorization for Axum services.
//!
//! Requests carry a wallet signature over a message. The signer is recovered,
//! its subscription expiry is read from the AccessTime contract, and the
//! request passes only if enough time remains.
//!
//! ```text
//!   x-accesstime-auth-signature ─┐
//!   x-accesstime-auth-message  ──┼─▶ access_time_middleware
//!                                │        │
//!                                │        ▼
//!                                │   AccessAuthorizer ──▶ PersonalMessageRecoverer
//!                                │        │
//!                                │        └────────────▶ AccessTimeContract ──▶ eth_call
//!                                │        │
//!                                ▼        ▼
//!                  401 / 502 JSON     AuthorizationContext in request extensions
//! ```

pub mod auth;
pub mod blockchain;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use auth::{AccessAuthorizer, AuthorizationContext, AuthorizationError, AuthorizationPolicy};
pub use config::GuardConfig;
pub use http::{access_time_middleware, AccessTime, HttpServer};
pub use lifecycle::Shutdown;
