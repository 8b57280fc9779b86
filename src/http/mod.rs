//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, layers)
//!     → request.rs (request ID, credential headers)
//!     → middleware/access_time.rs (authorize, attach context)
//!     → handlers.rs / extract.rs (read context)
//!     → response.rs (JSON rejection on failure)
//! ```

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use extract::AccessTime;
pub use middleware::access_time_middleware;
pub use request::{MESSAGE_HEADER, SIGNATURE_HEADER, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
