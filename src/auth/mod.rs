//! Wallet-signature authorization subsystem.
//!
//! # Data Flow
//! ```text
//! AuthorizationRequest (signature + message)
//!     → authorizer.rs (credential check)
//!     → recovery.rs (recover signer address, EIP-191)
//!     → AccessTimeReader (expiry timestamp for signer, fresh per request)
//!     → authorizer.rs (remaining time vs. policy)
//!     → AuthorizationContext | AuthorizationError
//! ```
//!
//! # Design Decisions
//! - Recovery, chain reads and the clock are injected as traits
//! - No caching: each request is decided against fresh chain state
//! - No retries: a failed lookup surfaces as `LookupFailed`
//! - A context only exists on the authorized path

pub mod authorizer;
pub mod clock;
pub mod error;
pub mod recovery;
pub mod types;

pub use authorizer::{AccessAuthorizer, AccessTimeReader};
pub use clock::{Clock, SystemClock};
pub use error::{AuthorizationError, LookupError, RecoveryError};
pub use recovery::{PersonalMessageRecoverer, SignatureRecoverer};
pub use types::{AuthorizationContext, AuthorizationPolicy, AuthorizationRequest};
