//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse, deserialize, environment overrides)
//!     → validation.rs (semantic checks)
//!     → GuardConfig (validated, immutable)
//!     → policy and chain client built once at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the policy never changes at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_or_default, ConfigError};
pub use schema::GuardConfig;
pub use schema::{AccessTimeConfig, ChainConfig, ListenerConfig, ObservabilityConfig, TimeoutConfig, TlsConfig};
