//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! ChainConfig (RPC URL, failovers, timeout)
//!     → client.rs (RPC connection with timeouts and failover)
//!     → contract.rs (accessTimes(address) view call)
//!     → AccessTimeReader for the authorizer
//!
//! Periodic timer
//!     → monitor.rs (probe block number)
//!     → accesstime_chain_rpc_healthy gauge
//!
//! Environment Variables (private key)
//!     → wallet.rs (personal-message signing for clients and tests)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or signatures
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod contract;
pub mod monitor;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use contract::AccessTimeContract;
pub use monitor::ChainHealthMonitor;
pub use types::{BlockchainError, ChainConfig, ChainId};
pub use wallet::Wallet;
