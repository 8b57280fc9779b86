//! Startup orchestration.
//!
//! # Design Decisions
//! - Fail fast on malformed configuration
//! - An unreachable chain is tolerated at startup; requests then fail with `LookupFailed`

use std::sync::Arc;

use crate::auth::AccessAuthorizer;
use crate::blockchain::{AccessTimeContract, BlockchainClient, BlockchainError};
use crate::config::GuardConfig;

/// Connect to the chain described by `config`.
pub async fn connect_chain(config: &GuardConfig) -> Result<BlockchainClient, BlockchainError> {
    BlockchainClient::new(config.chain.clone()).await
}

/// Build the authorizer described by `config` on top of `client`.
pub fn build_authorizer(
    config: &GuardConfig,
    client: BlockchainClient,
) -> Result<AccessAuthorizer, BlockchainError> {
    let contract = AccessTimeContract::from_address_str(client, &config.access_time.contract_address)?;

    tracing::info!(
        contract = %contract.address(),
        min_remaining_time = config.access_time.min_remaining_time,
        "AccessTime authorizer ready"
    );

    Ok(AccessAuthorizer::new(Arc::new(contract), config.access_time.policy()))
}
