//! AccessTime contract binding.

use alloy::primitives::{Address, U256};
use alloy::sol;
use alloy::sol_types::SolCall;
use async_trait::async_trait;

use crate::auth::authorizer::AccessTimeReader;
use crate::auth::error::LookupError;
use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult};

sol! {
    /// Read surface of the AccessTime subscription contract.
    interface IAccessTime {
        /// Expiry timestamp (unix seconds) of `account`'s access, zero if never purchased.
        function accessTimes(address account) external view returns (uint256);
    }
}

/// Reads access-time expiries from a deployed AccessTime contract.
#[derive(Clone, Debug)]
pub struct AccessTimeContract {
    client: BlockchainClient,
    address: Address,
}

impl AccessTimeContract {
    pub fn new(client: BlockchainClient, address: Address) -> Self {
        Self { client, address }
    }

    /// Parse `address` and bind to it.
    pub fn from_address_str(client: BlockchainClient, address: &str) -> BlockchainResult<Self> {
        let address: Address = address
            .parse()
            .map_err(|_| BlockchainError::InvalidAddress(address.to_string()))?;
        Ok(Self::new(client, address))
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Raw `accessTimes(account)` value.
    pub async fn access_times(&self, account: Address) -> Result<U256, LookupError> {
        let call = IAccessTime::accessTimesCall { account };
        let output = self
            .client
            .call(self.address, call.abi_encode().into())
            .await?;
        IAccessTime::accessTimesCall::abi_decode_returns(&output)
            .map_err(|e| LookupError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AccessTimeReader for AccessTimeContract {
    async fn access_time(&self, address: Address) -> Result<u64, LookupError> {
        let expiry = self.access_times(address).await?;
        Ok(saturating_u64(expiry))
    }
}

/// Expiries beyond `u64::MAX` seconds are treated as `u64::MAX`.
fn saturating_u64(value: U256) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::keccak256;
    use std::time::{Duration, Instant};
    use tokio::net::TcpListener;
    use crate::blockchain::types::ChainConfig;

    /// An endpoint that accepts connections and never answers.
    async fn silent_rpc() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_selector_matches_signature() {
        assert_eq!(IAccessTime::accessTimesCall::SIGNATURE, "accessTimes(address)");
        let hash = keccak256(IAccessTime::accessTimesCall::SIGNATURE.as_bytes());
        assert_eq!(IAccessTime::accessTimesCall::SELECTOR, hash[..4]);
    }

    #[test]
    fn test_calldata_layout() {
        let account = Address::repeat_byte(0x11);
        let data = IAccessTime::accessTimesCall { account }.abi_encode();
        assert_eq!(data.len(), 4 + 32);
        assert_eq!(&data[16..36], account.as_slice());
    }

    #[test]
    fn test_decode_return() {
        let encoded = U256::from(1_700_000_000u64).to_be_bytes::<32>();
        let decoded = IAccessTime::accessTimesCall::abi_decode_returns(&encoded).unwrap();
        assert_eq!(saturating_u64(decoded), 1_700_000_000);
    }

    #[test]
    fn test_saturating_conversion() {
        assert_eq!(saturating_u64(U256::MAX), u64::MAX);
        assert_eq!(saturating_u64(U256::ZERO), 0);
    }

    #[test]
    fn test_invalid_contract_address() {
        let client = BlockchainClient::connect(ChainConfig::default()).unwrap();
        let err = AccessTimeContract::from_address_str(client, "0x1234").unwrap_err();
        assert!(matches!(err, BlockchainError::InvalidAddress(_)));
    }

    #[tokio::test]
    async fn test_unreachable_chain_is_lookup_error() {
        let config = ChainConfig {
            rpc_url: "http://127.0.0.1:1".to_string(),
            rpc_timeout_secs: 2,
            ..ChainConfig::default()
        };
        let client = BlockchainClient::connect(config).unwrap();
        let contract = AccessTimeContract::new(client, Address::repeat_byte(0x01));
        let err = contract.access_time(Address::repeat_byte(0x02)).await.unwrap_err();
        assert!(matches!(err, LookupError::Chain(_)));
    }

    #[tokio::test]
    async fn test_silent_chain_is_bounded_by_rpc_timeout() {
        let config = ChainConfig {
            rpc_url: silent_rpc().await,
            rpc_timeout_secs: 1,
            ..ChainConfig::default()
        };
        let client = BlockchainClient::connect(config).unwrap();
        let contract = AccessTimeContract::new(client, Address::repeat_byte(0x01));

        let started = Instant::now();
        let err = contract.access_time(Address::repeat_byte(0x02)).await.unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(matches!(err, LookupError::Chain(BlockchainError::Timeout(1))));
    }

    #[tokio::test]
    async fn test_silent_failovers_each_get_the_rpc_timeout() {
        let config = ChainConfig {
            rpc_url: silent_rpc().await,
            failover_urls: vec![silent_rpc().await],
            rpc_timeout_secs: 1,
            ..ChainConfig::default()
        };
        let client = BlockchainClient::connect(config).unwrap();
        let contract = AccessTimeContract::new(client, Address::repeat_byte(0x01));

        let started = Instant::now();
        let err = contract.access_time(Address::repeat_byte(0x02)).await.unwrap_err();

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(2) && elapsed < Duration::from_secs(3));
        assert!(matches!(err, LookupError::Chain(BlockchainError::Timeout(1))));
    }
}
