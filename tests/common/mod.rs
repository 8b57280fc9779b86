//! Shared utilities for integration tests.

use alloy::primitives::Address;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use accesstime_guard::auth::{AccessTimeReader, LookupError};
use accesstime_guard::blockchain::{BlockchainError, Wallet};

/// Anvil's first account.
pub const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

pub fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

pub fn wallet() -> Wallet {
    Wallet::from_private_key(TEST_PRIVATE_KEY, 31337).unwrap()
}

/// In-memory stand-in for the AccessTime contract.
#[derive(Default)]
pub struct StaticAccessTimes {
    expiries: Mutex<HashMap<Address, u64>>,
    failing: bool,
    calls: AtomicUsize,
}

impl StaticAccessTimes {
    pub fn with(address: Address, expiry: u64) -> Arc<Self> {
        let reader = Self::default();
        reader.expiries.lock().unwrap().insert(address, expiry);
        Arc::new(reader)
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            failing: true,
            ..Self::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccessTimeReader for StaticAccessTimes {
    async fn access_time(&self, address: Address) -> Result<u64, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(LookupError::Chain(BlockchainError::Timeout(10)));
        }
        Ok(self.expiries.lock().unwrap().get(&address).copied().unwrap_or(0))
    }
}
