//! Background chain health probing.
//!
//! # Responsibilities
//! - Periodically check that the RPC endpoints answer
//! - Publish the result as the `accesstime_chain_rpc_healthy` gauge
//! - Log transitions between reachable and unreachable

use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time;

use crate::blockchain::client::BlockchainClient;

pub struct ChainHealthMonitor {
    client: BlockchainClient,
    interval: Duration,
}

impl ChainHealthMonitor {
    pub fn new(client: BlockchainClient) -> Self {
        let interval = Duration::from_secs(client.config().health_check_interval_secs);
        Self { client, interval }
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        if self.interval.is_zero() {
            tracing::info!("Chain health monitor disabled");
            return;
        }

        tracing::info!(interval_secs = self.interval.as_secs(), "Chain health monitor starting");

        let mut ticker = time::interval(self.interval);
        let mut last = None;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let healthy = self.client.is_healthy().await;
                    if last != Some(healthy) {
                        if healthy {
                            tracing::info!("Chain RPC reachable");
                        } else {
                            tracing::warn!("Chain RPC unreachable");
                        }
                        last = Some(healthy);
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Chain health monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
