//! Family dispatch for native-balance queries

use std::sync::Arc;

use async_trait::async_trait;
use ethers_core::types::{Address, U256};
use ethers_providers::Middleware;

use crate::error::{Error, Result};
use crate::network::{NetworkDescriptor, NetworkFamily};
use super::ProviderCache;

/// Capability to read native balances, one implementation per chain family.
///
/// Keeps the balance aggregator family-agnostic: adding a family means
/// extending a reader, not touching the fan-out.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Whether balance queries are implemented for `family`.
    fn supports(&self, family: NetworkFamily) -> bool;

    /// Native balance of `address` on `network`, in the smallest unit.
    async fn native_balance(&self, network: &NetworkDescriptor, address: &str) -> Result<U256>;
}

/// `ChainReader` backed by the shared provider cache.
pub struct RpcChainReader {
    providers: Arc<ProviderCache>,
}

impl RpcChainReader {
    pub fn new(providers: Arc<ProviderCache>) -> Self {
        Self { providers }
    }
}

#[async_trait]
impl ChainReader for RpcChainReader {
    fn supports(&self, family: NetworkFamily) -> bool {
        // Solana balances are a named extension point; the client is cached
        // and reachable, only the lamports query is still missing.
        matches!(family, NetworkFamily::Evm)
    }

    async fn native_balance(&self, network: &NetworkDescriptor, address: &str) -> Result<U256> {
        let provider = self.providers.get_for_descriptor(network)?;
        match provider.family() {
            NetworkFamily::Evm => {
                let parsed: Address = address.parse().map_err(|e| {
                    Error::Rpc(format!(
                        "invalid address {} for {}: {}",
                        address, network.ticker, e
                    ))
                })?;
                provider
                    .evm()?
                    .get_balance(parsed, None)
                    .await
                    .map_err(|e| {
                        Error::Rpc(format!("balance query failed for {}: {}", network.ticker, e))
                    })
            }
            NetworkFamily::Solana => Err(Error::NotSupported(format!(
                "native balance queries are not implemented for {}",
                network.ticker
            ))),
        }
    }
}
