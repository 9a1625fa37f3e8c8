//! Per-network RPC providers and the ticker-keyed cache

mod reader;

pub use reader::{ChainReader, RpcChainReader};

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use ethers_providers::{Http, Provider};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use tracing::warn;

use crate::error::{Error, Result};
use crate::network::{NetworkDescriptor, NetworkFamily};

/// Cached RPC client wrapper for one network ticker.
///
/// Holds only the client relevant to its family; asking for the other
/// family's client is an error, never a silent `None`. Construction
/// configures transport parameters only, the first network round trip
/// happens on the first query.
pub struct KryptikProvider {
    ticker: String,
    family: NetworkFamily,
    chain_id: Option<u64>,
    evm: Option<Arc<Provider<Http>>>,
    solana: Option<Arc<RpcClient>>,
}

impl std::fmt::Debug for KryptikProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // the RPC clients carry no Debug impls of their own
        f.debug_struct("KryptikProvider")
            .field("ticker", &self.ticker)
            .field("family", &self.family)
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

impl KryptikProvider {
    fn new(
        ticker: &str,
        family: NetworkFamily,
        chain_id: Option<u64>,
        endpoint: &str,
    ) -> Result<Self> {
        let mut provider = Self {
            ticker: ticker.to_string(),
            family,
            chain_id,
            evm: None,
            solana: None,
        };
        match family {
            NetworkFamily::Evm => {
                let client = Provider::<Http>::try_from(endpoint).map_err(|e| {
                    Error::Provider(format!("bad rpc endpoint for {}: {}", ticker, e))
                })?;
                provider.evm = Some(Arc::new(client));
            }
            NetworkFamily::Solana => {
                provider.solana = Some(Arc::new(RpcClient::new_with_commitment(
                    endpoint.to_string(),
                    CommitmentConfig::confirmed(),
                )));
            }
        }
        Ok(provider)
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn family(&self) -> NetworkFamily {
        self.family
    }

    /// Chain id the descriptor carried, travelling with the client so
    /// callers never fall back to on-the-wire chain-id negotiation.
    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    /// The EVM JSON-RPC client.
    pub fn evm(&self) -> Result<&Arc<Provider<Http>>> {
        self.evm.as_ref().ok_or_else(|| {
            Error::Provider(format!("no EVM client configured for {}", self.ticker))
        })
    }

    /// The Solana RPC client.
    pub fn solana(&self) -> Result<&Arc<RpcClient>> {
        self.solana.as_ref().ok_or_else(|| {
            Error::Provider(format!("no Solana client configured for {}", self.ticker))
        })
    }
}

#[derive(Clone)]
struct Endpoint {
    url: String,
    chain_id: Option<u64>,
}

/// Identity-stable cache of providers, keyed by ticker.
///
/// The endpoint map is derived once per service start from the supported
/// descriptors. The provider map lock is held for lookup and insert only,
/// never across client construction or an RPC call; two tasks racing on an
/// uncached ticker may both build a client, the map keeps one.
pub struct ProviderCache {
    endpoints: RwLock<HashMap<String, Endpoint>>,
    providers: Mutex<HashMap<String, Arc<KryptikProvider>>>,
}

impl ProviderCache {
    pub fn new() -> Self {
        Self {
            endpoints: RwLock::new(HashMap::new()),
            providers: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the endpoint map from supported descriptors. A descriptor
    /// flagged supported but missing its endpoint URL is logged and skipped.
    pub fn set_endpoints(&self, descriptors: &[NetworkDescriptor]) {
        let mut endpoints = HashMap::new();
        for descriptor in descriptors.iter().filter(|d| d.is_supported) {
            if descriptor.provider.is_empty() {
                warn!(
                    ticker = %descriptor.ticker,
                    "network flagged supported but has no rpc endpoint; check rpc config"
                );
                continue;
            }
            let chain_id = (descriptor.chain_id != 0).then_some(descriptor.chain_id);
            endpoints.insert(
                descriptor.ticker.clone(),
                Endpoint {
                    url: descriptor.provider.clone(),
                    chain_id,
                },
            );
        }
        *self.endpoints.write().expect("endpoint lock poisoned") = endpoints;
    }

    /// Return the cached provider for `ticker`, building it on first use.
    pub fn get_or_create(&self, ticker: &str) -> Result<Arc<KryptikProvider>> {
        if let Some(existing) = self
            .providers
            .lock()
            .expect("provider lock poisoned")
            .get(ticker)
        {
            return Ok(existing.clone());
        }

        let family = NetworkFamily::from_ticker(ticker).ok_or_else(|| {
            Error::UnsupportedFamily(format!("no known chain family for ticker {}", ticker))
        })?;
        let endpoint = self
            .endpoints
            .read()
            .expect("endpoint lock poisoned")
            .get(ticker)
            .cloned()
            .ok_or_else(|| {
                Error::Provider(format!("no rpc endpoint resolved for {}", ticker))
            })?;

        let built = Arc::new(KryptikProvider::new(
            ticker,
            family,
            endpoint.chain_id,
            &endpoint.url,
        )?);

        let mut providers = self.providers.lock().expect("provider lock poisoned");
        let entry = providers
            .entry(ticker.to_string())
            .or_insert(built)
            .clone();
        Ok(entry)
    }

    /// Convenience lookup by descriptor.
    pub fn get_for_descriptor(&self, descriptor: &NetworkDescriptor) -> Result<Arc<KryptikProvider>> {
        self.get_or_create(&descriptor.ticker)
    }

    /// Pre-build a provider for every resolved endpoint. Per-ticker failures
    /// are logged and do not abort; the network simply cannot be queried
    /// until a later `get_or_create` succeeds.
    pub fn prewarm(&self) -> usize {
        let tickers: Vec<String> = self
            .endpoints
            .read()
            .expect("endpoint lock poisoned")
            .keys()
            .cloned()
            .collect();

        let mut warmed = 0;
        for ticker in tickers {
            match self.get_or_create(&ticker) {
                Ok(_) => warmed += 1,
                Err(e) => warn!(ticker = %ticker, error = %e, "unable to pre-build provider"),
            }
        }
        warmed
    }
}

impl Default for ProviderCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(ticker: &str, supported: bool, endpoint: &str, chain_id: u64) -> NetworkDescriptor {
        NetworkDescriptor {
            full_name: ticker.to_uppercase(),
            ticker: ticker.to_string(),
            chain_id,
            hex_color: String::new(),
            about: String::new(),
            icon_path: String::new(),
            is_supported: supported,
            provider: endpoint.to_string(),
            coingecko_id: String::new(),
        }
    }

    fn cache_with(descriptors: &[NetworkDescriptor]) -> ProviderCache {
        let cache = ProviderCache::new();
        cache.set_endpoints(descriptors);
        cache
    }

    #[test]
    fn test_cache_is_identity_stable() {
        let cache = cache_with(&[descriptor("eth", true, "http://localhost:8545", 1)]);
        let first = cache.get_or_create("eth").unwrap();
        let second = cache.get_or_create("eth").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_unknown_family_is_rejected() {
        let cache = cache_with(&[descriptor("doge", true, "http://localhost:8545", 0)]);
        let err = cache.get_or_create("doge").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFamily(_)));
    }

    #[test]
    fn test_unsupported_descriptor_gets_no_endpoint() {
        let cache = cache_with(&[descriptor("eth", false, "http://localhost:8545", 1)]);
        let err = cache.get_or_create("eth").unwrap_err();
        assert!(matches!(err, Error::Provider(_)));
    }

    #[test]
    fn test_wrong_family_client_is_an_error() {
        let cache = cache_with(&[
            descriptor("eth", true, "http://localhost:8545", 1),
            descriptor("sol", true, "http://localhost:8899", 0),
        ]);
        let eth = cache.get_or_create("eth").unwrap();
        let sol = cache.get_or_create("sol").unwrap();
        assert!(eth.evm().is_ok());
        assert!(eth.solana().is_err());
        assert!(sol.solana().is_ok());
        assert!(sol.evm().is_err());
    }

    #[test]
    fn test_chain_id_travels_with_provider() {
        let cache = cache_with(&[descriptor("bnb", true, "http://localhost:8545", 56)]);
        let bnb = cache.get_or_create("bnb").unwrap();
        assert_eq!(bnb.chain_id(), Some(56));
        assert_eq!(bnb.family(), NetworkFamily::Evm);
    }

    #[test]
    fn test_get_for_descriptor_delegates_by_ticker() {
        let eth = descriptor("eth", true, "http://localhost:8545", 1);
        let cache = cache_with(std::slice::from_ref(&eth));
        let by_descriptor = cache.get_for_descriptor(&eth).unwrap();
        let by_ticker = cache.get_or_create("eth").unwrap();
        assert!(Arc::ptr_eq(&by_descriptor, &by_ticker));
    }

    #[test]
    fn test_prewarm_builds_all_resolved_endpoints() {
        let cache = cache_with(&[
            descriptor("eth", true, "http://localhost:8545", 1),
            descriptor("sol", true, "http://localhost:8899", 0),
            descriptor("btc", true, "http://localhost:8332", 0),
        ]);
        // btc resolves an endpoint but maps to no family, so it is skipped
        assert_eq!(cache.prewarm(), 2);
    }
}
