//! Web3 service lifecycle and orchestration

mod balances;

pub use balances::{AggregatorConfig, Balance, TransactionHistory};

use std::sync::{Arc, RwLock};

use tracing::info;

use crate::error::{Error, Result};
use crate::network::{NetworkDescriptor, NetworkRegistry, NetworkStore};
use crate::price::PriceOracle;
use crate::provider::{ChainReader, KryptikProvider, ProviderCache, RpcChainReader};
use crate::wallet::{VaultKeeper, Wallet, WalletConnection, WalletConnector};

/// Lifecycle state of the web3 service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Uninitialized,
    Starting,
    Started,
    /// Terminal; reached when startup fails.
    Failed,
}

/// Client-side orchestration service for the kryptik wallet.
///
/// Owns the network registry, the provider cache and the wallet connector,
/// wired to its external collaborators by explicit injection. Constructed
/// once per process; registry reads, provider creation and aggregation are
/// gated on the `Started` state.
pub struct Web3Service {
    state: RwLock<ServiceState>,
    registry: NetworkRegistry,
    providers: Arc<ProviderCache>,
    connector: WalletConnector,
    reader: Arc<dyn ChainReader>,
    oracle: Arc<dyn PriceOracle>,
    aggregator: AggregatorConfig,
}

impl Web3Service {
    /// Build a service over its collaborators, reading balances through the
    /// RPC-backed chain reader.
    pub fn new(
        store: Arc<dyn NetworkStore>,
        vault: Arc<dyn VaultKeeper>,
        oracle: Arc<dyn PriceOracle>,
    ) -> Self {
        let providers = Arc::new(ProviderCache::new());
        let reader: Arc<dyn ChainReader> = Arc::new(RpcChainReader::new(providers.clone()));
        Self {
            state: RwLock::new(ServiceState::Uninitialized),
            registry: NetworkRegistry::new(store),
            providers,
            connector: WalletConnector::new(vault),
            reader,
            oracle,
            aggregator: AggregatorConfig::default(),
        }
    }

    /// Swap the balance transport, e.g. for tests.
    pub fn with_chain_reader(mut self, reader: Arc<dyn ChainReader>) -> Self {
        self.reader = reader;
        self
    }

    /// Replace the aggregation tuning knobs.
    pub fn with_aggregator_config(mut self, config: AggregatorConfig) -> Self {
        self.aggregator = config;
        self
    }

    pub fn state(&self) -> ServiceState {
        *self.state.read().expect("state lock poisoned")
    }

    fn set_state(&self, next: ServiceState) {
        *self.state.write().expect("state lock poisoned") = next;
    }

    fn ensure_started(&self) -> Result<()> {
        match self.state() {
            ServiceState::Started => Ok(()),
            other => Err(Error::NotRunning(format!(
                "web3 service is not running (state: {:?}); network data has not been populated",
                other
            ))),
        }
    }

    /// Start the service: populate the registry, resolve the supported
    /// endpoint map, pre-build providers. Only valid on an uninitialized
    /// service. A registry failure is fatal and leaves the service `Failed`;
    /// per-ticker provider failures are logged and startup continues.
    pub async fn start(&self) -> Result<()> {
        match self.state() {
            ServiceState::Uninitialized => {}
            other => {
                return Err(Error::StartupFailure(format!(
                    "start is only valid from an uninitialized service (state: {:?})",
                    other
                )));
            }
        }
        self.set_state(ServiceState::Starting);

        if let Err(e) = self.registry.populate().await {
            self.set_state(ServiceState::Failed);
            return Err(Error::StartupFailure(format!(
                "unable to populate network registry: {}",
                e
            )));
        }

        let supported = self.registry.list_supported();
        self.providers.set_endpoints(&supported);
        let warmed = self.providers.prewarm();

        self.set_state(ServiceState::Started);
        info!(
            supported = supported.len(),
            providers = warmed,
            "kryptik web3 service started"
        );
        Ok(())
    }

    /// All network descriptors, optionally restricted to supported ones.
    pub fn get_all_networks(&self, only_supported: bool) -> Result<Vec<NetworkDescriptor>> {
        self.ensure_started()?;
        Ok(if only_supported {
            self.registry.list_supported()
        } else {
            self.registry.all()
        })
    }

    /// Supported descriptors, in store order.
    pub fn get_supported_networks(&self) -> Result<Vec<NetworkDescriptor>> {
        self.ensure_started()?;
        Ok(self.registry.list_supported())
    }

    /// Case-insensitive substring search over ticker and full name.
    pub fn search_networks(&self, query: &str, only_supported: bool) -> Result<Vec<NetworkDescriptor>> {
        self.ensure_started()?;
        Ok(self.registry.search(query, only_supported))
    }

    /// Re-populate the registry wholesale from the store.
    pub async fn repopulate_networks(&self) -> Result<usize> {
        self.ensure_started()?;
        self.registry.populate().await
    }

    /// Cached provider for a ticker, built on first use.
    pub fn provider_for_ticker(&self, ticker: &str) -> Result<Arc<KryptikProvider>> {
        self.ensure_started()?;
        self.providers.get_or_create(ticker)
    }

    /// Cached provider for a descriptor.
    pub fn provider_for_network(&self, network: &NetworkDescriptor) -> Result<Arc<KryptikProvider>> {
        self.ensure_started()?;
        self.providers.get_for_descriptor(network)
    }

    /// Passthrough JSON-RPC call against a network's EVM client.
    pub async fn send_rpc_call(
        &self,
        ticker: &str,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value> {
        self.ensure_started()?;
        let provider = self.providers.get_or_create(ticker)?;
        provider
            .evm()?
            .request(method, params)
            .await
            .map_err(|e| Error::Rpc(format!("rpc call {} failed for {}: {}", method, ticker, e)))
    }

    /// Connect a wallet for `uid`. Deliberately not gated on the lifecycle
    /// state: login may complete before the registry is populated.
    pub async fn connect_wallet(
        &self,
        uid: &str,
        remote_share: Option<&str>,
        seed: Option<&str>,
    ) -> Result<WalletConnection> {
        self.connector.connect(uid, remote_share, seed).await
    }

    /// Aggregate native balances across every supported network.
    ///
    /// Networks are queried concurrently with per-call deadlines; results
    /// join in registry order. Failing networks are omitted, so the list may
    /// legitimately be shorter than the supported set.
    pub async fn get_balance_all_networks(&self, wallet: &Wallet) -> Result<Vec<Balance>> {
        self.ensure_started()?;
        let supported = self.registry.list_supported();
        Ok(balances::aggregate(
            &supported,
            wallet,
            self.reader.as_ref(),
            self.oracle.as_ref(),
            &self.aggregator,
        )
        .await)
    }

    /// Extension point: cross-network transaction history follows the same
    /// per-network fan-out contract as balances but is not implemented.
    pub async fn get_transactions_all_networks(
        &self,
        _wallet: &Wallet,
    ) -> Result<Vec<TransactionHistory>> {
        self.ensure_started()?;
        Err(Error::NotSupported(
            "transaction history aggregation is not implemented yet".to_string(),
        ))
    }
}
