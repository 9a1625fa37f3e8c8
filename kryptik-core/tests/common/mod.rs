//! Stub collaborators shared by the integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ethers_core::types::U256;

use kryptik_core::error::{Error, Result};
use kryptik_core::network::{NetworkDescriptor, NetworkFamily, NetworkStore};
use kryptik_core::price::PriceOracle;
use kryptik_core::provider::ChainReader;
use kryptik_core::wallet::{SeedLoop, VaultKeeper, VaultShare};
use kryptik_core::Web3Service;

pub const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

/// Route library logs through the test harness. Safe to call repeatedly;
/// only the first call per process installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn descriptor(ticker: &str, full_name: &str, supported: bool, coingecko_id: &str) -> NetworkDescriptor {
    NetworkDescriptor {
        full_name: full_name.to_string(),
        ticker: ticker.to_string(),
        chain_id: 1,
        hex_color: String::new(),
        about: String::new(),
        icon_path: format!("/icons/{}.svg", ticker),
        is_supported: supported,
        provider: format!("http://localhost:8545/{}", ticker),
        coingecko_id: coingecko_id.to_string(),
    }
}

pub struct StubStore {
    pub networks: Vec<NetworkDescriptor>,
    pub fail: bool,
}

impl StubStore {
    pub fn with(networks: Vec<NetworkDescriptor>) -> Arc<Self> {
        Arc::new(Self { networks, fail: false })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { networks: Vec::new(), fail: true })
    }
}

#[async_trait]
impl NetworkStore for StubStore {
    async fn fetch_all(&self) -> Result<Vec<NetworkDescriptor>> {
        if self.fail {
            return Err(Error::RegistryLoad("store offline".to_string()));
        }
        Ok(self.networks.clone())
    }
}

/// Vault keeping phrases in process memory, keyed by uid.
pub struct InMemoryVault {
    vaults: Mutex<HashMap<String, (String, String)>>, // uid -> (share, phrase)
}

impl InMemoryVault {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { vaults: Mutex::new(HashMap::new()) })
    }
}

#[async_trait]
impl VaultKeeper for InMemoryVault {
    async fn unlock_vault(&self, uid: &str, remote_share: &str) -> Result<Option<SeedLoop>> {
        let vaults = self.vaults.lock().unwrap();
        match vaults.get(uid) {
            Some((share, phrase)) if share == remote_share => {
                Ok(Some(SeedLoop::from_phrase(phrase)?))
            }
            _ => Ok(None),
        }
    }

    async fn create_vault(&self, seed_loop: &SeedLoop, uid: &str) -> Result<VaultShare> {
        let share = format!("share-{}", uid);
        self.vaults
            .lock()
            .unwrap()
            .insert(uid.to_string(), (share.clone(), seed_loop.phrase().to_string()));
        Ok(VaultShare { remote_share: share })
    }
}

pub struct StubOracle {
    pub prices: HashMap<String, f64>,
}

impl StubOracle {
    pub fn with(pairs: &[(&str, f64)]) -> Arc<Self> {
        let prices = pairs
            .iter()
            .map(|(id, price)| (id.to_string(), *price))
            .collect();
        Arc::new(Self { prices })
    }
}

#[async_trait]
impl PriceOracle for StubOracle {
    async fn usd_price(&self, coingecko_id: &str) -> Result<f64> {
        self.prices
            .get(coingecko_id)
            .copied()
            .ok_or_else(|| Error::Price(format!("no price for {}", coingecko_id)))
    }
}

/// Chain reader answering from a fixed ticker -> raw balance map, with an
/// optional artificial delay per query.
pub struct StubChainReader {
    pub balances: HashMap<String, U256>,
    pub delay: Option<Duration>,
}

impl StubChainReader {
    pub fn with(pairs: &[(&str, &str)]) -> Arc<Self> {
        let balances = pairs
            .iter()
            .map(|(ticker, raw)| (ticker.to_string(), U256::from_dec_str(raw).unwrap()))
            .collect();
        Arc::new(Self { balances, delay: None })
    }

    pub fn slow(pairs: &[(&str, &str)], delay: Duration) -> Arc<Self> {
        let balances = pairs
            .iter()
            .map(|(ticker, raw)| (ticker.to_string(), U256::from_dec_str(raw).unwrap()))
            .collect();
        Arc::new(Self { balances, delay: Some(delay) })
    }
}

#[async_trait]
impl ChainReader for StubChainReader {
    fn supports(&self, family: NetworkFamily) -> bool {
        matches!(family, NetworkFamily::Evm)
    }

    async fn native_balance(&self, network: &NetworkDescriptor, _address: &str) -> Result<U256> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.balances
            .get(&network.ticker)
            .copied()
            .ok_or_else(|| Error::Rpc(format!("no stub balance for {}", network.ticker)))
    }
}

/// A started service over the given descriptors with empty oracle/vault stubs.
pub async fn started_service(networks: Vec<NetworkDescriptor>) -> Web3Service {
    init_tracing();
    let service = Web3Service::new(
        StubStore::with(networks),
        InMemoryVault::new(),
        StubOracle::with(&[]),
    );
    service.start().await.unwrap();
    service
}
