//! In-memory registry of network descriptors

use std::sync::{Arc, RwLock};

use tracing::info;

use crate::error::{Error, Result};
use super::{NetworkDescriptor, NetworkStore};

/// Holds the current descriptor snapshot, populated from the remote store.
///
/// `populate` replaces the snapshot wholesale; all reads are synchronous
/// over the in-memory copy and never touch the network.
pub struct NetworkRegistry {
    store: Arc<dyn NetworkStore>,
    networks: RwLock<Vec<NetworkDescriptor>>,
}

impl NetworkRegistry {
    pub fn new(store: Arc<dyn NetworkStore>) -> Self {
        Self {
            store,
            networks: RwLock::new(Vec::new()),
        }
    }

    /// Replace the snapshot with a fresh fetch from the store.
    pub async fn populate(&self) -> Result<usize> {
        let fetched = self
            .store
            .fetch_all()
            .await
            .map_err(|e| Error::RegistryLoad(format!("unable to load network descriptors: {}", e)))?;
        let count = fetched.len();
        *self.networks.write().expect("network registry lock poisoned") = fetched;
        info!(count, "populated network registry");
        Ok(count)
    }

    /// Every descriptor in the current snapshot, in store order.
    pub fn all(&self) -> Vec<NetworkDescriptor> {
        self.networks
            .read()
            .expect("network registry lock poisoned")
            .clone()
    }

    /// Descriptors flagged supported, in store order.
    pub fn list_supported(&self) -> Vec<NetworkDescriptor> {
        self.networks
            .read()
            .expect("network registry lock poisoned")
            .iter()
            .filter(|n| n.is_supported)
            .cloned()
            .collect()
    }

    /// Look up one descriptor by ticker.
    pub fn get(&self, ticker: &str) -> Option<NetworkDescriptor> {
        self.networks
            .read()
            .expect("network registry lock poisoned")
            .iter()
            .find(|n| n.ticker.eq_ignore_ascii_case(ticker))
            .cloned()
    }

    /// Case-insensitive substring search over ticker and full name.
    /// An empty query returns the full (or supported-only) list unchanged.
    pub fn search(&self, query: &str, only_supported: bool) -> Vec<NetworkDescriptor> {
        if query.is_empty() {
            return if only_supported {
                self.list_supported()
            } else {
                self.all()
            };
        }
        let query = query.to_uppercase();
        self.networks
            .read()
            .expect("network registry lock poisoned")
            .iter()
            .filter(|n| !only_supported || n.is_supported)
            .filter(|n| {
                n.ticker.to_uppercase().contains(&query)
                    || n.full_name.to_uppercase().contains(&query)
            })
            .cloned()
            .collect()
    }
}
