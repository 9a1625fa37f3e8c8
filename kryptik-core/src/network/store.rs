//! Remote document store supplying network descriptors

use async_trait::async_trait;

use crate::error::{Error, Result};
use super::NetworkDescriptor;

/// Remote store holding the networks collection.
///
/// The registry treats the store as read-only and fetches the whole
/// collection once per populate.
#[async_trait]
pub trait NetworkStore: Send + Sync {
    /// Fetch every network descriptor document from the store.
    async fn fetch_all(&self) -> Result<Vec<NetworkDescriptor>>;
}

/// Network store reading the collection from an HTTP endpoint that serves
/// the descriptor documents as one JSON array.
pub struct HttpNetworkStore {
    http: reqwest::Client,
    url: String,
}

impl HttpNetworkStore {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl NetworkStore for HttpNetworkStore {
    async fn fetch_all(&self) -> Result<Vec<NetworkDescriptor>> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::RegistryLoad(format!("network store request failed: {}", e)))?;

        response
            .json::<Vec<NetworkDescriptor>>()
            .await
            .map_err(|e| Error::RegistryLoad(format!("malformed network document: {}", e)))
    }
}
