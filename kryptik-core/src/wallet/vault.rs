//! Vault collaborator boundary

use async_trait::async_trait;

use crate::error::Result;
use super::SeedLoop;

/// Credential issued when a vault is created. The caller is responsible
/// for persisting or transmitting it; the core never stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultShare {
    pub remote_share: String,
}

/// Encrypted-at-rest container binding a seed loop to a user id.
///
/// The core never inspects seed material through this boundary beyond
/// requesting address derivation on the unlocked seed loop.
#[async_trait]
pub trait VaultKeeper: Send + Sync {
    /// Unlock the vault for `uid` with a remote share. Returns `None` when
    /// no local vault matches the user.
    async fn unlock_vault(&self, uid: &str, remote_share: &str) -> Result<Option<SeedLoop>>;

    /// Create a vault for `uid` from a seed loop, issuing a fresh remote share.
    async fn create_vault(&self, seed_loop: &SeedLoop, uid: &str) -> Result<VaultShare>;
}
