//! Wallet connection flow

use std::sync::Arc;

use tracing::info;

use crate::error::{Error, Result};
use crate::network::NetworkFamily;
use super::{SeedLoop, VaultKeeper, Wallet};

/// Name tag identifying wallets produced by this connector.
pub const WALLET_PROVIDER_NAME: &str = "kryptik";

/// Result of a successful wallet connection.
#[derive(Debug)]
pub struct WalletConnection {
    pub wallet: Wallet,
    /// Share the login flow must persist; required to unlock the vault later.
    pub remote_share: String,
}

/// Binds a user identity to a wallet through the vault collaborator.
pub struct WalletConnector {
    vault: Arc<dyn VaultKeeper>,
}

impl WalletConnector {
    pub fn new(vault: Arc<dyn VaultKeeper>) -> Self {
        Self { vault }
    }

    /// Connect a wallet for `uid`.
    ///
    /// With a remote share the existing vault must unlock; a share without a
    /// matching local vault is rejected outright, so an address can never be
    /// claimed without key possession. Without a share, a seed loop is built
    /// from the given phrase (or freshly random) and vaulted for `uid`,
    /// issuing a new remote share. Either a fully populated wallet is
    /// returned, or an error.
    pub async fn connect(
        &self,
        uid: &str,
        remote_share: Option<&str>,
        seed: Option<&str>,
    ) -> Result<WalletConnection> {
        let (seed_loop, share) = match remote_share {
            Some(share) => match self.vault.unlock_vault(uid, share).await? {
                Some(seed_loop) => (seed_loop, share.to_string()),
                None => {
                    return Err(Error::VaultMismatch(format!(
                        "remote share provided, but no corresponding vault exists on this client for uid {}",
                        uid
                    )));
                }
            },
            None => {
                let seed_loop = match seed {
                    Some(phrase) => SeedLoop::from_phrase(phrase)?,
                    None => SeedLoop::new()?,
                };
                let issued = self.vault.create_vault(&seed_loop, uid).await?;
                (seed_loop, issued.remote_share)
            }
        };

        let eth_address = seed_loop.address_for_family(NetworkFamily::Evm)?;
        info!(uid, "connected kryptik wallet");

        let wallet = Wallet {
            uid: uid.to_string(),
            wallet_provider_name: WALLET_PROVIDER_NAME.to_string(),
            connected: true,
            eth_address,
            seed_loop,
        };

        Ok(WalletConnection {
            wallet,
            remote_share: share,
        })
    }
}
