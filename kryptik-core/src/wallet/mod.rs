//! Wallet binding: seed loops, the vault collaborator and the connector

mod connector;
mod seed_loop;
mod vault;

pub use connector::{WalletConnection, WalletConnector, WALLET_PROVIDER_NAME};
pub use seed_loop::SeedLoop;
pub use vault::{VaultKeeper, VaultShare};

/// One user's connected wallet.
///
/// Owns its seed loop exclusively; dropping the wallet is the only teardown.
#[derive(Debug)]
pub struct Wallet {
    /// Owning user id.
    pub uid: String,
    /// Name tag of the wallet provider.
    pub wallet_provider_name: String,
    pub connected: bool,
    /// First EVM-family address resolved from the seed loop.
    pub eth_address: String,
    pub seed_loop: SeedLoop,
}
