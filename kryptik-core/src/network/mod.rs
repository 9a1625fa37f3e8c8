//! Network descriptors, chain families and the in-memory registry

mod registry;
mod store;

pub use registry::NetworkRegistry;
pub use store::{HttpNetworkStore, NetworkStore};

use serde::{Deserialize, Serialize};

/// Class of blockchain protocol a network belongs to.
///
/// The family decides which RPC client serves the network and which
/// address and balance semantics apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkFamily {
    /// Ethereum and EVM-compatible chains
    Evm,
    /// Solana
    Solana,
}

impl NetworkFamily {
    /// Resolve the chain family for a network ticker. Pure lookup, no I/O.
    pub fn from_ticker(ticker: &str) -> Option<Self> {
        match ticker.to_ascii_lowercase().as_str() {
            "eth" | "bnb" | "matic" | "avax" | "ftm" | "arb" | "op" => Some(Self::Evm),
            "sol" => Some(Self::Solana),
            _ => None,
        }
    }

    /// Decimal places of the smallest balance unit for this family
    /// (wei for EVM chains, lamports for Solana).
    pub fn base_unit_decimals(&self) -> u32 {
        match self {
            Self::Evm => 18,
            Self::Solana => 9,
        }
    }

    /// BIP-44 derivation path of the first account for this family.
    pub fn derivation_path(&self) -> &'static str {
        match self {
            Self::Evm => "m/44'/60'/0'/0/0",
            Self::Solana => "m/44'/501'/0'/0'",
        }
    }
}

/// A network document fetched from the remote store.
///
/// Identity is the ticker; it keys both the registry and the provider cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDescriptor {
    pub full_name: String,
    pub ticker: String,
    #[serde(default)]
    pub chain_id: u64,
    #[serde(default)]
    pub hex_color: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub icon_path: String,
    #[serde(default)]
    pub is_supported: bool,
    /// RPC endpoint URL.
    #[serde(default)]
    pub provider: String,
    /// Price-oracle lookup id.
    #[serde(default)]
    pub coingecko_id: String,
}

impl NetworkDescriptor {
    /// Chain family this descriptor maps to, if any.
    pub fn family(&self) -> Option<NetworkFamily> {
        NetworkFamily::from_ticker(&self.ticker)
    }
}
