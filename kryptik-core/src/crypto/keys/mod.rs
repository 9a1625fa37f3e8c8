//! Per-family HD address derivation
//!
//! The seed loop never hands out key material; these modules derive the
//! display address for a network family directly from a BIP-39 seed.

pub mod evm;
pub mod solana;

use crate::error::{Error, Result};
use crate::network::NetworkFamily;

/// Derive the first address for a network family from a BIP-39 seed.
pub fn derive_address(seed: &[u8], family: NetworkFamily) -> Result<String> {
    let path = family.derivation_path();
    match family {
        NetworkFamily::Evm => evm::derive_address(seed, path),
        NetworkFamily::Solana => solana::derive_address(seed, path),
    }
}

/// Parse a BIP-32 derivation path into child indices.
fn parse_derivation_path(path: &str) -> Result<Vec<u32>> {
    if !path.starts_with("m/") {
        return Err(Error::KeyDerivation(format!("Invalid derivation path: {}", path)));
    }

    let mut result = Vec::new();
    for component in path.trim_start_matches("m/").split('/') {
        if component.is_empty() {
            continue;
        }

        let hardened = component.ends_with('\'');
        let index = if hardened {
            let index = component.trim_end_matches('\'').parse::<u32>()
                .map_err(|_| Error::KeyDerivation(format!("Invalid derivation path component: {}", component)))?;
            0x80000000 + index
        } else {
            component.parse::<u32>()
                .map_err(|_| Error::KeyDerivation(format!("Invalid derivation path component: {}", component)))?
        };

        result.push(index);
    }

    Ok(result)
}
