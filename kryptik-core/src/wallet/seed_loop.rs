//! Hierarchical-deterministic seed generator

use std::fmt;

use crate::crypto::keys::derive_address;
use crate::crypto::mnemonic::{generate_mnemonic, mnemonic_to_seed, validate_mnemonic};
use crate::error::Result;
use crate::network::NetworkFamily;

/// Seed generator producing one address per network family from one secret.
///
/// A seed loop belongs to exactly one wallet and is never cloned. Address
/// derivation takes `&self` and is pure, so concurrent derivation for
/// different networks is safe.
pub struct SeedLoop {
    phrase: String,
    seed: Vec<u8>,
}

impl SeedLoop {
    /// Create a seed loop from a fresh random mnemonic.
    pub fn new() -> Result<Self> {
        let phrase = generate_mnemonic()?;
        Self::from_phrase(&phrase)
    }

    /// Restore a seed loop from an existing mnemonic phrase.
    pub fn from_phrase(phrase: &str) -> Result<Self> {
        validate_mnemonic(phrase)?;
        let seed = mnemonic_to_seed(phrase, None)?;
        Ok(Self {
            phrase: phrase.to_string(),
            seed,
        })
    }

    /// The backing mnemonic phrase. Only vault implementations should read
    /// this; the core never persists or transmits it.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Derive the first address for a network family.
    pub fn address_for_family(&self, family: NetworkFamily) -> Result<String> {
        derive_address(&self.seed, family)
    }
}

impl fmt::Debug for SeedLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // never print secret material
        f.debug_struct("SeedLoop").finish_non_exhaustive()
    }
}
