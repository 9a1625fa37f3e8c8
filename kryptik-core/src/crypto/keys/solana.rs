//! Solana address derivation (SLIP-0010 over ed25519)

use ed25519_dalek::{SigningKey, VerifyingKey};
use hmac::{Hmac, Mac};
use hmac::digest::KeyInit;
use sha2::Sha512;

use crate::error::{Error, Result};
use super::parse_derivation_path;

type HmacSha512 = Hmac<Sha512>;

/// Derive the Solana address at `path` from a BIP-39 seed.
///
/// ed25519 derivation only supports hardened components; a path with a
/// non-hardened component is rejected.
pub fn derive_address(seed: &[u8], path: &str) -> Result<String> {
    let components = parse_derivation_path(path)?;

    let (mut secret_key, mut chain_code) = derive_master_key(seed)?;
    for component in components {
        if component < 0x80000000 {
            return Err(Error::KeyDerivation(
                "ed25519 derivation requires hardened path components".to_string(),
            ));
        }
        (secret_key, chain_code) = derive_child_key(secret_key, chain_code, component)?;
    }

    let signing_key = SigningKey::from_bytes(&secret_key);
    let verifying_key = VerifyingKey::from(&signing_key);

    Ok(bs58::encode(verifying_key.to_bytes()).into_string())
}

/// Derive the SLIP-0010 master key from a seed.
fn derive_master_key(seed: &[u8]) -> Result<([u8; 32], [u8; 32])> {
    let mut hmac = <HmacSha512 as KeyInit>::new_from_slice(b"ed25519 seed")
        .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;

    hmac.update(seed);
    let result = hmac.finalize().into_bytes();

    let mut secret_key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    secret_key.copy_from_slice(&result[0..32]);
    chain_code.copy_from_slice(&result[32..64]);

    Ok((secret_key, chain_code))
}

/// Derive one hardened child key from its parent.
fn derive_child_key(
    parent_key: [u8; 32],
    parent_chain_code: [u8; 32],
    index: u32,
) -> Result<([u8; 32], [u8; 32])> {
    let mut data = Vec::with_capacity(37);
    data.push(0);
    data.extend_from_slice(&parent_key);
    data.extend_from_slice(&index.to_be_bytes());

    let mut hmac = <HmacSha512 as KeyInit>::new_from_slice(&parent_chain_code)
        .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;
    hmac.update(&data);
    let result = hmac.finalize().into_bytes();

    let mut child_key = [0u8; 32];
    let mut child_chain_code = [0u8; 32];
    child_key.copy_from_slice(&result[0..32]);
    child_chain_code.copy_from_slice(&result[32..64]);

    Ok((child_key, child_chain_code))
}
