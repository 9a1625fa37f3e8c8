//! EVM-family address derivation (BIP-32 over secp256k1)

use hmac::{Hmac, Mac};
use hmac::digest::KeyInit;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use sha2::Sha512;

use crate::error::{Error, Result};
use super::parse_derivation_path;

type HmacSha512 = Hmac<Sha512>;

/// Derive the EVM address at `path` from a BIP-39 seed.
pub fn derive_address(seed: &[u8], path: &str) -> Result<String> {
    let components = parse_derivation_path(path)?;

    let (mut secret_key, mut chain_code) = derive_master_key(seed)?;
    for component in components {
        (secret_key, chain_code) = derive_child_key(secret_key, chain_code, component)?;
    }

    let secp = Secp256k1::new();
    let secret_key = SecretKey::from_slice(&secret_key)
        .map_err(|e| Error::KeyDerivation(format!("Invalid secret key: {}", e)))?;
    let public_key = PublicKey::from_secret_key(&secp, &secret_key);

    Ok(public_key_to_address(&public_key))
}

/// Derive the BIP-32 master key from a seed.
fn derive_master_key(seed: &[u8]) -> Result<([u8; 32], [u8; 32])> {
    let mut hmac = <HmacSha512 as KeyInit>::new_from_slice(b"Bitcoin seed")
        .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;

    hmac.update(seed);
    let result = hmac.finalize().into_bytes();

    let mut secret_key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    secret_key.copy_from_slice(&result[0..32]);
    chain_code.copy_from_slice(&result[32..64]);

    Ok((secret_key, chain_code))
}

/// Derive one child key from its parent.
fn derive_child_key(
    parent_key: [u8; 32],
    parent_chain_code: [u8; 32],
    index: u32,
) -> Result<([u8; 32], [u8; 32])> {
    let secp = Secp256k1::new();
    let parent_secret_key = SecretKey::from_slice(&parent_key)
        .map_err(|e| Error::KeyDerivation(format!("Invalid parent key: {}", e)))?;

    let mut data = Vec::with_capacity(37);
    if index >= 0x80000000 {
        // Hardened derivation
        data.push(0);
        data.extend_from_slice(&parent_key);
    } else {
        // Normal derivation
        let parent_public_key = PublicKey::from_secret_key(&secp, &parent_secret_key);
        data.extend_from_slice(&parent_public_key.serialize());
    }
    data.extend_from_slice(&index.to_be_bytes());

    let mut hmac = <HmacSha512 as KeyInit>::new_from_slice(&parent_chain_code)
        .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;
    hmac.update(&data);
    let result = hmac.finalize().into_bytes();

    let mut child_key = [0u8; 32];
    let mut child_chain_code = [0u8; 32];
    child_key.copy_from_slice(&result[0..32]);
    child_chain_code.copy_from_slice(&result[32..64]);

    // Add the parent key to the child key (mod n)
    let child_secret_key = SecretKey::from_slice(&child_key)
        .map_err(|e| Error::KeyDerivation(format!("Invalid child key: {}", e)))?;
    let child_secret_key = child_secret_key
        .add_tweak(&parent_secret_key.into())
        .map_err(|e| Error::KeyDerivation(format!("Key addition error: {}", e)))?;

    Ok((child_secret_key.secret_bytes(), child_chain_code))
}

/// Keccak-256 of the uncompressed public key, last 20 bytes, 0x-prefixed hex.
fn public_key_to_address(public_key: &PublicKey) -> String {
    use sha3::{Digest, Keccak256};

    let uncompressed = public_key.serialize_uncompressed();
    let mut hasher = Keccak256::new();
    hasher.update(&uncompressed[1..]);
    let key_hash = hasher.finalize();

    format!("0x{}", hex::encode(&key_hash[12..]))
}
