//! Error types for the kryptik-core library

use thiserror::Error;

/// Custom error type for kryptik-core operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Service not running: {0}")]
    NotRunning(String),

    #[error("Startup failure: {0}")]
    StartupFailure(String),

    #[error("Registry load error: {0}")]
    RegistryLoad(String),

    #[error("Unsupported network family: {0}")]
    UnsupportedFamily(String),

    #[error("Vault mismatch: {0}")]
    VaultMismatch(String),

    #[error("Vault error: {0}")]
    Vault(String),

    #[error("Mnemonic error: {0}")]
    Mnemonic(String),

    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Price lookup error: {0}")]
    Price(String),

    #[error("Not supported: {0}")]
    NotSupported(String),
}

/// Result type for kryptik-core operations
pub type Result<T> = std::result::Result<T, Error>;
