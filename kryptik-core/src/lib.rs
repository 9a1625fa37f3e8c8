//! Kryptik Core - client-side orchestration for a multi-chain web3 wallet
//!
//! This library coordinates the heterogeneous chain families behind the
//! Kryptik wallet: it loads network descriptors from a remote store, builds
//! and caches one RPC provider per network, binds a hierarchical-deterministic
//! wallet to per-network addresses, and aggregates native balances across all
//! supported networks into one report.

pub mod error;
pub mod crypto;
pub mod network;
pub mod price;
pub mod provider;
pub mod service;
pub mod wallet;

// Re-export commonly used types for convenience
pub use error::{Error, Result};
pub use service::{Balance, ServiceState, Web3Service};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
