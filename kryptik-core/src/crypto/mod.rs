//! Cryptographic building blocks for the seed loop: mnemonic handling
//! and per-family HD address derivation.

pub mod keys;
pub mod mnemonic;
