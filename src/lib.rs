//! Stacks Wallet - A TUI wallet for managing Stacks identities.
//!
//! This library provides:
//! - The account selection flow and settings menu state machines
//! - A local keychain holding secp256k1 identities
//! - LMDB-backed storage for identities and wallet metadata

pub mod config;
pub mod domain;
pub mod infra;
