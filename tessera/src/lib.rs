//! # Tessera - Multi-Chain Key Derivation Core
//!
//! Shared primitives for deriving wallet keys from a BIP-39 mnemonic and
//! encoding them into chain-native addresses.
//!
//! ## Features
//!
//! - **Seeds**: checked and unchecked BIP-39 seed derivation
//! - **Paths**: BIP-32 style derivation paths with hardened segments
//! - **Encodings**: Base58Check, Bech32, CashAddr and SS58
//! - **Secrets**: seed bytes are zeroized on drop
//!
//! Curve-specific derivation lives in `tessera-bip32`, `tessera-slip10` and
//! `tessera-sr25519`; the chain registry and wallet factory live in
//! `tessera-wallet`.

#![warn(
    missing_docs,
    rust_2018_idioms,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::doc_markdown,
    clippy::missing_const_for_fn,
    clippy::cast_possible_truncation,
    clippy::unreadable_literal
)]
#![forbid(unsafe_code)]

pub mod encoding;
pub mod error;
pub mod hash;
pub mod hdpath;
pub mod mnemonic;
pub mod seed;

pub use error::{Error, Result};
pub use hdpath::{ChildIndex, DerivationPath};
pub use seed::Seed;
