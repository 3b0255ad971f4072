//! # Tessera BIP-32
//!
//! secp256k1 hierarchical deterministic derivation (BIP-32) and
//! deterministic ECDSA signing for tessera.
//!
//! ```
//! use tessera::{DerivationPath, Seed};
//! use tessera_bip32::{ExtendedPrivateKey, PreHash};
//!
//! let seed = Seed::from_mnemonic(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//!     None,
//! )
//! .unwrap();
//! let path = DerivationPath::bip44(44, 60, 0, 0, 0).unwrap();
//! let key = ExtendedPrivateKey::derive_from_seed(seed.as_bytes(), &path).unwrap();
//! let signer = key.into_signer(PreHash::Keccak256);
//! assert!(signer.sign(b"hello").is_ok());
//! ```

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
    clippy::doc_markdown
)]
#![forbid(unsafe_code)]

mod extended_key;
mod signer;

pub use extended_key::ExtendedPrivateKey;
pub use signer::{EcdsaSignature, EcdsaSigner, PreHash, verify};

/// Re-export of the curve crate so callers share one k256 version.
pub use k256;
