//! # Tessera sr25519
//!
//! Substrate-style sr25519 keys: mnemonic entropy to mini secret, hard and
//! soft junctions, and schnorrkel signing under the `substrate` context.
//!
//! ```
//! use tessera_sr25519::{DeriveJunction, Sr25519Keypair, verify};
//!
//! let phrase = "bottom drive obey lake curtain smoke basket hold race lonely fit walk";
//! let pair = Sr25519Keypair::from_phrase(phrase, None)
//!     .unwrap()
//!     .derive(&[DeriveJunction::hard("Alice")]);
//! let public = pair.public_key();
//! let signature = pair.into_signer().sign(b"hello");
//! assert!(verify(b"hello", &signature, &public));
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
    clippy::cast_possible_truncation,
    clippy::doc_markdown
)]
#![forbid(unsafe_code)]

mod junction;
mod keypair;
mod signer;

pub use junction::{DeriveJunction, JUNCTION_ID_LEN, SecretUri};
pub use keypair::Sr25519Keypair;
pub use signer::{SIGNING_CTX, Sr25519Signer, verify};
