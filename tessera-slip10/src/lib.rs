//! # Tessera SLIP-0010
//!
//! Ed25519 hierarchical derivation (SLIP-0010, hardened only) and detached
//! signatures for tessera.

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
    clippy::doc_markdown
)]
#![forbid(unsafe_code)]

mod signer;
mod slip10;

pub use signer::{Ed25519Signer, verify};
pub use slip10::DerivedKey;
