//! # Tessera Wallet
//!
//! Chain registry, address encoders and the wallet factory. Given a BIP-39
//! mnemonic, a chain symbol and an account index, derives the key on the
//! chain's curve and path, encodes the chain-native address and binds a
//! signer.
//!
//! ## Supported chains
//!
//! - **UTXO**: BTC, LTC (native segwit), DOGE, DASH, ZEC, BTG (Base58Check),
//!   BCH (CashAddr)
//! - **Bech32 account chains**: BNB, ATOM, RUNE, AVAX, AVAP
//! - **EVM**: ETH, MATIC, BSC, AVAC
//! - **Substrate**: DOT, KSM (sr25519, SS58)
//! - **Internet Computer**: ICP (secp256k1, or ed25519 through options)
//!
//! Any other symbol falls back to a best-effort secp256k1 wallet.
//!
//! ```
//! use tessera_wallet::{KeyType, create_wallet};
//!
//! let mnemonic = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
//! let wallet = create_wallet(mnemonic, "ETH", Some(0)).unwrap();
//! assert_eq!(wallet.key_type(), KeyType::Ecdsa);
//! assert_eq!(wallet.address(), "0x9858effd232b4033e47d90003d41ec34ecaeda94");
//!
//! let signature = wallet.sign(b"hello").unwrap();
//! assert!(wallet.verify(b"hello", signature.as_bytes()));
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

pub mod address;
pub mod chain;
pub mod path;
pub mod principal;
pub mod signer;
pub mod slip44;

mod factory;
mod wallet;

pub use address::{PublicKey, encode_address};
pub use chain::{AddressFormat, Bech32Kind, ChainProfile, CurveFamily};
pub use factory::{WalletFactory, WalletOptions, create_wallet};
pub use principal::{AccountIdentifier, Principal};
pub use signer::{Signature, SignatureScheme, Signer, verify};
pub use wallet::{EcdsaWallet, Ed25519Wallet, KeyType, Sr25519Wallet, Wallet};

pub use tessera::{Error, Result};
