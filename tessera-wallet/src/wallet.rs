//! Derived wallets.

use core::fmt;

use tessera::{DerivationPath, Result};

use crate::address::PublicKey;
use crate::chain::ChainProfile;
use crate::principal::Principal;
use crate::signer::{Signature, Signer, verify};

/// Signature family of a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// secp256k1 ECDSA.
    Ecdsa,
    /// ed25519.
    Ed25519,
    /// sr25519.
    Sr25519,
}

impl KeyType {
    /// Lowercase name (`ecdsa`, `ed25519`, `sr25519`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ecdsa => "ecdsa",
            Self::Ed25519 => "ed25519",
            Self::Sr25519 => "sr25519",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields every wallet carries.
#[derive(Debug)]
pub(crate) struct WalletCore {
    pub(crate) symbol: String,
    pub(crate) profile: ChainProfile,
    pub(crate) address: String,
    pub(crate) public_key: PublicKey,
    pub(crate) public_key_display: String,
    pub(crate) signer: Signer,
}

/// secp256k1 wallet.
#[derive(Debug)]
pub struct EcdsaWallet {
    pub(crate) core: WalletCore,
    pub(crate) path: DerivationPath,
    pub(crate) principal: Option<Principal>,
}

impl EcdsaWallet {
    /// BIP-32 path the key was derived at.
    pub const fn path(&self) -> &DerivationPath {
        &self.path
    }

    /// Principal, for capability chains.
    pub const fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }
}

/// ed25519 wallet.
#[derive(Debug)]
pub struct Ed25519Wallet {
    pub(crate) core: WalletCore,
    pub(crate) path: DerivationPath,
    pub(crate) principal: Option<Principal>,
}

impl Ed25519Wallet {
    /// SLIP-0010 path the key was derived at.
    pub const fn path(&self) -> &DerivationPath {
        &self.path
    }

    /// Principal, for capability chains.
    pub const fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }
}

/// sr25519 wallet.
#[derive(Debug)]
pub struct Sr25519Wallet {
    pub(crate) core: WalletCore,
    pub(crate) network: u16,
    pub(crate) junctions: String,
}

impl Sr25519Wallet {
    /// SS58 network identifier.
    pub const fn network(&self) -> u16 {
        self.network
    }

    /// Substrate junction path (`""` for account 0, `//n` otherwise).
    pub fn junctions(&self) -> &str {
        &self.junctions
    }
}

/// A derived wallet: address, public key and a bound signer.
///
/// Immutable once built. The private key lives only inside the signer and
/// is wiped when the wallet drops.
#[derive(Debug)]
pub enum Wallet {
    /// secp256k1 chains.
    Ecdsa(EcdsaWallet),
    /// ed25519 chains.
    Ed25519(Ed25519Wallet),
    /// sr25519 chains.
    Sr25519(Sr25519Wallet),
}

impl Wallet {
    const fn core(&self) -> &WalletCore {
        match self {
            Self::Ecdsa(w) => &w.core,
            Self::Ed25519(w) => &w.core,
            Self::Sr25519(w) => &w.core,
        }
    }

    /// Chain-native address.
    pub fn address(&self) -> &str {
        &self.core().address
    }

    /// Public key as the chain displays it.
    ///
    /// Hex without prefix for secp256k1 (compressed for UTXO and cosmos
    /// chains, uncompressed otherwise), DER hex for capability-chain
    /// ed25519 keys and `0x` hex for sr25519.
    pub fn public_key(&self) -> &str {
        &self.core().public_key_display
    }

    /// Raw public key bytes accepted by [`Wallet::verify`].
    pub fn public_key_bytes(&self) -> Vec<u8> {
        let core = self.core();
        core.public_key
            .to_bytes(!core.profile.address_format.uses_uncompressed_key())
    }

    /// Signature family.
    pub const fn key_type(&self) -> KeyType {
        match self {
            Self::Ecdsa(_) => KeyType::Ecdsa,
            Self::Ed25519(_) => KeyType::Ed25519,
            Self::Sr25519(_) => KeyType::Sr25519,
        }
    }

    /// Optional note on the address form.
    pub const fn desc(&self) -> Option<&'static str> {
        self.core().profile.desc
    }

    /// The symbol this wallet was requested for.
    pub fn symbol(&self) -> &str {
        &self.core().symbol
    }

    /// Chain profile used for derivation.
    pub const fn profile(&self) -> &ChainProfile {
        &self.core().profile
    }

    /// BIP-32 or SLIP-0010 path; `None` for sr25519.
    pub const fn path(&self) -> Option<&DerivationPath> {
        match self {
            Self::Ecdsa(w) => Some(&w.path),
            Self::Ed25519(w) => Some(&w.path),
            Self::Sr25519(_) => None,
        }
    }

    /// Textual derivation: the BIP-32 path, or the junction path for sr25519.
    pub fn derivation(&self) -> String {
        match self {
            Self::Ecdsa(w) => w.path.to_string(),
            Self::Ed25519(w) => w.path.to_string(),
            Self::Sr25519(w) => w.junctions.clone(),
        }
    }

    /// Principal for capability chains.
    pub const fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Ecdsa(w) => w.principal(),
            Self::Ed25519(w) => w.principal(),
            Self::Sr25519(_) => None,
        }
    }

    /// The bound signing capability.
    pub const fn signer(&self) -> &Signer {
        &self.core().signer
    }

    /// Sign `message` with the wallet key.
    pub fn sign(&self, message: &[u8]) -> Result<Signature> {
        self.signer().sign(message)
    }

    /// Check `signature` over `message` against this wallet's key.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        verify(self.signer().scheme(), message, signature, &self.public_key_bytes())
    }
}
