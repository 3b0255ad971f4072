//! Substrate-compatible sr25519 keypairs.

use core::fmt;

use schnorrkel::derive::{ChainCode, Derivation};
use schnorrkel::{ExpansionMode, Keypair, SecretKey};
use tessera::{Error, Result, mnemonic};
use zeroize::Zeroizing;

use crate::junction::{DeriveJunction, SecretUri};
use crate::signer::Sr25519Signer;

/// sr25519 keypair derived the way substrate tooling does it.
///
/// The mini secret comes from the mnemonic *entropy* (not the BIP-39 seed),
/// stretched with the optional password.
#[derive(Clone)]
pub struct Sr25519Keypair {
    keypair: Keypair,
}

impl Sr25519Keypair {
    /// Keypair for a bare mnemonic with an optional password.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidMnemonic`] when the phrase does not parse: entropy
    /// cannot be recovered from an invalid phrase.
    pub fn from_phrase(phrase: &str, password: Option<&str>) -> Result<Self> {
        let parsed = mnemonic::parse(phrase)?;
        let entropy = Zeroizing::new(parsed.to_entropy());
        let mini = substrate_bip39::mini_secret_from_entropy(&entropy, password.unwrap_or(""))
            .map_err(|e| Error::DerivationFailed(format!("sr25519 mini secret: {e:?}")))?;

        Ok(Self {
            keypair: mini.expand_to_keypair(ExpansionMode::Ed25519),
        })
    }

    /// Keypair for a full secret URI (`phrase//hard/soft///password`).
    pub fn from_uri(uri: &SecretUri) -> Result<Self> {
        Ok(Self::from_phrase(uri.phrase(), uri.password())?.derive(uri.junctions()))
    }

    /// Apply `junctions` in order.
    pub fn derive(&self, junctions: &[DeriveJunction]) -> Self {
        let secret = junctions
            .iter()
            .fold(self.keypair.secret.clone(), |secret, junction| {
                derive_secret(&secret, junction)
            });

        tracing::debug!(junctions = junctions.len(), "derived sr25519 keypair");
        Self {
            keypair: secret.to_keypair(),
        }
    }

    /// The 32-byte ristretto public key.
    pub fn public_key(&self) -> [u8; 32] {
        self.keypair.public.to_bytes()
    }

    /// Consume this keypair into a signer.
    pub fn into_signer(self) -> Sr25519Signer {
        Sr25519Signer::new(self.keypair)
    }
}

fn derive_secret(secret: &SecretKey, junction: &DeriveJunction) -> SecretKey {
    let cc = ChainCode(*junction.chain_code());
    match junction {
        DeriveJunction::Soft(_) => secret.derived_key_simple(cc, b"").0,
        DeriveJunction::Hard(_) => secret
            .hard_derive_mini_secret_key(Some(cc), b"")
            .0
            .expand(ExpansionMode::Ed25519),
    }
}

impl fmt::Debug for Sr25519Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sr25519Keypair")
            .field("public", &hex::encode(self.public_key()))
            .finish_non_exhaustive()
    }
}
