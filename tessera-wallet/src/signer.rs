//! Uniform signing capability over the three curve families.

use core::fmt;

use tessera::Result;
use tessera_bip32::{EcdsaSigner, PreHash};
use tessera_slip10::Ed25519Signer;
use tessera_sr25519::Sr25519Signer;

use crate::principal::{der_decode_ed25519, der_decode_secp256k1};

/// How a signature was produced and how it must be checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureScheme {
    /// Recoverable ECDSA over a pre-hashed message.
    Ecdsa(PreHash),
    /// Detached ed25519 over the raw message.
    Ed25519,
    /// schnorrkel under the `substrate` context.
    Sr25519,
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ecdsa(prehash) => write!(f, "ecdsa-{}", prehash.name()),
            Self::Ed25519 => f.write_str("ed25519"),
            Self::Sr25519 => f.write_str("sr25519"),
        }
    }
}

/// Signature bytes tagged with their scheme.
///
/// ECDSA signatures are 65 bytes (`r || s || v`); the others are 64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    scheme: SignatureScheme,
    bytes: Vec<u8>,
}

impl Signature {
    /// The producing scheme.
    pub const fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    /// Raw signature bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

/// Opaque signer owning the only copy of a private key.
pub enum Signer {
    /// secp256k1.
    Ecdsa(EcdsaSigner),
    /// ed25519.
    Ed25519(Ed25519Signer),
    /// sr25519.
    Sr25519(Sr25519Signer),
}

impl Signer {
    /// Sign `message`.
    pub fn sign(&self, message: &[u8]) -> Result<Signature> {
        let bytes = match self {
            Self::Ecdsa(signer) => signer.sign(message)?.to_rsv().to_vec(),
            Self::Ed25519(signer) => signer.sign(message).to_vec(),
            Self::Sr25519(signer) => signer.sign(message).to_vec(),
        };
        Ok(Signature {
            scheme: self.scheme(),
            bytes,
        })
    }

    /// Scheme this signer produces.
    pub const fn scheme(&self) -> SignatureScheme {
        match self {
            Self::Ecdsa(signer) => SignatureScheme::Ecdsa(signer.prehash()),
            Self::Ed25519(_) => SignatureScheme::Ed25519,
            Self::Sr25519(_) => SignatureScheme::Sr25519,
        }
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signer({})", self.scheme())
    }
}

/// Verify `signature` over `message` against a raw public key.
///
/// Public keys are SEC1 bytes for ECDSA and the raw 32 bytes otherwise.
/// DER-wrapped secp256k1 and ed25519 keys, as capability chains display
/// them, are accepted too. Malformed input verifies as `false`.
pub fn verify(scheme: SignatureScheme, message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
    match scheme {
        SignatureScheme::Ecdsa(prehash) => {
            let der = der_decode_secp256k1(public_key).ok();
            let key = der.as_ref().map_or(public_key, |raw| raw.as_slice());
            tessera_bip32::verify(prehash, message, signature, key)
        }
        SignatureScheme::Ed25519 => {
            let der = der_decode_ed25519(public_key).ok();
            let key = der.as_ref().map_or(public_key, |raw| raw.as_slice());
            tessera_slip10::verify(message, signature, key)
        }
        SignatureScheme::Sr25519 => tessera_sr25519::verify(message, signature, public_key),
    }
}
