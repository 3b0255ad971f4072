//! Deterministic ECDSA signing over secp256k1.

use core::fmt;

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use tessera::hash::{keccak256, sha256};
use tessera::{Error, Result};

/// Digest applied to a message before ECDSA signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreHash {
    /// Keccak-256, used by EVM-style chains.
    Keccak256,
    /// SHA-256, used by UTXO and cosmos-SDK chains.
    Sha256,
}

impl PreHash {
    /// Hash `message` into the 32-byte digest that gets signed.
    pub fn digest(self, message: &[u8]) -> [u8; 32] {
        match self {
            Self::Keccak256 => keccak256(message),
            Self::Sha256 => sha256(message),
        }
    }

    /// Short lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Keccak256 => "keccak256",
            Self::Sha256 => "sha256",
        }
    }
}

/// Recoverable ECDSA signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcdsaSignature {
    /// The r component (32 bytes)
    pub r: [u8; 32],
    /// The s component (32 bytes, low-S normalized)
    pub s: [u8; 32],
    /// The recovery ID (0-3)
    pub v: u8,
}

impl EcdsaSignature {
    /// Serialize to 64-byte RS format
    pub fn to_rs(&self) -> [u8; 64] {
        let mut result = [0u8; 64];
        result[..32].copy_from_slice(&self.r);
        result[32..].copy_from_slice(&self.s);
        result
    }

    /// Serialize to 65-byte RSV format
    pub fn to_rsv(&self) -> [u8; 65] {
        let mut result = [0u8; 65];
        result[..64].copy_from_slice(&self.to_rs());
        result[64] = self.v;
        result
    }

    /// Parse a 65-byte RSV signature.
    pub fn from_rsv(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 65 {
            return Err(Error::InvalidKeyLength {
                expected: 65,
                actual: bytes.len(),
            });
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self { r, s, v: bytes[64] })
    }

    /// Recover the signer's verifying key from a signed message.
    pub fn recover(&self, prehash: PreHash, message: &[u8]) -> Result<VerifyingKey> {
        let signature = Signature::from_slice(&self.to_rs()).map_err(|_| Error::InvalidSignature)?;
        let recovery_id = RecoveryId::from_byte(self.v).ok_or(Error::InvalidSignature)?;
        VerifyingKey::recover_from_prehash(&prehash.digest(message), &signature, recovery_id)
            .map_err(|_| Error::InvalidSignature)
    }
}

/// Signing capability bound to one secp256k1 key and one pre-hash.
///
/// Owns the only copy of the key; the key is wiped when the signer drops.
pub struct EcdsaSigner {
    key: SigningKey,
    prehash: PreHash,
}

impl EcdsaSigner {
    /// Wrap a signing key.
    pub fn new(key: SigningKey, prehash: PreHash) -> Self {
        Self { key, prehash }
    }

    /// Sign `message` with RFC 6979 deterministic nonces.
    pub fn sign(&self, message: &[u8]) -> Result<EcdsaSignature> {
        let digest = self.prehash.digest(message);
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(&digest)
            .map_err(|e| Error::Signing(e.to_string()))?;

        let bytes = signature.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        Ok(EcdsaSignature {
            r,
            s,
            v: recovery_id.to_byte(),
        })
    }

    /// The digest applied before signing.
    pub const fn prehash(&self) -> PreHash {
        self.prehash
    }

    /// The matching verifying key.
    pub fn verifying_key(&self) -> VerifyingKey {
        *self.key.verifying_key()
    }
}

impl fmt::Debug for EcdsaSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaSigner")
            .field("key", &"[REDACTED]")
            .field("prehash", &self.prehash)
            .finish()
    }
}

/// Verify a 64-byte RS or 65-byte RSV signature against a SEC1 public key.
///
/// An RSV signature must also recover to `public_key` through its `v` byte.
/// Malformed keys or signatures verify as `false`.
pub fn verify(prehash: PreHash, message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
    let Ok(key) = VerifyingKey::from_sec1_bytes(public_key) else {
        return false;
    };
    match signature.len() {
        64 => Signature::from_slice(signature)
            .is_ok_and(|sig| key.verify_prehash(&prehash.digest(message), &sig).is_ok()),
        65 => EcdsaSignature::from_rsv(signature)
            .and_then(|sig| sig.recover(prehash, message))
            .is_ok_and(|recovered| recovered == key),
        _ => false,
    }
}
