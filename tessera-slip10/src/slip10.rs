//! SLIP-0010 Ed25519 key derivation.
//!
//! Reference: https://github.com/satoshilabs/slips/blob/master/slip-0010.md

use core::fmt;

use ed25519_dalek::SigningKey;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use tessera::{ChildIndex, DerivationPath, Error, Result};
use zeroize::Zeroizing;

use crate::signer::Ed25519Signer;

type HmacSha512 = Hmac<Sha512>;

const ED25519_CURVE: &[u8] = b"ed25519 seed";

/// SLIP-0010 derived key and chain code.
pub struct DerivedKey {
    private_key: Zeroizing<[u8; 32]>,
    chain_code: Zeroizing<[u8; 32]>,
}

impl DerivedKey {
    /// Derive master key from seed using SLIP-0010.
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        let mac = HmacSha512::new_from_slice(ED25519_CURVE)
            .map_err(|e| Error::DerivationFailed(e.to_string()))?;
        Ok(Self::from_mac(mac, seed))
    }

    /// Derive the key at `path` starting from a seed.
    ///
    /// Every segment must be hardened.
    pub fn derive_from_seed(seed: &[u8], path: &DerivationPath) -> Result<Self> {
        Self::from_seed(seed)?.derive_path(path)
    }

    /// Derive every segment of `path` in turn.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        let mut key = self.duplicate();
        for index in path.indices() {
            key = key.derive_child(*index)?;
        }
        Ok(key)
    }

    /// Derive child key at a hardened index.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedDerivation`] for a normal index: ed25519 has no
    /// public-parent derivation.
    pub fn derive_child(&self, index: ChildIndex) -> Result<Self> {
        if !index.is_hardened() {
            return Err(Error::UnsupportedDerivation(format!(
                "ed25519 derivation requires hardened segments, got {index}"
            )));
        }

        let mut mac = HmacSha512::new_from_slice(self.chain_code.as_slice())
            .map_err(|e| Error::DerivationFailed(e.to_string()))?;

        // 0x00 || private_key || index
        mac.update(&[0x00]);
        mac.update(self.private_key.as_slice());
        Ok(Self::from_mac(mac, &index.to_u32().to_be_bytes()))
    }

    fn from_mac(mut mac: HmacSha512, data: &[u8]) -> Self {
        mac.update(data);
        let mut result = Zeroizing::new([0u8; 64]);
        result.copy_from_slice(&mac.finalize().into_bytes());

        let mut private_key = Zeroizing::new([0u8; 32]);
        let mut chain_code = Zeroizing::new([0u8; 32]);
        private_key.copy_from_slice(&result[..32]);
        chain_code.copy_from_slice(&result[32..]);

        Self {
            private_key,
            chain_code,
        }
    }

    fn duplicate(&self) -> Self {
        Self {
            private_key: self.private_key.clone(),
            chain_code: self.chain_code.clone(),
        }
    }

    /// Raw 32-byte private key (the ed25519 seed).
    ///
    /// **Security Warning**: handle this value carefully.
    pub fn private_key(&self) -> &[u8; 32] {
        &self.private_key
    }

    /// The 32-byte chain code.
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// The 32-byte ed25519 public key.
    pub fn public_key(&self) -> [u8; 32] {
        self.to_signing_key().verifying_key().to_bytes()
    }

    /// Convert to Ed25519 signing key.
    pub fn to_signing_key(&self) -> SigningKey {
        SigningKey::from_bytes(&self.private_key)
    }

    /// Consume this key into a detached-signature signer.
    pub fn into_signer(self) -> Ed25519Signer {
        Ed25519Signer::new(self.to_signing_key())
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}
