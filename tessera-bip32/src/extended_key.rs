//! BIP-32 hierarchical deterministic key derivation over secp256k1.

use core::fmt;

use hmac::{Hmac, Mac};
use k256::ecdsa::{SigningKey, VerifyingKey};
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, Scalar};
use sha2::Sha512;
use tessera::{ChildIndex, DerivationPath, Error, Result};
use zeroize::Zeroizing;

use crate::signer::{EcdsaSigner, PreHash};

type HmacSha512 = Hmac<Sha512>;

/// HMAC key for the BIP-32 master node.
const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// BIP-32 extended private key.
///
/// The signing key and chain code are wiped on drop; `Debug` never prints
/// them.
#[derive(Clone)]
pub struct ExtendedPrivateKey {
    signing_key: SigningKey,
    chain_code: Zeroizing<[u8; 32]>,
    depth: u8,
}

impl ExtendedPrivateKey {
    /// Derive the master key from a BIP-39 seed.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKeyLength`] for seeds outside 16..=64 bytes and
    /// [`Error::DerivationFailed`] when the master scalar is zero or not
    /// below the curve order (the master node has no next index to try).
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        if !(16..=64).contains(&seed.len()) {
            return Err(Error::InvalidKeyLength {
                expected: 64,
                actual: seed.len(),
            });
        }

        let mut mac = HmacSha512::new_from_slice(MASTER_HMAC_KEY)
            .map_err(|e| Error::DerivationFailed(e.to_string()))?;
        mac.update(seed);
        let digest = split_digest(mac);

        let signing_key = SigningKey::from_slice(&digest[..32]).map_err(|_| {
            Error::DerivationFailed("master key is not a valid secp256k1 scalar".into())
        })?;

        let mut chain_code = Zeroizing::new([0u8; 32]);
        chain_code.copy_from_slice(&digest[32..]);

        Ok(Self {
            signing_key,
            chain_code,
            depth: 0,
        })
    }

    /// Derive the key at `path` starting from a seed.
    pub fn derive_from_seed(seed: &[u8], path: &DerivationPath) -> Result<Self> {
        Self::from_seed(seed)?.derive_path(path)
    }

    /// Derive every segment of `path` in turn.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        path.indices()
            .iter()
            .try_fold(self.clone(), |key, index| key.derive_child(*index))
    }

    /// Derive a single child.
    ///
    /// If the candidate child for `index` is invalid (IL not below the
    /// curve order, or a zero key) derivation moves on to the next index of
    /// the same kind, as BIP-32 prescribes.
    pub fn derive_child(&self, index: ChildIndex) -> Result<Self> {
        first_valid_child(index, |candidate| self.child_at(candidate))
    }

    fn child_at(&self, index: ChildIndex) -> Result<Option<Self>> {
        if self.depth == u8::MAX {
            return Err(Error::DerivationFailed("maximum depth exceeded".into()));
        }

        let mut mac = HmacSha512::new_from_slice(self.chain_code.as_slice())
            .map_err(|e| Error::DerivationFailed(e.to_string()))?;

        if index.is_hardened() {
            // 0x00 || ser256(k_par) || ser32(i)
            mac.update(&[0u8]);
            mac.update(&self.signing_key.to_bytes());
        } else {
            // serP(point(k_par)) || ser32(i)
            mac.update(&self.public_key_compressed());
        }
        mac.update(&index.to_u32().to_be_bytes());
        let digest = split_digest(mac);

        let mut il = Zeroizing::new([0u8; 32]);
        il.copy_from_slice(&digest[..32]);

        let parent: &Scalar = self.signing_key.as_nonzero_scalar().as_ref();
        let Some(child) = tweak_add(parent, &il) else {
            return Ok(None);
        };

        let signing_key = SigningKey::from_bytes(&child.to_repr())
            .map_err(|e| Error::DerivationFailed(e.to_string()))?;

        let mut chain_code = Zeroizing::new([0u8; 32]);
        chain_code.copy_from_slice(&digest[32..]);

        Ok(Some(Self {
            signing_key,
            chain_code,
            depth: self.depth + 1,
        }))
    }

    /// The secp256k1 verifying key.
    pub fn verifying_key(&self) -> VerifyingKey {
        *self.signing_key.verifying_key()
    }

    /// SEC1 compressed public key (33 bytes).
    pub fn public_key_compressed(&self) -> [u8; 33] {
        let point = self.signing_key.verifying_key().to_encoded_point(true);
        let mut out = [0u8; 33];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// SEC1 uncompressed public key (65 bytes, `0x04` prefix).
    pub fn public_key_uncompressed(&self) -> [u8; 65] {
        let point = self.signing_key.verifying_key().to_encoded_point(false);
        let mut out = [0u8; 65];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Raw 32-byte private scalar.
    ///
    /// **Security Warning**: the returned buffer can reconstruct this key;
    /// it is wiped when dropped.
    pub fn secret_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.signing_key.to_bytes().into())
    }

    /// The 32-byte chain code.
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Depth in the derivation tree (0 for master).
    pub const fn depth(&self) -> u8 {
        self.depth
    }

    /// Consume this key into a signer that pre-hashes with `prehash`.
    pub fn into_signer(self, prehash: PreHash) -> EcdsaSigner {
        EcdsaSigner::new(self.signing_key, prehash)
    }
}

impl fmt::Debug for ExtendedPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedPrivateKey")
            .field("key", &"[REDACTED]")
            .field("depth", &self.depth)
            .finish()
    }
}

/// Run `step` from `index` onwards until it yields a child.
///
/// `step` returns `Ok(None)` for an invalid candidate; the walk then moves to
/// the successor index and fails once the 31-bit range is exhausted.
fn first_valid_child<T>(
    index: ChildIndex,
    mut step: impl FnMut(ChildIndex) -> Result<Option<T>>,
) -> Result<T> {
    let mut index = index;
    loop {
        if let Some(child) = step(index)? {
            return Ok(child);
        }
        let next = index.successor().ok_or_else(|| {
            Error::DerivationFailed(format!("no valid child key at or after index {index}"))
        })?;
        tracing::warn!(skipped = %index, next = %next, "invalid child key, moving to next index");
        index = next;
    }
}

fn split_digest(mac: HmacSha512) -> Zeroizing<[u8; 64]> {
    let mut digest = Zeroizing::new([0u8; 64]);
    digest.copy_from_slice(&mac.finalize().into_bytes());
    digest
}

/// `parse256(IL) + k_par (mod n)`, or `None` when IL is not below the
/// curve order or the sum is zero.
pub(crate) fn tweak_add(parent: &Scalar, il: &[u8; 32]) -> Option<Scalar> {
    let tweak: Option<Scalar> = Scalar::from_repr(FieldBytes::from(*il)).into();
    let child = tweak? + parent;
    if bool::from(child.is_zero()) {
        None
    } else {
        Some(child)
    }
}
