//! BIP-39 seed derivation.

use core::fmt;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

use crate::{Error, mnemonic};

/// PBKDF2 rounds fixed by BIP-39.
const PBKDF2_ROUNDS: u32 = 2048;

/// Salt prefix fixed by BIP-39.
const SALT_PREFIX: &str = "mnemonic";

/// A 64-byte BIP-39 seed.
///
/// The bytes are wiped when the seed is dropped. A seed is produced for a
/// single derivation and is never serialized.
pub struct Seed {
    bytes: Zeroizing<[u8; 64]>,
    has_passphrase: bool,
}

impl Seed {
    /// Derive a seed from a checked mnemonic phrase.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMnemonic`] if the phrase fails the BIP-39
    /// wordlist or checksum check.
    pub fn from_mnemonic(phrase: &str, passphrase: Option<&str>) -> Result<Self, Error> {
        let mnemonic = mnemonic::parse(phrase)?;
        let passphrase = passphrase.unwrap_or("");
        Ok(Self {
            bytes: Zeroizing::new(mnemonic.to_seed(passphrase)),
            has_passphrase: !passphrase.is_empty(),
        })
    }

    /// Derive a seed without validating the phrase.
    ///
    /// Any input yields a well-defined seed, so a mistyped phrase silently
    /// produces a different wallet. For valid phrases the result equals
    /// [`Seed::from_mnemonic`].
    pub fn from_mnemonic_unchecked(phrase: &str, passphrase: Option<&str>) -> Self {
        let normalized: Zeroizing<String> = Zeroizing::new(
            phrase
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .nfkd()
                .collect(),
        );
        let passphrase = passphrase.unwrap_or("");
        let salt: Zeroizing<String> =
            Zeroizing::new(format!("{SALT_PREFIX}{passphrase}").nfkd().collect());

        let mut bytes = Zeroizing::new([0u8; 64]);
        pbkdf2_hmac::<Sha512>(
            normalized.as_bytes(),
            salt.as_bytes(),
            PBKDF2_ROUNDS,
            &mut bytes[..],
        );

        Self {
            bytes,
            has_passphrase: !passphrase.is_empty(),
        }
    }

    /// Get the seed bytes for key derivation.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.bytes
    }

    /// Check if a non-empty passphrase was mixed into the seed.
    pub const fn has_passphrase(&self) -> bool {
        self.has_passphrase
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seed")
            .field("bytes", &"[REDACTED]")
            .field("has_passphrase", &self.has_passphrase)
            .finish()
    }
}
