//! Error types shared by every tessera crate.

use thiserror::Error;

/// Errors that can occur while deriving keys or encoding addresses.
///
/// All variants are deterministic functions of the input; none of them is
/// transient, so retrying the same call always yields the same error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The phrase is not a valid BIP-39 mnemonic (wordlist or checksum).
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(#[from] bip39::Error),

    /// Invalid word count for mnemonic generation.
    #[error("invalid word count {0}, must be 12, 15, 18, 21, or 24")]
    InvalidWordCount(usize),

    /// Account index does not fit in 31 bits.
    #[error("account index {0} is out of range, must be below 2^31")]
    InvalidAccountIndex(u32),

    /// No chain profile is registered for this symbol.
    #[error("unknown chain symbol \"{0}\"")]
    UnknownSymbol(String),

    /// Curve, path and address format do not fit together.
    #[error("unsupported derivation: {0}")]
    UnsupportedDerivation(String),

    /// Key derivation produced no usable key.
    #[error("key derivation failed: {0}")]
    DerivationFailed(String),

    /// A raw key has the wrong length for the requested encoding.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// Malformed derivation path or path segment.
    #[error("invalid derivation path: {0}")]
    InvalidDerivationPath(String),

    /// Address or key encoding failed.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Signature bytes are malformed.
    #[error("invalid signature")]
    InvalidSignature,

    /// The signing primitive rejected the input.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Mnemonic prefix is too short for unambiguous expansion.
    #[error("prefix \"{prefix}\" is too short (minimum {min_len} characters)")]
    PrefixTooShort {
        /// The prefix that was too short.
        prefix: String,
        /// Minimum required prefix length.
        min_len: usize,
    },

    /// Mnemonic prefix does not match any word in the wordlist.
    #[error("prefix \"{0}\" does not match any BIP-39 word")]
    UnknownPrefix(String),

    /// Mnemonic prefix matches multiple words in the wordlist.
    #[error("prefix \"{prefix}\" is ambiguous, matches: {}", candidates.join(", "))]
    AmbiguousPrefix {
        /// The ambiguous prefix.
        prefix: String,
        /// Words that match the prefix.
        candidates: Vec<String>,
    },
}

/// Result alias used across the workspace.
pub type Result<T, E = Error> = core::result::Result<T, E>;
