//! Self-authenticating principals and ledger account identifiers for the
//! Internet Computer.

use core::fmt;
use core::str::FromStr;

use data_encoding::BASE32_NOPAD;
use tessera::hash::sha224;
use tessera::{Error, Result};

/// ASN.1 SubjectPublicKeyInfo prefix for an uncompressed secp256k1 key.
pub const SECP256K1_DER_PREFIX: [u8; 23] = [
    0x30, 0x56, 0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x05, 0x2b,
    0x81, 0x04, 0x00, 0x0a, 0x03, 0x42, 0x00,
];

/// ASN.1 SubjectPublicKeyInfo prefix for an ed25519 key.
pub const ED25519_DER_PREFIX: [u8; 12] = [
    0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00,
];

const SELF_AUTHENTICATING_TAG: u8 = 0x02;
const ANONYMOUS_TAG: u8 = 0x04;
const ACCOUNT_DOMAIN_SEPARATOR: &[u8] = b"\x0Aaccount-id";

/// Subaccount used when none is given.
pub const DEFAULT_SUBACCOUNT: [u8; 32] = [0u8; 32];

fn der_wrap(prefix: &[u8], raw: &[u8], expected: usize) -> Result<Vec<u8>> {
    if raw.len() != expected {
        return Err(Error::InvalidKeyLength {
            expected,
            actual: raw.len(),
        });
    }
    let mut der = Vec::with_capacity(prefix.len() + raw.len());
    der.extend_from_slice(prefix);
    der.extend_from_slice(raw);
    Ok(der)
}

/// DER-encode a 65-byte uncompressed secp256k1 public key.
pub fn der_encode_secp256k1(raw: &[u8]) -> Result<Vec<u8>> {
    der_wrap(&SECP256K1_DER_PREFIX, raw, 65)
}

/// DER-encode a 32-byte ed25519 public key.
pub fn der_encode_ed25519(raw: &[u8]) -> Result<Vec<u8>> {
    der_wrap(&ED25519_DER_PREFIX, raw, 32)
}

fn der_unwrap<const N: usize>(prefix: &[u8], der: &[u8]) -> Result<[u8; N]> {
    let body = der
        .strip_prefix(prefix)
        .ok_or_else(|| Error::Encoding("unexpected DER public key prefix".into()))?;
    body.try_into().map_err(|_| Error::InvalidKeyLength {
        expected: N,
        actual: body.len(),
    })
}

/// Strip the DER prefix from a secp256k1 key, returning the 65 raw bytes.
pub fn der_decode_secp256k1(der: &[u8]) -> Result<[u8; 65]> {
    der_unwrap(&SECP256K1_DER_PREFIX, der)
}

/// Strip the DER prefix from an ed25519 key, returning the 32 raw bytes.
pub fn der_decode_ed25519(der: &[u8]) -> Result<[u8; 32]> {
    der_unwrap(&ED25519_DER_PREFIX, der)
}

fn crc32_be(data: &[u8]) -> [u8; 4] {
    crc32fast::hash(data).to_be_bytes()
}

/// A principal identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Principal(Vec<u8>);

impl Principal {
    /// `SHA224(der_public_key) || 0x02`.
    pub fn self_authenticating(der_public_key: &[u8]) -> Self {
        let mut bytes = sha224(der_public_key).to_vec();
        bytes.push(SELF_AUTHENTICATING_TAG);
        Self(bytes)
    }

    /// The anonymous principal.
    pub fn anonymous() -> Self {
        Self(vec![ANONYMOUS_TAG])
    }

    /// Raw principal bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Ledger account for `subaccount` (the zero subaccount when `None`).
    pub fn account_identifier(&self, subaccount: Option<&[u8; 32]>) -> AccountIdentifier {
        AccountIdentifier::new(self, subaccount.unwrap_or(&DEFAULT_SUBACCOUNT))
    }

    /// Textual form: base32 of `crc32 || bytes`, lowercase, in dash-separated
    /// groups of five.
    pub fn to_text(&self) -> String {
        let mut checked = crc32_be(&self.0).to_vec();
        checked.extend_from_slice(&self.0);
        let encoded = BASE32_NOPAD.encode(&checked).to_ascii_lowercase();

        let mut text = String::with_capacity(encoded.len() + encoded.len() / 5);
        for (i, c) in encoded.chars().enumerate() {
            if i > 0 && i % 5 == 0 {
                text.push('-');
            }
            text.push(c);
        }
        text
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl FromStr for Principal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let compact: String = s.chars().filter(|c| *c != '-').collect();
        let decoded = BASE32_NOPAD
            .decode(compact.to_ascii_uppercase().as_bytes())
            .map_err(|e| Error::Encoding(format!("principal text: {e}")))?;
        if decoded.len() < 4 {
            return Err(Error::Encoding("principal text too short".into()));
        }

        let principal = Self(decoded[4..].to_vec());
        if crc32_be(principal.as_bytes()) != decoded[..4] {
            return Err(Error::Encoding("principal checksum mismatch".into()));
        }
        if principal.to_text() != s.to_ascii_lowercase() {
            return Err(Error::Encoding("principal text is not canonical".into()));
        }
        Ok(principal)
    }
}

/// A 28-byte ledger account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountIdentifier([u8; 28]);

impl AccountIdentifier {
    /// `SHA224("\x0Aaccount-id" || principal || subaccount)`.
    pub fn new(principal: &Principal, subaccount: &[u8; 32]) -> Self {
        let mut preimage =
            Vec::with_capacity(ACCOUNT_DOMAIN_SEPARATOR.len() + principal.0.len() + subaccount.len());
        preimage.extend_from_slice(ACCOUNT_DOMAIN_SEPARATOR);
        preimage.extend_from_slice(&principal.0);
        preimage.extend_from_slice(subaccount);
        Self(sha224(&preimage))
    }

    /// The 28-byte hash.
    pub const fn as_bytes(&self) -> &[u8; 28] {
        &self.0
    }

    /// Big-endian CRC32 of the hash.
    pub fn checksum(&self) -> [u8; 4] {
        crc32_be(&self.0)
    }

    /// 64-character lowercase hex of `crc32 || hash`.
    pub fn to_hex(&self) -> String {
        let mut out = self.checksum().to_vec();
        out.extend_from_slice(&self.0);
        hex::encode(out)
    }
}

impl fmt::Display for AccountIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
