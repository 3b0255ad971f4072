//! Address encoding for every [`AddressFormat`].

use core::fmt;

use tessera::encoding::{
    CASHADDR_P2PKH, base58check_encode, bech32_encode, bech32_segwit_encode, cashaddr_encode,
    ss58_encode,
};
use tessera::hash::{hash160, keccak256};
use tessera::{Error, Result};
use tessera_bip32::k256::ecdsa::VerifyingKey;

use crate::chain::{AddressFormat, Bech32Kind, ChainProfile, CurveFamily};
use crate::principal::{Principal, der_encode_ed25519, der_encode_secp256k1};

/// A public key of any supported curve.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum PublicKey {
    /// secp256k1 point.
    Secp256k1(VerifyingKey),
    /// ed25519 point.
    Ed25519([u8; 32]),
    /// sr25519 (ristretto255) point.
    Sr25519([u8; 32]),
}

impl PublicKey {
    /// Curve this key lives on.
    pub const fn curve(&self) -> CurveFamily {
        match self {
            Self::Secp256k1(_) => CurveFamily::Secp256k1,
            Self::Ed25519(_) => CurveFamily::Ed25519,
            Self::Sr25519(_) => CurveFamily::Sr25519,
        }
    }

    /// SEC1 bytes for secp256k1 (compressed or not), raw bytes otherwise.
    pub fn to_bytes(&self, compressed: bool) -> Vec<u8> {
        match self {
            Self::Secp256k1(key) => key.to_encoded_point(compressed).as_bytes().to_vec(),
            Self::Ed25519(bytes) | Self::Sr25519(bytes) => bytes.to_vec(),
        }
    }

    fn uncompressed(&self) -> Vec<u8> {
        self.to_bytes(false)
    }

    fn key_hash(&self) -> [u8; 20] {
        hash160(&self.to_bytes(true))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey::{:?}({})", self.curve(), hex::encode(self.to_bytes(true)))
    }
}

/// Last 20 bytes of keccak256 over an uncompressed key without its `0x04`
/// tag.
pub fn evm_address(uncompressed: &[u8]) -> Result<[u8; 20]> {
    if uncompressed.len() != 65 {
        return Err(Error::InvalidKeyLength {
            expected: 65,
            actual: uncompressed.len(),
        });
    }
    let hash = keccak256(&uncompressed[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    Ok(address)
}

/// Self-authenticating principal for `key`.
pub fn principal_for(key: &PublicKey) -> Result<Principal> {
    let der = match key {
        PublicKey::Secp256k1(_) => der_encode_secp256k1(&key.uncompressed())?,
        PublicKey::Ed25519(bytes) => der_encode_ed25519(bytes)?,
        PublicKey::Sr25519(_) => return Err(mismatch(key, &AddressFormat::CapabilityPrincipal)),
    };
    Ok(Principal::self_authenticating(&der))
}

fn mismatch(key: &PublicKey, format: &AddressFormat) -> Error {
    Error::UnsupportedDerivation(format!(
        "{} keys cannot be encoded as {} addresses",
        key.curve(),
        format.name()
    ))
}

/// Encode `key` the way `profile` expects.
///
/// # Errors
///
/// [`Error::UnsupportedDerivation`] when the key's curve does not fit the
/// profile's address format, or an encoding error from the underlying codec.
pub fn encode_address(profile: &ChainProfile, key: &PublicKey) -> Result<String> {
    let format = &profile.address_format;
    tracing::trace!(symbol = profile.symbol, format = format.name(), "encoding address");

    match (format, key) {
        (AddressFormat::EvmHex, PublicKey::Secp256k1(_)) => {
            Ok(format!("0x{}", hex::encode(evm_address(&key.uncompressed())?)))
        }
        (AddressFormat::RawHex, PublicKey::Secp256k1(_)) => {
            Ok(hex::encode(evm_address(&key.uncompressed())?))
        }
        (AddressFormat::Base58CheckP2pkh { version }, PublicKey::Secp256k1(_)) => {
            Ok(base58check_encode(version, &key.key_hash()))
        }
        (AddressFormat::Bech32 { hrp, kind, prefix }, PublicKey::Secp256k1(_)) => {
            let encoded = match kind {
                Bech32Kind::Segwit => bech32_segwit_encode(hrp, 0, &key.key_hash())?,
                Bech32Kind::Plain => bech32_encode(hrp, &key.key_hash())?,
            };
            Ok(format!("{prefix}{encoded}"))
        }
        (AddressFormat::CashAddr { prefix }, PublicKey::Secp256k1(_)) => {
            Ok(cashaddr_encode(prefix, CASHADDR_P2PKH, &key.key_hash()))
        }
        (AddressFormat::Ss58 { network }, PublicKey::Sr25519(bytes) | PublicKey::Ed25519(bytes)) => {
            ss58_encode(*network, bytes)
        }
        (AddressFormat::CapabilityPrincipal, PublicKey::Secp256k1(_) | PublicKey::Ed25519(_)) => {
            Ok(principal_for(key)?.account_identifier(None).to_hex())
        }
        _ => Err(mismatch(key, format)),
    }
}
