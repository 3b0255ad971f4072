//! Substrate derivation junctions and secret URIs.
//!
//! A secret URI has the shape `phrase//hard/soft///password`. Each junction
//! is turned into a 32-byte chain code from its SCALE encoding.

use core::fmt;
use core::str::FromStr;

use parity_scale_codec::Encode;
use tessera::hash::blake2b_256;
use tessera::{Error, Result};
use zeroize::Zeroizing;

/// Length of a junction chain code.
pub const JUNCTION_ID_LEN: usize = 32;

/// One step of a substrate derivation path.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeriveJunction {
    /// Soft junction (`/name`): public derivation is possible.
    Soft([u8; JUNCTION_ID_LEN]),
    /// Hard junction (`//name`): mixes in the secret key.
    Hard([u8; JUNCTION_ID_LEN]),
}

impl DeriveJunction {
    /// Soft junction from a path element.
    pub fn soft(element: &str) -> Self {
        Self::Soft(chain_code(element))
    }

    /// Hard junction from a path element.
    pub fn hard(element: &str) -> Self {
        Self::Hard(chain_code(element))
    }

    /// Hard junction for a numeric index (`//n`).
    pub fn hard_index(index: u64) -> Self {
        Self::Hard(pad(&index.encode()))
    }

    /// Whether this junction is hard.
    pub const fn is_hard(&self) -> bool {
        matches!(self, Self::Hard(_))
    }

    /// The 32-byte chain code.
    pub const fn chain_code(&self) -> &[u8; JUNCTION_ID_LEN] {
        match self {
            Self::Soft(cc) | Self::Hard(cc) => cc,
        }
    }
}

impl fmt::Debug for DeriveJunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_hard() { "Hard" } else { "Soft" };
        write!(f, "{kind}(0x{})", hex::encode(self.chain_code()))
    }
}

/// Numeric elements encode as `u64`, anything else as a SCALE string
/// (compact length prefix followed by UTF-8 bytes).
fn chain_code(element: &str) -> [u8; JUNCTION_ID_LEN] {
    match element.parse::<u64>() {
        Ok(n) => pad(&n.encode()),
        Err(_) => pad(&element.encode()),
    }
}

/// Zero-pad encodings up to 32 bytes; hash anything longer.
fn pad(encoded: &[u8]) -> [u8; JUNCTION_ID_LEN] {
    if encoded.len() > JUNCTION_ID_LEN {
        return blake2b_256(encoded);
    }
    let mut cc = [0u8; JUNCTION_ID_LEN];
    cc[..encoded.len()].copy_from_slice(encoded);
    cc
}

/// A parsed substrate secret URI.
///
/// The phrase and password are wiped on drop and never printed by `Debug`.
pub struct SecretUri {
    phrase: Zeroizing<String>,
    junctions: Vec<DeriveJunction>,
    path: String,
    password: Option<Zeroizing<String>>,
}

impl SecretUri {
    /// Build a URI from parts.
    pub fn new(phrase: &str, junctions: Vec<(bool, String)>, password: Option<&str>) -> Self {
        let path = junctions
            .iter()
            .map(|(hard, element)| format!("{}{element}", if *hard { "//" } else { "/" }))
            .collect();
        let junctions = junctions
            .iter()
            .map(|(hard, element)| {
                if *hard {
                    DeriveJunction::hard(element)
                } else {
                    DeriveJunction::soft(element)
                }
            })
            .collect();

        Self {
            phrase: Zeroizing::new(phrase.to_owned()),
            junctions,
            path,
            password: password.map(|p| Zeroizing::new(p.to_owned())),
        }
    }

    /// The mnemonic phrase.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// The parsed junctions in order.
    pub fn junctions(&self) -> &[DeriveJunction] {
        &self.junctions
    }

    /// The textual derivation path, e.g. `//polkadot/0`. Contains no secrets.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The password, if one was given after `///`.
    pub fn password(&self) -> Option<&str> {
        self.password.as_ref().map(|p| p.as_str())
    }
}

impl FromStr for SecretUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (rest, password) = match s.find("///") {
            Some(pos) => (&s[..pos], Some(&s[pos + 3..])),
            None => (s, None),
        };

        let split = rest.find('/').unwrap_or(rest.len());
        let phrase = rest[..split].trim();
        let mut path = &rest[split..];

        let mut elements = Vec::new();
        while !path.is_empty() {
            let (hard, body) = match path.strip_prefix("//") {
                Some(body) => (true, body),
                None => (false, path.strip_prefix('/').unwrap_or(path)),
            };
            let end = body.find('/').unwrap_or(body.len());
            let element = &body[..end];
            if element.is_empty() {
                return Err(Error::InvalidDerivationPath(
                    "empty junction in secret uri".into(),
                ));
            }
            elements.push((hard, element.to_owned()));
            path = &body[end..];
        }

        Ok(Self::new(phrase, elements, password))
    }
}

impl fmt::Debug for SecretUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretUri")
            .field("phrase", &"[REDACTED]")
            .field("path", &self.path)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
