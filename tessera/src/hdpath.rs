//! Hierarchical derivation paths.
//!
//! Structured parsing and construction of paths like `m/44'/60'/0'/0/0`,
//! shared by the BIP-32 and SLIP-0010 derivers.

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};

/// A child index in a derivation path.
///
/// Hardened indices are stored without the 2^31 flag and displayed as `n'`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChildIndex {
    /// Normal (non-hardened) index: 0 to 2^31 - 1
    Normal(u32),
    /// Hardened index: displayed as n' or nh, stored as n
    Hardened(u32),
}

impl ChildIndex {
    /// The offset for hardened indices (2^31).
    pub const HARDENED_OFFSET: u32 = 0x8000_0000;

    /// Create a normal (non-hardened) child index.
    pub fn normal(index: u32) -> Result<Self> {
        if index >= Self::HARDENED_OFFSET {
            return Err(Error::InvalidDerivationPath(format!(
                "index {index} does not fit in 31 bits"
            )));
        }
        Ok(Self::Normal(index))
    }

    /// Create a hardened child index.
    pub fn hardened(index: u32) -> Result<Self> {
        if index >= Self::HARDENED_OFFSET {
            return Err(Error::InvalidDerivationPath(format!(
                "index {index}' does not fit in 31 bits"
            )));
        }
        Ok(Self::Hardened(index))
    }

    /// Check if this is a hardened index.
    pub const fn is_hardened(&self) -> bool {
        matches!(self, Self::Hardened(_))
    }

    /// Get the raw index value (without hardened flag).
    pub const fn index(&self) -> u32 {
        match self {
            Self::Normal(i) | Self::Hardened(i) => *i,
        }
    }

    /// Convert to the raw u32 value used in BIP-32 derivation.
    pub const fn to_u32(&self) -> u32 {
        match self {
            Self::Normal(i) => *i,
            Self::Hardened(i) => *i | Self::HARDENED_OFFSET,
        }
    }

    /// The next index of the same kind, if one exists.
    ///
    /// BIP-32 moves on to this index when a child key turns out invalid.
    pub fn successor(&self) -> Option<Self> {
        match self {
            Self::Normal(i) => i.checked_add(1).and_then(|n| Self::normal(n).ok()),
            Self::Hardened(i) => i.checked_add(1).and_then(|n| Self::hardened(n).ok()),
        }
    }
}

impl From<u32> for ChildIndex {
    fn from(value: u32) -> Self {
        if value >= Self::HARDENED_OFFSET {
            Self::Hardened(value & !Self::HARDENED_OFFSET)
        } else {
            Self::Normal(value)
        }
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal(i) => write!(f, "{i}"),
            Self::Hardened(i) => write!(f, "{i}'"),
        }
    }
}

impl FromStr for ChildIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || Error::InvalidDerivationPath(format!("bad segment \"{s}\""));

        match s.strip_suffix(['\'', 'h', 'H']) {
            Some(index) => Self::hardened(index.parse().map_err(|_| invalid())?),
            None => Self::normal(s.parse().map_err(|_| invalid())?),
        }
    }
}

/// A hierarchical derivation path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    indices: Vec<ChildIndex>,
}

impl DerivationPath {
    /// Create an empty derivation path (master key).
    pub fn master() -> Self {
        Self::default()
    }

    /// Create a derivation path from a vector of child indices.
    pub fn new(indices: Vec<ChildIndex>) -> Self {
        Self { indices }
    }

    /// Parse a derivation path from a string.
    ///
    /// Accepts `m/44'/60'/0'/0/0`, `m/44h/60h/0h/0/0` and the same without
    /// the leading `m/`.
    pub fn parse(path: &str) -> Result<Self> {
        let path = path.trim();
        if path.is_empty() || path == "m" || path == "M" {
            return Ok(Self::master());
        }

        let path = path
            .strip_prefix("m/")
            .or_else(|| path.strip_prefix("M/"))
            .unwrap_or(path);

        let indices = path
            .split('/')
            .filter(|component| !component.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<ChildIndex>>>()?;

        Ok(Self { indices })
    }

    /// Get the child indices in this path.
    pub fn indices(&self) -> &[ChildIndex] {
        &self.indices
    }

    /// Get the number of levels in this path.
    pub fn depth(&self) -> usize {
        self.indices.len()
    }

    /// Check if this path is empty (master key).
    pub fn is_master(&self) -> bool {
        self.indices.is_empty()
    }

    /// Check if every index in the path is hardened.
    pub fn is_fully_hardened(&self) -> bool {
        self.indices.iter().all(ChildIndex::is_hardened)
    }

    /// Append a child index to the path.
    pub fn child(&self, index: ChildIndex) -> Self {
        let mut indices = self.indices.clone();
        indices.push(index);
        Self { indices }
    }

    /// BIP-44 shaped path: `m/purpose'/coin_type'/account'/change/address_index`.
    ///
    /// BIP-84 chains use the same shape with purpose 84.
    pub fn bip44(
        purpose: u32,
        coin_type: u32,
        account: u32,
        change: u32,
        address_index: u32,
    ) -> Result<Self> {
        Ok(Self {
            indices: vec![
                ChildIndex::hardened(purpose)?,
                ChildIndex::hardened(coin_type)?,
                ChildIndex::hardened(account)?,
                ChildIndex::normal(change)?,
                ChildIndex::normal(address_index)?,
            ],
        })
    }

    /// All-hardened BIP-44 shaped path for SLIP-0010 ed25519 chains:
    /// `m/purpose'/coin_type'/account'/change'/address_index'`.
    pub fn bip44_hardened(
        purpose: u32,
        coin_type: u32,
        account: u32,
        change: u32,
        address_index: u32,
    ) -> Result<Self> {
        Ok(Self {
            indices: vec![
                ChildIndex::hardened(purpose)?,
                ChildIndex::hardened(coin_type)?,
                ChildIndex::hardened(account)?,
                ChildIndex::hardened(change)?,
                ChildIndex::hardened(address_index)?,
            ],
        })
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for index in &self.indices {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_index_hardened() {
        let index = ChildIndex::hardened(44).unwrap();
        assert!(index.is_hardened());
        assert_eq!(index.index(), 44);
        assert_eq!(index.to_u32(), 44 | 0x80000000);
        assert_eq!(index.to_string(), "44'");
    }

    #[test]
    fn test_child_index_rejects_flagged_values() {
        assert!(ChildIndex::normal(0x80000000).is_err());
        assert!(ChildIndex::hardened(u32::MAX).is_err());
    }

    #[test]
    fn test_child_index_from_u32() {
        assert_eq!(ChildIndex::from(44), ChildIndex::Normal(44));
        assert_eq!(ChildIndex::from(0x80000000 + 44), ChildIndex::Hardened(44));
    }

    #[test]
    fn test_child_index_parse() {
        assert_eq!("44".parse::<ChildIndex>().unwrap(), ChildIndex::Normal(44));
        assert_eq!("44'".parse::<ChildIndex>().unwrap(), ChildIndex::Hardened(44));
        assert_eq!("44h".parse::<ChildIndex>().unwrap(), ChildIndex::Hardened(44));
        assert_eq!("44H".parse::<ChildIndex>().unwrap(), ChildIndex::Hardened(44));
        assert!("x'".parse::<ChildIndex>().is_err());
        assert!("2147483648".parse::<ChildIndex>().is_err());
    }

    #[test]
    fn test_successor_stays_in_class() {
        assert_eq!(ChildIndex::Normal(3).successor(), Some(ChildIndex::Normal(4)));
        assert_eq!(
            ChildIndex::Hardened(3).successor(),
            Some(ChildIndex::Hardened(4))
        );
        assert_eq!(ChildIndex::Normal(0x7fff_ffff).successor(), None);
        assert_eq!(ChildIndex::Hardened(0x7fff_ffff).successor(), None);
    }

    #[test]
    fn test_derivation_path_parse_and_display() {
        let path: DerivationPath = "m/44'/60'/0'/0/0".parse().unwrap();
        assert_eq!(path.depth(), 5);
        assert_eq!(path.indices()[1], ChildIndex::Hardened(60));
        assert_eq!(path.indices()[4], ChildIndex::Normal(0));
        assert_eq!(path.to_string(), "m/44'/60'/0'/0/0");

        let path: DerivationPath = "44h/223h/0h".parse().unwrap();
        assert_eq!(path.to_string(), "m/44'/223'/0'");
    }

    #[test]
    fn test_derivation_path_master() {
        let path = DerivationPath::parse("m").unwrap();
        assert!(path.is_master());
        assert_eq!(path.to_string(), "m");
    }

    #[test]
    fn test_bip44_shapes() {
        let path = DerivationPath::bip44(84, 0, 0, 0, 7).unwrap();
        assert_eq!(path.to_string(), "m/84'/0'/0'/0/7");
        assert!(!path.is_fully_hardened());

        let path = DerivationPath::bip44_hardened(44, 223, 0, 0, 1).unwrap();
        assert_eq!(path.to_string(), "m/44'/223'/0'/0'/1'");
        assert!(path.is_fully_hardened());

        assert!(DerivationPath::bip44(44, 60, 0, 0, 0x80000000).is_err());
    }

    #[test]
    fn test_child_appends() {
        let path = DerivationPath::master().child(ChildIndex::Hardened(44));
        assert_eq!(path.to_string(), "m/44'");
    }
}
