//! Static chain registry.
//!
//! Every supported symbol maps to exactly one [`ChainProfile`]. Coin types
//! are compile-time constants: changing one silently moves every address
//! ever derived for that chain.

use core::fmt;
use core::str::FromStr;

use tessera::{Error, Result};
use tessera_bip32::PreHash;

use crate::slip44;

/// Curve family a chain signs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveFamily {
    /// secp256k1 with BIP-32 derivation.
    Secp256k1,
    /// ed25519 with SLIP-0010 derivation.
    Ed25519,
    /// sr25519 with substrate junction derivation.
    Sr25519,
}

impl CurveFamily {
    /// Lowercase curve name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Secp256k1 => "secp256k1",
            Self::Ed25519 => "ed25519",
            Self::Sr25519 => "sr25519",
        }
    }
}

impl fmt::Display for CurveFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CurveFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "secp256k1" | "ecdsa" => Ok(Self::Secp256k1),
            "ed25519" => Ok(Self::Ed25519),
            "sr25519" => Ok(Self::Sr25519),
            other => Err(Error::UnsupportedDerivation(format!("unknown curve \"{other}\""))),
        }
    }
}

/// Flavour of a bech32 address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bech32Kind {
    /// Segwit v0 witness program (BIP-173).
    Segwit,
    /// The 20-byte key hash as bare bech32 data (cosmos-SDK style).
    Plain,
}

/// How a public key is turned into an address string.
///
/// Network version bytes live inside the variant that uses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFormat {
    /// `Base58Check(version || hash160(compressed key))`.
    Base58CheckP2pkh {
        /// Version prefix; Zcash transparent addresses use two bytes.
        version: &'static [u8],
    },
    /// Bech32 over `hash160(compressed key)`.
    Bech32 {
        /// Human-readable part.
        hrp: &'static str,
        /// Segwit program or plain data.
        kind: Bech32Kind,
        /// Chain alias prepended to the address (`X-`, `P-`), usually empty.
        prefix: &'static str,
    },
    /// Bitcoin Cash CashAddr, rendered without its prefix.
    CashAddr {
        /// Prefix committed to by the checksum.
        prefix: &'static str,
    },
    /// Substrate SS58 with a network identifier.
    Ss58 {
        /// Network identifier (0 for Polkadot, 2 for Kusama).
        network: u16,
    },
    /// `0x` + last 20 bytes of keccak256 over the uncompressed key.
    EvmHex,
    /// Account identifier derived from a self-authenticating principal.
    CapabilityPrincipal,
    /// Keccak address hex with no prefix, used only for unregistered symbols.
    RawHex,
}

impl AddressFormat {
    /// Short name for logs and errors.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Base58CheckP2pkh { .. } => "base58check",
            Self::Bech32 { .. } => "bech32",
            Self::CashAddr { .. } => "cashaddr",
            Self::Ss58 { .. } => "ss58",
            Self::EvmHex => "evm-hex",
            Self::CapabilityPrincipal => "principal",
            Self::RawHex => "raw-hex",
        }
    }

    /// Whether a secp256k1 key enters this format uncompressed.
    pub const fn uses_uncompressed_key(&self) -> bool {
        matches!(self, Self::EvmHex | Self::CapabilityPrincipal | Self::RawHex)
    }
}

/// Everything needed to derive and encode keys for one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainProfile {
    /// Ticker symbol, unique in the registry.
    pub symbol: &'static str,
    /// Human-readable chain name.
    pub name: &'static str,
    /// Registered SLIP-44 coin type.
    pub coin_type: u32,
    /// BIP-43 purpose (44, or 84 for native segwit).
    pub purpose: u32,
    /// Default curve.
    pub curve: CurveFamily,
    /// Address encoding.
    pub address_format: AddressFormat,
    /// Optional note describing the address form.
    pub desc: Option<&'static str>,
    /// Alternative curves selectable through wallet options.
    pub variants: &'static [CurveFamily],
}

impl ChainProfile {
    /// This profile with `curve` selected.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedDerivation`] when the chain does not offer `curve`.
    pub fn with_curve(&self, curve: CurveFamily) -> Result<Self> {
        if curve == self.curve {
            return Ok(*self);
        }
        if self.variants.contains(&curve) {
            return Ok(Self { curve, ..*self });
        }
        Err(Error::UnsupportedDerivation(format!(
            "{} does not support the {curve} curve",
            self.symbol
        )))
    }

    /// Digest applied before ECDSA signing on this chain.
    pub const fn prehash(&self) -> PreHash {
        match self.address_format {
            AddressFormat::EvmHex | AddressFormat::RawHex => PreHash::Keccak256,
            _ => PreHash::Sha256,
        }
    }

    /// Whether this profile is the unregistered-symbol fallback.
    pub const fn is_fallback(&self) -> bool {
        matches!(self.address_format, AddressFormat::RawHex)
    }
}

const SECP: CurveFamily = CurveFamily::Secp256k1;

const fn evm(symbol: &'static str, name: &'static str) -> ChainProfile {
    ChainProfile {
        symbol,
        name,
        coin_type: 60,
        purpose: 44,
        curve: SECP,
        address_format: AddressFormat::EvmHex,
        desc: None,
        variants: &[],
    }
}

const fn base58(symbol: &'static str, name: &'static str, coin_type: u32, version: &'static [u8]) -> ChainProfile {
    ChainProfile {
        symbol,
        name,
        coin_type,
        purpose: 44,
        curve: SECP,
        address_format: AddressFormat::Base58CheckP2pkh { version },
        desc: None,
        variants: &[],
    }
}

const fn segwit(symbol: &'static str, name: &'static str, coin_type: u32, hrp: &'static str) -> ChainProfile {
    ChainProfile {
        symbol,
        name,
        coin_type,
        purpose: 84,
        curve: SECP,
        address_format: AddressFormat::Bech32 {
            hrp,
            kind: Bech32Kind::Segwit,
            prefix: "",
        },
        desc: Some("bech32 address"),
        variants: &[],
    }
}

const fn plain_bech32(
    symbol: &'static str,
    name: &'static str,
    coin_type: u32,
    hrp: &'static str,
    prefix: &'static str,
) -> ChainProfile {
    ChainProfile {
        symbol,
        name,
        coin_type,
        purpose: 44,
        curve: SECP,
        address_format: AddressFormat::Bech32 {
            hrp,
            kind: Bech32Kind::Plain,
            prefix,
        },
        desc: None,
        variants: &[],
    }
}

const fn substrate(symbol: &'static str, name: &'static str, coin_type: u32, network: u16) -> ChainProfile {
    ChainProfile {
        symbol,
        name,
        coin_type,
        purpose: 44,
        curve: CurveFamily::Sr25519,
        address_format: AddressFormat::Ss58 { network },
        desc: None,
        variants: &[],
    }
}

/// The registry.
#[rustfmt::skip]
pub static CHAINS: &[ChainProfile] = &[
    segwit("BTC", "Bitcoin", 0, "bc"),
    segwit("LTC", "Litecoin", 2, "ltc"),
    base58("DOGE", "Dogecoin", 3, &[0x1e]),
    base58("DASH", "Dash", 5, &[0x4c]),
    base58("ZEC", "Zcash", 133, &[0x1c, 0xb8]),
    base58("BTG", "Bitcoin Gold", 156, &[0x26]),
    ChainProfile {
        symbol: "BCH",
        name: "Bitcoin Cash",
        coin_type: 145,
        purpose: 44,
        curve: SECP,
        address_format: AddressFormat::CashAddr { prefix: "bitcoincash" },
        desc: None,
        variants: &[],
    },
    ChainProfile {
        desc: Some("Binance chain network address"),
        ..plain_bech32("BNB", "BNB Beacon Chain", 714, "bnb", "")
    },
    plain_bech32("ATOM", "Cosmos Hub", 118, "cosmos", ""),
    plain_bech32("RUNE", "THORChain", 931, "thor", ""),
    plain_bech32("AVAX", "Avalanche X-Chain", 9000, "avax", "X-"),
    plain_bech32("AVAP", "Avalanche P-Chain", 9000, "avax", "P-"),
    evm("ETH", "Ethereum"),
    evm("MATIC", "Polygon"),
    evm("BSC", "BNB Smart Chain"),
    evm("AVAC", "Avalanche C-Chain"),
    substrate("DOT", "Polkadot", 354, 0),
    substrate("KSM", "Kusama", 434, 2),
    ChainProfile {
        symbol: "ICP",
        name: "Internet Computer",
        coin_type: 223,
        purpose: 44,
        curve: SECP,
        address_format: AddressFormat::CapabilityPrincipal,
        desc: None,
        variants: &[CurveFamily::Ed25519],
    },
];

/// All registered chains.
pub fn all() -> &'static [ChainProfile] {
    CHAINS
}

/// Case-sensitive registry lookup.
pub fn lookup(symbol: &str) -> Option<&'static ChainProfile> {
    CHAINS.iter().find(|chain| chain.symbol == symbol)
}

/// Strict registry lookup.
///
/// # Errors
///
/// [`Error::UnknownSymbol`] when `symbol` is not registered.
pub fn get(symbol: &str) -> Result<&'static ChainProfile> {
    lookup(symbol).ok_or_else(|| Error::UnknownSymbol(symbol.to_owned()))
}

/// Profile symbol for fallback symbols missing from the SLIP-44 table.
pub const UNREGISTERED_SYMBOL: &str = "UNREGISTERED";

/// Best-effort profile for an unregistered symbol.
///
/// secp256k1 on `m/44'/coin'/0'/0/account` with a raw keccak address. The
/// coin type comes from a case-insensitive SLIP-44 lookup and defaults to
/// Ethereum's 60. Symbols missing from SLIP-44 are labelled
/// [`UNREGISTERED_SYMBOL`].
pub fn fallback(symbol: &str) -> ChainProfile {
    let entry = slip44::find(symbol);
    ChainProfile {
        symbol: entry.map_or(UNREGISTERED_SYMBOL, |e| e.symbol),
        name: entry.map_or("Unregistered chain", |e| e.name),
        coin_type: entry.map_or(slip44::DEFAULT_COIN_TYPE, |e| e.coin_type),
        purpose: 44,
        curve: SECP,
        address_format: AddressFormat::RawHex,
        desc: None,
        variants: &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_symbols_are_unique() {
        let symbols: HashSet<_> = CHAINS.iter().map(|c| c.symbol).collect();
        assert_eq!(symbols.len(), CHAINS.len());
    }

    #[test]
    fn test_coin_types_are_pinned() {
        let pinned = [
            ("BTC", 0),
            ("LTC", 2),
            ("DOGE", 3),
            ("DASH", 5),
            ("ETH", 60),
            ("ATOM", 118),
            ("ZEC", 133),
            ("BCH", 145),
            ("BTG", 156),
            ("ICP", 223),
            ("DOT", 354),
            ("KSM", 434),
            ("BNB", 714),
            ("RUNE", 931),
            ("AVAX", 9000),
            ("AVAP", 9000),
            ("MATIC", 60),
            ("BSC", 60),
            ("AVAC", 60),
        ];
        assert_eq!(pinned.len(), CHAINS.len());
        for (symbol, coin_type) in pinned {
            assert_eq!(get(symbol).unwrap().coin_type, coin_type, "{symbol}");
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(lookup("ETH").is_some());
        assert!(lookup("eth").is_none());
        assert!(matches!(get("eth"), Err(Error::UnknownSymbol(s)) if s == "eth"));
    }

    #[test]
    fn test_segwit_chains_use_purpose_84() {
        assert_eq!(get("BTC").unwrap().purpose, 84);
        assert_eq!(get("LTC").unwrap().purpose, 84);
        assert_eq!(get("DOGE").unwrap().purpose, 44);
    }

    #[test]
    fn test_curve_variants() {
        let icp = get("ICP").unwrap();
        assert_eq!(icp.curve, CurveFamily::Secp256k1);
        assert_eq!(icp.with_curve(CurveFamily::Ed25519).unwrap().curve, CurveFamily::Ed25519);
        assert_eq!(icp.with_curve(CurveFamily::Secp256k1).unwrap(), *icp);
        assert!(matches!(
            icp.with_curve(CurveFamily::Sr25519),
            Err(Error::UnsupportedDerivation(_))
        ));
        assert!(get("ETH").unwrap().with_curve(CurveFamily::Ed25519).is_err());
    }

    #[test]
    fn test_prehash_per_family() {
        assert_eq!(get("ETH").unwrap().prehash(), PreHash::Keccak256);
        assert_eq!(get("BTC").unwrap().prehash(), PreHash::Sha256);
        assert_eq!(get("ICP").unwrap().prehash(), PreHash::Sha256);
        assert_eq!(fallback("FOO").prehash(), PreHash::Keccak256);
    }

    #[test]
    fn test_fallback_coin_type() {
        let sol = fallback("sol");
        assert_eq!(sol.coin_type, 501);
        assert!(sol.is_fallback());
        assert_eq!(fallback("FOO").coin_type, 60);
    }

    #[test]
    fn test_fallback_does_not_borrow_ethereum_label() {
        let foo = fallback("FOO");
        assert_eq!(foo.symbol, UNREGISTERED_SYMBOL);
        assert_eq!(foo.name, "Unregistered chain");
        assert_eq!(fallback("sol").symbol, "SOL");
        assert!(lookup(foo.symbol).is_none());
    }

    #[test]
    fn test_curve_from_str() {
        assert_eq!("Ed25519".parse::<CurveFamily>().unwrap(), CurveFamily::Ed25519);
        assert_eq!("ecdsa".parse::<CurveFamily>().unwrap(), CurveFamily::Secp256k1);
        assert!("p256".parse::<CurveFamily>().is_err());
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(get("BTC").unwrap().desc, Some("bech32 address"));
        assert_eq!(get("BNB").unwrap().desc, Some("Binance chain network address"));
        assert_eq!(get("ETH").unwrap().desc, None);
    }
}
