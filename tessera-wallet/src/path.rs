//! Derivation path resolution per chain profile.

use tessera::{ChildIndex, DerivationPath, Error, Result};
use tessera_sr25519::DeriveJunction;

use crate::chain::{ChainProfile, CurveFamily};

fn check_account(account: u32) -> Result<()> {
    if account >= ChildIndex::HARDENED_OFFSET {
        return Err(Error::InvalidAccountIndex(account));
    }
    Ok(())
}

/// BIP-32 path for `account` on `profile`.
///
/// - secp256k1: `m/purpose'/coin'/0'/0/account`
/// - ed25519: `m/purpose'/coin'/0'/0'/account'`
///
/// # Errors
///
/// [`Error::InvalidAccountIndex`] for accounts at or above 2^31 and
/// [`Error::UnsupportedDerivation`] for sr25519 profiles, which derive
/// through [`resolve_junctions`] instead.
pub fn resolve_path(profile: &ChainProfile, account: u32) -> Result<DerivationPath> {
    check_account(account)?;
    match profile.curve {
        CurveFamily::Secp256k1 => {
            DerivationPath::bip44(profile.purpose, profile.coin_type, 0, 0, account)
        }
        CurveFamily::Ed25519 => {
            DerivationPath::bip44_hardened(profile.purpose, profile.coin_type, 0, 0, account)
        }
        CurveFamily::Sr25519 => Err(Error::UnsupportedDerivation(format!(
            "{} derives through substrate junctions, not a BIP-32 path",
            profile.symbol
        ))),
    }
}

/// Substrate junctions for `account`: none for account 0, `//account`
/// otherwise.
pub fn resolve_junctions(account: u32) -> Result<Vec<DeriveJunction>> {
    check_account(account)?;
    Ok(match account {
        0 => Vec::new(),
        n => vec![DeriveJunction::hard_index(u64::from(n))],
    })
}

/// Textual form of [`resolve_junctions`].
pub fn junction_path(account: u32) -> String {
    match account {
        0 => String::new(),
        n => format!("//{n}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain;

    #[test]
    fn test_secp256k1_paths() {
        let eth = chain::get("ETH").unwrap();
        assert_eq!(resolve_path(eth, 0).unwrap().to_string(), "m/44'/60'/0'/0/0");
        assert_eq!(resolve_path(eth, 7).unwrap().to_string(), "m/44'/60'/0'/0/7");

        let btc = chain::get("BTC").unwrap();
        assert_eq!(resolve_path(btc, 1).unwrap().to_string(), "m/84'/0'/0'/0/1");
    }

    #[test]
    fn test_ed25519_path_is_fully_hardened() {
        let icp = chain::get("ICP").unwrap().with_curve(CurveFamily::Ed25519).unwrap();
        let path = resolve_path(&icp, 3).unwrap();
        assert_eq!(path.to_string(), "m/44'/223'/0'/0'/3'");
        assert!(path.is_fully_hardened());
    }

    #[test]
    fn test_fallback_path() {
        let sol = chain::fallback("SOL");
        assert_eq!(resolve_path(&sol, 0).unwrap().to_string(), "m/44'/501'/0'/0/0");
    }

    #[test]
    fn test_account_bounds() {
        let eth = chain::get("ETH").unwrap();
        assert!(resolve_path(eth, 0x7fff_ffff).is_ok());
        assert!(matches!(
            resolve_path(eth, 0x8000_0000),
            Err(Error::InvalidAccountIndex(0x8000_0000))
        ));
        assert!(matches!(
            resolve_junctions(u32::MAX),
            Err(Error::InvalidAccountIndex(_))
        ));
    }

    #[test]
    fn test_sr25519_has_no_bip32_path() {
        let dot = chain::get("DOT").unwrap();
        assert!(matches!(resolve_path(dot, 0), Err(Error::UnsupportedDerivation(_))));
    }

    #[test]
    fn test_junctions() {
        assert!(resolve_junctions(0).unwrap().is_empty());
        assert_eq!(resolve_junctions(2).unwrap(), vec![DeriveJunction::hard("2")]);
        assert_eq!(junction_path(0), "");
        assert_eq!(junction_path(2), "//2");
    }
}
