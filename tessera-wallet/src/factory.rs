//! Wallet construction.
//!
//! `create` runs a fixed pipeline: resolve the chain profile, derive the
//! seed, resolve the path, derive the key, encode the address and bind the
//! signer. Each stage fails fast with a typed error; no partial wallet is
//! ever returned.

use core::fmt;

use tessera::{Error, Result, Seed};
use tessera_bip32::ExtendedPrivateKey;
use tessera_slip10::DerivedKey;
use tessera_sr25519::Sr25519Keypair;
use zeroize::Zeroizing;

use crate::address::{PublicKey, encode_address, principal_for};
use crate::chain::{self, AddressFormat, ChainProfile, CurveFamily};
use crate::path::{junction_path, resolve_junctions, resolve_path};
use crate::principal::der_encode_ed25519;
use crate::signer::Signer;
use crate::wallet::{EcdsaWallet, Ed25519Wallet, Sr25519Wallet, Wallet, WalletCore};

/// Options for [`WalletFactory`].
#[derive(Clone, Default)]
pub struct WalletOptions {
    curve: Option<CurveFamily>,
    passphrase: Option<Zeroizing<String>>,
    skip_validation: bool,
}

impl WalletOptions {
    /// Defaults: the chain's own curve, no passphrase, mnemonic validated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a curve variant (e.g. ed25519 for ICP).
    #[must_use]
    pub fn with_curve(mut self, curve: CurveFamily) -> Self {
        self.curve = Some(curve);
        self
    }

    /// Use a BIP-39 passphrase (the substrate password for sr25519 chains).
    #[must_use]
    pub fn with_passphrase(mut self, passphrase: &str) -> Self {
        self.passphrase = Some(Zeroizing::new(passphrase.to_owned()));
        self
    }

    /// Skip BIP-39 wordlist and checksum validation for BIP-32 and
    /// SLIP-0010 chains.
    ///
    /// sr25519 chains derive from the mnemonic entropy and always validate.
    #[must_use]
    pub fn unchecked(mut self) -> Self {
        self.skip_validation = true;
        self
    }

    /// The requested curve variant.
    pub const fn curve(&self) -> Option<CurveFamily> {
        self.curve
    }

    /// Whether a passphrase is set.
    pub const fn has_passphrase(&self) -> bool {
        self.passphrase.is_some()
    }

    /// Whether mnemonic validation is skipped.
    pub const fn skips_validation(&self) -> bool {
        self.skip_validation
    }

    fn passphrase(&self) -> Option<&str> {
        self.passphrase.as_deref().map(String::as_str)
    }
}

impl fmt::Debug for WalletOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletOptions")
            .field("curve", &self.curve)
            .field("passphrase", &self.passphrase.as_ref().map(|_| "[REDACTED]"))
            .field("skip_validation", &self.skip_validation)
            .finish()
    }
}

/// Builds [`Wallet`]s from a mnemonic, a symbol and an account index.
///
/// Stateless: the factory holds only its options.
#[derive(Debug, Clone, Default)]
pub struct WalletFactory {
    options: WalletOptions,
}

impl WalletFactory {
    /// Factory with `options`.
    pub fn new(options: WalletOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub const fn options(&self) -> &WalletOptions {
        &self.options
    }

    /// Derive the wallet for `symbol` at `account` (0 when `None`).
    ///
    /// Unregistered symbols fall back to a best-effort secp256k1 wallet
    /// with a raw keccak hex address.
    pub fn create(&self, mnemonic: &str, symbol: &str, account: Option<u32>) -> Result<Wallet> {
        let account = account.unwrap_or(0);
        let profile = self.resolve_profile(symbol)?;
        tracing::debug!(
            symbol,
            account,
            curve = %profile.curve,
            fallback = profile.is_fallback(),
            "resolved chain profile"
        );

        let wallet = match profile.curve {
            CurveFamily::Secp256k1 => self.create_ecdsa(mnemonic, symbol, profile, account)?,
            CurveFamily::Ed25519 => self.create_ed25519(mnemonic, symbol, profile, account)?,
            CurveFamily::Sr25519 => self.create_sr25519(mnemonic, symbol, profile, account)?,
        };

        tracing::debug!(symbol, account, key_type = %wallet.key_type(), "wallet created");
        Ok(wallet)
    }

    /// Derive `count` consecutive accounts starting at `start`.
    pub fn create_many(
        &self,
        mnemonic: &str,
        symbol: &str,
        start: u32,
        count: u32,
    ) -> Result<Vec<Wallet>> {
        let end = start
            .checked_add(count)
            .ok_or(Error::InvalidAccountIndex(start))?;
        (start..end)
            .map(|account| self.create(mnemonic, symbol, Some(account)))
            .collect()
    }

    fn resolve_profile(&self, symbol: &str) -> Result<ChainProfile> {
        match (chain::lookup(symbol), self.options.curve) {
            (Some(profile), Some(curve)) => profile.with_curve(curve),
            (Some(profile), None) => Ok(*profile),
            (None, None | Some(CurveFamily::Secp256k1)) => Ok(chain::fallback(symbol)),
            (None, Some(curve)) => Err(Error::UnsupportedDerivation(format!(
                "unregistered symbol \"{symbol}\" only derives secp256k1 keys, not {curve}"
            ))),
        }
    }

    fn seed(&self, mnemonic: &str) -> Result<Seed> {
        let passphrase = self.options.passphrase();
        if self.options.skip_validation {
            Ok(Seed::from_mnemonic_unchecked(mnemonic, passphrase))
        } else {
            Seed::from_mnemonic(mnemonic, passphrase)
        }
    }

    fn create_ecdsa(
        &self,
        mnemonic: &str,
        symbol: &str,
        profile: ChainProfile,
        account: u32,
    ) -> Result<Wallet> {
        let seed = self.seed(mnemonic)?;
        let path = resolve_path(&profile, account)?;
        tracing::debug!(%path, "deriving secp256k1 key");
        let key = ExtendedPrivateKey::derive_from_seed(seed.as_bytes(), &path)?;

        let public_key = PublicKey::Secp256k1(key.verifying_key());
        let address = encode_address(&profile, &public_key)?;
        let principal = match profile.address_format {
            AddressFormat::CapabilityPrincipal => Some(principal_for(&public_key)?),
            _ => None,
        };
        let compressed = !profile.address_format.uses_uncompressed_key();

        Ok(Wallet::Ecdsa(EcdsaWallet {
            core: WalletCore {
                symbol: symbol.to_owned(),
                public_key_display: hex::encode(public_key.to_bytes(compressed)),
                signer: Signer::Ecdsa(key.into_signer(profile.prehash())),
                profile,
                address,
                public_key,
            },
            path,
            principal,
        }))
    }

    fn create_ed25519(
        &self,
        mnemonic: &str,
        symbol: &str,
        profile: ChainProfile,
        account: u32,
    ) -> Result<Wallet> {
        let seed = self.seed(mnemonic)?;
        let path = resolve_path(&profile, account)?;
        tracing::debug!(%path, "deriving ed25519 key");
        let key = DerivedKey::derive_from_seed(seed.as_bytes(), &path)?;

        let raw = key.public_key();
        let public_key = PublicKey::Ed25519(raw);
        let address = encode_address(&profile, &public_key)?;
        let (principal, public_key_display) = match profile.address_format {
            AddressFormat::CapabilityPrincipal => (
                Some(principal_for(&public_key)?),
                hex::encode(der_encode_ed25519(&raw)?),
            ),
            _ => (None, hex::encode(raw)),
        };

        Ok(Wallet::Ed25519(Ed25519Wallet {
            core: WalletCore {
                symbol: symbol.to_owned(),
                signer: Signer::Ed25519(key.into_signer()),
                profile,
                address,
                public_key,
                public_key_display,
            },
            path,
            principal,
        }))
    }

    fn create_sr25519(
        &self,
        mnemonic: &str,
        symbol: &str,
        profile: ChainProfile,
        account: u32,
    ) -> Result<Wallet> {
        let AddressFormat::Ss58 { network } = profile.address_format else {
            return Err(Error::UnsupportedDerivation(format!(
                "{} has no SS58 network for sr25519 keys",
                profile.symbol
            )));
        };
        let root = Sr25519Keypair::from_phrase(mnemonic, self.options.passphrase())?;
        let junctions = resolve_junctions(account)?;
        let path = junction_path(account);
        tracing::debug!(junctions = %path, network, "deriving sr25519 key");

        let keypair = root.derive(&junctions);
        let raw = keypair.public_key();
        let public_key = PublicKey::Sr25519(raw);
        let address = encode_address(&profile, &public_key)?;

        Ok(Wallet::Sr25519(Sr25519Wallet {
            core: WalletCore {
                symbol: symbol.to_owned(),
                public_key_display: format!("0x{}", hex::encode(raw)),
                signer: Signer::Sr25519(keypair.into_signer()),
                profile,
                address,
                public_key,
            },
            network,
            junctions: path,
        }))
    }
}

/// Derive a wallet with default options.
pub fn create_wallet(mnemonic: &str, symbol: &str, account: Option<u32>) -> Result<Wallet> {
    WalletFactory::default().create(mnemonic, symbol, account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::principal::der_encode_secp256k1;
    use crate::signer::verify;
    use crate::wallet::KeyType;

    const M1: &str = "open jelly jeans corn ketchup supreme brief element armed lens vault weather original scissors rug priority vicious lesson raven spot gossip powder person volcano";
    const M2: &str = "illness estate carpet dog social garment fan maximum mansion goose panda public";

    fn address(symbol: &str, account: u32) -> String {
        create_wallet(M1, symbol, Some(account))
            .unwrap()
            .address()
            .to_owned()
    }

    #[test]
    fn test_ethereum() {
        let wallet = create_wallet(M1, "ETH", None).unwrap();
        assert_eq!(wallet.address(), "0x29bc7f4bfc7301b3ddb5c9c4348360fc0ad52ca8");
        assert_eq!(wallet.key_type(), KeyType::Ecdsa);
        assert_eq!(wallet.derivation(), "m/44'/60'/0'/0/0");
        assert_eq!(
            wallet.public_key(),
            "0475aa060fdb2433f3b04d0a208e745463792047684608959cf6f47a08daba9de08a1f06ee6b3d747eb37210e0d4309284cc7f528025414929d7c90d6607b95314"
        );
        assert_eq!(address("ETH", 1), "0x258b1bce7cc0b78e77cfc51f6224fdde08664968");
    }

    #[test]
    fn test_evm_aliases_share_ethereum_addresses() {
        for symbol in ["MATIC", "BSC", "AVAC"] {
            assert_eq!(address(symbol, 0), "0x29bc7f4bfc7301b3ddb5c9c4348360fc0ad52ca8");
        }
    }

    #[test]
    fn test_passphrase() {
        let factory = WalletFactory::new(WalletOptions::new().with_passphrase("TREZOR"));
        let wallet = factory.create(M1, "ETH", None).unwrap();
        assert_eq!(wallet.address(), "0xb9a139ef69b54ff4d1a0497da26e1bc9d4ea6778");
    }

    #[test]
    fn test_bitcoin_family() {
        let btc = create_wallet(M1, "BTC", None).unwrap();
        assert_eq!(btc.address(), "bc1qrkw53s0ejqm9ze2s375nu94zjh78dxwkuuas35");
        assert_eq!(btc.desc(), Some("bech32 address"));
        assert_eq!(btc.derivation(), "m/84'/0'/0'/0/0");
        assert_eq!(btc.public_key().len(), 66);

        assert_eq!(address("BTC", 1), "bc1qmv74ug8wt5rm0wxhluuuzlgzfq3akphh79eake");
        assert_eq!(address("LTC", 0), "ltc1ql8lzfwvetxc4f8auaymrw2px43n4qx8c7wrr98");
        assert_eq!(address("DOGE", 0), "DDiV3gzT8uereLM1VscymdoSAWiRE6LANy");
        assert_eq!(address("BTG", 0), "GYxq4bsS9ze6rBpzHgDyy2Bx66zX45QCjN");
        assert_eq!(address("ZEC", 0), "t1Yw5LbWsZ3nCpPuCYwWtghGSPqh142xvAW");
        assert_eq!(address("DASH", 0), "XwDxyixDTmm71Fv3iKo9fdmvaERaBnpJTo");
        assert_eq!(address("BCH", 0), "qqp5y90849ttaty408kmzzl5qgf3e7plfv4prx08ls");
    }

    #[test]
    fn test_bech32_account_chains() {
        let bnb = create_wallet(M1, "BNB", None).unwrap();
        assert_eq!(bnb.address(), "bnb17vszy3374ucgylh9utt0n53a020wsqn885nz36");
        assert_eq!(bnb.desc(), Some("Binance chain network address"));

        assert_eq!(address("ATOM", 0), "cosmos18duw95nsvazj3v77w57j2ephmcgu89aw36483e");
        assert_eq!(address("RUNE", 0), "thor1srjmaduh33c627uryvc6qw4ek7rl0zf96n5yf7");
        assert_eq!(address("AVAX", 0), "X-avax1l5v3mtezh34tf4txg393fuh4va6kghvwczrr0c");
        assert_eq!(address("AVAP", 0), "P-avax1l5v3mtezh34tf4txg393fuh4va6kghvwczrr0c");
    }

    #[test]
    fn test_substrate() {
        let ksm = create_wallet(M1, "KSM", None).unwrap();
        assert_eq!(
            ksm.public_key(),
            "0x7806e3f1de6b8690b8eb57fded933c66f059993ba1d675f49ba3f94fac1f8425"
        );
        assert_eq!(ksm.address(), "FHhJyt9RgGin3yfYgdzaAu9MXBodkAuULpao6rGcEyHTscN");
        assert_eq!(ksm.key_type(), KeyType::Sr25519);
        assert!(ksm.path().is_none());

        let Wallet::Sr25519(inner) = &ksm else {
            panic!("expected an sr25519 wallet");
        };
        assert_eq!(inner.network(), 2);
        assert_eq!(inner.junctions(), "");

        assert_eq!(address("DOT", 0), "13iNnzoLf6XGTwAjjcswpNNJ4YuDXNus6TiKZjZfgXnJu1xD");
    }

    #[test]
    fn test_substrate_accounts_use_hard_junctions() {
        let first = create_wallet(M1, "DOT", Some(1)).unwrap();
        assert_eq!(first.derivation(), "//1");
        assert_ne!(first.address(), address("DOT", 0));
    }

    #[test]
    fn test_icp_secp256k1() {
        let wallet = create_wallet(M2, "ICP", None).unwrap();
        assert_eq!(wallet.key_type(), KeyType::Ecdsa);
        assert_eq!(
            wallet.public_key(),
            "04963ac190a31d91a06d575e33ac9bacb6540112fe1b95118032bcb9c2353bfa98c2053b7d363a67fede789ddff86745ff32534aabec285e63e7ec22e8fd4eb7d6"
        );
        assert_eq!(
            wallet.address(),
            "c24ea8ecf529a22c7a84754ecd0666b5e8d0bc5dc49fca1392c5874836e38265"
        );
        assert_eq!(
            wallet.principal().unwrap().to_text(),
            "6czsu-gsdpe-n2rm7-shibr-zokwz-zgjef-v5c2w-qhkns-rxgea-ljdwy-nae"
        );

        let second = create_wallet(M2, "ICP", Some(1)).unwrap();
        assert_eq!(
            second.public_key(),
            "04e46376b7a4bdddd93f8491b90cf34a83314f70f0fbde3bd0c398b98bd9c81cf691f4d5d8f1b6dbe50d2dd286df6ff9456245c83e062da3b958decda8346267b3"
        );
        assert_eq!(
            second.address(),
            "9db6d5d5b76f7239582ad14be2b6ded88bc3afc3f9df524ab49ac6a8367ca5f6"
        );

        assert_eq!(
            create_wallet(M1, "ICP", None).unwrap().address(),
            "02f2326544f2040d3985e31db5e7021402c541d3cde911cd20e951852ee4da47"
        );
        assert_eq!(
            create_wallet(M1, "ICP", Some(1)).unwrap().address(),
            "8a8861c41810197542313a309449e33d35915305ab9d3036c803ed235f7cd5b3"
        );
    }

    #[test]
    fn test_icp_ed25519_variant() {
        let factory = WalletFactory::new(WalletOptions::new().with_curve(CurveFamily::Ed25519));

        let wallet = factory.create(M2, "ICP", Some(0)).unwrap();
        assert_eq!(wallet.key_type(), KeyType::Ed25519);
        assert_eq!(
            wallet.public_key(),
            "302a300506032b65700321009984152489282b29e7ef8c1ac706f7928da681f20c52118f817f1ec25810c795"
        );
        assert_eq!(
            wallet.address(),
            "ab487baf0ddeb3a80ec5dbd3108f155c00a6ef55d91f6090c9400bbdb5585d23"
        );
        assert_eq!(wallet.derivation(), "m/44'/223'/0'/0'/0'");
        assert_eq!(
            wallet.principal().unwrap().to_string(),
            "gcc6d-xbzkw-s7ljz-4uofw-cbo72-r2f7f-d7rtu-tyxf5-adfsp-spehq-gae"
        );

        let wallet = factory.create(M1, "ICP", None).unwrap();
        assert_eq!(
            wallet.public_key(),
            "302a300506032b6570032100976b4e3c2795266dcef9aff849805e15889664c86e57d3e3c0f33f55e8d1c384"
        );
        assert_eq!(
            wallet.address(),
            "baf6d87d6abf34c7f937fe86764099c8002667397fc0b32237c0cb61fdd242c8"
        );
    }

    #[test]
    fn test_unregistered_symbol_falls_back() {
        let foo = create_wallet(M1, "FOO", None).unwrap();
        assert_eq!(foo.address(), "29bc7f4bfc7301b3ddb5c9c4348360fc0ad52ca8");
        assert_eq!(foo.symbol(), "FOO");
        assert_eq!(foo.key_type(), KeyType::Ecdsa);
        assert_eq!(foo.public_key().len(), 130);
        assert!(foo.profile().is_fallback());

        let sol = create_wallet(M1, "SOL", None).unwrap();
        assert_eq!(sol.address(), "6effa3c48754e8a9e5887caadc6a88b1d0e815aa");
        assert_eq!(sol.derivation(), "m/44'/501'/0'/0/0");

        // Registry lookups are case-sensitive, so "eth" takes the fallback.
        assert_eq!(address("eth", 0), "29bc7f4bfc7301b3ddb5c9c4348360fc0ad52ca8");
    }

    #[test]
    fn test_unsupported_curve_variant() {
        let factory = WalletFactory::new(WalletOptions::new().with_curve(CurveFamily::Ed25519));
        assert!(matches!(
            factory.create(M1, "ETH", None),
            Err(Error::UnsupportedDerivation(_))
        ));
        assert!(matches!(
            factory.create(M1, "FOO", None),
            Err(Error::UnsupportedDerivation(_))
        ));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            create_wallet("not a mnemonic", "ETH", None),
            Err(Error::InvalidMnemonic(_))
        ));
        assert!(matches!(
            create_wallet(M1, "ETH", Some(1 << 31)),
            Err(Error::InvalidAccountIndex(_))
        ));
        assert!(matches!(
            create_wallet(M1, "KSM", Some(u32::MAX)),
            Err(Error::InvalidAccountIndex(_))
        ));
    }

    #[test]
    fn test_unchecked_mnemonic() {
        let factory = WalletFactory::new(WalletOptions::new().unchecked());
        let checked = create_wallet(M1, "ETH", None).unwrap();
        assert_eq!(factory.create(M1, "ETH", None).unwrap().address(), checked.address());

        let loose = factory.create("any words at all", "BTC", None).unwrap();
        assert!(loose.address().starts_with("bc1q"));

        assert!(matches!(
            factory.create("any words at all", "DOT", None),
            Err(Error::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn test_sign_and_verify() {
        let icp_ed = WalletFactory::new(WalletOptions::new().with_curve(CurveFamily::Ed25519));
        let wallets = [
            create_wallet(M1, "ETH", None).unwrap(),
            create_wallet(M1, "BTC", None).unwrap(),
            create_wallet(M1, "KSM", None).unwrap(),
            icp_ed.create(M2, "ICP", None).unwrap(),
        ];
        for wallet in &wallets {
            let signature = wallet.sign(b"tessera").unwrap();
            assert!(wallet.verify(b"tessera", signature.as_bytes()), "{}", wallet.symbol());
            assert!(!wallet.verify(b"other", signature.as_bytes()), "{}", wallet.symbol());
        }
    }

    #[test]
    fn test_icp_signatures_verify_against_der_keys() {
        let icp_ed = WalletFactory::new(WalletOptions::new().with_curve(CurveFamily::Ed25519));

        let ed = icp_ed.create(M2, "ICP", None).unwrap();
        let signature = ed.sign(b"tessera").unwrap();
        let der = hex::decode(ed.public_key()).unwrap();
        assert!(verify(signature.scheme(), b"tessera", signature.as_bytes(), &der));

        let secp = create_wallet(M2, "ICP", None).unwrap();
        let signature = secp.sign(b"tessera").unwrap();
        let der = der_encode_secp256k1(&hex::decode(secp.public_key()).unwrap()).unwrap();
        assert!(verify(signature.scheme(), b"tessera", signature.as_bytes(), &der));
        assert!(!verify(signature.scheme(), b"other", signature.as_bytes(), &der));
    }

    #[test]
    fn test_create_many() {
        let factory = WalletFactory::default();
        let wallets = factory.create_many(M1, "ETH", 0, 2).unwrap();
        let addresses: Vec<_> = wallets.iter().map(Wallet::address).collect();
        assert_eq!(
            addresses,
            vec![
                "0x29bc7f4bfc7301b3ddb5c9c4348360fc0ad52ca8",
                "0x258b1bce7cc0b78e77cfc51f6224fdde08664968",
            ]
        );
        assert!(factory.create_many(M1, "ETH", u32::MAX, 2).is_err());
    }

    #[test]
    fn test_options_debug_redacts_passphrase() {
        let options = WalletOptions::new().with_passphrase("hunter2");
        assert!(!format!("{options:?}").contains("hunter2"));
        assert!(options.has_passphrase());
    }

    #[test]
    fn test_wallet_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Wallet>();
    }
}
