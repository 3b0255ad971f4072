//! SLIP-44 coin types for unregistered symbols.
//!
//! Reference: https://github.com/satoshilabs/slips/blob/master/slip-0044.md

/// Coin type used when a symbol is not in the table (Ethereum).
pub const DEFAULT_COIN_TYPE: u32 = 60;

/// One registered coin type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slip44Entry {
    /// Coin type (unhardened).
    pub coin_type: u32,
    /// Ticker symbol.
    pub symbol: &'static str,
    /// Coin name.
    pub name: &'static str,
}

const fn entry(coin_type: u32, symbol: &'static str, name: &'static str) -> Slip44Entry {
    Slip44Entry {
        coin_type,
        symbol,
        name,
    }
}

/// A subset of the SLIP-44 registry, ordered by coin type.
#[rustfmt::skip]
pub static SLIP44: &[Slip44Entry] = &[
    entry(0, "BTC", "Bitcoin"),
    entry(2, "LTC", "Litecoin"),
    entry(3, "DOGE", "Dogecoin"),
    entry(4, "RDD", "Reddcoin"),
    entry(5, "DASH", "Dash"),
    entry(6, "PPC", "Peercoin"),
    entry(7, "NMC", "Namecoin"),
    entry(14, "VIA", "Viacoin"),
    entry(20, "DGB", "DigiByte"),
    entry(22, "MONA", "Monacoin"),
    entry(28, "VTC", "Vertcoin"),
    entry(42, "DCR", "Decred"),
    entry(43, "XEM", "NEM"),
    entry(57, "SYS", "Syscoin"),
    entry(60, "ETH", "Ethereum"),
    entry(61, "ETC", "Ethereum Classic"),
    entry(74, "ICX", "ICON"),
    entry(77, "XVG", "Verge"),
    entry(111, "ARK", "ARK"),
    entry(118, "ATOM", "Cosmos Hub"),
    entry(121, "ZEN", "Horizen"),
    entry(128, "XMR", "Monero"),
    entry(133, "ZEC", "Zcash"),
    entry(134, "LSK", "Lisk"),
    entry(141, "KMD", "Komodo"),
    entry(144, "XRP", "Ripple"),
    entry(145, "BCH", "Bitcoin Cash"),
    entry(148, "XLM", "Stellar"),
    entry(156, "BTG", "Bitcoin Gold"),
    entry(165, "NANO", "Nano"),
    entry(175, "RVN", "Ravencoin"),
    entry(194, "EOS", "EOS"),
    entry(195, "TRX", "Tron"),
    entry(223, "ICP", "Internet Computer"),
    entry(236, "BSV", "Bitcoin SV"),
    entry(283, "ALGO", "Algorand"),
    entry(304, "IOTX", "IoTeX"),
    entry(313, "ZIL", "Zilliqa"),
    entry(330, "LUNA", "Terra"),
    entry(354, "DOT", "Polkadot"),
    entry(397, "NEAR", "NEAR Protocol"),
    entry(434, "KSM", "Kusama"),
    entry(459, "KAVA", "Kava"),
    entry(461, "FIL", "Filecoin"),
    entry(501, "SOL", "Solana"),
    entry(508, "EGLD", "MultiversX"),
    entry(539, "FLOW", "Flow"),
    entry(637, "APT", "Aptos"),
    entry(714, "BNB", "Binance"),
    entry(784, "SUI", "Sui"),
    entry(818, "VET", "VeChain"),
    entry(888, "NEO", "NEO"),
    entry(931, "RUNE", "THORChain"),
    entry(966, "MATIC", "Polygon"),
    entry(1023, "ONE", "Harmony"),
    entry(1729, "XTZ", "Tezos"),
    entry(1815, "ADA", "Cardano"),
    entry(9000, "AVAX", "Avalanche"),
    entry(52752, "CELO", "Celo"),
];

/// Case-insensitive lookup by symbol.
pub fn find(symbol: &str) -> Option<&'static Slip44Entry> {
    SLIP44
        .iter()
        .find(|entry| entry.symbol.eq_ignore_ascii_case(symbol))
}

/// Coin type for `symbol`, or [`DEFAULT_COIN_TYPE`] when unknown.
pub fn coin_type(symbol: &str) -> u32 {
    find(symbol).map_or(DEFAULT_COIN_TYPE, |entry| entry.coin_type)
}
