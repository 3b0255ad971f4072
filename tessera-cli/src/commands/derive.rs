//! Wallet derivation command.

use clap::Args;
use colored::Colorize;
use tessera_wallet::{Wallet, WalletFactory, WalletOptions};

use super::CliCurve;

/// Derive wallets for a chain symbol.
#[derive(Args)]
pub struct DeriveCommand {
    /// Chain symbol, matched case-sensitively (BTC, ETH, KSM, ICP, ...).
    #[arg(short, long)]
    symbol: String,

    /// BIP39 mnemonic phrase. Unambiguous 4+ letter prefixes are expanded.
    #[arg(short, long)]
    mnemonic: String,

    /// BIP39 passphrase (the password for sr25519 chains).
    #[arg(short, long, env = "TESSERA_PASSPHRASE", hide_env_values = true)]
    passphrase: Option<String>,

    /// First account index.
    #[arg(short, long, default_value = "0")]
    account: u32,

    /// Number of consecutive accounts to derive.
    #[arg(short, long, default_value = "1")]
    count: u32,

    /// Curve variant, for chains that offer one (e.g. ed25519 for ICP).
    #[arg(long)]
    curve: Option<CliCurve>,

    /// Skip BIP39 checksum validation.
    #[arg(long)]
    unchecked: bool,

    /// Sign this UTF-8 message with each derived key.
    #[arg(long)]
    sign: Option<String>,

    /// Display QR code for each address.
    #[arg(long)]
    qr: bool,
}

impl DeriveCommand {
    /// Execute the derive command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        let mnemonic = if self.unchecked {
            self.mnemonic.clone()
        } else {
            tessera::mnemonic::expand(&self.mnemonic)?
        };

        let mut options = WalletOptions::new();
        if let Some(curve) = self.curve {
            options = options.with_curve(curve.into());
        }
        if let Some(passphrase) = self.passphrase.as_deref() {
            options = options.with_passphrase(passphrase);
        }
        if self.unchecked {
            options = options.unchecked();
        }

        let factory = WalletFactory::new(options);
        let wallets = factory.create_many(&mnemonic, &self.symbol, self.account, self.count)?;
        print_wallets(&factory, &wallets, self.sign.as_deref(), self.qr)
    }
}

#[rustfmt::skip]
fn print_wallets(
    factory: &WalletFactory,
    wallets: &[Wallet],
    message: Option<&str>,
    show_qr: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(first) = wallets.first() else {
        return Ok(());
    };
    let profile = first.profile();

    println!();
    println!("      {}       {} ({})", "Symbol".cyan().bold(), first.symbol(), profile.name);
    println!("      {}        {}", "Curve".cyan().bold(), profile.curve);
    if factory.options().has_passphrase() {
        println!("      {}   {}", "Passphrase".cyan().bold(), "(set)".dimmed());
    }
    if profile.is_fallback() {
        println!(
            "      {}       {}",
            "Notice".yellow().bold(),
            format!("unregistered symbol, best-effort secp256k1 on coin type {}", profile.coin_type).yellow()
        );
    }
    println!();

    for (i, wallet) in wallets.iter().enumerate() {
        if wallets.len() > 1 {
            println!("      {}        {}", "Index".cyan().bold(), format!("[{i}]").dimmed());
        }
        match wallet.path() {
            Some(path) => println!("      {}         {}", "Path".cyan().bold(), path),
            None => println!("      {}    {}", "Junctions".cyan().bold(), display_junctions(&wallet.derivation())),
        }
        println!("      {}      {}", "Address".cyan().bold(), wallet.address().green());
        println!("      {}   {}", "Public Key".cyan().bold(), wallet.public_key().dimmed());
        if let Some(principal) = wallet.principal() {
            println!("      {}    {}", "Principal".cyan().bold(), principal);
        }
        println!("      {}         {}", "Type".cyan().bold(), wallet.key_type());
        if let Some(desc) = wallet.desc() {
            println!("      {}         {}", "Desc".cyan().bold(), desc.dimmed());
        }
        if let Some(message) = message {
            let signature = wallet.sign(message.as_bytes())?;
            println!("      {}    {}", "Signature".cyan().bold(), signature.to_hex());
        }
        if show_qr {
            crate::qr::print(wallet.address());
        }
        if i < wallets.len() - 1 {
            println!();
        }
    }
    println!();

    Ok(())
}

fn display_junctions(junctions: &str) -> String {
    if junctions.is_empty() {
        "(none)".to_owned()
    } else {
        junctions.to_owned()
    }
}
