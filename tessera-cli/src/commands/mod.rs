//! CLI command definitions and handlers.

mod chains;
mod derive;
mod mnemonic;

pub use chains::ChainsCommand;
use clap::{ArgAction, Parser, Subcommand};
pub use derive::DeriveCommand;
pub use mnemonic::MnemonicCommand;

/// Tessera - derive multi-chain wallet addresses from one mnemonic.
#[derive(Parser)]
#[command(name = "tessera")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Derive wallets for a chain symbol.
    #[command(alias = "d")]
    Derive(DeriveCommand),

    /// List the registered chains.
    Chains(ChainsCommand),

    /// Mnemonic utilities.
    #[command(alias = "m")]
    Mnemonic(MnemonicCommand),
}

/// Curve selector for command-line flags.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliCurve {
    /// secp256k1 (BIP-32).
    Secp256k1,
    /// ed25519 (SLIP-0010).
    Ed25519,
    /// sr25519 (substrate).
    Sr25519,
}

impl From<CliCurve> for tessera_wallet::CurveFamily {
    fn from(curve: CliCurve) -> Self {
        match curve {
            CliCurve::Secp256k1 => Self::Secp256k1,
            CliCurve::Ed25519 => Self::Ed25519,
            CliCurve::Sr25519 => Self::Sr25519,
        }
    }
}
