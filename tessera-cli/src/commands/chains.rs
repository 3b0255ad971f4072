//! Chain registry listing.

use clap::Args;
use colored::Colorize;
use tessera_wallet::{CurveFamily, chain};

use super::CliCurve;

/// List the registered chains.
#[derive(Args)]
pub struct ChainsCommand {
    /// Only show chains that can derive on this curve.
    #[arg(long)]
    curve: Option<CliCurve>,
}

impl ChainsCommand {
    /// Execute the chains command.
    pub fn execute(self) {
        let filter: Option<CurveFamily> = self.curve.map(Into::into);

        println!();
        println!(
            "      {}",
            format!("{:<7}{:<20}{:<11}{:>6}  {:<12}{}", "SYMBOL", "NAME", "CURVE", "COIN", "FORMAT", "VARIANTS")
                .cyan()
                .bold()
        );
        for profile in chain::all() {
            if let Some(curve) = filter {
                if profile.curve != curve && !profile.variants.contains(&curve) {
                    continue;
                }
            }
            let variants: Vec<&str> = profile.variants.iter().map(|c| c.name()).collect();
            println!(
                "      {}{:<20}{:<11}{:>6}  {:<12}{}",
                format!("{:<7}", profile.symbol).green(),
                profile.name,
                profile.curve.name(),
                profile.coin_type,
                profile.address_format.name(),
                variants.join(", ").dimmed()
            );
        }
        println!();
        println!(
            "      {}",
            "Other symbols derive a best-effort secp256k1 wallet using their SLIP-44 coin type.".dimmed()
        );
        println!();
    }
}
