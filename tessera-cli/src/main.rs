//! Tessera - derive multi-chain wallet addresses from one mnemonic.

mod commands;
mod logging;
pub mod qr;

use clap::Parser;
use commands::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Derive(cmd) => cmd.execute()?,
        Commands::Chains(cmd) => cmd.execute(),
        Commands::Mnemonic(cmd) => cmd.execute()?,
    }
    Ok(())
}
