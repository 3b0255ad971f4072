//! Mnemonic utility commands.

use clap::{Args, Subcommand};
use colored::Colorize;

/// Mnemonic utility operations.
#[derive(Args)]
pub struct MnemonicCommand {
    #[command(subcommand)]
    command: MnemonicSubcommand,
}

#[derive(Subcommand)]
enum MnemonicSubcommand {
    /// Generate a new random mnemonic.
    New {
        /// Number of words (12, 15, 18, 21, or 24).
        #[arg(short, long, default_value = "12")]
        words: usize,
    },

    /// Check a mnemonic against the BIP-39 wordlist and checksum.
    Validate {
        /// BIP39 mnemonic phrase.
        #[arg(short, long)]
        mnemonic: String,
    },

    /// Expand 4+ letter word prefixes to full BIP-39 words.
    Expand {
        /// Abbreviated mnemonic phrase (e.g. "aban aban ... abou").
        #[arg(short, long)]
        mnemonic: String,
    },
}

impl MnemonicCommand {
    /// Execute the mnemonic command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        match self.command {
            MnemonicSubcommand::New { words } => {
                let phrase = tessera::mnemonic::generate(words)?;
                print_generated(&phrase);
            }
            MnemonicSubcommand::Validate { mnemonic } => {
                let result = tessera::mnemonic::parse(&mnemonic);
                print_validation(&mnemonic, result.is_ok());
                result?;
            }
            MnemonicSubcommand::Expand { mnemonic } => {
                let expanded = tessera::mnemonic::expand(&mnemonic)?;
                print_expanded(&mnemonic, &expanded);
            }
        }
        Ok(())
    }
}

#[rustfmt::skip]
fn print_generated(phrase: &str) {
    let words = phrase.split_whitespace().count();

    println!();
    println!("      {}        {words} words", "Words".cyan().bold());
    println!("      {}     {}", "Mnemonic".cyan().bold(), phrase.green());
    println!();
}

#[rustfmt::skip]
fn print_validation(phrase: &str, valid: bool) {
    let words = phrase.split_whitespace().count();
    let verdict = if valid { "valid".green() } else { "invalid".red() };

    println!();
    println!("      {}        {words} words", "Words".cyan().bold());
    println!("      {}       {verdict}", "Status".cyan().bold());
    println!();
}

#[rustfmt::skip]
fn print_expanded(input: &str, expanded: &str) {
    let valid = tessera::mnemonic::is_valid(expanded);
    let verdict = if valid { "valid".green() } else { "invalid".red() };

    println!();
    println!("      {}        {}", "Input".cyan().bold(), input);
    println!("      {}     {}", "Expanded".cyan().bold(), expanded.green());
    println!("      {}       {verdict}", "Status".cyan().bold());
    println!();
}
