//! WPM CLI
//!
//! Command-line interface over the multilingual codec and merge engine

use clap::{Parser, Subcommand};
use wpm_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "wpm")]
#[command(about = "WPM - Multilingual value codec and merge engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Report whether a flat value already carries the multilingual marker
    Detect(commands::inspect::DetectArgs),
    /// Decode a flat value into its multilingual tree
    Decode(commands::inspect::DecodeArgs),
    /// Encode a multilingual tree back into a flat value
    Encode(commands::inspect::EncodeArgs),
    /// Merge a single-language edit into a stored value
    Merge(commands::merge::MergeArgs),
    /// Collapse a multilingual value to one language
    Translate(commands::translate::TranslateArgs),
}

fn main() {
    init(Profile::Development);
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Detect(args) => commands::inspect::execute_detect(args),
        Commands::Decode(args) => commands::inspect::execute_decode(args),
        Commands::Encode(args) => commands::inspect::execute_encode(args),
        Commands::Merge(args) => commands::merge::execute(args),
        Commands::Translate(args) => commands::translate::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
