use std::process::ExitCode;

use clap::{Parser, Subcommand};
use hashscan::cmd;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find k-mers in sequence files that hash to values from a hash list
    Hash2kmer(cmd::Hash2kmerCMD),
    /// Filter a hash list down to a size-limited sketch
    Hash2sketch(cmd::Hash2sketchCMD),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Hash2kmer(mut cmd) => cmd.try_execute(),
        Commands::Hash2sketch(mut cmd) => cmd.try_execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    return ExitCode::SUCCESS;
}
