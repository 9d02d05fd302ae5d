//! Featurebound CLI - find the smallest feature subset meeting an R² goal.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Featurebound - minimum feature subsets by branch and bound
#[derive(Parser, Debug)]
#[command(name = "featurebound")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the greedy baseline and the exact search, then export results
    Run(commands::run::RunArgs),

    /// Show the feature universe of a dataset without searching
    Inspect {
        /// CSV file with a header row
        #[arg(short, long)]
        data: PathBuf,

        /// Target column name
        #[arg(short, long, default_value = "quality")]
        target: String,

        /// Columns never used as features
        #[arg(short, long, default_value = "Id", value_delimiter = ',')]
        exclude: Vec<String>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Run(run_args) => commands::run::execute(run_args),
        Commands::Inspect {
            data,
            target,
            exclude,
        } => commands::inspect::execute(data, target, exclude),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
