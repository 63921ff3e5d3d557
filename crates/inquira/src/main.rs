// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inquira - an AI-powered real estate inquiry assistant.
//!
//! This is the binary entry point for the Inquira service.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod ingest;
mod serve;

/// Inquira - an AI-powered real estate inquiry assistant.
#[derive(Parser, Debug)]
#[command(name = "inquira", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Inquira HTTP service.
    Serve,
    /// Ingest a listings CSV into the retrieval index.
    Ingest {
        /// Path to the listings CSV file.
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match inquira_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            inquira_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Ingest { file }) => ingest::run_ingest(config, &file).await,
        None => {
            println!("inquira: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
