// Copyright 2025-present Agora Platform Contributors
// SPDX-License-Identifier: Apache-2.0

use agora_search::cli::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Index {
            input,
            output,
            tenant,
            popular,
            parallel,
        } => agora_search::cli::run_index(&input, &output, &tenant, popular.as_deref(), parallel),
        Commands::Search {
            snapshot,
            query,
            limit,
            user,
            config,
        } => agora_search::cli::run_search(&snapshot, &query, limit, user, config.as_deref()),
        Commands::Inspect { snapshot } => agora_search::cli::run_inspect(&snapshot),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
