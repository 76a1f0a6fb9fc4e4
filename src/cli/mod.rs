// Copyright 2025-present Agora Platform Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the agora-search command-line interface.
//!
//! Three subcommands: `index` to build tenant snapshots from JSON content
//! dumps, `search` to run the full pipeline against a snapshot file, and
//! `inspect` to examine snapshot structure. This is the same core the web
//! application embeds - the CLI exists so operators can reproduce a
//! production query locally against a copied snapshot.

pub mod display;

use crate::config::SearchConfig;
use crate::snapshot::{SnapshotStore, TenantSnapshot};
use crate::search::{SearchEngine, SearchRequest};
use crate::types::{ContentDoc, TenantId, UserId};
use crate::vocab::PopularQuery;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "agora-search",
    about = "Query processing and ranking core for multi-tenant community platforms",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a tenant snapshot from a JSON content dump
    Index {
        /// Input JSON file: an array of content documents
        #[arg(short, long)]
        input: PathBuf,

        /// Output snapshot file
        #[arg(short, long)]
        output: PathBuf,

        /// Tenant the content belongs to; mismatched documents abort the build
        #[arg(short, long)]
        tenant: String,

        /// Optional JSON file with the tenant's popular-query log
        #[arg(long)]
        popular: Option<PathBuf>,

        /// Use the parallel index builder (worth it above ~1k documents)
        #[arg(long)]
        parallel: bool,
    },

    /// Run a search against a snapshot file and print the response as JSON
    Search {
        /// Path to a snapshot file produced by `index`
        snapshot: PathBuf,

        /// Search query (may be empty to exercise the empty-query path)
        query: String,

        /// Maximum number of results to return
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Numeric user id for personalized ranking
        #[arg(short, long)]
        user: Option<u64>,

        /// Optional JSON config overriding pipeline defaults
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print snapshot statistics
    Inspect {
        /// Path to a snapshot file
        snapshot: PathBuf,
    },
}

/// CLI-level failure: bad files, bad JSON, tenant mismatches.
#[derive(Debug)]
pub struct CliError(String);

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for CliError {}

impl CliError {
    fn new(message: impl Into<String>) -> Self {
        CliError(message.into())
    }
}

/// Read a file as UTF-8, dropping unparseable bytes instead of failing.
fn read_lossy(path: &Path) -> Result<String, CliError> {
    let bytes = fs::read(path)
        .map_err(|e| CliError::new(format!("cannot read {}: {}", path.display(), e)))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn load_snapshot(path: &Path) -> Result<TenantSnapshot, CliError> {
    let text = read_lossy(path)?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::new(format!("malformed snapshot {}: {}", path.display(), e)))
}

/// Build and write a snapshot from a content dump.
pub fn run_index(
    input: &Path,
    output: &Path,
    tenant: &str,
    popular: Option<&Path>,
    parallel: bool,
) -> Result<(), CliError> {
    let tenant = TenantId::new(tenant);

    let text = read_lossy(input)?;
    let docs: Vec<ContentDoc> = serde_json::from_str(&text)
        .map_err(|e| CliError::new(format!("malformed content dump {}: {}", input.display(), e)))?;

    let popular_queries: Vec<PopularQuery> = match popular {
        Some(path) => {
            let text = read_lossy(path)?;
            serde_json::from_str(&text).map_err(|e| {
                CliError::new(format!("malformed popular-query log {}: {}", path.display(), e))
            })?
        }
        None => Vec::new(),
    };

    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(format!("indexing {} documents", docs.len()));
    bar.enable_steady_tick(Duration::from_millis(100));

    let index = if parallel {
        crate::index::build_tenant_index_parallel(&tenant, &docs)
    } else {
        crate::index::build_tenant_index(&tenant, &docs)
    }
    .map_err(|e| CliError::new(e.to_string()))?;

    let vocabulary = index.vocabulary();
    let snapshot = TenantSnapshot {
        version: 1,
        index,
        vocabulary,
        popular_queries,
        affinities: HashMap::new(),
    };

    let json = serde_json::to_string(&snapshot)
        .map_err(|e| CliError::new(format!("cannot serialize snapshot: {}", e)))?;
    fs::write(output, json)
        .map_err(|e| CliError::new(format!("cannot write {}: {}", output.display(), e)))?;

    bar.finish_with_message(format!(
        "wrote {} ({} docs, {} terms)",
        output.display(),
        snapshot.index.total_docs(),
        snapshot.index.terms.len()
    ));
    Ok(())
}

/// Load a snapshot and run one query through the full pipeline.
pub fn run_search(
    snapshot_path: &Path,
    query: &str,
    limit: usize,
    user: Option<u64>,
    config_path: Option<&Path>,
) -> Result<(), CliError> {
    let snapshot = load_snapshot(snapshot_path)?;
    let tenant = snapshot.tenant().clone();

    let config: SearchConfig = match config_path {
        Some(path) => {
            let text = read_lossy(path)?;
            serde_json::from_str(&text)
                .map_err(|e| CliError::new(format!("malformed config {}: {}", path.display(), e)))?
        }
        None => SearchConfig::with_default_budget(),
    };

    let store = Arc::new(SnapshotStore::new());
    store.publish(snapshot);

    let engine = SearchEngine::new(store, config);
    let response = engine
        .search(&SearchRequest {
            tenant,
            query: query.to_string(),
            limit,
            user: user.map(UserId),
        })
        .map_err(|e| CliError::new(e.to_string()))?;

    let json = serde_json::to_string_pretty(&response)
        .map_err(|e| CliError::new(format!("cannot serialize response: {}", e)))?;
    println!("{}", json);
    Ok(())
}

/// Print snapshot statistics.
pub fn run_inspect(snapshot_path: &Path) -> Result<(), CliError> {
    let snapshot = load_snapshot(snapshot_path)?;
    println!("{}", display::snapshot_summary(&snapshot));
    Ok(())
}
