// Copyright 2025-present Agora Platform Contributors
// SPDX-License-Identifier: Apache-2.0

//! Terminal output formatting for the CLI.

use crate::snapshot::TenantSnapshot;
use std::fmt::Write as _;

/// Human-readable snapshot statistics for `inspect`.
pub fn snapshot_summary(snapshot: &TenantSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "tenant            {}", snapshot.tenant());
    let _ = writeln!(out, "version           {}", snapshot.version);
    let _ = writeln!(out, "documents         {}", snapshot.index.total_docs());
    let _ = writeln!(out, "indexed terms     {}", snapshot.index.terms.len());
    let _ = writeln!(out, "vocabulary size   {}", snapshot.vocabulary.len());
    let _ = writeln!(out, "popular queries   {}", snapshot.popular_queries.len());
    let _ = write!(out, "affinity profiles {}", snapshot.affinities.len());
    out
}
