// SPDX-License-Identifier: PMPL-1.0-or-later

//! Report generation module

pub mod diff;
pub mod formatter;
pub mod output;
pub mod stats;

use crate::catalog::CatalogStore;
use crate::check::{Level, LintReport};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub use formatter::ReportFormatter;
pub use output::ExportFormat;
pub use stats::CatalogStats;

/// Compute statistics for a loaded catalog
pub fn catalog_stats(store: &CatalogStore) -> CatalogStats {
    stats::catalog_stats(store.document())
}

/// Print statistics to console
pub fn print_stats(stats: &CatalogStats, per_context: bool) {
    ReportFormatter::new()
        .with_per_context(per_context)
        .print_stats(stats);
}

/// Print lint issues to console
pub fn print_lint(report: &LintReport, min_level: Level) {
    ReportFormatter::new().print_lint(report, min_level);
}

/// Export a catalog to file in the given format
pub fn save_export<P: AsRef<Path>>(store: &CatalogStore, format: ExportFormat, path: P) -> Result<()> {
    let path = path.as_ref();
    let content = format.serialize(store)?;
    fs::write(path, content).with_context(|| format!("writing export {}", path.display()))?;
    Ok(())
}
