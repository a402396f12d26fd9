// SPDX-License-Identifier: PMPL-1.0-or-later

//! Console formatting for statistics and lint results

use crate::check::{Level, LintReport};
use crate::report::stats::CatalogStats;
use colored::*;

pub struct ReportFormatter {
    per_context: bool,
}

impl ReportFormatter {
    pub fn new() -> Self {
        Self { per_context: false }
    }

    pub fn with_per_context(mut self, per_context: bool) -> Self {
        self.per_context = per_context;
        self
    }

    pub fn print_stats(&self, stats: &CatalogStats) {
        println!("\n{}", "=== TSCAT CATALOG STATISTICS ===".bold().cyan());
        println!();
        println!("  Language: {}", stats.language.as_deref().unwrap_or("(none)"));
        println!("  Contexts: {}", stats.contexts);
        println!("  Messages: {}", stats.counts.messages);
        println!("    Finished: {}", stats.counts.finished.to_string().green());
        println!("    Unfinished: {}", colour_count(stats.counts.unfinished));
        println!("    Obsolete: {}", stats.counts.obsolete);
        println!("  Completion: {}", colour_completion(stats.completion));

        if self.per_context {
            println!();
            println!("{}", "PER CONTEXT".bold().yellow());
            for context in &stats.per_context {
                println!(
                    "  {:28} {:>4}/{:<4} {}",
                    context.name,
                    context.counts.finished,
                    context.counts.finished + context.counts.unfinished,
                    colour_completion(context.completion)
                );
            }
        }
        println!();
    }

    /// Print issues at or above `min_level`, then a summary line.
    pub fn print_lint(&self, report: &LintReport, min_level: Level) {
        for issue in report.at_least(min_level) {
            let tag = match issue.level {
                Level::Error => issue.level.tag().red().bold(),
                Level::Warning => issue.level.tag().yellow().bold(),
                Level::Info => issue.level.tag().blue(),
            };
            println!(
                "  [{}] {}: {:?}: {}",
                tag, issue.context, issue.source, issue.detail
            );
        }

        let summary = format!(
            "{} error(s), {} warning(s), {} unfinished",
            report.count(Level::Error),
            report.count(Level::Warning),
            report.count(Level::Info)
        );
        if report.has_errors() {
            println!("\n{}", summary.red().bold());
        } else {
            println!("\n{}", summary.green());
        }
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn colour_count(count: usize) -> ColoredString {
    if count == 0 {
        count.to_string().green()
    } else {
        count.to_string().yellow()
    }
}

fn colour_completion(percent: f64) -> ColoredString {
    let text = format!("{:.1}%", percent);
    if percent >= 100.0 {
        text.green().bold()
    } else if percent >= 90.0 {
        text.yellow()
    } else {
        text.red()
    }
}
