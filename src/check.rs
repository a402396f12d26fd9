// SPDX-License-Identifier: PMPL-1.0-or-later

//! Catalog lint: problems a translator should fix before shipping.
//!
//! Checks run per message and only look at what a lookup would serve, so
//! unfinished entries are reported once (as info) and not checked further.

use crate::format::placeholders;
use crate::types::{Catalog, Message, Translation};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl Level {
    pub fn tag(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warning => "WARN",
            Level::Error => "ERR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Translation uses a different set of `%N` placeholders than the source.
    PlaceholderMismatch,
    /// Source has a keyboard accelerator (`&File`) and the translation not,
    /// or the other way round.
    AcceleratorMismatch,
    /// Marked finished but nothing was translated.
    EmptyTranslation,
    /// Same source and comment twice in one context; only the first is used.
    DuplicateSource,
    Unfinished,
}

impl IssueKind {
    fn default_level(&self) -> Level {
        match self {
            IssueKind::PlaceholderMismatch | IssueKind::EmptyTranslation => Level::Error,
            IssueKind::AcceleratorMismatch | IssueKind::DuplicateSource => Level::Warning,
            IssueKind::Unfinished => Level::Info,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub level: Level,
    pub kind: IssueKind,
    pub context: String,
    pub source: String,
    pub detail: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LintReport {
    pub issues: Vec<Issue>,
}

impl LintReport {
    pub fn count(&self, level: Level) -> usize {
        self.issues.iter().filter(|issue| issue.level == level).count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Level::Error) > 0
    }

    /// Issues at or above `level`.
    pub fn at_least(&self, level: Level) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |issue| issue.level >= level)
    }
}

/// Lint every message of `catalog`. In strict mode warnings count as errors.
pub fn lint(catalog: &Catalog, strict: bool) -> LintReport {
    let mut report = LintReport::default();
    for context in &catalog.contexts {
        let mut seen = HashSet::new();
        for message in &context.messages {
            let key = (message.source.as_str(), message.comment.as_deref().unwrap_or(""));
            if !seen.insert(key) {
                push(
                    &mut report,
                    strict,
                    IssueKind::DuplicateSource,
                    &context.name,
                    message,
                    "earlier entry shadows this one".to_string(),
                );
            }
            lint_message(&mut report, strict, &context.name, message);
        }
    }
    report
}

fn lint_message(report: &mut LintReport, strict: bool, context: &str, message: &Message) {
    if message.status.is_obsolete() {
        return;
    }
    if !message.status.is_finished() {
        push(report, strict, IssueKind::Unfinished, context, message, "not translated yet".into());
        return;
    }
    if message.translation.is_empty() {
        push(
            report,
            strict,
            IssueKind::EmptyTranslation,
            context,
            message,
            "finished entry has an empty translation".into(),
        );
        return;
    }

    let expected = placeholders(&message.source);
    for form in message.translation.forms() {
        let found = placeholders(form);
        if found != expected {
            push(
                report,
                strict,
                IssueKind::PlaceholderMismatch,
                context,
                message,
                format!("source uses {:?}, translation {:?} uses {:?}", expected, form, found),
            );
        }
    }

    // Plural forms rarely carry accelerators; only single strings are checked.
    if let Translation::Text(text) = &message.translation {
        let in_source = has_accelerator(&message.source);
        let in_translation = has_accelerator(text);
        if in_source != in_translation {
            let detail = if in_source {
                "source has an accelerator, translation does not"
            } else {
                "translation has an accelerator the source lacks"
            };
            push(report, strict, IssueKind::AcceleratorMismatch, context, message, detail.into());
        }
    }
}

fn push(
    report: &mut LintReport,
    strict: bool,
    kind: IssueKind,
    context: &str,
    message: &Message,
    detail: String,
) {
    let mut level = kind.default_level();
    if strict && level == Level::Warning {
        level = Level::Error;
    }
    report.issues.push(Issue {
        level,
        kind,
        context: context.to_string(),
        source: message.source.clone(),
        detail,
    });
}

/// Whether `text` marks a mnemonic with `&` (`&&` is a literal ampersand).
pub fn has_accelerator(text: &str) -> bool {
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '&' {
            match chars.peek() {
                Some('&') => {
                    chars.next();
                }
                Some(next) if !next.is_whitespace() => return true,
                _ => {}
            }
        }
    }
    false
}
