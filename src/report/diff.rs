// SPDX-License-Identifier: PMPL-1.0-or-later

//! Diff utilities for translation catalogs.

use crate::types::{Catalog, Message, Translation, TranslationStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// Identity of a message across catalogs. An empty comment is no comment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct MessageKey {
    pub context: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Retranslation {
    pub key: MessageKey,
    pub before: Translation,
    pub after: Translation,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusChange {
    pub key: MessageKey,
    pub before: TranslationStatus,
    pub after: TranslationStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogDiff {
    pub added: Vec<MessageKey>,
    pub removed: Vec<MessageKey>,
    pub retranslated: Vec<Retranslation>,
    pub status_changed: Vec<StatusChange>,
}

impl CatalogDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.retranslated.is_empty()
            && self.status_changed.is_empty()
    }
}

fn index(catalog: &Catalog) -> BTreeMap<MessageKey, &Message> {
    let mut map = BTreeMap::new();
    for (context, message) in catalog.messages() {
        let key = MessageKey {
            context: context.name.clone(),
            source: message.source.clone(),
            comment: message.comment.clone().filter(|c| !c.is_empty()),
        };
        map.entry(key).or_insert(message);
    }
    map
}

pub fn diff_catalogs(base: &Catalog, compare: &Catalog) -> CatalogDiff {
    let before = index(base);
    let after = index(compare);
    let mut diff = CatalogDiff::default();

    for (key, old) in &before {
        match after.get(key) {
            None => diff.removed.push(key.clone()),
            Some(new) => {
                if old.translation != new.translation {
                    diff.retranslated.push(Retranslation {
                        key: key.clone(),
                        before: old.translation.clone(),
                        after: new.translation.clone(),
                    });
                }
                if old.status != new.status {
                    diff.status_changed.push(StatusChange {
                        key: key.clone(),
                        before: old.status,
                        after: new.status,
                    });
                }
            }
        }
    }
    diff.added = after
        .keys()
        .filter(|key| !before.contains_key(*key))
        .cloned()
        .collect();
    diff
}

pub fn format_diff(diff: &CatalogDiff, base_label: &str, compare_label: &str) -> String {
    let mut lines = Vec::new();
    lines.push("=== TSCAT CATALOG DIFF ===".to_string());
    lines.push(format!("Base: {}", base_label));
    lines.push(format!("Compare: {}", compare_label));
    lines.push(String::new());

    if diff.is_empty() {
        lines.push("No differences.".to_string());
        return lines.join("\n");
    }

    lines.push(format!(
        "Added: {}  Removed: {}  Retranslated: {}  Status changes: {}",
        diff.added.len(),
        diff.removed.len(),
        diff.retranslated.len(),
        diff.status_changed.len()
    ));

    for key in &diff.added {
        lines.push(format!("  + {}", describe(key)));
    }
    for key in &diff.removed {
        lines.push(format!("  - {}", describe(key)));
    }
    for change in &diff.retranslated {
        lines.push(format!(
            "  ~ {}: {} -> {}",
            describe(&change.key),
            render(&change.before),
            render(&change.after)
        ));
    }
    for change in &diff.status_changed {
        lines.push(format!(
            "  ! {}: {:?} -> {:?}",
            describe(&change.key),
            change.before,
            change.after
        ));
    }
    lines.join("\n")
}

fn describe(key: &MessageKey) -> String {
    match &key.comment {
        Some(comment) => format!("[{}] {:?} ({})", key.context, key.source, comment),
        None => format!("[{}] {:?}", key.context, key.source),
    }
}

fn render(translation: &Translation) -> String {
    match translation {
        Translation::Text(text) => format!("{:?}", text),
        Translation::Plural(forms) => format!("{:?}", forms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Context;

    fn base() -> Catalog {
        Catalog::new("pt_PT").with_context(
            Context::new("MainWindow")
                .with_message(Message::new("&Stop", "&Parar"))
                .with_message(Message::unfinished("Continue"))
                .with_message(Message::new("Gone", "Desaparecido")),
        )
    }

    #[test]
    fn identical_catalogs_have_no_diff() {
        let diff = diff_catalogs(&base(), &base());
        assert!(diff.is_empty());
        assert!(format_diff(&diff, "a", "b").contains("No differences."));
    }

    #[test]
    fn detects_every_kind_of_change() {
        let mut compare = base();
        let messages = &mut compare.contexts[0].messages;
        messages[0].translation = Translation::Text("&Interromper".into());
        messages[1] = Message::new("Continue", "Continuar");
        messages.remove(2);
        messages.push(Message::new("New", "Novo"));

        let diff = diff_catalogs(&base(), &compare);
        assert_eq!(diff.added.len(), 1);
        assert_eq!(diff.added[0].source, "New");
        assert_eq!(diff.removed.len(), 1);
        assert_eq!(diff.removed[0].source, "Gone");
        assert_eq!(diff.retranslated.len(), 2);
        assert_eq!(diff.status_changed.len(), 1);
        assert_eq!(diff.status_changed[0].after, TranslationStatus::Finished);

        let text = format_diff(&diff, "old.ts", "new.ts");
        assert!(text.contains("+ [MainWindow] \"New\""));
        assert!(text.contains("- [MainWindow] \"Gone\""));
        assert!(text.contains("Unfinished -> Finished"));
    }

    #[test]
    fn empty_comment_matches_missing_comment() {
        let mut compare = base();
        compare.contexts[0].messages[0].comment = Some(String::new());

        let diff = diff_catalogs(&base(), &compare);
        assert!(diff.is_empty(), "{:?}", diff);
    }
}
