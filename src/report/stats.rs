// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation progress statistics

use crate::types::{Catalog, Context, TranslationStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Counts {
    pub messages: usize,
    pub finished: usize,
    pub unfinished: usize,
    /// Obsolete and vanished entries.
    pub obsolete: usize,
}

impl Counts {
    fn add(&mut self, status: TranslationStatus) {
        self.messages += 1;
        match status {
            TranslationStatus::Finished => self.finished += 1,
            TranslationStatus::Unfinished => self.unfinished += 1,
            TranslationStatus::Obsolete | TranslationStatus::Vanished => self.obsolete += 1,
        }
    }

    /// Finished share of live (non-obsolete) messages, in percent.
    pub fn completion(&self) -> f64 {
        let live = self.finished + self.unfinished;
        if live == 0 {
            100.0
        } else {
            self.finished as f64 * 100.0 / live as f64
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextStats {
    pub name: String,
    #[serde(flatten)]
    pub counts: Counts,
    pub completion: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub contexts: usize,
    #[serde(flatten)]
    pub counts: Counts,
    pub completion: f64,
    pub per_context: Vec<ContextStats>,
}

pub fn catalog_stats(catalog: &Catalog) -> CatalogStats {
    let per_context: Vec<ContextStats> = catalog.contexts.iter().map(context_stats).collect();
    let mut counts = Counts::default();
    for (_, message) in catalog.messages() {
        counts.add(message.status);
    }
    CatalogStats {
        language: catalog.language.clone(),
        contexts: catalog.contexts.len(),
        completion: counts.completion(),
        counts,
        per_context,
    }
}

fn context_stats(context: &Context) -> ContextStats {
    let mut counts = Counts::default();
    for message in &context.messages {
        counts.add(message.status);
    }
    ContextStats {
        name: context.name.clone(),
        completion: counts.completion(),
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Message;

    #[test]
    fn counts_by_status() {
        let mut obsolete = Message::new("Old", "Antigo");
        obsolete.status = TranslationStatus::Obsolete;
        let catalog = Catalog::new("pt_PT")
            .with_context(
                Context::new("A")
                    .with_message(Message::new("a", "b"))
                    .with_message(Message::unfinished("c"))
                    .with_message(obsolete),
            )
            .with_context(Context::new("B").with_message(Message::new("d", "e")));

        let stats = catalog_stats(&catalog);
        assert_eq!(stats.contexts, 2);
        assert_eq!(stats.counts.messages, 4);
        assert_eq!(stats.counts.finished, 2);
        assert_eq!(stats.counts.unfinished, 1);
        assert_eq!(stats.counts.obsolete, 1);
        assert!((stats.completion - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.per_context[0].completion, 50.0);
        assert_eq!(stats.per_context[1].completion, 100.0);
    }

    #[test]
    fn empty_catalog_is_complete() {
        let stats = catalog_stats(&Catalog::new("pt_PT"));
        assert_eq!(stats.completion, 100.0);
        assert!(stats.per_context.is_empty());
    }
}
