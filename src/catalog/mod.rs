// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation catalog store.
//!
//! A [`CatalogStore`] is built once from a `.ts` asset and never mutated
//! afterwards, so it can be shared freely between threads (it is `Send +
//! Sync` with no interior mutability).
//!
//! ## Lookup semantics
//!
//! Messages are keyed by context name, source text and disambiguation
//! comment. A lookup returns the recorded translation only when the entry
//! is finished and non-empty; anything else (unknown entry, unfinished or
//! obsolete entry, empty translation) falls back to the source text. A
//! lookup never fails, so a partially translated catalog cannot break the
//! host application.
//!
//! When a context or a (source, comment) pair occurs more than once, the
//! first occurrence wins.

pub mod plural;

use crate::error::ParseError;
use crate::format;
use crate::ts;
use crate::types::{Catalog, Context, Message, Translation};
use plural::PluralRule;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Position of a message inside the document: (context index, message index).
type Slot = (usize, usize);

/// Loaded, read-only translation catalog with a lookup index.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    document: Catalog,
    /// context name -> source text -> candidate slots in document order
    index: HashMap<String, HashMap<String, Vec<Slot>>>,
}

impl CatalogStore {
    /// Parse a `.ts` document held in memory.
    pub fn load(asset: &str) -> Result<Self, ParseError> {
        let document = ts::read_catalog(asset)?;
        let store = Self::from_document(document);
        debug!(
            language = store.language().unwrap_or("-"),
            contexts = store.contexts().len(),
            messages = store.message_count(),
            "catalog loaded"
        );
        Ok(store)
    }

    /// Decode raw bytes (BOM / XML declaration aware) and parse them.
    pub fn load_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        let text = ts::decode(bytes)?;
        Self::load(&text)
    }

    /// Read and parse a `.ts` file.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading catalog");
        let bytes = fs::read(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load_bytes(&bytes)
    }

    /// Index an already-built document.
    pub fn from_document(document: Catalog) -> Self {
        let mut index: HashMap<String, HashMap<String, Vec<Slot>>> = HashMap::new();
        for (context_index, context) in document.contexts.iter().enumerate() {
            let by_source = index.entry(context.name.clone()).or_default();
            for (message_index, message) in context.messages.iter().enumerate() {
                by_source
                    .entry(message.source.clone())
                    .or_default()
                    .push((context_index, message_index));
            }
        }
        Self { document, index }
    }

    pub fn document(&self) -> &Catalog {
        &self.document
    }

    pub fn into_document(self) -> Catalog {
        self.document
    }

    /// Target language declared by the catalog header.
    pub fn language(&self) -> Option<&str> {
        self.document.language.as_deref()
    }

    pub fn contexts(&self) -> &[Context] {
        &self.document.contexts
    }

    /// First context with the given name.
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.document.contexts.iter().find(|context| context.name == name)
    }

    pub fn message_count(&self) -> usize {
        self.document
            .contexts
            .iter()
            .map(|context| context.messages.len())
            .sum()
    }

    /// The message keyed by exactly (context, source, comment).
    ///
    /// `None` as comment matches messages without a disambiguation comment.
    pub fn find(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&Message> {
        let wanted = comment.unwrap_or("");
        self.index
            .get(context)?
            .get(source)?
            .iter()
            .map(|&(c, m)| &self.document.contexts[c].messages[m])
            .find(|message| message.comment.as_deref().unwrap_or("") == wanted)
    }

    /// Translation of `source` in `context`, or `source` itself.
    pub fn lookup<'a>(&'a self, context: &str, source: &'a str) -> &'a str {
        self.lookup_disambiguated(context, source, None)
    }

    /// Like [`lookup`](Self::lookup) but keyed by a disambiguation comment
    /// too. An exact match is preferred; the comment-less entry is the
    /// fallback.
    pub fn lookup_disambiguated<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        comment: Option<&str>,
    ) -> &'a str {
        self.resolve(context, source, comment)
            .and_then(Message::usable_translation)
            .unwrap_or(source)
    }

    /// Look up and substitute `%1`, `%2`, … in one step.
    pub fn translate<S: AsRef<str>>(&self, context: &str, source: &str, args: &[S]) -> String {
        format::format(self.lookup(context, source), args)
    }

    /// Plural-aware lookup: picks the numerus form for `n` by the catalog
    /// language's plural rule and substitutes `%n`.
    pub fn translate_plural(&self, context: &str, source: &str, n: i64) -> String {
        self.translate_plural_disambiguated(context, source, None, n)
    }

    /// [`translate_plural`](Self::translate_plural) keyed by a
    /// disambiguation comment, with the same fallback as
    /// [`lookup_disambiguated`](Self::lookup_disambiguated).
    pub fn translate_plural_disambiguated(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
        n: i64,
    ) -> String {
        let rule = self.plural_rule();
        let chosen = self
            .resolve(context, source, comment)
            .filter(|message| message.status.is_finished())
            .and_then(|message| match &message.translation {
                Translation::Plural(forms) if !forms.is_empty() => {
                    let index = rule.form_index(n).min(forms.len() - 1);
                    Some(forms[index].as_str())
                }
                Translation::Plural(_) => None,
                Translation::Text(text) => Some(text.as_str()),
            })
            .filter(|text| !text.is_empty())
            .unwrap_or(source);
        format::substitute_count(chosen, n)
    }

    pub fn plural_rule(&self) -> PluralRule {
        PluralRule::for_language(self.language().unwrap_or(""))
    }

    /// Serialize back to `.ts`.
    pub fn to_ts_string(&self) -> String {
        ts::write_catalog(&self.document)
    }

    /// The message a lookup should consult: the exact key when it has a
    /// usable translation, otherwise the comment-less entry.
    fn resolve(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&Message> {
        let exact = self.find(context, source, comment);
        match comment {
            Some(_) if exact.and_then(Message::usable_translation).is_none() => {
                self.find(context, source, None).or(exact)
            }
            _ => exact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TranslationStatus;

    fn store() -> CatalogStore {
        let mut plural = Message::new("%n video(s)", "");
        plural.translation = Translation::Plural(vec!["%n vídeo".into(), "%n vídeos".into()]);

        let document = Catalog::new("pt_PT")
            .with_context(
                Context::new("AboutView")
                    .with_message(Message::new("Version %1", "Versão %1"))
                    .with_message(Message::new("About", "Sobre")),
            )
            .with_context(
                Context::new("MediaView")
                    .with_message(Message::unfinished("Continue"))
                    .with_message(Message::new("Open", "Abrir"))
                    .with_message(Message::new("Open", "Abrir ficheiro").with_comment("file menu"))
                    .with_message(Message::new("Watch", "")),
            )
            .with_context(Context::new("ListModel").with_message(plural));
        CatalogStore::from_document(document)
    }

    #[test]
    fn finished_translation_is_returned() {
        assert_eq!(store().lookup("AboutView", "About"), "Sobre");
    }

    #[test]
    fn unfinished_falls_back_to_source() {
        assert_eq!(store().lookup("MediaView", "Continue"), "Continue");
    }

    #[test]
    fn unknown_entries_fall_back() {
        let store = store();
        assert_eq!(store.lookup("MediaView", "Nope"), "Nope");
        assert_eq!(store.lookup("NoSuchContext", "About"), "About");
    }

    #[test]
    fn context_scopes_lookup() {
        assert_eq!(store().lookup("MediaView", "About"), "About");
    }

    #[test]
    fn finished_but_empty_falls_back() {
        assert_eq!(store().lookup("MediaView", "Watch"), "Watch");
    }

    #[test]
    fn disambiguation_comment() {
        let store = store();
        assert_eq!(store.lookup("MediaView", "Open"), "Abrir");
        assert_eq!(
            store.lookup_disambiguated("MediaView", "Open", Some("file menu")),
            "Abrir ficheiro"
        );
        assert_eq!(
            store.lookup_disambiguated("MediaView", "Open", Some("unknown")),
            "Abrir"
        );
    }

    #[test]
    fn translate_formats_arguments() {
        assert_eq!(store().translate("AboutView", "Version %1", &["2.0"]), "Versão 2.0");
        assert_eq!(
            store().translate::<&str>("AboutView", "Version %1", &[]),
            "Versão %1"
        );
    }

    #[test]
    fn plural_forms_follow_language_rule() {
        let store = store();
        assert_eq!(store.translate_plural("ListModel", "%n video(s)", 1), "1 vídeo");
        assert_eq!(store.translate_plural("ListModel", "%n video(s)", 0), "0 vídeos");
        assert_eq!(store.translate_plural("ListModel", "%n video(s)", 5), "5 vídeos");
    }

    #[test]
    fn plural_fallback_substitutes_count() {
        assert_eq!(store().translate_plural("ListModel", "%n file(s)", 3), "3 file(s)");
    }

    #[test]
    fn plural_lookup_honours_comment() {
        let mut plain = Message::new("%n item(s)", "");
        plain.translation = Translation::Plural(vec!["%n item".into(), "%n itens".into()]);
        let mut queued = Message::new("%n item(s)", "").with_comment("playlist");
        queued.translation =
            Translation::Plural(vec!["%n vídeo na fila".into(), "%n vídeos na fila".into()]);
        let store = CatalogStore::from_document(
            Catalog::new("pt_PT").with_context(
                Context::new("ListModel")
                    .with_message(plain)
                    .with_message(queued),
            ),
        );

        assert_eq!(
            store.translate_plural_disambiguated("ListModel", "%n item(s)", Some("playlist"), 3),
            "3 vídeos na fila"
        );
        assert_eq!(
            store.translate_plural_disambiguated("ListModel", "%n item(s)", Some("other"), 1),
            "1 item"
        );
        assert_eq!(store.translate_plural("ListModel", "%n item(s)", 2), "2 itens");
    }

    #[test]
    fn obsolete_entries_are_not_served() {
        let mut msg = Message::new("Old", "Antigo");
        msg.status = TranslationStatus::Obsolete;
        let store = CatalogStore::from_document(
            Catalog::new("pt_PT").with_context(Context::new("C").with_message(msg)),
        );
        assert_eq!(store.lookup("C", "Old"), "Old");
    }

    #[test]
    fn duplicates_first_occurrence_wins() {
        let store = CatalogStore::from_document(
            Catalog::new("pt_PT")
                .with_context(Context::new("C").with_message(Message::new("a", "first")))
                .with_context(Context::new("C").with_message(Message::new("a", "second")))
                .with_context(Context::new("C").with_message(Message::new("b", "merged"))),
        );
        assert_eq!(store.lookup("C", "a"), "first");
        assert_eq!(store.lookup("C", "b"), "merged");
    }

    #[test]
    fn counts_and_accessors() {
        let store = store();
        assert_eq!(store.language(), Some("pt_PT"));
        assert_eq!(store.contexts().len(), 3);
        assert_eq!(store.message_count(), 7);
        assert_eq!(store.context("AboutView").map(|c| c.messages.len()), Some(2));
        assert!(store.context("Missing").is_none());
    }

    #[test]
    fn store_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CatalogStore>();

        let store = std::sync::Arc::new(store());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = std::sync::Arc::clone(&store);
                std::thread::spawn(move || store.lookup("AboutView", "About").to_string())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "Sobre");
        }
    }
}
