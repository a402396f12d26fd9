// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core data model for translation catalogs
//!
//! These types mirror the structure of a Qt Linguist `.ts` document one to
//! one, so a catalog can be read, inspected and written back without losing
//! anything. Lookup indexing lives in [`crate::catalog`]; this module only
//! holds the data.

use serde::{Deserialize, Serialize};

/// Review state of a message's translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStatus {
    /// Approved translation, served by lookups.
    #[default]
    Finished,
    /// Not yet translated or not yet approved.
    Unfinished,
    /// The source string was removed from the application.
    Obsolete,
    /// Like `Obsolete`, written by newer Linguist versions.
    Vanished,
}

impl TranslationStatus {
    /// Map the `type` attribute of `<translation>` to a status.
    ///
    /// No attribute means finished. Unknown values are read as unfinished
    /// so an unrecognised marker never leaks an unapproved string.
    pub fn from_type_attr(value: Option<&str>) -> Self {
        match value {
            None => TranslationStatus::Finished,
            Some("unfinished") => TranslationStatus::Unfinished,
            Some("obsolete") => TranslationStatus::Obsolete,
            Some("vanished") => TranslationStatus::Vanished,
            Some(_) => TranslationStatus::Unfinished,
        }
    }

    /// The `type` attribute to write for this status.
    pub fn type_attr(&self) -> Option<&'static str> {
        match self {
            TranslationStatus::Finished => None,
            TranslationStatus::Unfinished => Some("unfinished"),
            TranslationStatus::Obsolete => Some("obsolete"),
            TranslationStatus::Vanished => Some("vanished"),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, TranslationStatus::Finished)
    }

    pub fn is_obsolete(&self) -> bool {
        matches!(self, TranslationStatus::Obsolete | TranslationStatus::Vanished)
    }
}

/// Translated text of a message: a single string, or one string per plural
/// form for numerus messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Translation {
    Text(String),
    Plural(Vec<String>),
}

impl Translation {
    pub fn is_empty(&self) -> bool {
        match self {
            Translation::Text(text) => text.is_empty(),
            Translation::Plural(forms) => forms.iter().all(String::is_empty),
        }
    }

    /// Every string carried by this translation, in order.
    pub fn forms(&self) -> Vec<&str> {
        match self {
            Translation::Text(text) => vec![text.as_str()],
            Translation::Plural(forms) => forms.iter().map(String::as_str).collect(),
        }
    }
}

impl Default for Translation {
    fn default() -> Self {
        Translation::Text(String::new())
    }
}

/// Where a message was extracted from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// One translatable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub source: String,
    #[serde(default)]
    pub translation: Translation,
    #[serde(default)]
    pub status: TranslationStatus,
    /// Disambiguation comment; part of the lookup key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_comment: Option<String>,
    /// Note from the developer to the translator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translator_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
}

impl Message {
    /// A finished message with a single translation.
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            translation: Translation::Text(translation.into()),
            status: TranslationStatus::Finished,
            comment: None,
            id: None,
            old_source: None,
            old_comment: None,
            extra_comment: None,
            translator_comment: None,
            locations: Vec::new(),
        }
    }

    /// A message still waiting for its translation.
    pub fn unfinished(source: impl Into<String>) -> Self {
        Self {
            status: TranslationStatus::Unfinished,
            ..Self::new(source, String::new())
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn is_numerus(&self) -> bool {
        matches!(self.translation, Translation::Plural(_))
    }

    /// The translation a lookup may serve: finished and not empty.
    ///
    /// Numerus messages yield their first non-empty form.
    pub fn usable_translation(&self) -> Option<&str> {
        if !self.status.is_finished() {
            return None;
        }
        match &self.translation {
            Translation::Text(text) if !text.is_empty() => Some(text),
            Translation::Text(_) => None,
            Translation::Plural(forms) => forms
                .iter()
                .find(|form| !form.is_empty())
                .map(String::as_str),
        }
    }
}

/// A named grouping of messages, usually one window, view or dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Context {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: None,
            messages: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }
}

/// A whole catalog document: header plus contexts in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Format version from the `<TS version>` attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Target language code, e.g. `pt_PT`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_codec: Option<String>,
    #[serde(default)]
    pub contexts: Vec<Context>,
}

impl Catalog {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            version: Some("2.0".to_string()),
            language: Some(language.into()),
            ..Self::default()
        }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.contexts.push(context);
        self
    }

    pub fn messages(&self) -> impl Iterator<Item = (&Context, &Message)> {
        self.contexts
            .iter()
            .flat_map(|context| context.messages.iter().map(move |message| (context, message)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_attribute_mapping() {
        assert_eq!(
            TranslationStatus::from_type_attr(None),
            TranslationStatus::Finished
        );
        assert_eq!(
            TranslationStatus::from_type_attr(Some("vanished")),
            TranslationStatus::Vanished
        );
        assert_eq!(
            TranslationStatus::from_type_attr(Some("bogus")),
            TranslationStatus::Unfinished
        );
        assert_eq!(TranslationStatus::Finished.type_attr(), None);
        assert_eq!(
            TranslationStatus::Obsolete.type_attr(),
            Some("obsolete")
        );
    }

    #[test]
    fn unfinished_message_has_no_usable_translation() {
        let mut msg = Message::unfinished("Continue");
        assert_eq!(msg.usable_translation(), None);
        msg.translation = Translation::Text("Continuar".into());
        assert_eq!(msg.usable_translation(), None);
    }

    #[test]
    fn finished_but_empty_is_not_usable() {
        let msg = Message::new("Watch", "");
        assert_eq!(msg.usable_translation(), None);
    }

    #[test]
    fn plural_uses_first_non_empty_form() {
        let mut msg = Message::new("%n videos", "");
        msg.translation = Translation::Plural(vec![String::new(), "%n vídeos".into()]);
        assert!(msg.is_numerus());
        assert_eq!(msg.usable_translation(), Some("%n vídeos"));
    }

    #[test]
    fn json_shape_is_compact() {
        let msg = Message::new("Clear", "Limpar");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["translation"], "Limpar");
        assert_eq!(json["status"], "finished");
        assert!(json.get("comment").is_none());
        assert!(json.get("locations").is_none());
    }
}
