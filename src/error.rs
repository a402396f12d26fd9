// SPDX-License-Identifier: PMPL-1.0-or-later

//! Load-time errors for translation catalogs.
//!
//! Lookups never fail, so this is the only error type the library surface
//! exposes. Every variant carries enough position information to point a
//! translator at the broken line of the asset.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn an asset into a [`crate::catalog::CatalogStore`].
///
/// A catalog is built only after the whole document has been read, so any
/// of these errors means no catalog exists at all.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The XML layer rejected the document (bad syntax, mismatched tags,
    /// malformed attributes or entities).
    #[error("malformed catalog at {line}:{column}: {message}")]
    Xml {
        message: String,
        line: usize,
        column: usize,
    },

    /// The document ended while an element was still open.
    #[error("unclosed <{element}> opened at {line}:{column}")]
    Unclosed {
        element: String,
        line: usize,
        column: usize,
    },

    /// A grouping closed without one of its required children.
    #[error("<{element}> ending at {line}:{column} has no <{field}>")]
    MissingField {
        element: &'static str,
        field: &'static str,
        line: usize,
        column: usize,
    },

    /// The root element is not `<TS>`.
    #[error("expected <TS> root element, found <{found}>")]
    UnexpectedRoot { found: String },

    /// The bytes could not be decoded with the declared character set.
    #[error("catalog is not valid {encoding}")]
    Encoding { encoding: &'static str },

    #[error("reading catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Line number (1-based) the error points at, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Xml { line, .. }
            | ParseError::Unclosed { line, .. }
            | ParseError::MissingField { line, .. } => Some(*line),
            _ => None,
        }
    }
}
