// SPDX-License-Identifier: PMPL-1.0-or-later

//! tscat — Qt Linguist translation catalogs for Rust applications.
//!
//! Loads `.ts` catalogs into an immutable, thread-shareable store and
//! serves translations with graceful fallback: an unfinished or missing
//! entry yields the source text, never an error.
//!
//! BUILDING BLOCKS:
//! 1. **Catalog**: [`CatalogStore`] load / lookup / plural selection.
//! 2. **Format**: `%1`-style placeholder substitution.
//! 3. **TS codec**: lossless reader and `lupdate`-compatible writer.
//! 4. **Tooling**: locale directories, lint, statistics, export and diff.
//!
//! ```
//! use tscat::CatalogStore;
//!
//! let asset = r#"<TS version="2.0" language="pt_PT">
//! <context>
//!     <name>AboutView</name>
//!     <message>
//!         <source>Version %1</source>
//!         <translation>Versão %1</translation>
//!     </message>
//! </context>
//! </TS>"#;
//! let store = CatalogStore::load(asset).unwrap();
//! assert_eq!(store.translate("AboutView", "Version %1", &["2.0"]), "Versão 2.0");
//! assert_eq!(store.lookup("AboutView", "Quit"), "Quit");
//! ```

pub mod catalog;
pub mod check;
pub mod config;
pub mod error;
pub mod format;
pub mod locales;
pub mod report;
pub mod ts;
pub mod types;

pub use catalog::CatalogStore;
pub use error::ParseError;
pub use types::{Catalog, Context, Location, Message, Translation, TranslationStatus};
