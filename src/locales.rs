// SPDX-License-Identifier: PMPL-1.0-or-later

//! Locale set: every catalog found under a directory
//!
//! Walks a directory for `*.ts` files, parses them in parallel and keys
//! each catalog by its normalized language code. Files that fail to parse
//! are reported, not fatal, so one broken translation cannot hide the rest.

use crate::catalog::CatalogStore;
use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A catalog file that could not be loaded.
#[derive(Debug, Clone, Serialize)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct LocaleSet {
    catalogs: BTreeMap<String, CatalogStore>,
    sources: BTreeMap<String, PathBuf>,
    failures: Vec<LoadFailure>,
}

impl LocaleSet {
    /// Load every `*.ts` file below `directory`.
    pub fn load_dir(directory: &Path) -> Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Not a directory: {}", directory.display());
        }

        let mut paths: Vec<PathBuf> = WalkDir::new(directory)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case("ts"))
                    .unwrap_or(false)
            })
            .collect();
        paths.sort();
        debug!(directory = %directory.display(), files = paths.len(), "loading locale catalogs");

        let loaded: Vec<(PathBuf, _)> = paths
            .into_par_iter()
            .map(|path| {
                let result = CatalogStore::load_path(&path);
                (path, result)
            })
            .collect();

        let mut set = LocaleSet::default();
        for (path, result) in loaded {
            match result {
                Ok(store) => set.insert(path, store),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable catalog");
                    set.failures.push(LoadFailure {
                        path,
                        error: err.to_string(),
                    });
                }
            }
        }
        Ok(set)
    }

    /// Register a catalog; the first catalog for a code wins.
    pub fn insert(&mut self, path: PathBuf, store: CatalogStore) {
        let code = store
            .language()
            .map(normalize_code)
            .or_else(|| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(normalize_code)
            })
            .unwrap_or_default();
        if let Some(existing) = self.sources.get(&code) {
            warn!(
                code = %code,
                kept = %existing.display(),
                ignored = %path.display(),
                "duplicate catalog for locale"
            );
            return;
        }
        self.sources.insert(code.clone(), path);
        self.catalogs.insert(code, store);
    }

    pub fn get(&self, code: &str) -> Option<&CatalogStore> {
        self.catalogs.get(&normalize_code(code))
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    pub fn path_of(&self, code: &str) -> Option<&Path> {
        self.sources.get(&normalize_code(code)).map(PathBuf::as_path)
    }

    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    /// Best catalog for `requested`.
    ///
    /// Tries the exact code, then the bare language (`pt` for `pt_PT`), then
    /// any territory variant of that language, then each of `fallbacks`
    /// through the same chain.
    pub fn resolve(&self, requested: &str, fallbacks: &[String]) -> Option<(&str, &CatalogStore)> {
        let found = std::iter::once(requested)
            .chain(fallbacks.iter().map(String::as_str))
            .find_map(|code| self.resolve_one(code));
        match found {
            Some((code, _)) => debug!(requested, resolved = code, "locale resolved"),
            None => debug!(requested, "no catalog for locale"),
        }
        found
    }

    fn resolve_one(&self, requested: &str) -> Option<(&str, &CatalogStore)> {
        let code = normalize_code(requested);
        if let Some(found) = self.catalogs.get_key_value(&code) {
            return Some((found.0.as_str(), found.1));
        }
        let language = code.split('_').next().unwrap_or("");
        if language.is_empty() {
            return None;
        }
        if let Some(found) = self.catalogs.get_key_value(language) {
            return Some((found.0.as_str(), found.1));
        }
        let prefix = format!("{}_", language);
        self.catalogs
            .iter()
            .find(|(candidate, _)| candidate.starts_with(&prefix))
            .map(|(candidate, store)| (candidate.as_str(), store))
    }
}

/// Canonical form of a locale code: `pt-pt.UTF-8@euro` → `pt_PT`.
pub fn normalize_code(code: &str) -> String {
    let code = code.trim();
    let code = code.split(['.', '@']).next().unwrap_or(code);
    let mut parts = code.split(['_', '-']);
    let language = parts.next().unwrap_or("").to_ascii_lowercase();
    match parts.next() {
        Some(territory) if !territory.is_empty() => {
            format!("{}_{}", language, territory.to_ascii_uppercase())
        }
        _ => language,
    }
}
