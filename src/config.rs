// SPDX-License-Identifier: PMPL-1.0-or-later

//! Tool configuration
//!
//! Settings come from an optional YAML file, then from the environment:
//!
//! ```yaml
//! locale_dir: locale
//! default_locale: pt_PT
//! fallback: [pt, en]
//! strict: false
//! ```
//!
//! `TSCAT_LOCALE` overrides `default_locale`. Command-line flags override
//! both (handled in `main.rs`).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const LOCALE_ENV: &str = "TSCAT_LOCALE";
pub const LOG_ENV: &str = "TSCAT_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory scanned for `*.ts` catalogs.
    pub locale_dir: Option<PathBuf>,
    /// Locale selected when none is requested.
    pub default_locale: String,
    /// Locales tried, in order, when the requested one has no catalog.
    pub fallback: Vec<String>,
    /// Treat lint warnings as errors.
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale_dir: None,
            default_locale: "en".to_string(),
            fallback: Vec::new(),
            strict: false,
        }
    }
}

impl Config {
    /// Read the config file if one is given, then apply the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_locale_override(env::var(LOCALE_ENV).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Replace the default locale when `value` is set and not blank.
    pub fn with_locale_override(mut self, value: Option<String>) -> Self {
        if let Some(locale) = value.filter(|v| !v.trim().is_empty()) {
            debug!(locale = %locale, "default locale overridden from environment");
            self.default_locale = locale.trim().to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.default_locale, "en");
        assert!(config.fallback.is_empty());
        assert!(!config.strict);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tscat.yaml");
        fs::write(&path, "default_locale: pt_PT\nfallback: [pt, en]\n").unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.default_locale, "pt_PT");
        assert_eq!(config.fallback, vec!["pt".to_string(), "en".to_string()]);
        assert_eq!(config.locale_dir, None);
        assert!(!config.strict);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tscat.yaml");
        fs::write(&path, "strict: [not, a, bool]\n").unwrap();
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::from_file(Path::new("/nonexistent/tscat.yaml")).is_err());
    }

    #[test]
    fn locale_override() {
        let config = Config::default().with_locale_override(Some(" pt_PT ".into()));
        assert_eq!(config.default_locale, "pt_PT");
        let config = Config::default().with_locale_override(Some("  ".into()));
        assert_eq!(config.default_locale, "en");
        let config = Config::default().with_locale_override(None);
        assert_eq!(config.default_locale, "en");
    }
}
