// SPDX-License-Identifier: PMPL-1.0-or-later

//! Serialization helpers for exported catalogs

use crate::catalog::CatalogStore;
use crate::types::Catalog;
use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const EXPORT_SCHEMA: &str = "tscat.catalog";
const EXPORT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Yaml,
    Ts,
}

impl ExportFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "yaml" | "yml" => Some(ExportFormat::Yaml),
            "ts" | "xml" => Some(ExportFormat::Ts),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Yaml => "yaml",
            ExportFormat::Ts => "ts",
        }
    }

    /// Guess the format from a file extension, defaulting to `.ts`.
    pub fn for_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::parse)
            .unwrap_or(ExportFormat::Ts)
    }

    pub fn serialize(&self, store: &CatalogStore) -> Result<String> {
        match self {
            ExportFormat::Json => Ok(serde_json::to_string_pretty(&ExportBundle::new(store))?),
            ExportFormat::Yaml => Ok(serde_yaml::to_string(&ExportBundle::new(store))?),
            ExportFormat::Ts => Ok(store.to_ts_string()),
        }
    }
}

/// Envelope around a catalog in JSON/YAML exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportBundle {
    pub schema: String,
    pub version: u32,
    pub exported_at: String,
    pub catalog: Catalog,
}

impl ExportBundle {
    pub fn new(store: &CatalogStore) -> Self {
        Self {
            schema: EXPORT_SCHEMA.to_string(),
            version: EXPORT_VERSION,
            exported_at: chrono::Utc::now().to_rfc3339(),
            catalog: store.document().clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.schema != EXPORT_SCHEMA {
            bail!("unexpected export schema {:?}", self.schema);
        }
        if self.version != EXPORT_VERSION {
            bail!("unsupported export version {}", self.version);
        }
        Ok(())
    }
}

/// Load a catalog from a `.ts` file or from a JSON/YAML export.
pub fn load_catalog(path: &Path) -> Result<CatalogStore> {
    let format = ExportFormat::for_path(path);
    if format == ExportFormat::Ts {
        return CatalogStore::load_path(path)
            .with_context(|| format!("loading catalog {}", path.display()));
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("reading export {}", path.display()))?;
    let bundle: ExportBundle = match format {
        ExportFormat::Yaml => serde_yaml::from_str(&content)
            .with_context(|| format!("parsing yaml export {}", path.display()))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("parsing json export {}", path.display()))?,
    };
    bundle.validate()?;
    Ok(CatalogStore::from_document(bundle.catalog))
}
