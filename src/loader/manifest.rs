use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::{Result, ViteError};

/// Parsed Vite build manifest: logical source path → built output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: HashMap<String, ManifestEntry>,
}

/// One chunk of the manifest.
///
/// Only `file`, `css` and `imports` take part in tag rendering; the other
/// fields are kept for inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    /// Output path relative to the static URL. An entry without one only
    /// fails when it is rendered.
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub src: Option<String>,
    /// Stylesheets emitted for this chunk, in load order.
    #[serde(default)]
    pub css: Vec<String>,
    /// Manifest keys of statically imported chunks.
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub dynamic_imports: Vec<String>,
    #[serde(default)]
    pub assets: Vec<String>,
    #[serde(default)]
    pub is_entry: bool,
    #[serde(default)]
    pub is_dynamic_entry: bool,
}

impl ManifestEntry {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            ..Self::default()
        }
    }

    pub fn with_css<I, S>(mut self, css: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.css = css.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports = imports.into_iter().map(Into::into).collect();
        self
    }
}

impl Manifest {
    /// Read and parse the manifest file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ViteError::manifest_unreadable(format!(
                "Cannot read Vite manifest file at {}: {}",
                path.display(),
                e
            ))
        })?;

        let manifest = Self::parse(&content).map_err(|e| {
            ViteError::manifest_malformed(format!(
                "Invalid Vite manifest at {}: {}",
                path.display(),
                e.message()
            ))
        })?;

        debug!(
            "Loaded Vite manifest from {} ({} entries)",
            path.display(),
            manifest.len()
        );
        Ok(manifest)
    }

    /// Parse manifest JSON already held in memory.
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| ViteError::manifest_malformed(e.to_string()))
    }

    pub fn get(&self, path: &str) -> Option<&ManifestEntry> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys flagged `isEntry`, sorted.
    pub fn entry_points(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_entry)
            .map(|(key, _)| key.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }
}

impl<K: Into<String>> FromIterator<(K, ManifestEntry)> for Manifest {
    fn from_iter<I: IntoIterator<Item = (K, ManifestEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
