//! JSON-backed class and race catalog.
//!
//! Loads a JSON array of definitions (or an object with `classes` / `races`
//! arrays) and serves them through the content ports.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use sheetsmith_domain::{ClassDefinition, RaceDefinition};
use thiserror::Error;

use super::ports::{ClassSource, RaceSource};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Classes(Vec<ClassDefinition>),
    Bundle {
        #[serde(default)]
        classes: Vec<ClassDefinition>,
        #[serde(default)]
        races: Vec<RaceDefinition>,
    },
}

/// In-memory catalog keyed by definition id.
#[derive(Debug, Default, Clone)]
pub struct JsonCatalog {
    classes: HashMap<String, ClassDefinition>,
    races: HashMap<String, RaceDefinition>,
}

impl JsonCatalog {
    pub fn new(classes: Vec<ClassDefinition>, races: Vec<RaceDefinition>) -> Self {
        Self {
            classes: classes.into_iter().map(|c| (c.id.clone(), c)).collect(),
            races: races.into_iter().map(|r| (r.id.clone(), r)).collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog = match serde_json::from_str(json)? {
            CatalogDocument::Classes(classes) => Self::new(classes, Vec::new()),
            CatalogDocument::Bundle { classes, races } => Self::new(classes, races),
        };
        tracing::debug!(
            classes = catalog.classes.len(),
            races = catalog.races.len(),
            "Catalog parsed"
        );
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn race_count(&self) -> usize {
        self.races.len()
    }
}

impl ClassSource for JsonCatalog {
    fn class_definition(&self, class_id: &str) -> Option<ClassDefinition> {
        self.classes.get(class_id).cloned()
    }
}

impl RaceSource for JsonCatalog {
    fn race_definition(&self, race_id: &str) -> Option<RaceDefinition> {
        self.races.get(race_id).cloned()
    }
}
