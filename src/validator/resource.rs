//! Resource loading for celcheck.
//!
//! Resources stay unstructured (`serde_yaml::Value`): rule expressions
//! address fields dynamically, so there is nothing to gain from typed
//! per-kind structs. Document order within a file is preserved.

use crate::validator::types::UNNAMED_RESOURCE;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// One parsed YAML/JSON document from an input file.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub doc: serde_yaml::Value,
}

impl Resource {
    pub fn new(doc: serde_yaml::Value) -> Self {
        Self { doc }
    }

    fn get_str(&self, path: &[&str]) -> Option<&str> {
        let mut value = &self.doc;
        for key in path {
            value = value.get(key)?;
        }
        value.as_str()
    }

    /// `apiVersion`, or the empty string when absent.
    pub fn api_version(&self) -> &str {
        self.get_str(&["apiVersion"]).unwrap_or("")
    }

    /// (group, version) derived from `apiVersion`. Core resources have a
    /// version-only `apiVersion` and an empty group.
    pub fn group_version(&self) -> (&str, &str) {
        match self.api_version().split_once('/') {
            Some((group, version)) => (group, version),
            None => ("", self.api_version()),
        }
    }

    /// `kind`, or the empty string when absent.
    pub fn kind(&self) -> &str {
        self.get_str(&["kind"]).unwrap_or("")
    }

    /// `metadata.name`, if present and a string.
    pub fn name(&self) -> Option<&str> {
        self.get_str(&["metadata", "name"])
    }

    /// `metadata.name`, falling back to `<unnamed>`.
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or(UNNAMED_RESOURCE)
    }

    /// `metadata.namespace`, if present and a string.
    pub fn namespace(&self) -> Option<&str> {
        self.get_str(&["metadata", "namespace"])
    }

    /// Look up one key in `metadata.labels` or `metadata.annotations`.
    pub fn metadata_entry(&self, map: &str, key: &str) -> Option<&str> {
        let mapping = self.doc.get("metadata")?.get(map)?.as_mapping()?;
        mapping.iter().find_map(|(k, v)| {
            if k.as_str() == Some(key) {
                v.as_str()
            } else {
                None
            }
        })
    }
}

/// Loader errors, split so callers can tell an unreadable file from
/// unparseable content.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("failed to read {file}: {detail}")]
    Unreadable { file: String, detail: String },

    #[error("failed to parse {file}: {detail}")]
    Unparseable { file: String, detail: String },
}

/// Turns one input file identifier into an ordered list of resources.
///
/// The validator depends on this trait only; tests substitute an in-memory
/// implementation.
pub trait ResourceLoader: Send + Sync {
    fn load(&self, file: &str) -> Result<Vec<Resource>, LoadError>;
}

/// Production loader reading multi-document YAML from the filesystem.
#[derive(Debug, Default)]
pub struct FsLoader;

impl ResourceLoader for FsLoader {
    fn load(&self, file: &str) -> Result<Vec<Resource>, LoadError> {
        let content =
            std::fs::read_to_string(Path::new(file)).map_err(|e| LoadError::Unreadable {
                file: file.to_string(),
                detail: e.to_string(),
            })?;

        parse_resources(&content).map_err(|detail| LoadError::Unparseable {
            file: file.to_string(),
            detail,
        })
    }
}

/// Parse multi-document YAML content into resources, preserving document
/// order and skipping empty documents.
pub fn parse_resources(content: &str) -> Result<Vec<Resource>, String> {
    let mut resources = Vec::new();

    for document in serde_yaml::Deserializer::from_str(content) {
        let value = serde_yaml::Value::deserialize(document).map_err(|e| e.to_string())?;
        if value.is_null() {
            continue;
        }
        resources.push(Resource::new(value));
    }

    Ok(resources)
}
