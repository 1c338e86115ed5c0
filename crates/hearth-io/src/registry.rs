// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The asset registry: the durable catalog mapping handles to metadata.
//!
//! On disk the registry is a RON document with a single root key:
//!
//! ```ron
//! (
//!     AssetRegistry: [
//!         (Handle: 1234567890, Filepath: "textures/wall.png", Type: "AssetType::Texture"),
//!     ],
//! )
//! ```

use hearth_core::asset::{AssetHandle, AssetMetadata, AssetType};
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading or writing a registry document.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The document could not be read.
    #[error("failed to read asset registry '{}'", .path.display())]
    Read {
        /// Document path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The document could not be written.
    #[error("failed to write asset registry '{}'", .path.display())]
    Write {
        /// Document path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The document is not valid RON for a registry.
    #[error("asset registry document is malformed")]
    Syntax(#[from] ron::error::SpannedError),
    /// The registry could not be rendered as RON.
    #[error("failed to serialize asset registry")]
    Serialize(#[from] ron::Error),
    /// A record carries the reserved handle `0`.
    #[error("registry record '{filepath}' uses the invalid handle 0")]
    InvalidHandle {
        /// The record's path.
        filepath: String,
    },
    /// A record carries a type tag that does not name a concrete asset type.
    #[error("registry record {handle} has unknown type '{tag}'")]
    UnknownType {
        /// The record's handle.
        handle: AssetHandle,
        /// The offending tag.
        tag: String,
    },
    /// Two records share a handle.
    #[error("handle {0} appears more than once in the registry")]
    DuplicateHandle(AssetHandle),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryDocument {
    #[serde(rename = "AssetRegistry", default)]
    records: Vec<RegistryRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RegistryRecord {
    #[serde(rename = "Handle")]
    handle: u64,
    #[serde(rename = "Filepath")]
    filepath: String,
    #[serde(rename = "Type")]
    asset_type: String,
}

/// An ordered mapping from [`AssetHandle`] to [`AssetMetadata`].
///
/// Membership here is the single answer to "does this handle exist". The
/// asset manager owns it on the main thread; it is never shared with workers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetRegistry {
    entries: BTreeMap<AssetHandle, AssetMetadata>,
}

impl AssetRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an entry, returning the previous metadata.
    pub fn insert(&mut self, handle: AssetHandle, metadata: AssetMetadata) -> Option<AssetMetadata> {
        self.entries.insert(handle, metadata)
    }

    /// Removes an entry.
    pub fn remove(&mut self, handle: AssetHandle) -> Option<AssetMetadata> {
        self.entries.remove(&handle)
    }

    /// Looks up an entry.
    pub fn get(&self, handle: AssetHandle) -> Option<&AssetMetadata> {
        self.entries.get(&handle)
    }

    /// Returns `true` if the handle is registered.
    pub fn contains(&self, handle: AssetHandle) -> bool {
        self.entries.contains_key(&handle)
    }

    /// Finds the handle already registered for a relative path.
    pub fn find_by_path(&self, filepath: &Path) -> Option<AssetHandle> {
        self.entries
            .iter()
            .find(|(_, meta)| meta.filepath == filepath)
            .map(|(handle, _)| *handle)
    }

    /// Iterates in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (AssetHandle, &AssetMetadata)> + '_ {
        self.entries.iter().map(|(h, m)| (*h, m))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Renders the registry as a RON document.
    pub fn to_ron_string(&self) -> Result<String, RegistryError> {
        let document = RegistryDocument {
            records: self
                .entries
                .iter()
                .map(|(handle, meta)| RegistryRecord {
                    handle: handle.raw(),
                    filepath: meta.filepath_string(),
                    asset_type: meta.asset_type.as_tag().to_string(),
                })
                .collect(),
        };
        Ok(ron::ser::to_string_pretty(&document, PrettyConfig::default())?)
    }

    /// Parses a RON document into a fresh registry.
    ///
    /// The whole document is rejected if any record is invalid; a registry is
    /// never partially loaded.
    pub fn from_ron_str(text: &str) -> Result<Self, RegistryError> {
        let document: RegistryDocument = ron::from_str(text)?;
        let mut registry = Self::new();
        for record in document.records {
            let handle = AssetHandle::from_raw(record.handle);
            if !handle.is_valid() {
                return Err(RegistryError::InvalidHandle {
                    filepath: record.filepath,
                });
            }
            let asset_type = match record.asset_type.parse::<AssetType>() {
                Ok(ty) if !ty.is_none() => ty,
                _ => {
                    return Err(RegistryError::UnknownType {
                        handle,
                        tag: record.asset_type,
                    })
                }
            };
            let metadata = AssetMetadata::new(record.filepath, asset_type);
            if registry.insert(handle, metadata).is_some() {
                return Err(RegistryError::DuplicateHandle(handle));
            }
        }
        Ok(registry)
    }

    /// Writes the registry document, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), RegistryError> {
        let text = self.to_ron_string()?;
        let write_err = |source| RegistryError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, text).map_err(write_err)?;
        log::debug!(
            "Wrote {} asset registry entries to '{}'.",
            self.len(),
            path.display()
        );
        Ok(())
    }

    /// Reads a registry document.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let text = fs::read_to_string(path).map_err(|source| RegistryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_ron_str(&text).inspect_err(|e| {
            log::error!("Asset registry '{}' rejected: {}", path.display(), e);
        })?;
        log::info!(
            "Loaded {} asset registry entries from '{}'.",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn triples(registry: &AssetRegistry) -> BTreeSet<(u64, String, String)> {
        registry
            .iter()
            .map(|(h, m)| (h.raw(), m.filepath_string(), m.asset_type.to_string()))
            .collect()
    }

    fn sample() -> AssetRegistry {
        let mut registry = AssetRegistry::new();
        registry.insert(
            AssetHandle::from_raw(42),
            AssetMetadata::new("textures/wall.png", AssetType::Texture),
        );
        registry.insert(
            AssetHandle::from_raw(7),
            AssetMetadata::new("levels/intro.org", AssetType::Scene),
        );
        registry
    }

    #[test]
    fn test_save_then_load_preserves_triples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/AssetRegistry.hreg");
        let original = sample();
        original.save(&path).unwrap();

        let loaded = AssetRegistry::load(&path).unwrap();
        assert_eq!(triples(&loaded), triples(&original));
    }

    #[test]
    fn test_document_shape() {
        let text = sample().to_ron_string().unwrap();
        assert!(text.contains("AssetRegistry"));
        assert!(text.contains("Handle: 42"));
        assert!(text.contains("Filepath: \"textures/wall.png\""));
        assert!(text.contains("Type: \"AssetType::Texture\""));
    }

    #[test]
    fn test_record_order_is_not_significant() {
        let text = r#"(AssetRegistry: [
            (Handle: 9, Filepath: "b.wav", Type: "AssetType::Audio"),
            (Handle: 3, Filepath: "a.png", Type: "AssetType::Texture"),
        ])"#;
        let registry = AssetRegistry::from_ron_str(text).unwrap();
        let handles: Vec<u64> = registry.iter().map(|(h, _)| h.raw()).collect();
        assert_eq!(handles, vec![3, 9]);
    }

    #[test]
    fn test_empty_document() {
        assert!(AssetRegistry::from_ron_str("(AssetRegistry: [])").unwrap().is_empty());
        assert!(AssetRegistry::from_ron_str("()").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_records_are_rejected() {
        let zero = r#"(AssetRegistry: [(Handle: 0, Filepath: "a.png", Type: "AssetType::Texture")])"#;
        assert!(matches!(
            AssetRegistry::from_ron_str(zero),
            Err(RegistryError::InvalidHandle { .. })
        ));

        let unknown = r#"(AssetRegistry: [(Handle: 5, Filepath: "a.glsl", Type: "AssetType::Shader")])"#;
        assert!(matches!(
            AssetRegistry::from_ron_str(unknown),
            Err(RegistryError::UnknownType { .. })
        ));

        let none = r#"(AssetRegistry: [(Handle: 5, Filepath: "a", Type: "AssetType::None")])"#;
        assert!(matches!(
            AssetRegistry::from_ron_str(none),
            Err(RegistryError::UnknownType { .. })
        ));

        let dup = r#"(AssetRegistry: [
            (Handle: 5, Filepath: "a.png", Type: "AssetType::Texture"),
            (Handle: 5, Filepath: "b.png", Type: "AssetType::Texture"),
        ])"#;
        assert!(matches!(
            AssetRegistry::from_ron_str(dup),
            Err(RegistryError::DuplicateHandle(_))
        ));

        assert!(matches!(
            AssetRegistry::from_ron_str("not ron at all"),
            Err(RegistryError::Syntax(_))
        ));
    }

    #[test]
    fn test_missing_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            AssetRegistry::load(&dir.path().join("missing.hreg")),
            Err(RegistryError::Read { .. })
        ));
    }

    #[test]
    fn test_find_by_path() {
        let registry = sample();
        assert_eq!(
            registry.find_by_path(Path::new("levels/intro.org")),
            Some(AssetHandle::from_raw(7))
        );
        assert_eq!(registry.find_by_path(Path::new("nope.png")), None);
    }
}
