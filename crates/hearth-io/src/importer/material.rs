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

//! Reads and writes material documents.

use super::{ImportError, Importer};
use hearth_core::asset::AssetHandle;
use hearth_data::assets::{Material, MaterialProperties};
use ron::ser::PrettyConfig;
use std::fs;
use std::path::Path;

/// Imports `.mat` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialImporter;

impl MaterialImporter {
    /// Writes a material's properties as a RON document.
    pub fn save(material: &Material, path: &Path) -> Result<(), ImportError> {
        let text = ron::ser::to_string_pretty(&material.properties, PrettyConfig::default())?;
        fs::write(path, text).map_err(|e| ImportError::io(path, e))
    }
}

impl Importer for MaterialImporter {
    type Output = Material;

    fn read(&self, handle: AssetHandle, path: &Path) -> Result<Material, ImportError> {
        let text = fs::read_to_string(path).map_err(|e| ImportError::io(path, e))?;
        let properties: MaterialProperties = ron::from_str(&text)?;
        Ok(Material::new(handle, properties))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brick.mat");
        let material = Material::new(
            AssetHandle::from_raw(2),
            MaterialProperties {
                name: "Brick".into(),
                albedo_map: Some(AssetHandle::from_raw(77)),
                roughness: 0.9,
                ..Default::default()
            },
        );
        MaterialImporter::save(&material, &path).unwrap();

        let loaded = MaterialImporter.load(&path).unwrap();
        assert_eq!(loaded.properties, material.properties);
    }

    #[test]
    fn test_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.mat");
        fs::write(&path, "(roughness: \"high\")").unwrap();
        assert!(matches!(MaterialImporter.load(&path), Err(ImportError::Document(_))));
    }
}
