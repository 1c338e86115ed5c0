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

//! Reads and writes scene documents.

use super::{ImportError, Importer};
use hearth_core::asset::AssetHandle;
use hearth_data::assets::{Scene, SceneDocument};
use ron::ser::PrettyConfig;
use std::fs;
use std::path::Path;

/// Imports `.org` scene files.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneImporter;

impl SceneImporter {
    /// Writes a scene as a RON document.
    pub fn save(scene: &Scene, path: &Path) -> Result<(), ImportError> {
        let text = ron::ser::to_string_pretty(&scene.to_document(), PrettyConfig::default())?;
        fs::write(path, text).map_err(|e| ImportError::io(path, e))?;
        log::info!("Saved scene '{}' to '{}'.", scene.name, path.display());
        Ok(())
    }
}

impl Importer for SceneImporter {
    type Output = Scene;

    fn read(&self, handle: AssetHandle, path: &Path) -> Result<Scene, ImportError> {
        let text = fs::read_to_string(path).map_err(|e| ImportError::io(path, e))?;
        let document: SceneDocument = ron::from_str(&text)?;
        Ok(Scene::from_document(handle, document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::asset::Asset;
    use hearth_data::assets::{SceneComponent, SceneEntity};

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.org");

        let scene = Scene::new(AssetHandle::from_raw(11), "Level");
        scene.entities_mut().push(SceneEntity {
            id: 1,
            name: "Speaker".into(),
            components: vec![SceneComponent::AudioSource {
                audio: AssetHandle::from_raw(99),
            }],
        });
        SceneImporter::save(&scene, &path).unwrap();

        let loaded = SceneImporter.load(&path).unwrap();
        assert_eq!(loaded.name, "Level");
        assert!(!loaded.handle().is_valid());
        assert_eq!(loaded.referenced_assets(), vec![AssetHandle::from_raw(99)]);
    }
}
