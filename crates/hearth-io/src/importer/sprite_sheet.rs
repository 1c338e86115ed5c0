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

//! Reads and writes sprite sheet documents.

use super::{ImportError, Importer};
use hearth_core::asset::AssetHandle;
use hearth_data::assets::{SpriteSheet, SpriteSheetDocument};
use ron::ser::PrettyConfig;
use std::fs;
use std::path::Path;

/// Imports `.sprite` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpriteSheetImporter;

impl SpriteSheetImporter {
    /// Writes a sprite sheet as a RON document.
    pub fn save(sheet: &SpriteSheet, path: &Path) -> Result<(), ImportError> {
        let text = ron::ser::to_string_pretty(&sheet.to_document(), PrettyConfig::default())?;
        fs::write(path, text).map_err(|e| ImportError::io(path, e))
    }
}

impl Importer for SpriteSheetImporter {
    type Output = SpriteSheet;

    fn read(&self, handle: AssetHandle, path: &Path) -> Result<SpriteSheet, ImportError> {
        let text = fs::read_to_string(path).map_err(|e| ImportError::io(path, e))?;
        let document: SpriteSheetDocument = ron::from_str(&text)?;
        if !document.texture.is_valid() {
            log::warn!("Sprite sheet '{}' has no texture.", path.display());
        }
        Ok(SpriteSheet::from_document(handle, document))
    }
}
