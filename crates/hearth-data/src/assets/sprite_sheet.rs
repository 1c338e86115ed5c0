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

//! Defines the sprite sheet asset.

use hearth_core::asset::{Asset, AssetHandle, AssetType};
use serde::{Deserialize, Serialize};

/// A named rectangle inside the sheet's texture, in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteRect {
    /// Sprite name, unique within the sheet.
    pub name: String,
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

/// The on-disk form of a `.sprite` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSheetDocument {
    /// The texture the rectangles index into.
    pub texture: AssetHandle,
    /// The sprites.
    #[serde(default)]
    pub sprites: Vec<SpriteRect>,
}

/// A texture atlas split into named sprites.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    handle: AssetHandle,
    /// The atlas texture.
    pub texture: AssetHandle,
    /// The sprites, in document order.
    pub sprites: Vec<SpriteRect>,
}

impl SpriteSheet {
    /// Builds a sheet from its document.
    pub fn from_document(handle: AssetHandle, document: SpriteSheetDocument) -> Self {
        Self {
            handle,
            texture: document.texture,
            sprites: document.sprites,
        }
    }

    /// Snapshots the sheet into its document form.
    pub fn to_document(&self) -> SpriteSheetDocument {
        SpriteSheetDocument {
            texture: self.texture,
            sprites: self.sprites.clone(),
        }
    }

    /// Looks up a sprite by name.
    pub fn sprite(&self, name: &str) -> Option<&SpriteRect> {
        self.sprites.iter().find(|s| s.name == name)
    }
}

impl Asset for SpriteSheet {
    fn handle(&self) -> AssetHandle {
        self.handle
    }

    fn asset_type(&self) -> AssetType {
        AssetType::SpriteSheet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_lookup() {
        let sheet = SpriteSheet::from_document(
            AssetHandle::from_raw(9),
            SpriteSheetDocument {
                texture: AssetHandle::from_raw(3),
                sprites: vec![SpriteRect {
                    name: "idle_0".into(),
                    x: 0,
                    y: 0,
                    width: 16,
                    height: 16,
                }],
            },
        );
        assert_eq!(sheet.sprite("idle_0").map(|s| s.width), Some(16));
        assert!(sheet.sprite("run_0").is_none());
    }
}
