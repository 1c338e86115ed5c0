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

//! Defines the material asset.

use hearth_core::asset::{Asset, AssetHandle, AssetType};
use serde::{Deserialize, Serialize};

/// The serializable surface description of a material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialProperties {
    /// Display name.
    pub name: String,
    /// Base color, linear RGBA.
    pub albedo_color: [f32; 4],
    /// Optional albedo texture.
    pub albedo_map: Option<AssetHandle>,
    /// Metalness in `[0, 1]`.
    pub metallic: f32,
    /// Perceptual roughness in `[0, 1]`.
    pub roughness: f32,
}

impl Default for MaterialProperties {
    fn default() -> Self {
        Self {
            name: String::new(),
            albedo_color: [1.0, 1.0, 1.0, 1.0],
            albedo_map: None,
            metallic: 0.0,
            roughness: 0.5,
        }
    }
}

/// A resolved material.
#[derive(Debug, Clone)]
pub struct Material {
    handle: AssetHandle,
    /// Surface parameters.
    pub properties: MaterialProperties,
}

impl Material {
    /// Wraps material properties, clamping the scalar factors into range.
    pub fn new(handle: AssetHandle, mut properties: MaterialProperties) -> Self {
        properties.metallic = properties.metallic.clamp(0.0, 1.0);
        properties.roughness = properties.roughness.clamp(0.0, 1.0);
        Self { handle, properties }
    }
}

impl Asset for Material {
    fn handle(&self) -> AssetHandle {
        self.handle
    }

    fn asset_type(&self) -> AssetType {
        AssetType::Material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_uses_defaults() {
        let props: MaterialProperties = ron::from_str("(name: \"Brick\", metallic: 2.0)").unwrap();
        let material = Material::new(AssetHandle::from_raw(4), props);
        assert_eq!(material.properties.name, "Brick");
        assert_eq!(material.properties.metallic, 1.0);
        assert_eq!(material.properties.roughness, 0.5);
        assert!(material.properties.albedo_map.is_none());
    }
}
