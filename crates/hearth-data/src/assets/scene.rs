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

//! Defines the scene asset and its serializable document form.
//!
//! A scene file is a RON [`SceneDocument`]. Components refer to other assets
//! by [`AssetHandle`] only; resolving those handles is left to the caller.

use hearth_core::asset::{Asset, AssetHandle, AssetType};
use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Position, orientation and scale of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneTransform {
    /// Translation in world units.
    pub translation: [f32; 3],
    /// Rotation as an `xyzw` quaternion.
    pub rotation: [f32; 4],
    /// Per-axis scale.
    pub scale: [f32; 3],
}

impl Default for SceneTransform {
    fn default() -> Self {
        Self {
            translation: [0.0; 3],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0; 3],
        }
    }
}

/// A serializable component attached to a scene entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneComponent {
    /// The entity's transform.
    Transform(SceneTransform),
    /// Draws a 2D sprite from a texture.
    SpriteRenderer {
        /// Texture handle.
        texture: AssetHandle,
    },
    /// Draws a static mesh with a material.
    StaticMeshRenderer {
        /// Mesh handle.
        mesh: AssetHandle,
        /// Material handle.
        material: AssetHandle,
    },
    /// Plays an audio clip.
    AudioSource {
        /// Audio handle.
        audio: AssetHandle,
    },
    /// Renders a string with a font.
    Text {
        /// Font handle.
        font: AssetHandle,
        /// The string to draw.
        text: String,
    },
}

impl SceneComponent {
    /// The asset this component points at, if any.
    pub fn referenced_assets(&self) -> Vec<AssetHandle> {
        match self {
            SceneComponent::Transform(_) => Vec::new(),
            SceneComponent::SpriteRenderer { texture } => vec![*texture],
            SceneComponent::StaticMeshRenderer { mesh, material } => vec![*mesh, *material],
            SceneComponent::AudioSource { audio } => vec![*audio],
            SceneComponent::Text { font, .. } => vec![*font],
        }
    }
}

/// One entity in a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneEntity {
    /// Identifier, unique within the scene.
    pub id: u64,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Attached components.
    #[serde(default)]
    pub components: Vec<SceneComponent>,
}

/// The on-disk form of a scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Scene name.
    #[serde(default)]
    pub name: String,
    /// Entities in authoring order.
    #[serde(default)]
    pub entities: Vec<SceneEntity>,
}

/// A live scene.
///
/// Scenes are edited in place through [`Scene::entities_mut`], which is why
/// the manager rebuilds them from disk on every request instead of handing
/// out the cached instance.
#[derive(Debug)]
pub struct Scene {
    handle: AssetHandle,
    /// Scene name.
    pub name: String,
    entities: RwLock<Vec<SceneEntity>>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new(handle: AssetHandle, name: impl Into<String>) -> Self {
        Self {
            handle,
            name: name.into(),
            entities: RwLock::new(Vec::new()),
        }
    }

    /// Builds a scene from its document.
    pub fn from_document(handle: AssetHandle, document: SceneDocument) -> Self {
        Self {
            handle,
            name: document.name,
            entities: RwLock::new(document.entities),
        }
    }

    /// Snapshots the scene into its document form.
    pub fn to_document(&self) -> SceneDocument {
        SceneDocument {
            name: self.name.clone(),
            entities: self.entities().clone(),
        }
    }

    /// Read access to the entity list.
    pub fn entities(&self) -> RwLockReadGuard<'_, Vec<SceneEntity>> {
        self.entities.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access to the entity list.
    pub fn entities_mut(&self) -> RwLockWriteGuard<'_, Vec<SceneEntity>> {
        self.entities.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every asset handle referenced by the scene's components, deduplicated
    /// and in first-seen order.
    pub fn referenced_assets(&self) -> Vec<AssetHandle> {
        let mut handles = Vec::new();
        for entity in self.entities().iter() {
            for component in &entity.components {
                for handle in component.referenced_assets() {
                    if handle.is_valid() && !handles.contains(&handle) {
                        handles.push(handle);
                    }
                }
            }
        }
        handles
    }
}

impl Asset for Scene {
    fn handle(&self) -> AssetHandle {
        self.handle
    }

    fn asset_type(&self) -> AssetType {
        AssetType::Scene
    }
}
