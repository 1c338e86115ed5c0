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

use std::fmt;
use std::str::FromStr;

/// Discriminator used to select the importer for an asset.
///
/// Every tag maps to exactly one concrete resource shape. [`AssetType::None`]
/// is the "unrecognized / unset" value and never appears in a registry entry
/// handed back to a caller as a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum AssetType {
    /// Unrecognized or unset.
    #[default]
    None,
    /// An editable scene document.
    Scene,
    /// A 2D texture.
    Texture,
    /// A font face.
    Font,
    /// A decoded audio source.
    Audio,
    /// A mesh whose sub-meshes are merged into a single stream.
    StaticMesh,
    /// A mesh whose sub-meshes are kept separate.
    Mesh,
    /// A surface material.
    Material,
    /// Raw mesh source data.
    MeshSource,
    /// An animation clip.
    Animation,
    /// A sprite sheet referencing a texture.
    SpriteSheet,
}

impl AssetType {
    /// Every tag, in declaration order.
    pub const ALL: [AssetType; 11] = [
        AssetType::None,
        AssetType::Scene,
        AssetType::Texture,
        AssetType::Font,
        AssetType::Audio,
        AssetType::StaticMesh,
        AssetType::Mesh,
        AssetType::Material,
        AssetType::MeshSource,
        AssetType::Animation,
        AssetType::SpriteSheet,
    ];

    /// Returns the persisted tag, e.g. `"AssetType::Texture"`.
    pub const fn as_tag(self) -> &'static str {
        match self {
            AssetType::None => "AssetType::None",
            AssetType::Scene => "AssetType::Scene",
            AssetType::Texture => "AssetType::Texture",
            AssetType::Font => "AssetType::Font",
            AssetType::Audio => "AssetType::Audio",
            AssetType::StaticMesh => "AssetType::StaticMesh",
            AssetType::Mesh => "AssetType::Mesh",
            AssetType::Material => "AssetType::Material",
            AssetType::MeshSource => "AssetType::MeshSource",
            AssetType::Animation => "AssetType::Animation",
            AssetType::SpriteSheet => "AssetType::SpriteSheet",
        }
    }

    /// Parses a persisted tag, mapping anything unknown to [`AssetType::None`].
    pub fn from_tag_lossy(tag: &str) -> Self {
        tag.parse().unwrap_or(AssetType::None)
    }

    /// Returns `true` for [`AssetType::None`].
    pub const fn is_none(self) -> bool {
        matches!(self, AssetType::None)
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Error returned when a string is not a known asset type tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown asset type tag '{0}'")]
pub struct UnknownAssetType(pub String);

impl FromStr for AssetType {
    type Err = UnknownAssetType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetType::ALL
            .into_iter()
            .find(|ty| ty.as_tag() == s)
            .ok_or_else(|| UnknownAssetType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip_is_lossless() {
        for ty in AssetType::ALL {
            assert_eq!(ty.to_string().parse::<AssetType>(), Ok(ty));
        }
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(
            "AssetType::Shader".parse::<AssetType>(),
            Err(UnknownAssetType("AssetType::Shader".into()))
        );
        assert_eq!(AssetType::from_tag_lossy("Texture"), AssetType::None);
        assert_eq!(
            AssetType::from_tag_lossy("AssetType::SpriteSheet"),
            AssetType::SpriteSheet
        );
    }
}
