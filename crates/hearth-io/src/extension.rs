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

//! The fixed file-extension to [`AssetType`] table and path normalization.

use hearth_core::asset::{generic_path_string, AssetType};
use std::path::{Component, Path, PathBuf};

/// Every recognized extension, lowercase and without the leading dot.
pub const EXTENSION_TABLE: &[(&str, AssetType)] = &[
    ("org", AssetType::Scene),
    ("origin", AssetType::Scene),
    ("png", AssetType::Texture),
    ("jpg", AssetType::Texture),
    ("jpeg", AssetType::Texture),
    ("ttf", AssetType::Font),
    ("otf", AssetType::Font),
    ("obj", AssetType::StaticMesh),
    ("gltf", AssetType::StaticMesh),
    ("glb", AssetType::StaticMesh),
    ("fbx", AssetType::StaticMesh),
    ("mat", AssetType::Material),
    ("ogg", AssetType::Audio),
    ("mp3", AssetType::Audio),
    ("wav", AssetType::Audio),
    ("sprite", AssetType::SpriteSheet),
];

/// Maps an extension (with or without the leading dot, any case) to its type.
///
/// Unknown extensions map to [`AssetType::None`].
pub fn asset_type_from_extension(extension: &str) -> AssetType {
    let extension = extension.trim_start_matches('.');
    EXTENSION_TABLE
        .iter()
        .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
        .map(|(_, ty)| *ty)
        .unwrap_or(AssetType::None)
}

/// Maps a path to the type its extension implies.
pub fn asset_type_from_path(path: &Path) -> AssetType {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(asset_type_from_extension)
        .unwrap_or(AssetType::None)
}

/// Rewrites `path` relative to the asset directory with `/` separators.
///
/// Paths under `asset_directory` lose that prefix and `.` components are
/// dropped. Returns `None` for paths that resolve outside the asset
/// directory: absolute paths elsewhere, `..` components, or nothing at all.
pub fn normalize_asset_path(asset_directory: &Path, path: &Path) -> Option<PathBuf> {
    let relative = path.strip_prefix(asset_directory).unwrap_or(path);
    let mut cleaned = PathBuf::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => cleaned.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if cleaned.as_os_str().is_empty() {
        return None;
    }
    Some(PathBuf::from(generic_path_string(&cleaned)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(asset_type_from_extension(".PNG"), AssetType::Texture);
        assert_eq!(asset_type_from_extension("Wav"), AssetType::Audio);
        assert_eq!(asset_type_from_path(Path::new("levels/one.org")), AssetType::Scene);
        assert_eq!(asset_type_from_path(Path::new("model.FBX")), AssetType::StaticMesh);
    }

    #[test]
    fn test_unknown_maps_to_none() {
        assert_eq!(asset_type_from_extension("unknownext"), AssetType::None);
        assert_eq!(asset_type_from_path(Path::new("README")), AssetType::None);
    }

    #[test]
    fn test_normalize_strips_asset_directory() {
        let root = Path::new("/projects/demo/Assets");
        assert_eq!(
            normalize_asset_path(root, Path::new("/projects/demo/Assets/textures/wall.png")),
            Some(PathBuf::from("textures/wall.png"))
        );
        assert_eq!(
            normalize_asset_path(root, Path::new("./sounds/hit.wav")),
            Some(PathBuf::from("sounds/hit.wav"))
        );
    }

    #[test]
    fn test_normalize_rejects_paths_outside_asset_directory() {
        let root = Path::new("/projects/demo/Assets");
        assert_eq!(normalize_asset_path(root, Path::new("/tmp/elsewhere/x.png")), None);
        assert_eq!(normalize_asset_path(root, Path::new("../secrets/x.png")), None);
        assert_eq!(
            normalize_asset_path(root, Path::new("/projects/demo/Assets/../x.png")),
            None
        );
        assert_eq!(normalize_asset_path(root, Path::new("/projects/demo/Assets")), None);
    }
}
