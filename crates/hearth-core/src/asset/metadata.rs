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

use super::AssetType;
use std::path::{Component, Path, PathBuf};

/// Describes where an asset lives and what it is, independent of load state.
///
/// This is the "identity card" the registry stores for every handle. It is
/// enough for the importer dispatch to resolve the asset without any other
/// context than the project's asset directory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssetMetadata {
    /// Path relative to the project asset directory, `/`-separated.
    pub filepath: PathBuf,

    /// The importer tag for this asset.
    pub asset_type: AssetType,
}

impl AssetMetadata {
    /// Creates metadata for a relative path and type.
    pub fn new(filepath: impl Into<PathBuf>, asset_type: AssetType) -> Self {
        Self {
            filepath: filepath.into(),
            asset_type,
        }
    }

    /// The relative path as a `/`-separated string, the form that is persisted.
    pub fn filepath_string(&self) -> String {
        generic_path_string(&self.filepath)
    }

    /// Returns `true` when this metadata points at something importable.
    pub fn is_valid(&self) -> bool {
        !self.asset_type.is_none() && !self.filepath.as_os_str().is_empty()
    }
}

/// Renders a path with `/` separators regardless of the host platform.
///
/// A root or drive prefix is kept once at the front.
pub fn generic_path_string(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
            Component::RootDir => out.push('/'),
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    out
}
