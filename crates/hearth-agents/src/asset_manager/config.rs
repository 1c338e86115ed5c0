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

/// Tunables for [`EditorAssetManager`](super::EditorAssetManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetManagerConfig {
    /// Persist the registry after every mutation. When off, mutations only
    /// mark the registry dirty until [`commit`](super::EditorAssetManager::commit).
    pub auto_commit: bool,
}

impl Default for AssetManagerConfig {
    fn default() -> Self {
        Self { auto_commit: true }
    }
}

impl AssetManagerConfig {
    /// Returns a copy with `auto_commit` set.
    pub fn with_auto_commit(mut self, auto_commit: bool) -> Self {
        self.auto_commit = auto_commit;
        self
    }
}
