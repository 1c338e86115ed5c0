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

//! The in-memory cache of resolved assets.

use hearth_core::asset::{downcast_asset, Asset, AssetHandle};
use std::collections::HashMap;
use std::sync::Arc;

/// The loaded-asset cache: a memoization layer mapping handles to resolved resources.
///
/// Holding an entry here means "resident", nothing more. A handle missing from
/// the cache may still be perfectly valid; the registry decides that. Entries
/// are shared, so removing one only drops the cache's reference.
#[derive(Default, Clone)]
pub struct LoadedAssets {
    storage: HashMap<AssetHandle, Arc<dyn Asset>>,
}

impl LoadedAssets {
    /// Creates a new, empty cache.
    pub fn new() -> Self {
        Self {
            storage: HashMap::new(),
        }
    }

    /// Caches a resolved asset, returning the instance it replaced, if any.
    pub fn insert(&mut self, handle: AssetHandle, asset: Arc<dyn Asset>) -> Option<Arc<dyn Asset>> {
        self.storage.insert(handle, asset)
    }

    /// Retrieves the cached instance for a handle.
    pub fn get(&self, handle: &AssetHandle) -> Option<&Arc<dyn Asset>> {
        self.storage.get(handle)
    }

    /// Retrieves the cached instance downcast to `T`.
    pub fn get_as<T: Asset>(&self, handle: &AssetHandle) -> Option<Arc<T>> {
        self.storage.get(handle).cloned().and_then(downcast_asset::<T>)
    }

    /// Checks if a handle has a resident instance.
    pub fn contains(&self, handle: &AssetHandle) -> bool {
        self.storage.contains_key(handle)
    }

    /// Evicts the cached instance for a handle.
    pub fn remove(&mut self, handle: &AssetHandle) -> Option<Arc<dyn Asset>> {
        self.storage.remove(handle)
    }

    /// Number of resident assets.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` when nothing is resident.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Iterates over the resident handles in no particular order.
    pub fn handles(&self) -> impl Iterator<Item = AssetHandle> + '_ {
        self.storage.keys().copied()
    }

    /// Drops every resident instance.
    pub fn clear(&mut self) {
        self.storage.clear();
    }
}

impl std::fmt::Debug for LoadedAssets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedAssets")
            .field("resident", &self.storage.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Texture2D;

    #[test]
    fn test_insert_get_remove() {
        let handle = AssetHandle::generate();
        let texture: Arc<dyn Asset> = Arc::new(Texture2D::white(handle));

        let mut cache = LoadedAssets::new();
        assert!(cache.insert(handle, texture.clone()).is_none());
        assert!(cache.contains(&handle));
        assert!(Arc::ptr_eq(cache.get(&handle).unwrap(), &texture));
        assert_eq!(cache.get_as::<Texture2D>(&handle).unwrap().width, 1);

        assert!(cache.remove(&handle).is_some());
        assert!(!cache.contains(&handle));
        assert!(cache.is_empty());
    }
}
