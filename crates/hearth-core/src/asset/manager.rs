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

use super::{downcast_asset, Asset, AssetHandle, AssetType};
use std::sync::Arc;

/// The contract the rest of the engine resolves asset handles through.
///
/// Rendering, scene serialization and editor panels only ever depend on this
/// trait, so an editor implementation (which can import and remove assets) and
/// a runtime implementation (read-only) are interchangeable.
///
/// Every operation degrades gracefully: an unknown handle yields `None`,
/// `false` or [`AssetType::None`], never a panic.
pub trait AssetManagerBase {
    /// Resolves a handle to its in-memory resource, importing it on a cache miss.
    ///
    /// Returns `None` for an invalid handle or when the import fails.
    fn get_asset(&mut self, handle: AssetHandle) -> Option<Arc<dyn Asset>>;

    /// Returns `true` iff the handle is present in the registry, loaded or not.
    fn is_asset_handle_valid(&self, handle: AssetHandle) -> bool;

    /// Returns `true` iff a resolved instance is held in the loaded-asset cache.
    fn is_asset_loaded(&self, handle: AssetHandle) -> bool;

    /// Returns the registered type of the handle, or [`AssetType::None`].
    fn get_asset_type(&self, handle: AssetHandle) -> AssetType;

    /// Resolves a handle and downcasts it to the expected resource type.
    fn get_asset_as<T: Asset>(&mut self, handle: AssetHandle) -> Option<Arc<T>>
    where
        Self: Sized,
    {
        self.get_asset(handle).and_then(downcast_asset::<T>)
    }
}
