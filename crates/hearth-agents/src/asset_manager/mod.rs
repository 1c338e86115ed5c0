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

//! Implementations of [`AssetManagerBase`](hearth_core::asset::AssetManagerBase).
//!
//! [`EditorAssetManager`] can import, insert and remove assets and persists
//! its registry; [`RuntimeAssetManager`] serves a registry read-only. Both
//! resolve handles the same way:
//!
//! - an unregistered handle resolves to nothing;
//! - a resident non-scene asset is returned as the cached instance;
//! - anything else is imported (or produced by its lazy loader), cached, and
//!   returned. Scenes therefore come back as a fresh instance on every call.

mod config;
mod editor;
mod runtime;

pub use config::AssetManagerConfig;
pub use editor::{AssetLoader, EditorAssetManager};
pub use runtime::RuntimeAssetManager;

use hearth_core::asset::{Asset, AssetHandle, AssetType};
use hearth_core::TaskWorker;
use hearth_data::LoadedAssets;
use hearth_io::{AssetImporter, AssetRegistry, ImportContext};
use std::path::Path;
use std::sync::Arc;

/// The state a manager resolves against.
pub(crate) struct Resolver<'a> {
    pub asset_directory: &'a Path,
    pub registry: &'a AssetRegistry,
    pub loaded: &'a mut LoadedAssets,
    pub worker: &'a mut TaskWorker,
    pub loader: Option<&'a AssetLoader>,
}

impl Resolver<'_> {
    pub(crate) fn resolve(self, handle: AssetHandle) -> Option<Arc<dyn Asset>> {
        let metadata = self.registry.get(handle)?;

        if metadata.asset_type != AssetType::Scene {
            if let Some(asset) = self.loaded.get(&handle) {
                return Some(Arc::clone(asset));
            }
        }

        let asset = match self.loader {
            Some(loader) => loader().or_else(|| {
                log::error!("Lazy loader for asset {handle} produced nothing.");
                None
            }),
            None => {
                let mut ctx = ImportContext::new(self.asset_directory, self.worker);
                AssetImporter::import_asset(handle, metadata, &mut ctx)
                    .inspect_err(|e| {
                        log::error!(
                            "Asset {} ('{}') import failed: {}",
                            handle,
                            metadata.filepath.display(),
                            e
                        )
                    })
                    .ok()
            }
        }?;

        self.loaded.insert(handle, Arc::clone(&asset));
        Some(asset)
    }
}
