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

//! A read-only asset manager for shipped builds.

use super::Resolver;
use hearth_core::asset::{Asset, AssetHandle, AssetManagerBase, AssetType};
use hearth_core::{TaskWorker, Timestep};
use hearth_data::LoadedAssets;
use hearth_io::{AssetRegistry, Project, RegistryError};
use std::path::PathBuf;
use std::sync::Arc;

/// Serves a registry loaded from disk without ever changing it.
pub struct RuntimeAssetManager {
    asset_directory: PathBuf,
    registry: AssetRegistry,
    loaded: LoadedAssets,
    worker: TaskWorker,
}

impl RuntimeAssetManager {
    /// Wraps an already loaded registry.
    pub fn new(asset_directory: impl Into<PathBuf>, registry: AssetRegistry) -> Self {
        Self {
            asset_directory: asset_directory.into(),
            registry,
            loaded: LoadedAssets::new(),
            worker: TaskWorker::new(),
        }
    }

    /// Loads a project's registry.
    pub fn open(project: &Project) -> Result<Self, RegistryError> {
        let registry = AssetRegistry::load(&project.asset_registry_path())?;
        Ok(Self::new(project.asset_directory(), registry))
    }

    /// The registry being served.
    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    /// Drains finished background imports.
    pub fn update(&mut self, ts: Timestep) -> usize {
        self.worker.update(ts)
    }

    /// Number of background imports still in flight.
    pub fn pending_tasks(&self) -> usize {
        self.worker.len()
    }
}

impl AssetManagerBase for RuntimeAssetManager {
    fn get_asset(&mut self, handle: AssetHandle) -> Option<Arc<dyn Asset>> {
        Resolver {
            asset_directory: &self.asset_directory,
            registry: &self.registry,
            loaded: &mut self.loaded,
            worker: &mut self.worker,
            loader: None,
        }
        .resolve(handle)
    }

    fn is_asset_handle_valid(&self, handle: AssetHandle) -> bool {
        handle.is_valid() && self.registry.contains(handle)
    }

    fn is_asset_loaded(&self, handle: AssetHandle) -> bool {
        self.loaded.contains(&handle)
    }

    fn get_asset_type(&self, handle: AssetHandle) -> AssetType {
        self.registry
            .get(handle)
            .map(|meta| meta.asset_type)
            .unwrap_or_default()
    }
}
