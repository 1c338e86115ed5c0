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

//! The editor-side asset manager.

use super::{AssetManagerConfig, Resolver};
use hearth_core::asset::{Asset, AssetHandle, AssetManagerBase, AssetMetadata, AssetType};
use hearth_core::{AssetError, TaskWorker, Timestep};
use hearth_data::LoadedAssets;
use hearth_io::{
    asset_type_from_path, normalize_asset_path, AssetImporter, AssetRegistry, ImportContext,
    Project, RegistryError,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

/// A lazily invoked producer for an asset registered through
/// [`EditorAssetManager::insert_asset`].
pub type AssetLoader = Box<dyn Fn() -> Option<Arc<dyn Asset>>>;

/// The stateful asset façade used while authoring a project.
///
/// It owns the registry, the loaded-asset cache and the task worker that
/// finalizes background imports. The worker holds main-thread closures, which
/// makes the manager neither `Send` nor `Sync`: every mutation happens on
/// the thread that created it.
pub struct EditorAssetManager {
    asset_directory: PathBuf,
    registry_path: PathBuf,
    registry: AssetRegistry,
    loaded: LoadedAssets,
    loaders: HashMap<AssetHandle, AssetLoader>,
    worker: TaskWorker,
    config: AssetManagerConfig,
    dirty: bool,
}

impl EditorAssetManager {
    /// Creates a manager around an existing registry.
    pub fn with_registry(
        asset_directory: impl Into<PathBuf>,
        registry_path: impl Into<PathBuf>,
        registry: AssetRegistry,
        config: AssetManagerConfig,
    ) -> Self {
        Self {
            asset_directory: asset_directory.into(),
            registry_path: registry_path.into(),
            registry,
            loaded: LoadedAssets::new(),
            loaders: HashMap::new(),
            worker: TaskWorker::new(),
            config,
            dirty: false,
        }
    }

    /// Opens a project's registry with the default configuration.
    pub fn open(project: &Project) -> Result<Self, RegistryError> {
        Self::open_with_config(project, AssetManagerConfig::default())
    }

    /// Opens a project's registry.
    ///
    /// A missing or malformed registry document is an error; the caller
    /// decides whether to start from an empty registry instead.
    pub fn open_with_config(
        project: &Project,
        config: AssetManagerConfig,
    ) -> Result<Self, RegistryError> {
        let registry_path = project.asset_registry_path();
        let registry = AssetRegistry::load(&registry_path)?;
        Ok(Self::with_registry(
            project.asset_directory(),
            registry_path,
            registry,
            config,
        ))
    }

    /// The registry.
    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    /// The loaded-asset cache.
    pub fn loaded_assets(&self) -> &LoadedAssets {
        &self.loaded
    }

    /// The active configuration.
    pub fn config(&self) -> AssetManagerConfig {
        self.config
    }

    /// The absolute asset directory.
    pub fn asset_directory(&self) -> &Path {
        &self.asset_directory
    }

    /// Where [`commit`](Self::commit) writes the registry.
    pub fn registry_path(&self) -> &Path {
        &self.registry_path
    }

    /// Whether the in-memory registry has changes not yet written.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Imports a file, returning its new handle or [`AssetHandle::INVALID`].
    ///
    /// `path` may be absolute or relative to the asset directory.
    pub fn import_asset(&mut self, path: impl AsRef<Path>) -> AssetHandle {
        self.try_import_asset(path).unwrap_or(AssetHandle::INVALID)
    }

    /// Imports a file, reporting why it failed.
    ///
    /// Nothing is registered unless the importer succeeds.
    pub fn try_import_asset(&mut self, path: impl AsRef<Path>) -> Result<AssetHandle, AssetError> {
        let handle = self.import_uncommitted(path.as_ref())?;
        self.registry_changed();
        Ok(handle)
    }

    fn import_uncommitted(&mut self, path: &Path) -> Result<AssetHandle, AssetError> {
        let relative = normalize_asset_path(&self.asset_directory, path).ok_or_else(|| {
            log::error!(
                "'{}' is outside the asset directory '{}'; import refused.",
                path.display(),
                self.asset_directory.display()
            );
            AssetError::OutsideAssetDirectory(path.to_path_buf())
        })?;
        let asset_type = asset_type_from_path(&relative);
        if asset_type.is_none() {
            log::warn!("No asset type for '{}'; import skipped.", relative.display());
            return Err(AssetError::UnknownExtension(relative));
        }

        let handle = self.mint_handle();
        let metadata = AssetMetadata::new(relative, asset_type);
        let asset = {
            let mut ctx = ImportContext::new(&self.asset_directory, &mut self.worker);
            AssetImporter::import_asset(handle, &metadata, &mut ctx)
        }
        .inspect_err(|e| {
            log::error!("Import of '{}' failed: {}", metadata.filepath.display(), e)
        })?;

        log::info!(
            "Imported '{}' as {} ({}).",
            metadata.filepath.display(),
            handle,
            asset_type
        );
        self.loaded.insert(handle, asset);
        self.registry.insert(handle, metadata);
        Ok(handle)
    }

    /// Imports every file under the asset directory that has a known
    /// extension and is not registered yet.
    ///
    /// Returns the new handles. Files that fail to import are logged and skipped.
    pub fn import_directory(&mut self) -> Vec<AssetHandle> {
        let candidates: Vec<PathBuf> = WalkDir::new(&self.asset_directory)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping unreadable entry while scanning assets: {e}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| normalize_asset_path(&self.asset_directory, entry.path()))
            .filter(|relative| !asset_type_from_path(relative).is_none())
            .filter(|relative| self.registry.find_by_path(relative).is_none())
            .collect();

        let imported: Vec<AssetHandle> = candidates
            .iter()
            .filter_map(|relative| self.import_uncommitted(relative).ok())
            .collect();

        log::info!("Directory scan imported {} assets.", imported.len());
        if !imported.is_empty() {
            self.registry_changed();
        }
        imported
    }

    /// Resolves a scene file to its handle, importing it on first use.
    ///
    /// Returns [`AssetHandle::INVALID`] if the path is not a scene, lies
    /// outside the asset directory, or fails to import.
    pub fn open_scene(&mut self, path: impl AsRef<Path>) -> AssetHandle {
        let path = path.as_ref();
        let Some(relative) = normalize_asset_path(&self.asset_directory, path) else {
            log::error!("Scene '{}' is outside the asset directory.", path.display());
            return AssetHandle::INVALID;
        };
        if asset_type_from_path(&relative) != AssetType::Scene {
            log::warn!("'{}' is not a scene file.", relative.display());
            return AssetHandle::INVALID;
        }
        match self.registry.find_by_path(&relative) {
            Some(handle) => handle,
            None => self.import_asset(&relative),
        }
    }

    /// Registers a handle whose resource comes from `loader` instead of an importer.
    ///
    /// Returns `false` if the handle is invalid or the metadata has no type.
    pub fn insert_asset(
        &mut self,
        handle: AssetHandle,
        metadata: AssetMetadata,
        loader: AssetLoader,
    ) -> bool {
        if !handle.is_valid() || metadata.asset_type.is_none() {
            log::warn!("Rejected insert of {handle}: invalid handle or untyped metadata.");
            return false;
        }
        self.loaders.insert(handle, loader);
        self.registry.insert(handle, metadata);
        self.registry_changed();
        true
    }

    /// Removes a handle from the registry and the cache.
    ///
    /// Returns `true` if it was registered.
    pub fn remove_asset(&mut self, handle: AssetHandle) -> bool {
        let existed = self.registry.remove(handle).is_some();
        self.loaded.remove(&handle);
        self.loaders.remove(&handle);
        if existed {
            log::info!("Removed asset {handle}.");
            self.registry_changed();
        }
        existed
    }

    /// Evicts the cached instance, forcing the next request to re-import.
    ///
    /// Returns `true` if something was resident.
    pub fn remove_loaded_asset(&mut self, handle: AssetHandle) -> bool {
        self.loaded.remove(&handle).is_some()
    }

    /// Registered metadata for a handle.
    pub fn metadata(&self, handle: AssetHandle) -> Option<&AssetMetadata> {
        self.registry.get(handle)
    }

    /// Registered relative path for a handle, or an empty path.
    pub fn filepath(&self, handle: AssetHandle) -> &Path {
        self.registry
            .get(handle)
            .map(|meta| meta.filepath.as_path())
            .unwrap_or(Path::new(""))
    }

    /// Writes the registry document.
    pub fn commit(&mut self) -> Result<(), RegistryError> {
        self.registry.save(&self.registry_path)?;
        self.dirty = false;
        Ok(())
    }

    /// Drains finished background imports. Call once per frame.
    pub fn update(&mut self, ts: Timestep) -> usize {
        self.worker.update(ts)
    }

    /// Number of background imports still in flight.
    pub fn pending_tasks(&self) -> usize {
        self.worker.len()
    }

    fn mint_handle(&self) -> AssetHandle {
        loop {
            let handle = AssetHandle::generate();
            if !self.registry.contains(handle) {
                return handle;
            }
            log::trace!("Handle {handle} collided, re-rolling.");
        }
    }

    fn registry_changed(&mut self) {
        self.dirty = true;
        if self.config.auto_commit {
            self.commit_logged();
        }
    }

    fn commit_logged(&mut self) {
        if let Err(e) = self.commit() {
            log::error!(
                "Asset registry commit to '{}' failed: {}",
                self.registry_path.display(),
                e
            );
        }
    }
}

impl AssetManagerBase for EditorAssetManager {
    fn get_asset(&mut self, handle: AssetHandle) -> Option<Arc<dyn Asset>> {
        Resolver {
            asset_directory: &self.asset_directory,
            registry: &self.registry,
            loaded: &mut self.loaded,
            worker: &mut self.worker,
            loader: self.loaders.get(&handle),
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
            .unwrap_or(AssetType::None)
    }
}

impl std::fmt::Debug for EditorAssetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorAssetManager")
            .field("asset_directory", &self.asset_directory)
            .field("registered", &self.registry.len())
            .field("loaded", &self.loaded.len())
            .field("pending_tasks", &self.worker.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}
