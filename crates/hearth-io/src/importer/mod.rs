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

//! The importer contract and the dispatch façade over the per-type importers.
//!
//! Each importer turns a file into one concrete resource. [`AssetImporter`]
//! is the only place that maps an [`AssetType`] to an importer, so adding a
//! type means adding one match arm there.

mod audio;
mod font;
mod material;
mod model;
mod scene;
mod sprite_sheet;
mod texture;

pub use audio::AudioImporter;
pub use font::FontImporter;
pub use material::MaterialImporter;
pub use model::ModelImporter;
pub use scene::SceneImporter;
pub use sprite_sheet::SpriteSheetImporter;
pub use texture::TextureImporter;

use hearth_core::asset::{Asset, AssetHandle, AssetMetadata, AssetType};
use hearth_core::{AssetError, TaskWorker};
use hearth_data::assets::FontParseError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by a per-type importer.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The source file could not be read.
    #[error("cannot read '{}'", .path.display())]
    Io {
        /// The file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// An image decoder error.
    #[error("image decoding failed")]
    Image(#[from] image::ImageError),
    /// A WAV decoder error.
    #[error("WAV decoding failed")]
    Wav(#[from] hound::Error),
    /// A compressed-audio decoder error.
    #[error("audio decoding failed")]
    Audio(#[from] symphonia::core::errors::Error),
    /// An OBJ parser error.
    #[error("OBJ parsing failed")]
    Obj(#[from] tobj::LoadError),
    /// A glTF parser error.
    #[error("glTF parsing failed")]
    Gltf(#[from] gltf::Error),
    /// A font parser error.
    #[error("font parsing failed")]
    Font(#[from] FontParseError),
    /// A RON document could not be parsed.
    #[error("document is malformed")]
    Document(#[from] ron::error::SpannedError),
    /// A RON document could not be written.
    #[error("document serialization failed")]
    Serialize(#[from] ron::Error),
    /// The file decoded but lacks something the resource requires.
    #[error("{0}")]
    MissingData(String),
    /// The extension is registered but no decoder handles it.
    #[error("no decoder for '.{0}' files")]
    UnsupportedFormat(String),
    /// The background decode could not be scheduled.
    #[error("failed to schedule background decode")]
    Schedule(#[from] AssetError),
}

impl ImportError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        ImportError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// What an importer may use beyond the metadata itself.
pub struct ImportContext<'a> {
    asset_directory: &'a Path,
    worker: &'a mut TaskWorker,
}

impl<'a> ImportContext<'a> {
    /// Binds an asset directory and the main-thread task worker.
    pub fn new(asset_directory: &'a Path, worker: &'a mut TaskWorker) -> Self {
        Self {
            asset_directory,
            worker,
        }
    }

    /// The absolute asset directory.
    pub fn asset_directory(&self) -> &Path {
        self.asset_directory
    }

    /// The on-disk path of an asset.
    pub fn resolve(&self, metadata: &AssetMetadata) -> PathBuf {
        self.asset_directory.join(&metadata.filepath)
    }

    /// The worker background decodes are queued on.
    pub fn worker(&mut self) -> &mut TaskWorker {
        self.worker
    }
}

/// A per-type importer.
///
/// `read` is the only required operation. `import` is the handle-oriented
/// entry used by the asset manager and `load` the path-oriented one used for
/// files that are not registered yet.
pub trait Importer {
    /// The resource this importer produces.
    type Output: Asset;

    /// Decodes the file at `path` into a resource carrying `handle`.
    fn read(&self, handle: AssetHandle, path: &Path) -> Result<Self::Output, ImportError>;

    /// Imports a registered asset.
    fn import(
        &self,
        handle: AssetHandle,
        metadata: &AssetMetadata,
        ctx: &mut ImportContext<'_>,
    ) -> Result<Arc<Self::Output>, ImportError> {
        self.read(handle, &ctx.resolve(metadata)).map(Arc::new)
    }

    /// Loads a file that has no handle.
    fn load(&self, path: &Path) -> Result<Self::Output, ImportError> {
        self.read(AssetHandle::INVALID, path)
    }
}

/// Stateless dispatch from [`AssetType`] to the matching importer.
pub struct AssetImporter;

impl AssetImporter {
    /// Imports `metadata` as `handle` with the importer for its type.
    pub fn import_asset(
        handle: AssetHandle,
        metadata: &AssetMetadata,
        ctx: &mut ImportContext<'_>,
    ) -> Result<Arc<dyn Asset>, AssetError> {
        log::trace!("Importing {} '{}'.", metadata.asset_type, metadata.filepath.display());
        let result: Result<Arc<dyn Asset>, ImportError> = match metadata.asset_type {
            AssetType::Scene => SceneImporter.import(handle, metadata, ctx).map(erase),
            AssetType::Texture => TextureImporter.import(handle, metadata, ctx).map(erase),
            AssetType::Font => FontImporter.import(handle, metadata, ctx).map(erase),
            AssetType::Audio => AudioImporter.import(handle, metadata, ctx).map(erase),
            AssetType::StaticMesh => ModelImporter.import(handle, metadata, ctx).map(erase),
            AssetType::Mesh => ModelImporter.import_mesh(handle, metadata, ctx).map(erase),
            AssetType::Material => MaterialImporter.import(handle, metadata, ctx).map(erase),
            AssetType::SpriteSheet => SpriteSheetImporter.import(handle, metadata, ctx).map(erase),
            ty @ (AssetType::None | AssetType::MeshSource | AssetType::Animation) => {
                return Err(AssetError::UnsupportedType(ty));
            }
        };
        result.map_err(|e| AssetError::ImportFailed {
            path: metadata.filepath.clone(),
            source: Box::new(e),
        })
    }
}

fn erase<T: Asset>(asset: Arc<T>) -> Arc<dyn Asset> {
    asset
}

/// The file stem of `path`, used as a display name.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Lowercase extension of `path`.
pub(crate) fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default()
}
