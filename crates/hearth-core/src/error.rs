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

//! Defines the error taxonomy shared by the asset subsystem.

use crate::asset::{AssetHandle, AssetType};
use std::path::PathBuf;

/// A boxed, thread-safe error produced by a decoder or serializer.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// An error raised while resolving, importing or persisting an asset.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The handle is not present in the registry.
    #[error("asset handle {0} is not registered")]
    InvalidHandle(AssetHandle),

    /// The file extension does not map to any asset type.
    #[error("no asset type is registered for the extension of '{}'", .0.display())]
    UnknownExtension(PathBuf),

    /// The path lies outside the project asset directory.
    #[error("'{}' is outside the asset directory", .0.display())]
    OutsideAssetDirectory(PathBuf),

    /// The asset type has no importer.
    #[error("no importer is available for {0}")]
    UnsupportedType(AssetType),

    /// The importer failed to produce a resource.
    #[error("failed to import '{}'", .path.display())]
    ImportFailed {
        /// The path that was being imported.
        path: PathBuf,
        /// The decoder's error.
        #[source]
        source: BoxedError,
    },

    /// The registry could not be written to or read from disk.
    #[error("asset registry persistence failed")]
    Persistence(#[source] BoxedError),

    /// The operating system refused to start a background task.
    #[error("failed to spawn background task '{label}'")]
    TaskSpawn {
        /// The task's label.
        label: String,
        /// The spawn error.
        #[source]
        source: std::io::Error,
    },
}
