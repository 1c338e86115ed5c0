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

//! # Hearth IO
//!
//! Everything in the asset subsystem that touches the disk: the registry and
//! its RON document, the extension table, project configuration, and the
//! per-type importers behind the [`AssetImporter`] dispatch façade.

#![warn(missing_docs)]

pub mod extension;
pub mod importer;
pub mod project;
pub mod registry;

pub use extension::{asset_type_from_extension, asset_type_from_path, normalize_asset_path};
pub use importer::{AssetImporter, ImportContext, ImportError, Importer};
pub use project::{Project, ProjectConfig, ProjectError};
pub use registry::{AssetRegistry, RegistryError};
