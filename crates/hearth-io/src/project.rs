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

//! Project configuration: where a project's assets and registry live.

use crate::registry::{AssetRegistry, RegistryError};
use hearth_core::asset::{AssetHandle, AssetManagerBase, AssetType};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extension of project files.
pub const PROJECT_FILE_EXTENSION: &str = "hproj";

/// Errors raised while creating, loading or saving a project.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// A filesystem operation failed.
    #[error("project I/O failed on '{}'", .path.display())]
    Io {
        /// The path involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The project file is not valid RON.
    #[error("project file '{}' is malformed", .path.display())]
    Syntax {
        /// The project file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: ron::error::SpannedError,
    },
    /// The project could not be rendered as RON.
    #[error("failed to serialize project")]
    Serialize(#[from] ron::Error),
    /// The initial registry document could not be written.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// The contents of a `.hproj` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project name.
    pub name: String,
    /// Scene opened when the project starts, or the invalid handle.
    pub start_scene: AssetHandle,
    /// Asset directory, relative to the project directory.
    pub asset_directory: PathBuf,
    /// Registry document, relative to the project directory.
    pub asset_registry: PathBuf,
    /// Compiled script module, relative to the project directory.
    pub script_module_path: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "Untitled".to_string(),
            start_scene: AssetHandle::INVALID,
            asset_directory: PathBuf::from("Assets"),
            asset_registry: PathBuf::from("AssetRegistry.hreg"),
            script_module_path: PathBuf::new(),
        }
    }
}

/// A [`ProjectConfig`] bound to the directory it lives in.
#[derive(Debug, Clone)]
pub struct Project {
    config: ProjectConfig,
    project_file: PathBuf,
}

impl Project {
    /// Creates a new project in `directory`.
    ///
    /// Writes `<name>.hproj`, creates the asset directory and an empty
    /// registry document.
    pub fn create(directory: &Path, name: &str) -> Result<Self, ProjectError> {
        let project = Self {
            config: ProjectConfig {
                name: name.to_string(),
                ..Default::default()
            },
            project_file: directory.join(format!("{name}.{PROJECT_FILE_EXTENSION}")),
        };
        let asset_dir = project.asset_directory();
        fs::create_dir_all(&asset_dir).map_err(|source| ProjectError::Io {
            path: asset_dir,
            source,
        })?;
        AssetRegistry::new().save(&project.asset_registry_path())?;
        project.save()?;
        log::info!(
            "Created project '{}' at '{}'.",
            name,
            project.project_file.display()
        );
        Ok(project)
    }

    /// Loads a project file.
    pub fn load(project_file: &Path) -> Result<Self, ProjectError> {
        let text = fs::read_to_string(project_file).map_err(|source| ProjectError::Io {
            path: project_file.to_path_buf(),
            source,
        })?;
        let config = ron::from_str(&text).map_err(|source| ProjectError::Syntax {
            path: project_file.to_path_buf(),
            source,
        })?;
        Ok(Self {
            config,
            project_file: project_file.to_path_buf(),
        })
    }

    /// Writes the project file.
    pub fn save(&self) -> Result<(), ProjectError> {
        let text = ron::ser::to_string_pretty(&self.config, ron::ser::PrettyConfig::default())?;
        fs::write(&self.project_file, text).map_err(|source| ProjectError::Io {
            path: self.project_file.clone(),
            source,
        })
    }

    /// The configuration.
    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Mutable access to the configuration. Call [`Project::save`] to persist.
    pub fn config_mut(&mut self) -> &mut ProjectConfig {
        &mut self.config
    }

    /// The project file path.
    pub fn project_file(&self) -> &Path {
        &self.project_file
    }

    /// The directory holding the project file.
    pub fn project_directory(&self) -> &Path {
        self.project_file.parent().unwrap_or(Path::new(""))
    }

    /// Absolute asset directory.
    pub fn asset_directory(&self) -> PathBuf {
        self.project_directory().join(&self.config.asset_directory)
    }

    /// Absolute path of the registry document.
    pub fn asset_registry_path(&self) -> PathBuf {
        self.project_directory().join(&self.config.asset_registry)
    }

    /// Resolves a path relative to the asset directory.
    pub fn asset_file_system_path(&self, relative: &Path) -> PathBuf {
        self.asset_directory().join(relative)
    }

    /// Sets the start scene if `handle` is a registered scene.
    ///
    /// Returns `false` and leaves the configuration untouched otherwise.
    pub fn set_start_scene(&mut self, handle: AssetHandle, manager: &dyn AssetManagerBase) -> bool {
        if !manager.is_asset_handle_valid(handle) || manager.get_asset_type(handle) != AssetType::Scene
        {
            log::warn!("Refusing start scene {handle}: not a registered scene.");
            return false;
        }
        self.config.start_scene = handle;
        true
    }
}
