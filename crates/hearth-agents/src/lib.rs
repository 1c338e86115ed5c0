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

//! # Hearth Agents
//!
//! The stateful asset managers that the rest of the engine talks to. They own
//! the registry, the loaded-asset cache and the main-thread task worker, and
//! drive the importers in `hearth-io`.

#![warn(missing_docs)]

pub mod asset_manager;

pub use asset_manager::{AssetLoader, AssetManagerConfig, EditorAssetManager, RuntimeAssetManager};
