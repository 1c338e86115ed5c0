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

//! Resolved asset resources and the cache that holds them.

mod audio;
mod font;
mod material;
mod mesh;
mod scene;
mod sprite_sheet;
mod storage;
mod texture;

pub use audio::*;
pub use font::*;
pub use material::*;
pub use mesh::*;
pub use scene::*;
pub use sprite_sheet::*;
pub use storage::*;
pub use texture::*;
