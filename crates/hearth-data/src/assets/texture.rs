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

//! Defines the resolved 2D texture asset.

use hearth_core::asset::{Asset, AssetHandle, AssetType};

/// Pixel layout of a [`Texture2D`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// 8 bits per channel, RGBA, sRGB encoded.
    Rgba8UnormSrgb,
}

impl TextureFormat {
    /// Bytes per pixel.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            TextureFormat::Rgba8UnormSrgb => 4,
        }
    }
}

/// A decoded 2D texture, resident on the CPU and ready for upload.
#[derive(Debug, Clone)]
pub struct Texture2D {
    handle: AssetHandle,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel layout of `pixels`.
    pub format: TextureFormat,
    /// Tightly packed rows, top to bottom.
    pub pixels: Vec<u8>,
}

impl Texture2D {
    /// Wraps decoded RGBA8 pixels.
    pub fn from_rgba8(handle: AssetHandle, width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);
        Self {
            handle,
            width,
            height,
            format: TextureFormat::Rgba8UnormSrgb,
            pixels,
        }
    }

    /// A single opaque white pixel, used where a texture is referenced but absent.
    pub fn white(handle: AssetHandle) -> Self {
        Self::from_rgba8(handle, 1, 1, vec![255; 4])
    }

    /// Size of the pixel buffer in bytes.
    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }
}

impl Asset for Texture2D {
    fn handle(&self) -> AssetHandle {
        self.handle
    }

    fn asset_type(&self) -> AssetType {
        AssetType::Texture
    }
}
