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

//! Decodes image files into [`Texture2D`].

use super::{ImportError, Importer};
use hearth_core::asset::AssetHandle;
use hearth_data::assets::Texture2D;
use std::path::Path;

/// Imports `.png` and `.jpg` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextureImporter;

impl Importer for TextureImporter {
    type Output = Texture2D;

    fn read(&self, handle: AssetHandle, path: &Path) -> Result<Texture2D, ImportError> {
        let bytes = std::fs::read(path).map_err(|e| ImportError::io(path, e))?;
        let image = image::load_from_memory(&bytes)?;

        // Kept in sRGB.
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Texture2D::from_rgba8(handle, width, height, rgba.into_raw()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checker.png");
        let mut img = image::RgbaImage::new(4, 2);
        img.put_pixel(1, 0, image::Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();

        let texture = TextureImporter.load(&path).unwrap();
        assert_eq!((texture.width, texture.height), (4, 2));
        assert_eq!(&texture.pixels[4..8], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(matches!(TextureImporter.load(&path), Err(ImportError::Image(_))));
    }
}
