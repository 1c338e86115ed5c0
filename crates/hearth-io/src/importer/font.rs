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

//! Imports font files through the background task bridge.

use super::{display_name, ImportContext, ImportError, Importer};
use hearth_core::asset::{AssetHandle, AssetMetadata};
use hearth_data::assets::{Font, FontData};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Bytes read up front to validate the sfnt header and table directory.
const HEADER_READ_LEN: u64 = 4096;

/// Imports `.ttf` and `.otf` files.
///
/// [`Importer::import`] checks the file header, then returns at once with a
/// [`Font`] whose face is empty; the file is parsed on a background thread
/// and the face is filled when the task worker next drains on the main
/// thread. [`Importer::load`] parses synchronously.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontImporter;

fn check_font_header(path: &Path) -> Result<(), ImportError> {
    let mut header = Vec::new();
    File::open(path)
        .and_then(|file| file.take(HEADER_READ_LEN).read_to_end(&mut header))
        .map_err(|e| ImportError::io(path, e))?;
    FontData::check_header(&header)?;
    Ok(())
}

fn parse_font_file(path: &Path) -> Result<FontData, ImportError> {
    let bytes = fs::read(path).map_err(|e| ImportError::io(path, e))?;
    Ok(FontData::parse(&bytes)?)
}

impl Importer for FontImporter {
    type Output = Font;

    fn read(&self, handle: AssetHandle, path: &Path) -> Result<Font, ImportError> {
        let font = Font::pending(handle, display_name(path));
        font.finalize(parse_font_file(path)?);
        Ok(font)
    }

    fn import(
        &self,
        handle: AssetHandle,
        metadata: &AssetMetadata,
        ctx: &mut ImportContext<'_>,
    ) -> Result<Arc<Font>, ImportError> {
        let path = ctx.resolve(metadata);
        check_font_header(&path)?;

        let font = Arc::new(Font::pending(handle, display_name(&path)));
        let slot = Arc::clone(&font);
        let label = format!("font:{}", metadata.filepath_string());
        ctx.worker().spawn(
            label,
            move || parse_font_file(&path),
            move |parsed: Result<FontData, ImportError>| match parsed {
                Ok(data) => {
                    log::debug!(
                        "Font {} ready: {} glyphs, {} units/em.",
                        handle,
                        data.glyph_count,
                        data.units_per_em
                    );
                    slot.finalize(data);
                }
                Err(e) => log::error!("Font {} failed to parse: {}", handle, e),
            },
        )?;
        Ok(font)
    }
}
