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

//! Defines the font asset and the face metrics that fill it.
//!
//! Fonts are the one asset type whose heavy work happens off the main thread.
//! The importer hands out a [`Font`] whose face slot is empty, parses the file
//! on a background task, and fills the slot from the main thread once the
//! task is drained.

use hearth_core::asset::{Asset, AssetHandle, AssetType};
use std::sync::OnceLock;
use thiserror::Error;
use ttf_parser::{Face, FaceParsingError, RawFace};

/// Errors raised while reading an sfnt font file.
#[derive(Debug, Error)]
pub enum FontParseError {
    /// The face is malformed or lacks a required table.
    #[error("malformed font face: {0}")]
    Face(#[from] FaceParsingError),
}

/// The face metrics the asset layer keeps from a parsed font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontData {
    /// Design units per em, from `head`.
    pub units_per_em: u16,
    /// Number of glyphs, from `maxp`.
    pub glyph_count: u16,
    /// Faces in the file; more than one for a collection.
    pub face_count: u32,
    /// Whether `post` marks the face as fixed pitch.
    pub monospaced: bool,
}

impl FontData {
    /// Parses the first face of a font file or collection.
    pub fn parse(bytes: &[u8]) -> Result<Self, FontParseError> {
        let face = Face::parse(bytes, 0)?;
        Ok(Self {
            units_per_em: face.units_per_em(),
            glyph_count: face.number_of_glyphs(),
            face_count: ttf_parser::fonts_in_collection(bytes).unwrap_or(1),
            monospaced: face.is_monospaced(),
        })
    }

    /// Checks the sfnt magic and table directory without reading any table.
    ///
    /// `header` may be a prefix of the file as long as it covers the
    /// table directory.
    pub fn check_header(header: &[u8]) -> Result<(), FontParseError> {
        RawFace::parse(header, 0)?;
        Ok(())
    }
}

/// A font whose face is filled in asynchronously.
#[derive(Debug)]
pub struct Font {
    handle: AssetHandle,
    /// Display name, usually the file stem.
    pub name: String,
    face: OnceLock<FontData>,
}

impl Font {
    /// Creates a font with an empty face slot.
    pub fn pending(handle: AssetHandle, name: impl Into<String>) -> Self {
        Self {
            handle,
            name: name.into(),
            face: OnceLock::new(),
        }
    }

    /// Fills the face slot. Returns `false` if it was already filled.
    pub fn finalize(&self, data: FontData) -> bool {
        self.face.set(data).is_ok()
    }

    /// Whether the background parse has been finalized.
    pub fn is_ready(&self) -> bool {
        self.face.get().is_some()
    }

    /// The parsed face, once ready.
    pub fn face(&self) -> Option<&FontData> {
        self.face.get()
    }
}

impl Asset for Font {
    fn handle(&self) -> AssetHandle {
        self.handle
    }

    fn asset_type(&self) -> AssetType {
        AssetType::Font
    }
}
