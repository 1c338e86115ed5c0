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

//! Decodes audio files into [`AudioSource`].
//!
//! WAV goes through `hound`; every other format is probed by `symphonia`.

use super::{display_name, extension_of, ImportError, Importer};
use hearth_core::asset::AssetHandle;
use hearth_data::assets::AudioSource;
use std::fs::File;
use std::path::Path;
use symphonia::core::{
    audio::SampleBuffer, codecs::DecoderOptions, errors::Error as SymphoniaError,
    formats::FormatOptions, io::MediaSourceStream, meta::MetadataOptions, probe::Hint,
};

/// Imports `.wav`, `.ogg` and `.mp3` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct AudioImporter;

impl Importer for AudioImporter {
    type Output = AudioSource;

    fn read(&self, handle: AssetHandle, path: &Path) -> Result<AudioSource, ImportError> {
        let name = display_name(path);
        let extension = extension_of(path);
        let (samples, channels, sample_rate) = if extension == "wav" {
            decode_wav(path)?
        } else {
            decode_compressed(path, &extension)?
        };
        log::debug!(
            "Decoded '{}': {} samples, {} ch @ {} Hz.",
            path.display(),
            samples.len(),
            channels,
            sample_rate
        );
        Ok(AudioSource::new(handle, name, samples, channels, sample_rate))
    }
}

type Decoded = (Vec<f32>, u16, u32);

fn decode_wav(path: &Path) -> Result<Decoded, ImportError> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let max_value = (1u64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / max_value))
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    Ok((samples, spec.channels, spec.sample_rate))
}

fn decode_compressed(path: &Path, extension: &str) -> Result<Decoded, ImportError> {
    let file = File::open(path).map_err(|e| ImportError::io(path, e))?;
    let stream = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    hint.with_extension(extension);
    let probed = symphonia::default::get_probe().format(
        &hint,
        stream,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| ImportError::MissingData("no default audio track".into()))?;
    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| ImportError::MissingData("unknown sample rate".into()))?;
    let channels = track
        .codec_params
        .channels
        .ok_or_else(|| ImportError::MissingData("unknown channel count".into()))?
        .count() as u16;

    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut samples = Vec::<f32>::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            // End of stream.
            Err(SymphoniaError::IoError(_)) | Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(e.into()),
        };
        if packet.track_id() != track_id {
            continue;
        }
        match decoder.decode(&packet) {
            Ok(decoded) => {
                let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec());
                buffer.copy_interleaved_ref(decoded);
                samples.extend_from_slice(buffer.samples());
            }
            Err(SymphoniaError::DecodeError(e)) => {
                log::warn!("Skipping corrupt packet in '{}': {}", path.display(), e);
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok((samples, channels, sample_rate))
}
