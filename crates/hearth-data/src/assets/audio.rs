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

//! Defines the core asset type for audio data.

use hearth_core::asset::{Asset, AssetHandle, AssetType};
use std::time::Duration;

/// Represents a sound asset, decoded and ready for playback.
///
/// This struct holds audio data in a normalized, interleaved `f32` format,
/// which is the standard for high-quality audio processing pipelines.
#[derive(Debug, Clone)]
pub struct AudioSource {
    handle: AssetHandle,
    /// Display name, usually the file stem.
    pub name: String,
    /// The raw, interleaved audio samples.
    /// For stereo, samples are ordered `[L, R, L, R, ...]`.
    /// Values are expected to be in the range `[-1.0, 1.0]`.
    pub samples: Vec<f32>,
    /// The number of channels in the audio data (e.g., 1 for mono, 2 for stereo).
    pub channels: u16,
    /// The number of samples per second (e.g., 44100 Hz).
    pub sample_rate: u32,
}

impl AudioSource {
    /// Creates a new audio source from decoded samples.
    pub fn new(
        handle: AssetHandle,
        name: impl Into<String>,
        samples: Vec<f32>,
        channels: u16,
        sample_rate: u32,
    ) -> Self {
        Self {
            handle,
            name: name.into(),
            samples,
            channels,
            sample_rate,
        }
    }

    /// Number of sample frames (one sample per channel).
    pub fn frame_count(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels as usize
        }
    }

    /// Playback length.
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frame_count() as f64 / self.sample_rate as f64)
    }
}

impl Asset for AudioSource {
    fn handle(&self) -> AssetHandle {
        self.handle
    }

    fn asset_type(&self) -> AssetType {
        AssetType::Audio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_of_stereo_clip() {
        let clip = AudioSource::new(AssetHandle::INVALID, "beep", vec![0.0; 88_200], 2, 44_100);
        assert_eq!(clip.frame_count(), 44_100);
        assert_eq!(clip.duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_degenerate_clip_has_zero_duration() {
        let clip = AudioSource::new(AssetHandle::INVALID, "empty", vec![], 0, 0);
        assert_eq!(clip.duration(), Duration::ZERO);
    }
}
