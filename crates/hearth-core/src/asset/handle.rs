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

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A stable, persistent identifier for a logical asset.
///
/// The handle represents the "idea" of an asset, completely decoupled from
/// whether the asset is currently resident in memory. It is the key of the
/// asset registry and is what scenes, materials and sprite sheets store when
/// they reference another asset, so it must resolve to the same logical
/// resource across process runs.
///
/// The value `0` is reserved as the invalid sentinel ([`AssetHandle::INVALID`]).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AssetHandle(u64);

impl AssetHandle {
    /// The reserved "no asset" handle.
    pub const INVALID: AssetHandle = AssetHandle(0);

    /// Mints a new random handle.
    ///
    /// The value is drawn from version 4 UUID entropy folded down to 64 bits.
    /// It is never derived from file content and is never `0`.
    pub fn generate() -> Self {
        loop {
            let (high, low) = Uuid::new_v4().as_u64_pair();
            let value = high ^ low;
            if value != 0 {
                return Self(value);
            }
        }
    }

    /// Wraps a raw value, e.g. one read back from a serialized document.
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw 64-bit value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns `true` unless this is the reserved invalid sentinel.
    ///
    /// Note that this says nothing about registry membership.
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for AssetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AssetHandle {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<AssetHandle> for u64 {
    fn from(handle: AssetHandle) -> Self {
        handle.0
    }
}
