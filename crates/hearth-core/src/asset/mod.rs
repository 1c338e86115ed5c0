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

//! Provides the foundational traits and primitive types for Hearth's asset system.
//!
//! This module defines the "common language" for all asset-related operations in the
//! engine. It contains the core contracts that other crates will implement or use,
//! but it has no knowledge of how assets are imported or where the registry lives.
//!
//! The key components are:
//! - The [`Asset`] trait: implemented by every resolved in-memory resource.
//! - [`AssetHandle`], [`AssetType`] and [`AssetMetadata`]: pure identity data.
//! - [`AssetManagerBase`]: the contract the rest of the engine resolves handles through.

mod asset_type;
mod handle;
mod manager;
mod metadata;

pub use asset_type::*;
pub use handle::*;
pub use manager::*;
pub use metadata::*;

use std::any::Any;
use std::sync::Arc;

/// Object-safe access to the concrete type behind a `dyn Asset`.
///
/// Implemented automatically for every sized `Send + Sync + 'static` type.
pub trait AssetAny {
    /// Borrows the value as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Converts a shared asset into a shared `Any`, for [`downcast_asset`].
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AssetAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// A concrete resolved resource (texture, audio source, scene, ...).
///
/// Resolved assets are shared: the loaded-asset cache and any number of
/// subsystems may hold the same instance through an `Arc<dyn Asset>`.
///
/// The supertraits enforce critical safety guarantees:
/// - `Send` + `Sync`: a resolved asset may be read from any thread, even though
///   the registry and the cache that hand it out are main-thread only.
/// - `'static`: the asset type does not borrow anything, so it can stay
///   resident for as long as the cache keeps it.
///
/// # Examples
///
/// ```
/// use hearth_core::asset::{Asset, AssetHandle, AssetType};
///
/// struct Texture {
///     handle: AssetHandle,
/// }
///
/// impl Asset for Texture {
///     fn handle(&self) -> AssetHandle {
///         self.handle
///     }
///
///     fn asset_type(&self) -> AssetType {
///         AssetType::Texture
///     }
/// }
/// ```
pub trait Asset: AssetAny + Send + Sync + 'static {
    /// The handle this instance was resolved for, or [`AssetHandle::INVALID`]
    /// when it was loaded straight from a path.
    fn handle(&self) -> AssetHandle;

    /// The type tag of this resource.
    fn asset_type(&self) -> AssetType;
}

impl dyn Asset {
    /// Borrows the concrete resource if it is a `T`.
    pub fn downcast_ref<T: Asset>(&self) -> Option<&T> {
        AssetAny::as_any(self).downcast_ref::<T>()
    }

    /// Returns `true` if the concrete resource is a `T`.
    pub fn is<T: Asset>(&self) -> bool {
        AssetAny::as_any(self).is::<T>()
    }
}

/// Recovers the concrete shared resource behind a `dyn Asset`.
///
/// Returns `None` if the asset is not a `T`.
pub fn downcast_asset<T: Asset>(asset: Arc<dyn Asset>) -> Option<Arc<T>> {
    <dyn Asset as AssetAny>::into_any_arc(asset)
        .downcast::<T>()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Texture(AssetHandle);
    impl Asset for Texture {
        fn handle(&self) -> AssetHandle {
            self.0
        }
        fn asset_type(&self) -> AssetType {
            AssetType::Texture
        }
    }

    struct Sound;
    impl Asset for Sound {
        fn handle(&self) -> AssetHandle {
            AssetHandle::INVALID
        }
        fn asset_type(&self) -> AssetType {
            AssetType::Audio
        }
    }

    #[test]
    fn test_downcast_keeps_identity() {
        let original = Arc::new(Texture(AssetHandle::from_raw(7)));
        let erased: Arc<dyn Asset> = original.clone();

        assert!(erased.is::<Texture>());
        assert_eq!(erased.downcast_ref::<Texture>().map(|t| t.0.raw()), Some(7));

        let typed = downcast_asset::<Texture>(erased).expect("should downcast");
        assert!(Arc::ptr_eq(&typed, &original));
    }

    #[test]
    fn test_downcast_to_wrong_type_fails() {
        let erased: Arc<dyn Asset> = Arc::new(Sound);
        assert!(!erased.is::<Texture>());
        assert!(downcast_asset::<Texture>(erased).is_none());
    }
}
