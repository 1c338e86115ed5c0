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

//! Mesh assets produced by the model importer.

use hearth_core::asset::{Asset, AssetHandle, AssetType};

/// Axis-aligned bounds of a vertex set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Smallest corner.
    pub min: [f32; 3],
    /// Largest corner.
    pub max: [f32; 3],
}

impl Bounds {
    /// Computes the bounds of a point set, or `None` if it is empty.
    pub fn from_points(points: &[[f32; 3]]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Bounds {
            min: *first,
            max: *first,
        };
        for p in rest {
            for axis in 0..3 {
                bounds.min[axis] = bounds.min[axis].min(p[axis]);
                bounds.max[axis] = bounds.max[axis].max(p[axis]);
            }
        }
        Some(bounds)
    }
}

/// One drawable primitive: a vertex stream and its triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubMesh {
    /// Name from the source file, if any.
    pub name: String,
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex normals, empty when the source has none.
    pub normals: Vec<[f32; 3]>,
    /// Per-vertex texture coordinates, empty when the source has none.
    pub tex_coords: Vec<[f32; 2]>,
    /// Triangle list indices into the vertex arrays.
    pub indices: Vec<u32>,
}

impl SubMesh {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Bounds of the vertex positions.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.positions)
    }

    /// Concatenates sub-meshes into one stream, rebasing indices.
    ///
    /// Optional attributes are kept only if every part provides them.
    pub fn merge(name: impl Into<String>, parts: &[SubMesh]) -> SubMesh {
        let keep_normals = parts
            .iter()
            .all(|p| p.normals.len() == p.positions.len());
        let keep_tex_coords = parts
            .iter()
            .all(|p| p.tex_coords.len() == p.positions.len());

        let mut merged = SubMesh {
            name: name.into(),
            ..Default::default()
        };
        for part in parts {
            let base = merged.positions.len() as u32;
            merged.positions.extend_from_slice(&part.positions);
            if keep_normals {
                merged.normals.extend_from_slice(&part.normals);
            }
            if keep_tex_coords {
                merged.tex_coords.extend_from_slice(&part.tex_coords);
            }
            merged.indices.extend(part.indices.iter().map(|i| i + base));
        }
        merged
    }
}

/// A mesh whose source primitives were merged into a single stream.
#[derive(Debug, Clone)]
pub struct StaticMeshData {
    handle: AssetHandle,
    /// The merged geometry.
    pub mesh: SubMesh,
}

impl StaticMeshData {
    /// Wraps merged geometry.
    pub fn new(handle: AssetHandle, mesh: SubMesh) -> Self {
        Self { handle, mesh }
    }
}

impl Asset for StaticMeshData {
    fn handle(&self) -> AssetHandle {
        self.handle
    }

    fn asset_type(&self) -> AssetType {
        AssetType::StaticMesh
    }
}

/// A mesh that keeps every source primitive as its own sub-mesh.
#[derive(Debug, Clone)]
pub struct MeshData {
    handle: AssetHandle,
    /// The primitives, in source order.
    pub submeshes: Vec<SubMesh>,
}

impl MeshData {
    /// Wraps a list of primitives.
    pub fn new(handle: AssetHandle, submeshes: Vec<SubMesh>) -> Self {
        Self { handle, submeshes }
    }

    /// Total vertex count across sub-meshes.
    pub fn vertex_count(&self) -> usize {
        self.submeshes.iter().map(SubMesh::vertex_count).sum()
    }
}

impl Asset for MeshData {
    fn handle(&self) -> AssetHandle {
        self.handle
    }

    fn asset_type(&self) -> AssetType {
        AssetType::Mesh
    }
}
