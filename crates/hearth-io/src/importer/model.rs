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

//! Decodes 3D model files into [`StaticMeshData`] or [`MeshData`].

use super::{display_name, extension_of, ImportContext, ImportError, Importer};
use hearth_core::asset::{AssetHandle, AssetMetadata};
use hearth_data::assets::{MeshData, StaticMeshData, SubMesh};
use std::path::Path;
use std::sync::Arc;

/// Imports `.obj`, `.gltf` and `.glb` models.
///
/// As an [`Importer`] it produces a [`StaticMeshData`] with every primitive
/// merged; [`ModelImporter::import_mesh`] keeps primitives separate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelImporter;

impl ModelImporter {
    /// Reads every primitive of a model file, in source order.
    pub fn read_submeshes(&self, path: &Path) -> Result<Vec<SubMesh>, ImportError> {
        let extension = extension_of(path);
        let submeshes = match extension.as_str() {
            "obj" => read_obj(path)?,
            "gltf" | "glb" => read_gltf(path)?,
            _ => return Err(ImportError::UnsupportedFormat(extension)),
        };
        if submeshes.is_empty() {
            return Err(ImportError::MissingData(format!(
                "'{}' contains no meshes",
                path.display()
            )));
        }
        Ok(submeshes)
    }

    /// Imports a registered model keeping its primitives separate.
    pub fn import_mesh(
        &self,
        handle: AssetHandle,
        metadata: &AssetMetadata,
        ctx: &mut ImportContext<'_>,
    ) -> Result<Arc<MeshData>, ImportError> {
        let submeshes = self.read_submeshes(&ctx.resolve(metadata))?;
        Ok(Arc::new(MeshData::new(handle, submeshes)))
    }
}

impl Importer for ModelImporter {
    type Output = StaticMeshData;

    fn read(&self, handle: AssetHandle, path: &Path) -> Result<StaticMeshData, ImportError> {
        let submeshes = self.read_submeshes(path)?;
        let merged = SubMesh::merge(display_name(path), &submeshes);
        log::debug!(
            "Merged {} primitives of '{}' into {} vertices.",
            submeshes.len(),
            path.display(),
            merged.vertex_count()
        );
        Ok(StaticMeshData::new(handle, merged))
    }
}

fn read_obj(path: &Path) -> Result<Vec<SubMesh>, ImportError> {
    let options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };
    let (models, materials) = tobj::load_obj(path, &options)?;
    if let Err(e) = materials {
        log::debug!("Ignoring OBJ materials of '{}': {}", path.display(), e);
    }

    Ok(models
        .into_iter()
        .map(|model| {
            let mesh = model.mesh;
            SubMesh {
                name: model.name,
                positions: mesh.positions.chunks_exact(3).map(|v| [v[0], v[1], v[2]]).collect(),
                normals: mesh.normals.chunks_exact(3).map(|n| [n[0], n[1], n[2]]).collect(),
                tex_coords: mesh.texcoords.chunks_exact(2).map(|t| [t[0], t[1]]).collect(),
                indices: mesh.indices,
            }
        })
        .collect())
}

fn read_gltf(path: &Path) -> Result<Vec<SubMesh>, ImportError> {
    let (document, buffers, _images) = gltf::import(path)?;
    let mut submeshes = Vec::new();

    for mesh in document.meshes() {
        let name = mesh.name().unwrap_or_default().to_string();
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::warn!(
                    "Skipping non-triangle primitive {} of mesh '{}' in '{}'.",
                    primitive.index(),
                    name,
                    path.display()
                );
                continue;
            }
            let reader =
                primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));

            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .ok_or_else(|| ImportError::MissingData("vertex positions not found".into()))?
                .collect();
            let normals = reader
                .read_normals()
                .map(|iter| iter.collect())
                .unwrap_or_default();
            let tex_coords = reader
                .read_tex_coords(0)
                .map(|iter| iter.into_f32().collect())
                .unwrap_or_default();
            let indices = match reader.read_indices() {
                Some(iter) => iter.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };

            submeshes.push(SubMesh {
                name: name.clone(),
                positions,
                normals,
                tex_coords,
                indices,
            });
        }
    }
    Ok(submeshes)
}
