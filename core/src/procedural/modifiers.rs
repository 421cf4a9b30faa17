//! Mesh modifiers
//!
//! In-place operations on `UnpackedMesh`. Use the `MeshApply` extension trait
//! for chaining:
//! ```
//! use bit_core::procedural::*;
//!
//! let mut mesh: UnpackedMesh = generate_cube(1.0);
//! mesh.apply(Unweld).apply(SpikyDisplace::new(0.2, 0.4, 9));
//! ```

use crate::procedural::types::UnpackedMesh;

/// Trait for mesh modifiers
pub trait MeshModifier {
    /// Apply this modifier to a mesh, modifying it in place
    fn apply(&self, mesh: &mut UnpackedMesh);
}

/// Extension trait for fluent modifier application
pub trait MeshApply {
    /// Apply a modifier and return `&mut Self` for chaining
    fn apply<M: MeshModifier>(&mut self, modifier: M) -> &mut Self;
}

impl MeshApply for UnpackedMesh {
    fn apply<M: MeshModifier>(&mut self, modifier: M) -> &mut Self {
        modifier.apply(self);
        self
    }
}

/// Split shared vertices so every triangle owns its three corners
///
/// After this the index buffer is `0..vertex_count` and normals are flat.
/// Meshes that are already unwelded come out unchanged.
pub struct Unweld;

impl MeshModifier for Unweld {
    fn apply(&self, mesh: &mut UnpackedMesh) {
        let mut positions = Vec::with_capacity(mesh.indices.len());
        let mut indices = Vec::with_capacity(mesh.indices.len());

        for chunk in mesh.indices.chunks_exact(3) {
            for &idx in chunk {
                indices.push(positions.len() as u16);
                positions.push(mesh.positions[idx as usize]);
            }
        }

        mesh.positions = positions;
        mesh.indices = indices;
        mesh.normals.clear();
        mesh.compute_face_normals();
    }
}

/// Combine multiple meshes into one
///
/// Concatenates vertex and index data, offsetting indices as it goes.
/// Returns `None` if the total vertex count would not fit u16 indices.
pub fn combine(meshes: &[&UnpackedMesh]) -> Option<UnpackedMesh> {
    let total_vertices: usize = meshes.iter().map(|m| m.positions.len()).sum();
    let total_indices: usize = meshes.iter().map(|m| m.indices.len()).sum();

    if total_vertices > u16::MAX as usize {
        return None;
    }

    let mut result = UnpackedMesh::new();
    result.positions.reserve(total_vertices);
    result.normals.reserve(total_vertices);
    result.indices.reserve(total_indices);

    for mesh in meshes {
        let vertex_offset = result.positions.len() as u16;
        result.positions.extend_from_slice(&mesh.positions);
        result.normals.extend_from_slice(&mesh.normals);
        result
            .indices
            .extend(mesh.indices.iter().map(|&idx| vertex_offset + idx));
    }

    result.compute_bounds();
    Some(result)
}
