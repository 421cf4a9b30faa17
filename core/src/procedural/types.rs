//! Procedural mesh types
//!
//! Shared types for the Bit's geometry builders.

use glam::Vec3;

/// Trait for mesh construction - enables generic geometry generation
///
/// Builders in this module only need to push vertices and triangles, so any
/// vertex store (the f32 `UnpackedMesh` here, or a host's packed GPU buffer)
/// can sit behind it.
pub trait MeshBuilder: Default {
    /// Add a vertex with position and normal, returning its index
    fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> u16;

    /// Add a triangle using three vertex indices
    fn add_triangle(&mut self, i0: u16, i1: u16, i2: u16);
}

/// Bounding sphere of a mesh
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub center: Vec3,
    pub radius: f32,
}

/// Unpacked mesh data (f32 format)
///
/// Full-precision positions and normals. Polyhedra built here are
/// non-indexed in spirit: every triangle owns its three vertices, so the index
/// list is simply `0..vertex_count`. Keeping the index buffer anyway lets the
/// cube and combined meshes share the same type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnpackedMesh {
    /// Vertex positions as [x, y, z]
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals as [x, y, z]
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (u16 for GPU compatibility)
    pub indices: Vec<u16>,
    /// Bounding sphere, refreshed by `compute_bounds`
    pub bounds: Bounds,
}

impl UnpackedMesh {
    /// Create empty unpacked mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Raw little-endian bytes of the position buffer
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Recompute the bounding sphere
    ///
    /// Center is the midpoint of the axis-aligned box, radius the farthest
    /// vertex from it (same approach as three.js `computeBoundingSphere`).
    pub fn compute_bounds(&mut self) {
        if self.positions.is_empty() {
            self.bounds = Bounds::default();
            return;
        }

        let (min, max) = self.positions.iter().map(|p| Vec3::from(*p)).fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), p| (min.min(p), max.max(p)),
        );
        let center = (min + max) * 0.5;
        let radius = self
            .positions
            .iter()
            .map(|p| center.distance_squared(Vec3::from(*p)))
            .fold(0.0f32, f32::max)
            .sqrt();

        self.bounds = Bounds { center, radius };
    }

    /// Recompute per-face normals
    ///
    /// Each vertex takes the normal of the last triangle that references it.
    /// For unwelded meshes that is exactly the face normal.
    pub fn compute_face_normals(&mut self) {
        self.normals.resize(self.positions.len(), [0.0, 1.0, 0.0]);

        for chunk in self.indices.chunks_exact(3) {
            let p0 = Vec3::from(self.positions[chunk[0] as usize]);
            let p1 = Vec3::from(self.positions[chunk[1] as usize]);
            let p2 = Vec3::from(self.positions[chunk[2] as usize]);

            let normal = (p1 - p0).cross(p2 - p0).normalize_or(Vec3::Y);
            for &idx in chunk {
                self.normals[idx as usize] = normal.to_array();
            }
        }
    }
}

impl MeshBuilder for UnpackedMesh {
    fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> u16 {
        let index = self.positions.len() as u16;
        self.positions.push(position.to_array());
        self.normals.push(normal.to_array());
        index
    }

    fn add_triangle(&mut self, i0: u16, i1: u16, i2: u16) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> UnpackedMesh {
        let mut mesh = UnpackedMesh::new();
        let a = mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0), Vec3::ZERO);
        let b = mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO);
        let c = mesh.add_vertex(Vec3::new(0.0, 1.0, 0.0), Vec3::ZERO);
        mesh.add_triangle(a, b, c);
        mesh
    }

    #[test]
    fn test_counts() {
        let mesh = triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_face_normals_follow_winding() {
        let mut mesh = triangle();
        mesh.compute_face_normals();
        for n in &mesh.normals {
            assert_eq!(*n, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_bounds() {
        let mut mesh = triangle();
        mesh.compute_bounds();
        assert!((mesh.bounds.center - Vec3::new(0.5, 0.5, 0.0)).length() < 1e-6);
        assert!((mesh.bounds.radius - 0.5f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_empty_bounds() {
        let mut mesh = UnpackedMesh::new();
        mesh.compute_bounds();
        assert_eq!(mesh.bounds, Bounds::default());
    }

    #[test]
    fn test_position_bytes_len() {
        let mesh = triangle();
        assert_eq!(mesh.position_bytes().len(), 3 * 3 * 4);
    }
}
