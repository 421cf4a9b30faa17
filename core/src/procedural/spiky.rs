//! Seeded radial displacement ("spiky" meshes)
//!
//! Pushes every vertex outward along its direction from the origin by a random
//! amount. Because polyhedra here are unwelded, the corners that adjacent
//! triangles share at rest are pulled apart, which is what makes the spikes.

use glam::Vec3;
use tracing::warn;

use super::modifiers::{MeshModifier, Unweld};
use super::types::UnpackedMesh;
use crate::rng::Mulberry32;

/// Displace vertices radially by a seeded random amount in `[min_amp, max_amp]`
///
/// One Mulberry32 draw per vertex, in vertex order. Face normals and bounds are
/// recomputed afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpikyDisplace {
    /// Minimum outward displacement in world units
    pub min_amp: f32,
    /// Maximum outward displacement in world units
    pub max_amp: f32,
    /// Seed for deterministic generation
    pub seed: u32,
}

impl Default for SpikyDisplace {
    fn default() -> Self {
        Self {
            min_amp: 0.2,
            max_amp: 0.5,
            seed: 42,
        }
    }
}

impl SpikyDisplace {
    pub fn new(min_amp: f32, max_amp: f32, seed: u32) -> Self {
        Self {
            min_amp,
            max_amp,
            seed,
        }
    }

    /// Amplitude range with bad input repaired
    fn amplitudes(&self) -> (f32, f32) {
        let (mut lo, mut hi) = (self.min_amp, self.max_amp);
        if !lo.is_finite() || !hi.is_finite() {
            warn!("SpikyDisplace: non-finite amplitude ({lo}, {hi}), using 0");
            lo = if lo.is_finite() { lo } else { 0.0 };
            hi = if hi.is_finite() { hi } else { lo };
        }
        if lo > hi {
            warn!("SpikyDisplace: min_amp {lo} > max_amp {hi}, swapping");
            std::mem::swap(&mut lo, &mut hi);
        }
        (lo, hi)
    }
}

impl MeshModifier for SpikyDisplace {
    fn apply(&self, mesh: &mut UnpackedMesh) {
        let (min_amp, max_amp) = self.amplitudes();
        let mut rng = Mulberry32::new(self.seed);

        // One draw per vertex, in vertex order
        let amps: Vec<f32> = (0..mesh.positions.len())
            .map(|_| rng.range_f32(min_amp, max_amp))
            .collect();

        for (pos, amp) in mesh.positions.iter_mut().zip(amps) {
            let v = Vec3::from(*pos);
            let len = v.length();
            let (dir, len) = if len > 0.0 {
                (v / len, len)
            } else {
                // Degenerate vertex at the origin: unit fallback length, no direction
                (Vec3::ZERO, 1.0)
            };
            *pos = (dir * (len + amp)).to_array();
        }

        mesh.compute_face_normals();
        mesh.compute_bounds();
    }
}

/// Unweld `base` and apply a `SpikyDisplace`
pub fn make_spiky(mut base: UnpackedMesh, min_amp: f32, max_amp: f32, seed: u32) -> UnpackedMesh {
    Unweld.apply(&mut base);
    SpikyDisplace::new(min_amp, max_amp, seed).apply(&mut base);
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedural::{MeshBuilder, generate_icosahedron};

    #[test]
    fn test_radius_range_unit_base() {
        let base: UnpackedMesh = generate_icosahedron(1.0, 2);
        let mesh = make_spiky(base, 0.22, 0.5, 7331);

        assert_eq!(mesh.vertex_count(), 540);
        for p in &mesh.positions {
            let r = Vec3::from(*p).length();
            assert!(r >= 1.22 - 1e-5 && r <= 1.5 + 1e-5, "radius {r}");
        }
    }

    #[test]
    fn test_same_seed_same_bytes() {
        let a = make_spiky(generate_icosahedron(0.7, 2), 0.22, 0.5, 7331);
        let b = make_spiky(generate_icosahedron(0.7, 2), 0.22, 0.5, 7331);
        assert_eq!(a.position_bytes(), b.position_bytes());
    }

    #[test]
    fn test_different_seed_different_shape() {
        let a = make_spiky(generate_icosahedron(0.7, 2), 0.22, 0.5, 1);
        let b = make_spiky(generate_icosahedron(0.7, 2), 0.22, 0.5, 2);
        assert_ne!(a.positions, b.positions);
    }

    #[test]
    fn test_first_vertex_uses_first_draw() {
        let base: UnpackedMesh = generate_icosahedron(1.0, 0);
        let mesh = make_spiky(base, 0.0, 1.0, 0);
        let r = Vec3::from(mesh.positions[0]).length();
        // Mulberry32(0) first output is 0.266429...
        assert!((r - 1.266_429_2).abs() < 1e-5);
    }

    #[test]
    fn test_shared_corners_split_apart() {
        let mesh = make_spiky(generate_icosahedron(1.0, 0), 0.22, 0.5, 7331);
        // Vertex 0 and a vertex of a neighbouring triangle started at
        // the same icosahedron corner; their radii now differ
        let origin_corner = Vec3::from(mesh.positions[0]).normalize();
        let twin = mesh
            .positions
            .iter()
            .skip(3)
            .map(|p| Vec3::from(*p))
            .find(|p| p.normalize().distance(origin_corner) < 1e-4)
            .unwrap();
        assert!((twin.length() - Vec3::from(mesh.positions[0]).length()).abs() > 1e-6);
    }

    #[test]
    fn test_origin_vertex_does_not_produce_nan() {
        let mut mesh = UnpackedMesh::new();
        let a = mesh.add_vertex(Vec3::ZERO, Vec3::Y);
        let b = mesh.add_vertex(Vec3::X, Vec3::Y);
        let c = mesh.add_vertex(Vec3::Z, Vec3::Y);
        mesh.add_triangle(a, b, c);

        SpikyDisplace::new(0.1, 0.2, 3).apply(&mut mesh);
        for p in &mesh.positions {
            assert!(p.iter().all(|c| c.is_finite()));
        }
        assert_eq!(mesh.positions[0], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_swapped_amplitudes_are_repaired() {
        let mesh = make_spiky(generate_icosahedron(1.0, 0), 0.5, 0.22, 7331);
        for p in &mesh.positions {
            let r = Vec3::from(*p).length();
            assert!(r >= 1.22 - 1e-5 && r <= 1.5 + 1e-5);
        }
    }

    #[test]
    fn test_bounds_cover_spikes() {
        let mesh = make_spiky(generate_icosahedron(0.7, 2), 0.22, 0.5, 7331);
        let max_r = mesh
            .positions
            .iter()
            .map(|p| Vec3::from(*p).length())
            .fold(0.0f32, f32::max);
        let offset = mesh.bounds.center.length();
        assert!(mesh.bounds.radius + offset >= max_r - 1e-4);
        assert!(mesh.bounds.radius <= max_r + offset + 1e-4);
    }
}
