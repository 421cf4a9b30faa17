//! The three base shapes of the Bit
//!
//! Built once at scene construction; the animation never touches vertex data.

use serde::{Deserialize, Serialize};

use super::modifiers::combine;
use super::primitives::{generate_cube, generate_dodecahedron, generate_icosahedron};
use super::spiky::make_spiky;
use super::types::UnpackedMesh;

/// Which polyhedron the idle state uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdleShape {
    /// Single icosahedron
    #[default]
    Icosahedron,
    /// Icosahedron and dodecahedron of the same radius merged into one mesh
    Compound,
}

/// Idle (neutral) mesh
pub fn build_idle_geometry(size: f32, shape: IdleShape) -> UnpackedMesh {
    let mut mesh: UnpackedMesh = generate_icosahedron(size, 0);
    if shape == IdleShape::Compound {
        let dodeca: UnpackedMesh = generate_dodecahedron(size, 0);
        // 60 + 108 vertices, always fits
        if let Some(compound) = combine(&[&mesh, &dodeca]) {
            mesh = compound;
        }
    }
    mesh.compute_bounds();
    mesh
}

/// "Yes" mesh: cube with edge length `size`
pub fn build_yes_geometry(size: f32) -> UnpackedMesh {
    let mut mesh: UnpackedMesh = generate_cube(size);
    mesh.compute_bounds();
    mesh
}

/// "No" mesh: subdivided icosahedron of radius `size` with seeded radial spikes
pub fn build_no_geometry(
    size: f32,
    detail: u32,
    min_amp: f32,
    max_amp: f32,
    seed: u32,
) -> UnpackedMesh {
    make_spiky(generate_icosahedron(size, detail), min_amp, max_amp, seed)
}
