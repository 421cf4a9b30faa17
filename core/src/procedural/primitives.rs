//! Polyhedron and box primitives
//!
//! Polyhedra are subdivided per face and projected onto a sphere. Every
//! triangle gets its own three vertices and a flat face normal, so later
//! displacement can move coincident corners independently.

use glam::Vec3;
use tracing::warn;

use crate::procedural::types::MeshBuilder;

/// Golden ratio
const PHI: f32 = 1.618_034;

/// Largest icosahedron detail whose non-indexed vertex count fits in u16 indices
/// (20 faces * (detail + 1)^2 triangles * 3 vertices <= 65535)
pub const MAX_DETAIL: u32 = 32;

/// Same limit for the dodecahedron's 36 base triangles
const MAX_DODECAHEDRON_DETAIL: u32 = 23;

/// Smallest accepted size for any primitive
const MIN_SIZE: f32 = 0.001;

const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = [
    [-1.0, PHI, 0.0],
    [1.0, PHI, 0.0],
    [-1.0, -PHI, 0.0],
    [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI],
    [0.0, 1.0, PHI],
    [0.0, -1.0, -PHI],
    [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0],
    [PHI, 0.0, 1.0],
    [-PHI, 0.0, -1.0],
    [-PHI, 0.0, 1.0],
];

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// 1 / PHI
const INV_PHI: f32 = 0.618_034;

const DODECAHEDRON_VERTICES: [[f32; 3]; 20] = [
    // (±1, ±1, ±1)
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
    // (0, ±1/φ, ±φ)
    [0.0, -INV_PHI, -PHI],
    [0.0, -INV_PHI, PHI],
    [0.0, INV_PHI, -PHI],
    [0.0, INV_PHI, PHI],
    // (±1/φ, ±φ, 0)
    [-INV_PHI, -PHI, 0.0],
    [-INV_PHI, PHI, 0.0],
    [INV_PHI, -PHI, 0.0],
    [INV_PHI, PHI, 0.0],
    // (±φ, 0, ±1/φ)
    [-PHI, 0.0, -INV_PHI],
    [PHI, 0.0, -INV_PHI],
    [-PHI, 0.0, INV_PHI],
    [PHI, 0.0, INV_PHI],
];

/// Twelve pentagons, three triangles each
const DODECAHEDRON_FACES: [[usize; 3]; 36] = [
    [3, 11, 7],
    [3, 7, 15],
    [3, 15, 13],
    [7, 19, 17],
    [7, 17, 6],
    [7, 6, 15],
    [17, 4, 8],
    [17, 8, 10],
    [17, 10, 6],
    [8, 0, 16],
    [8, 16, 2],
    [8, 2, 10],
    [0, 12, 1],
    [0, 1, 18],
    [0, 18, 16],
    [6, 10, 2],
    [6, 2, 13],
    [6, 13, 15],
    [2, 16, 18],
    [2, 18, 3],
    [2, 3, 13],
    [18, 1, 9],
    [18, 9, 11],
    [18, 11, 3],
    [4, 14, 12],
    [4, 12, 0],
    [4, 0, 8],
    [11, 9, 5],
    [11, 5, 19],
    [11, 19, 7],
    [19, 5, 14],
    [19, 14, 4],
    [19, 4, 17],
    [1, 12, 14],
    [1, 14, 5],
    [1, 5, 9],
];

fn clamp_size(fn_name: &str, size: f32) -> f32 {
    if size.is_finite() && size >= MIN_SIZE {
        size
    } else {
        warn!("{fn_name}: size must be >= {MIN_SIZE}, got {size}, clamping");
        MIN_SIZE
    }
}

fn clamp_detail(fn_name: &str, detail: u32, max: u32) -> u32 {
    if detail > max {
        warn!("{fn_name}: detail {detail} exceeds {max}, clamping");
        max
    } else {
        detail
    }
}

/// Generate an icosahedron projected onto a sphere
///
/// # Arguments
/// * `radius` - Circumscribed sphere radius
/// * `detail` - Extra edge splits per face (0 = plain icosahedron, max `MAX_DETAIL`)
///
/// # Returns
/// Non-indexed mesh with `60 * (detail + 1)^2` vertices and flat normals
pub fn generate_icosahedron<M: MeshBuilder>(radius: f32, detail: u32) -> M {
    let radius = clamp_size("generate_icosahedron", radius);
    let detail = clamp_detail("generate_icosahedron", detail, MAX_DETAIL);
    generate_polyhedron(&ICOSAHEDRON_VERTICES, &ICOSAHEDRON_FACES, radius, detail)
}

/// Generate a dodecahedron projected onto a sphere
///
/// # Arguments
/// * `radius` - Circumscribed sphere radius
/// * `detail` - Extra edge splits per triangle (0 = plain dodecahedron)
pub fn generate_dodecahedron<M: MeshBuilder>(radius: f32, detail: u32) -> M {
    let radius = clamp_size("generate_dodecahedron", radius);
    let detail = clamp_detail("generate_dodecahedron", detail, MAX_DODECAHEDRON_DETAIL);
    generate_polyhedron(&DODECAHEDRON_VERTICES, &DODECAHEDRON_FACES, radius, detail)
}

/// Generate an axis-aligned cube centered at the origin
///
/// # Arguments
/// * `size` - Edge length
///
/// # Returns
/// 24 vertices (4 per face) and 12 triangles with per-face normals
pub fn generate_cube<M: MeshBuilder>(size: f32) -> M {
    let half = clamp_size("generate_cube", size) * 0.5;
    let mut mesh = M::default();

    // (normal, u axis, v axis); u x v == normal keeps CCW winding outward
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    for (normal, u, v) in faces {
        let center = normal * half;
        let i0 = mesh.add_vertex(center - u * half - v * half, normal);
        let i1 = mesh.add_vertex(center + u * half - v * half, normal);
        let i2 = mesh.add_vertex(center + u * half + v * half, normal);
        let i3 = mesh.add_vertex(center - u * half + v * half, normal);
        mesh.add_triangle(i0, i1, i2);
        mesh.add_triangle(i0, i2, i3);
    }

    mesh
}

/// Subdivide every base face into `(detail + 1)^2` triangles and project them
/// onto the sphere of `radius`
fn generate_polyhedron<M: MeshBuilder>(
    base: &[[f32; 3]],
    faces: &[[usize; 3]],
    radius: f32,
    detail: u32,
) -> M {
    let mut mesh = M::default();
    let cols = detail as usize + 1;

    for face in faces {
        let a = Vec3::from(base[face[0]]);
        let b = Vec3::from(base[face[1]]);
        let c = Vec3::from(base[face[2]]);

        // grid[i][j]: row i walks from the a-b edge toward c
        let mut grid: Vec<Vec<Vec3>> = Vec::with_capacity(cols + 1);
        for i in 0..=cols {
            let t = i as f32 / cols as f32;
            let aj = a.lerp(c, t);
            let bj = b.lerp(c, t);
            let rows = cols - i;
            let row = if rows == 0 {
                vec![aj]
            } else {
                (0..=rows)
                    .map(|j| aj.lerp(bj, j as f32 / rows as f32))
                    .collect()
            };
            grid.push(row);
        }

        for i in 0..cols {
            for j in 0..(2 * (cols - i) - 1) {
                let k = j / 2;
                let tri = if j % 2 == 0 {
                    [grid[i][k + 1], grid[i + 1][k], grid[i][k]]
                } else {
                    [grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]
                };
                push_projected_triangle(&mut mesh, tri, radius);
            }
        }
    }

    mesh
}

/// Project a triangle onto the sphere and emit it with an outward flat normal
fn push_projected_triangle<M: MeshBuilder>(mesh: &mut M, tri: [Vec3; 3], radius: f32) {
    let [p0, mut p1, mut p2] = tri.map(|p| p.normalize_or(Vec3::Y) * radius);

    let mut normal = (p1 - p0).cross(p2 - p0).normalize_or(Vec3::Y);
    // Convex and centered on the origin: outward means pointing away from it
    if normal.dot(p0 + p1 + p2) < 0.0 {
        std::mem::swap(&mut p1, &mut p2);
        normal = -normal;
    }

    let i0 = mesh.add_vertex(p0, normal);
    let i1 = mesh.add_vertex(p1, normal);
    let i2 = mesh.add_vertex(p2, normal);
    mesh.add_triangle(i0, i1, i2);
}
