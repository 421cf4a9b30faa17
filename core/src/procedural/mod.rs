//! Procedural mesh generation
//!
//! Primitives, modifiers and the three Bit shapes. All meshes are plain f32
//! `UnpackedMesh` data; uploading them is the renderer's job.

mod export;
mod modifiers;
mod primitives;
mod shapes;
mod spiky;
mod types;

pub use types::{Bounds, MeshBuilder, UnpackedMesh};

pub use export::{write_obj, write_obj_to};

pub use modifiers::{MeshApply, MeshModifier, Unweld, combine};

pub use primitives::{MAX_DETAIL, generate_cube, generate_dodecahedron, generate_icosahedron};

pub use spiky::{SpikyDisplace, make_spiky};

pub use shapes::{IdleShape, build_idle_geometry, build_no_geometry, build_yes_geometry};
