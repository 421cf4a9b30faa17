//! Wavefront OBJ export for inspecting generated meshes

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::types::UnpackedMesh;

/// Write `mesh` to `path` as a single OBJ object named `name`
pub fn write_obj(mesh: &UnpackedMesh, path: &Path, name: &str) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_obj_to(mesh, &mut out, name)?;
    out.flush()
}

/// Write `mesh` as OBJ text to any writer
pub fn write_obj_to<W: Write>(mesh: &UnpackedMesh, out: &mut W, name: &str) -> std::io::Result<()> {
    writeln!(out, "# {} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count())?;
    writeln!(out, "o {name}")?;

    for [x, y, z] in &mesh.positions {
        writeln!(out, "v {x:.6} {y:.6} {z:.6}")?;
    }
    for [x, y, z] in &mesh.normals {
        writeln!(out, "vn {x:.6} {y:.6} {z:.6}")?;
    }

    // OBJ indices are 1-based; normals share the position index
    for tri in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as u32 + 1, tri[1] as u32 + 1, tri[2] as u32 + 1];
        writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
    }

    Ok(())
}
