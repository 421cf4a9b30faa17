//! Export command - write the Bit meshes as OBJ

use anyhow::{Context, Result};
use bit_core::procedural::write_obj;
use bit_core::{BitScene, VisualState};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Args)]
pub struct ExportArgs {
    /// Output directory (created if missing)
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,

    /// Config file (defaults to the platform config)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Execute the export command
pub fn execute(args: ExportArgs) -> Result<()> {
    let config = crate::load_config(args.config.as_deref())?;
    let scene = BitScene::new(config);

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("Failed to create {}", args.out.display()))?;

    for state in VisualState::ALL {
        let mesh = scene.group(state).geometry();
        let path = args.out.join(format!("{}.obj", state.name()));
        write_obj(mesh, &path, state.name())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!(
            "  {}: {} vertices, {} triangles -> {}",
            state,
            mesh.vertex_count(),
            mesh.triangle_count(),
            path.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bit_core::BitConfig;

    #[test]
    fn test_export_writes_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("bit.toml");
        bit_core::config::save_to(&BitConfig::default(), &config_path).unwrap();

        let out = dir.path().join("meshes");
        execute(ExportArgs {
            out: out.clone(),
            config: Some(config_path),
        })
        .unwrap();

        for name in ["idle", "yes", "no"] {
            let text = std::fs::read_to_string(out.join(format!("{name}.obj"))).unwrap();
            assert!(text.contains(&format!("o {name}")));
            assert!(text.lines().any(|l| l.starts_with("f ")));
        }
    }
}
