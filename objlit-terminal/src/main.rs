/// objlit terminal viewer - lit, textured OBJ mesh in the terminal
///
/// Controls:
///   - W/S, A/D, F/G: move along Y, X, Z (what moves depends on the mode)
///   - Q: cycle mode (camera, translation, rotation, light position)
///   - R: toggle rotation
///   - 1/2/3: toggle lights
///   - Z/X: ambient light down/up
///   - ,/.: scale down/up
///   - ESC: quit
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use objlit_core::{load_bmp, load_flat_mesh};
use objlit_terminal::{cli::Args, TerminalApp};

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("objlit - loading {}...", args.mesh.display());
    let mesh = load_flat_mesh(&args.mesh)
        .with_context(|| format!("failed to load mesh {}", args.mesh.display()))?;
    let texture = args
        .texture
        .as_ref()
        .map(|path| {
            load_bmp(path).with_context(|| format!("failed to load texture {}", path.display()))
        })
        .transpose()?;
    info!(
        "{} triangles, texture coordinates: {}, texture: {}",
        mesh.triangle_count(),
        mesh.has_tex_coords(),
        texture.is_some()
    );

    let config = args.scene_config(&mesh);

    // Run the terminal app
    let mut app = TerminalApp::new(mesh, texture, config, args.fps)?;
    app.run()?;

    println!("Thank you for using objlit!");
    Ok(())
}
