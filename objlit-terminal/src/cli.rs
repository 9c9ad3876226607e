/// Command-line options for the terminal viewer
use std::path::PathBuf;

use objlit_core::{FlatMesh, SceneConfig};

/// Render a lit, textured OBJ mesh in the terminal
#[derive(Debug, clap::Parser)]
#[command(version)]
pub struct Args {
    /// Wavefront OBJ file to display
    pub mesh: PathBuf,

    /// 24-bit uncompressed BMP used as the mesh texture
    #[arg(short, long)]
    pub texture: Option<PathBuf>,

    /// Uniform model scale; by default the mesh is fitted to the view
    #[arg(short, long, value_parser = parse_scale)]
    pub scale: Option<f32>,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 45.0, value_parser = parse_fov)]
    pub fov: f32,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Start with the automatic rotation paused
    #[arg(long)]
    pub still: bool,
}

fn parse_fov(text: &str) -> Result<f32, String> {
    let fov: f32 = text.parse().map_err(|e| format!("{e}"))?;
    if fov > 0.0 && fov < 180.0 {
        Ok(fov)
    } else {
        Err(format!("field of view must be between 0 and 180 degrees, got {fov}"))
    }
}

fn parse_scale(text: &str) -> Result<f32, String> {
    let scale: f32 = text.parse().map_err(|e| format!("{e}"))?;
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(format!("scale must be a positive number, got {scale}"))
    }
}

impl Args {
    /// Scene settings for `mesh`. Below unit scale the scale keys' step and
    /// floor shrink in proportion, so small fitted scales can still shrink.
    pub fn scene_config(&self, mesh: &FlatMesh) -> SceneConfig {
        let defaults = SceneConfig::default();
        let scale = self.scale.unwrap_or_else(|| fit_scale(mesh));
        SceneConfig {
            fov: self.fov.to_radians(),
            scale,
            min_scale: defaults.min_scale * scale.min(1.0),
            scale_step: defaults.scale_step * scale.min(1.0),
            rotating: !self.still,
            ..defaults
        }
    }
}

/// Scale that makes the largest extent of the mesh two units wide
pub fn fit_scale(mesh: &FlatMesh) -> f32 {
    let Some((lo, hi)) = mesh.bounds() else {
        return 1.0;
    };
    let size = hi - lo;
    let extent = size.x.max(size.y).max(size.z);
    if extent > f32::EPSILON {
        2.0 / extent
    } else {
        1.0
    }
}
