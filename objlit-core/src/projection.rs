/// Camera and projection utilities
use crate::algebra::{self, Mat4, Vec3};
use crate::config::SceneConfig;

/// Camera configuration for 3D rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_config(&SceneConfig::default(), width as f32 / height.max(1) as f32)
    }

    pub fn from_config(config: &SceneConfig, aspect: f32) -> Self {
        Self {
            eye: config.eye,
            center: config.center,
            up: config.up,
            fov: config.fov,
            aspect,
            near: config.near,
            far: config.far,
        }
    }

    /// Create the view matrix (camera transformation), `None` when the eye
    /// sits on the target or looks along `up`
    pub fn view_matrix(&self) -> Option<Mat4> {
        algebra::look_at(&self.eye, &self.center, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        algebra::perspective(self.fov, self.aspect, self.near, self.far)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// A projected point: pixel coordinates plus normalized depth in `[-1, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

/// Project a model-space point through `mvp` to screen space.
///
/// Returns `None` for points behind the camera or outside the depth range.
pub fn project_to_screen(mvp: &Mat4, point: &Vec3, width: u32, height: u32) -> Option<ScreenPoint> {
    let clip = algebra::homogeneous(mvp, point);
    let (x, y, z, w) = (clip.x, clip.y, clip.z, clip.w);

    // Prevent division by near-zero depth values
    if w < 1e-6 {
        return None;
    }

    let (ndc_x, ndc_y, ndc_z) = (x / w, y / w, z / w);
    if !(-1.0..=1.0).contains(&ndc_z) {
        return None;
    }

    Some(ScreenPoint {
        x: (ndc_x + 1.0) * 0.5 * width as f32,
        y: (1.0 - ndc_y) * 0.5 * height as f32,
        depth: ndc_z,
    })
}
