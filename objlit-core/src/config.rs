/// Startup configuration for the viewer scene
use crate::algebra::Vec3;
use crate::lighting::PointLight;

/// Initial scene values and the increments input commands apply.
///
/// `Default` carries the viewer's stock setup: camera at `(0, 0, 5)` looking
/// at the origin, 45 degree field of view, one white light above the mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,

    pub scale: f32,
    pub min_scale: f32,
    pub rotating: bool,
    /// Radians added to the spin angle every tick while rotating
    pub rotation_step: f32,
    /// Radians per movement key in rotation-target mode
    pub rotation_nudge: f32,

    pub camera_step: f32,
    pub translation_step: f32,
    pub light_step: f32,
    pub ambient_step: f32,
    pub scale_step: f32,

    pub ambient: f32,
    pub diffuse: f32,
    pub light_color: Vec3,
    pub lights: [PointLight; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            center: Vec3::zeros(),
            up: Vec3::y(),
            fov: 45f32.to_radians(),
            near: 0.1,
            far: 100.0,

            scale: 1.0,
            min_scale: 0.01,
            rotating: true,
            rotation_step: 0.01,
            rotation_nudge: 0.1,

            camera_step: 0.5,
            translation_step: 0.1,
            light_step: 0.05,
            ambient_step: 0.05,
            scale_step: 0.05,

            ambient: 0.1,
            diffuse: 0.9,
            light_color: Vec3::repeat(1.0),
            lights: [
                PointLight::new(Vec3::new(0.0, 1.0, 0.25), true),
                PointLight::new(Vec3::new(-2.0, 0.5, 2.0), false),
                PointLight::new(Vec3::new(2.0, -0.5, 2.0), false),
            ],
        }
    }
}
