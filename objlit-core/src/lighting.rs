/// Ambient plus diffuse point lighting
use crate::algebra::{unit, Vec3};
use crate::config::SceneConfig;

/// A point light that can be switched on and off
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub enabled: bool,
}

impl PointLight {
    pub const fn new(position: Vec3, enabled: bool) -> Self {
        Self { position, enabled }
    }
}

/// The light uniforms: ambient and diffuse intensity, colour, three lights
#[derive(Debug, Clone, PartialEq)]
pub struct Lighting {
    pub ambient: f32,
    pub diffuse: f32,
    pub color: Vec3,
    pub lights: [PointLight; 3],
}

impl Lighting {
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            ambient: config.ambient,
            diffuse: config.diffuse,
            color: config.light_color,
            lights: config.lights,
        }
    }

    /// Brightness in `[0, 1]` of a surface point with the given world-space
    /// normal: ambient plus Lambert diffuse from every enabled light
    pub fn intensity(&self, position: &Vec3, normal: &Vec3) -> f32 {
        let Some(normal) = unit(normal) else {
            return self.ambient.clamp(0.0, 1.0);
        };
        let diffuse: f32 = self
            .lights
            .iter()
            .filter(|light| light.enabled)
            .filter_map(|light| unit(&(light.position - position)))
            .map(|to_light| normal.dot(&to_light).max(0.0))
            .sum();
        (self.ambient + self.diffuse * diffuse).clamp(0.0, 1.0)
    }

    /// Flip light `index`, returning its new state
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let light = self.lights.get_mut(index)?;
        light.enabled = !light.enabled;
        Some(light.enabled)
    }

    pub fn adjust_ambient(&mut self, delta: f32) {
        self.ambient = (self.ambient + delta).clamp(0.0, 1.0);
    }

    pub fn enabled(&self) -> [bool; 3] {
        self.lights.map(|light| light.enabled)
    }
}

impl Default for Lighting {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}
