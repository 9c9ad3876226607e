/// Model/view composition and the spin state that animates the model
use log::warn;

use crate::algebra::{self, Mat4, Vec3};
use crate::projection::Camera;

/// Rotation of the model about the Y axis (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub angle: f32,
    pub rotating: bool,
    /// Radians added per tick while rotating
    pub step: f32,
}

impl Spin {
    pub fn new(rotating: bool, step: f32) -> Self {
        Self {
            angle: 0.0,
            rotating,
            step,
        }
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        if self.rotating {
            self.angle += self.step;
        }
    }

    /// Rotate by a delta amount (in radians)
    pub fn rotate(&mut self, delta: f32) {
        self.angle += delta;
    }

    pub fn toggle(&mut self) -> bool {
        self.rotating = !self.rotating;
        self.rotating
    }
}

impl Default for Spin {
    fn default() -> Self {
        Self::new(true, 0.01)
    }
}

/// Model and view matrices for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub model: Mat4,
    pub view: Mat4,
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Uniform scale, then translate, then rotate about Y, each composed
    /// onto the previous result
    pub fn model_matrix(scale: f32, translation: &Vec3, angle: f32) -> Mat4 {
        let model = algebra::scale(&Mat4::identity(), &Vec3::repeat(scale));
        let model = algebra::translate(&model, translation);
        algebra::rotate(&model, angle, &Vec3::y())
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(model: &Mat4, view: &Mat4, projection: &Mat4) -> Mat4 {
        projection * view * model
    }
}

/// Builds a [`Pose`] every frame, holding on to the last usable view so a
/// degenerate camera does not produce a broken frame
#[derive(Debug, Clone)]
pub struct PoseComposer {
    last_view: Mat4,
    degenerate: bool,
}

impl PoseComposer {
    pub fn new(camera: &Camera) -> Self {
        Self {
            last_view: camera.view_matrix().unwrap_or_else(Mat4::identity),
            degenerate: false,
        }
    }

    pub fn compose(&mut self, camera: &Camera, scale: f32, translation: &Vec3, spin: &Spin) -> Pose {
        match camera.view_matrix() {
            Some(view) => {
                self.last_view = view;
                self.degenerate = false;
            }
            None if !self.degenerate => {
                warn!(
                    "camera at {:?} has no view basis towards {:?}, keeping last view",
                    camera.eye, camera.center
                );
                self.degenerate = true;
            }
            None => {}
        }

        Pose {
            model: Transform::model_matrix(scale, translation, spin.angle),
            view: self.last_view,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_spin_ticks_only_while_rotating() {
        let mut spin = Spin::new(true, 0.01);
        spin.tick();
        spin.tick();
        assert!((spin.angle - 0.02).abs() < 1e-6);

        assert!(!spin.toggle());
        spin.tick();
        assert!((spin.angle - 0.02).abs() < 1e-6);

        spin.rotate(0.5);
        assert!((spin.angle - 0.52).abs() < 1e-6);
    }

    #[test]
    fn test_identity_model() {
        let matrix = Transform::model_matrix(1.0, &Vec3::zeros(), 0.0);
        assert_eq!(matrix, Mat4::identity());
    }

    #[test]
    fn test_model_order() {
        // Rotation is applied to the point first, then translation, then scale
        let model = Transform::model_matrix(2.0, &Vec3::x(), FRAC_PI_2);
        let p = algebra::transform_point(&model, &Vec3::new(0.0, 0.0, -1.0));
        assert_abs_diff_eq!(p, Vec3::zeros(), epsilon = 1e-5);
    }

    #[test]
    fn test_mvp_order() {
        let model = algebra::translate(&Mat4::identity(), &Vec3::x());
        let view = algebra::scale(&Mat4::identity(), &Vec3::repeat(3.0));
        let mvp = Transform::mvp_matrix(&model, &view, &Mat4::identity());
        assert_eq!(algebra::transform_point(&mvp, &Vec3::zeros()), Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_composer_keeps_last_view() {
        let mut camera = Camera::default();
        let mut composer = PoseComposer::new(&camera);
        let spin = Spin::default();
        let good = composer.compose(&camera, 1.0, &Vec3::zeros(), &spin);

        camera.eye = camera.center;
        let fallback = composer.compose(&camera, 1.0, &Vec3::zeros(), &spin);
        assert_eq!(fallback.view, good.view);

        camera.eye = Vec3::new(0.0, 0.0, 2.0);
        let moved = composer.compose(&camera, 1.0, &Vec3::zeros(), &spin);
        assert_ne!(moved.view, good.view);
    }
}
