/// Interactive scene state and the keyboard commands that drive it
use std::fmt;

use log::{debug, info};

use crate::algebra::{Mat4, Vec3};
use crate::config::SceneConfig;
use crate::lighting::Lighting;
use crate::projection::Camera;
use crate::transform::{Pose, PoseComposer, Spin};

/// Which quantity the movement keys act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Camera,
    Translation,
    RotationTarget,
    LightPosition,
}

impl InputMode {
    /// The next mode in the cycle, wrapping back to `Camera`
    pub fn next(self) -> Self {
        match self {
            InputMode::Camera => InputMode::Translation,
            InputMode::Translation => InputMode::RotationTarget,
            InputMode::RotationTarget => InputMode::LightPosition,
            InputMode::LightPosition => InputMode::Camera,
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputMode::Camera => "camera",
            InputMode::Translation => "translation",
            InputMode::RotationTarget => "rotation",
            InputMode::LightPosition => "light",
        })
    }
}

/// Movement key direction, in world axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
    Up,
    Forward,
    Backward,
}

impl Direction {
    pub fn vector(self) -> Vec3 {
        match self {
            Direction::Left => -Vec3::x(),
            Direction::Right => Vec3::x(),
            Direction::Down => -Vec3::y(),
            Direction::Up => Vec3::y(),
            Direction::Forward => -Vec3::z(),
            Direction::Backward => Vec3::z(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjust {
    Decrease,
    Increase,
}

impl Adjust {
    fn signed(self, step: f32) -> f32 {
        match self {
            Adjust::Decrease => -step,
            Adjust::Increase => step,
        }
    }
}

/// A single keyboard command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    CycleMode,
    ToggleRotation,
    ToggleLight(usize),
    Ambient(Adjust),
    Scale(Adjust),
    Quit,
}

impl Command {
    pub fn from_key(key: char) -> Option<Self> {
        Some(match key {
            'w' => Command::Move(Direction::Up),
            's' => Command::Move(Direction::Down),
            'a' => Command::Move(Direction::Left),
            'd' => Command::Move(Direction::Right),
            'f' => Command::Move(Direction::Forward),
            'g' => Command::Move(Direction::Backward),
            'q' => Command::CycleMode,
            'r' => Command::ToggleRotation,
            '1' => Command::ToggleLight(0),
            '2' => Command::ToggleLight(1),
            '3' => Command::ToggleLight(2),
            'z' => Command::Ambient(Adjust::Decrease),
            'x' => Command::Ambient(Adjust::Increase),
            ',' => Command::Scale(Adjust::Decrease),
            '.' => Command::Scale(Adjust::Increase),
            '\u{1b}' => Command::Quit,
            _ => return None,
        })
    }
}

/// Everything input and the frame tick mutate between frames
#[derive(Debug, Clone)]
pub struct SceneState {
    pub camera: Camera,
    pub spin: Spin,
    pub scale: f32,
    pub translation: Vec3,
    pub mode: InputMode,
    pub lighting: Lighting,
    config: SceneConfig,
    composer: PoseComposer,
}

impl SceneState {
    pub fn new(config: SceneConfig, aspect: f32) -> Self {
        let camera = Camera::from_config(&config, aspect);
        Self {
            composer: PoseComposer::new(&camera),
            camera,
            spin: Spin::new(config.rotating, config.rotation_step),
            scale: config.scale,
            translation: Vec3::zeros(),
            mode: InputMode::default(),
            lighting: Lighting::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn apply(&mut self, command: Command) {
        debug!("{command:?} in {} mode", self.mode);
        match command {
            Command::Move(direction) => self.move_target(direction),
            Command::CycleMode => {
                self.mode = self.mode.next();
                info!("input mode is {}", self.mode);
            }
            Command::ToggleRotation => {
                self.spin.toggle();
            }
            Command::ToggleLight(index) => {
                self.lighting.toggle(index);
                info!("active lights: {:?}", self.lighting.enabled());
            }
            Command::Ambient(adjust) => {
                self.lighting.adjust_ambient(adjust.signed(self.config.ambient_step));
            }
            Command::Scale(adjust) => {
                // A scale already under the floor may shrink no further, but
                // a decrease must never grow it
                let floor = self.config.min_scale.min(self.scale);
                self.scale = (self.scale + adjust.signed(self.config.scale_step)).max(floor);
            }
            Command::Quit => {}
        }
    }

    fn move_target(&mut self, direction: Direction) {
        let v = direction.vector();
        match self.mode {
            InputMode::Camera => self.camera.eye += v * self.config.camera_step,
            InputMode::Translation => self.translation += v * self.config.translation_step,
            InputMode::RotationTarget => self.spin.rotate(v.x * self.config.rotation_nudge),
            InputMode::LightPosition => {
                self.lighting.lights[0].position += v * self.config.light_step;
            }
        }
    }

    /// Advance per-frame animation
    pub fn tick(&mut self) {
        self.spin.tick();
    }

    pub fn pose(&mut self) -> Pose {
        self.composer
            .compose(&self.camera, self.scale, &self.translation, &self.spin)
    }

    pub fn projection(&self) -> Mat4 {
        self.camera.projection_matrix()
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.aspect = aspect;
    }
}
