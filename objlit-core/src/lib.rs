//! objlit core library - mesh loading and transform logic
//!
//! This library provides the stateless core of the viewer: OBJ parsing and
//! flattening into draw-ready attribute arrays, the transform algebra, and
//! the scene state that input and the frame tick mutate.

pub mod algebra;
pub mod config;
pub mod error;
pub mod geometry;
pub mod lighting;
pub mod obj;
pub mod projection;
pub mod scene;
pub mod texture;
pub mod transform;

// Re-export commonly used types
pub use algebra::{Mat4, Vec2, Vec3, Vec4};
pub use config::SceneConfig;
pub use error::{IndexError, LoadError, ParseError, ParseErrorKind, Pool, TextureError};
pub use geometry::{face_normal, FaceVertexRef, FlatMesh, Mesh, Triangle, Vertex};
pub use lighting::{Lighting, PointLight};
pub use obj::{load_flat_mesh, load_obj, parse_obj};
pub use projection::{project_to_screen, Camera, ScreenPoint};
pub use scene::{Command, InputMode, SceneState};
pub use texture::{load_bmp, Texture};
pub use transform::{Pose, PoseComposer, Spin, Transform};
