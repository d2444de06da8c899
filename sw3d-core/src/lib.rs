/// SW3D Core Library - software transform-and-rasterize pipeline
///
/// Homogeneous vector/matrix math, triangle meshes with pivot-based rigid
/// transforms, a yaw/pitch camera, and a painter's-algorithm frame renderer
/// that emits draw calls to an external 2D surface.

pub mod color;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod projection;
pub mod render;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use color::{Color, Hsb};
pub use error::{Error, Result};
pub use geometry::{Mesh, Triangle};
pub use loader::{load_mesh_from_path, load_mesh_from_reader, load_mesh_from_str, LoadedMesh};
pub use projection::{is_clipped, Camera, ProjectionParams};
pub use render::{FrameStats, RenderOptions, Renderer};
pub use surface::{InputSource, InputSymbol, Surface};
pub use transform::{point, RigidTransform, RotationState, Transform, Vertex};
