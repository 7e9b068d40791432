pub mod webgl;
pub mod shaders;
pub mod pipeline;
pub mod draw;
pub mod texture;

pub use webgl::WebGLContext;
pub use pipeline::{BloomSettings, PipelineSettings, RenderPipeline};
pub use draw::{DrawCall, Material, MeshId};
pub use texture::{ImageTexture, SOIL_FALLBACK};
