//! Flat-color OpenGL renderer and the backend seam it draws through.

mod backend;
mod error;
mod glow_backend;
mod renderer;

pub use backend::{ContextInfo, GraphicsBackend, Primitive, ShaderStage};
pub use error::RendererError;
pub use renderer::{camera_matrices, Renderer, RendererState, FRAGMENT_SHADER, VERTEX_SHADER};
