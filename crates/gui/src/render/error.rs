use super::backend::ShaderStage;

/// Renderer setup errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RendererError {
    #[error("{stage} shader compilation failed: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("shader program linking failed: {log}")]
    ProgramLink { log: String },

    #[error("GPU resource creation failed: {0}")]
    Resource(String),

    #[error("renderer was already cleaned up")]
    Destroyed,
}
