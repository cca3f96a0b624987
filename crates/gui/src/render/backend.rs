use std::fmt::Debug;

use glam::{Mat4, Vec3};
use shared::Color;

/// Shader pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// How uploaded vertices are assembled into primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
    LineLoop,
    Lines,
    Points,
}

/// Driver identification strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextInfo {
    pub version: String,
    pub vendor: String,
    pub renderer: String,
}

/// The GPU operations the renderer needs.
///
/// Everything runs on the thread that owns the graphics context. Handle types
/// are plain copyable ids; ownership of the objects they name is tracked by
/// the renderer, not by the backend.
pub trait GraphicsBackend {
    type Shader: Copy + Debug;
    type Program: Copy + Debug;
    type VertexArray: Copy + Debug;
    type Buffer: Copy + Debug;

    fn context_info(&self) -> ContextInfo;

    /// Compile one stage. On failure the shader object is already deleted and
    /// the driver's info log is returned.
    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<Self::Shader, String>;

    /// Link two compiled stages. On failure the program object is already
    /// deleted and the info log is returned. The stages are left alive.
    fn link_program(
        &self,
        vertex: Self::Shader,
        fragment: Self::Shader,
    ) -> Result<Self::Program, String>;

    fn delete_shader(&self, shader: Self::Shader);
    fn delete_program(&self, program: Self::Program);

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn delete_vertex_array(&self, vao: Self::VertexArray);
    fn delete_buffer(&self, buffer: Self::Buffer);

    fn use_program(&self, program: Option<Self::Program>);
    fn set_uniform_mat4(&self, program: Self::Program, name: &str, mat: &Mat4);
    fn set_uniform_color(&self, program: Self::Program, name: &str, color: Color);

    /// Replace the buffer contents with `vertices` and describe them as
    /// attribute 0 (three tightly packed floats). Leaves the VAO bound.
    fn upload_vertices(&self, vao: Self::VertexArray, vbo: Self::Buffer, vertices: &[Vec3]);

    fn draw_arrays(&self, primitive: Primitive, count: i32);
    fn unbind_vertex_array(&self);

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    /// Clear color and depth buffers
    fn clear(&self, color: Color);
    /// Depth test on, passing fragments at equal or nearer depth
    fn enable_depth_test(&self);
}

/// Lets a renderer own a shared context handle (`Arc<glow::Context>` from eframe).
impl<T: GraphicsBackend + ?Sized> GraphicsBackend for std::sync::Arc<T> {
    type Shader = T::Shader;
    type Program = T::Program;
    type VertexArray = T::VertexArray;
    type Buffer = T::Buffer;

    fn context_info(&self) -> ContextInfo {
        (**self).context_info()
    }

    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<Self::Shader, String> {
        (**self).compile_shader(stage, source)
    }

    fn link_program(
        &self,
        vertex: Self::Shader,
        fragment: Self::Shader,
    ) -> Result<Self::Program, String> {
        (**self).link_program(vertex, fragment)
    }

    fn delete_shader(&self, shader: Self::Shader) {
        (**self).delete_shader(shader)
    }

    fn delete_program(&self, program: Self::Program) {
        (**self).delete_program(program)
    }

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String> {
        (**self).create_vertex_array()
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        (**self).create_buffer()
    }

    fn delete_vertex_array(&self, vao: Self::VertexArray) {
        (**self).delete_vertex_array(vao)
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        (**self).delete_buffer(buffer)
    }

    fn use_program(&self, program: Option<Self::Program>) {
        (**self).use_program(program)
    }

    fn set_uniform_mat4(&self, program: Self::Program, name: &str, mat: &Mat4) {
        (**self).set_uniform_mat4(program, name, mat)
    }

    fn set_uniform_color(&self, program: Self::Program, name: &str, color: Color) {
        (**self).set_uniform_color(program, name, color)
    }

    fn upload_vertices(&self, vao: Self::VertexArray, vbo: Self::Buffer, vertices: &[Vec3]) {
        (**self).upload_vertices(vao, vbo, vertices)
    }

    fn draw_arrays(&self, primitive: Primitive, count: i32) {
        (**self).draw_arrays(primitive, count)
    }

    fn unbind_vertex_array(&self) {
        (**self).unbind_vertex_array()
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        (**self).viewport(x, y, width, height)
    }

    fn clear(&self, color: Color) {
        (**self).clear(color)
    }

    fn enable_depth_test(&self) {
        (**self).enable_depth_test()
    }
}
