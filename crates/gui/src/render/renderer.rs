use glam::{Mat4, Vec3};
use shared::{CanvasConfig, Color, Point3};

use super::backend::{ContextInfo, GraphicsBackend, Primitive, ShaderStage};
use super::error::RendererError;

const FOV_Y_DEGREES: f32 = 45.0;
const EYE: Vec3 = Vec3::new(0.0, 0.0, 3.0);

// ── Lifecycle ────────────────────────────────────────────────

/// GPU objects held while the renderer is ready
struct GpuResources<B: GraphicsBackend> {
    program: B::Program,
    vao: B::VertexArray,
    vbo: B::Buffer,
}

enum State<B: GraphicsBackend> {
    Uninitialized,
    Ready(GpuResources<B>),
    Destroyed,
}

impl<B: GraphicsBackend> State<B> {
    fn stage(&self) -> RendererState {
        match self {
            State::Uninitialized => RendererState::Uninitialized,
            State::Ready(_) => RendererState::Ready,
            State::Destroyed => RendererState::Destroyed,
        }
    }
}

/// Observable lifecycle stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererState {
    Uninitialized,
    Ready,
    Destroyed,
}

// ── Renderer ─────────────────────────────────────────────────

/// Flat-color renderer for triangles, lines and points.
///
/// Owns one shader program and one VAO/VBO pair; every draw call overwrites
/// the whole buffer before drawing. GPU objects are released by
/// [`Renderer::cleanup`], which also runs on drop.
pub struct Renderer<B: GraphicsBackend> {
    backend: B,
    canvas: CanvasConfig,
    state: State<B>,
}

impl<B: GraphicsBackend> Renderer<B> {
    pub fn new(backend: B) -> Self {
        Self::with_canvas(backend, CanvasConfig::default())
    }

    pub fn with_canvas(backend: B, canvas: CanvasConfig) -> Self {
        Self {
            backend,
            canvas,
            state: State::Uninitialized,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut CanvasConfig {
        &mut self.canvas
    }

    pub fn state(&self) -> RendererState {
        self.state.stage()
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready(_))
    }

    pub fn describe_context(&self) -> ContextInfo {
        self.backend.context_info()
    }

    /// Compile the built-in shaders and allocate the vertex array + buffer.
    pub fn initialize(&mut self) -> Result<(), RendererError> {
        self.initialize_with_sources(VERTEX_SHADER, FRAGMENT_SHADER)
    }

    /// Like [`Renderer::initialize`] with caller-provided shader sources.
    ///
    /// On failure nothing stays allocated and the renderer remains
    /// uninitialized; draw calls are then ignored.
    pub fn initialize_with_sources(
        &mut self,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<(), RendererError> {
        match self.state {
            State::Ready(_) => return Ok(()),
            State::Destroyed => return Err(RendererError::Destroyed),
            State::Uninitialized => {}
        }

        match create_resources(&self.backend, vertex_src, fragment_src) {
            Ok(resources) => {
                self.state = State::Ready(resources);
                tracing::debug!("renderer initialized");
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to initialize renderer: {e}");
                Err(e)
            }
        }
    }

    /// Release GPU objects. Safe to call more than once.
    pub fn cleanup(&mut self) {
        if let State::Ready(res) = std::mem::replace(&mut self.state, State::Destroyed) {
            self.backend.use_program(None);
            self.backend.delete_program(res.program);
            self.backend.delete_vertex_array(res.vao);
            self.backend.delete_buffer(res.vbo);
            tracing::debug!("renderer resources released");
        }
    }

    // ── Frame ────────────────────────────────────────────────

    /// Clear to opaque black, reset depth and turn depth testing on.
    ///
    /// The host may change GL state between frames, so depth testing is
    /// enabled again every frame.
    pub fn begin_frame(&self) {
        self.backend.clear(Color::black());
        self.backend.enable_depth_test();
    }

    /// Presentation is done by the host after this returns.
    pub fn end_frame(&self) {}

    /// Resize the GPU viewport and rebuild the projection for the new aspect.
    pub fn set_viewport(&mut self, width: i32, height: i32) {
        tracing::debug!("viewport {width}x{height}");
        self.backend.viewport(0, 0, width, height);
        self.canvas.set_dimensions(width, height);
        self.set_projection();
    }

    /// Upload projection, view and model matrices derived from the canvas.
    pub fn set_projection(&self) {
        let Some(res) = self.resources("set_projection") else {
            return;
        };
        let (projection, view, model) = camera_matrices(&self.canvas);

        self.backend.use_program(Some(res.program));
        self.backend.set_uniform_mat4(res.program, "projection", &projection);
        self.backend.set_uniform_mat4(res.program, "view", &view);
        self.backend.set_uniform_mat4(res.program, "model", &model);
    }

    // ── Draw calls ───────────────────────────────────────────

    /// Draw a triangle outline, optionally filled first.
    ///
    /// Fewer than three vertices is ignored.
    pub fn draw_triangle(&self, vertices: &[Point3], line_color: Color, fill_color: Option<Color>) {
        if vertices.len() < 3 {
            return;
        }
        let Some(res) = self.resources("draw_triangle") else {
            return;
        };

        if let Some(fill) = fill_color {
            self.draw_with(res, vertices, fill, Primitive::Triangles);
        }
        // outline last so it stays visible over the fill
        self.draw_with(res, vertices, line_color, Primitive::LineLoop);
        self.backend.unbind_vertex_array();
    }

    pub fn draw_line(&self, start: Point3, end: Point3, color: Color) {
        let Some(res) = self.resources("draw_line") else {
            return;
        };
        self.draw_with(res, &[start, end], color, Primitive::Lines);
        self.backend.unbind_vertex_array();
    }

    pub fn draw_points(&self, points: &[Point3], color: Color) {
        if points.is_empty() {
            return;
        }
        let Some(res) = self.resources("draw_points") else {
            return;
        };
        self.draw_with(res, points, color, Primitive::Points);
        self.backend.unbind_vertex_array();
    }

    fn draw_with(
        &self,
        res: &GpuResources<B>,
        vertices: &[Point3],
        color: Color,
        primitive: Primitive,
    ) {
        self.backend.use_program(Some(res.program));
        self.backend.set_uniform_color(res.program, "color", color);
        self.backend.upload_vertices(res.vao, res.vbo, vertices);
        self.backend.draw_arrays(primitive, vertices.len() as i32);
    }

    fn resources(&self, op: &str) -> Option<&GpuResources<B>> {
        match &self.state {
            State::Ready(res) => Some(res),
            other => {
                tracing::warn!("{op} ignored: renderer is {:?}", other.stage());
                None
            }
        }
    }
}

impl<B: GraphicsBackend> Drop for Renderer<B> {
    fn drop(&mut self) {
        self.cleanup();
    }
}

// ── Setup helpers ────────────────────────────────────────────

fn create_resources<B: GraphicsBackend>(
    gl: &B,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<GpuResources<B>, RendererError> {
    let program = compile_program(gl, vertex_src, fragment_src)?;

    let vao = match gl.create_vertex_array() {
        Ok(vao) => vao,
        Err(e) => {
            gl.delete_program(program);
            return Err(RendererError::Resource(e));
        }
    };
    let vbo = match gl.create_buffer() {
        Ok(vbo) => vbo,
        Err(e) => {
            gl.delete_vertex_array(vao);
            gl.delete_program(program);
            return Err(RendererError::Resource(e));
        }
    };

    Ok(GpuResources { program, vao, vbo })
}

fn compile_program<B: GraphicsBackend>(
    gl: &B,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<B::Program, RendererError> {
    let vert = gl
        .compile_shader(ShaderStage::Vertex, vertex_src)
        .map_err(|log| RendererError::ShaderCompile { stage: ShaderStage::Vertex, log })?;

    let frag = match gl.compile_shader(ShaderStage::Fragment, fragment_src) {
        Ok(frag) => frag,
        Err(log) => {
            gl.delete_shader(vert);
            return Err(RendererError::ShaderCompile { stage: ShaderStage::Fragment, log });
        }
    };

    let linked = gl.link_program(vert, frag);

    // shaders are no longer needed once linking has been attempted
    gl.delete_shader(vert);
    gl.delete_shader(frag);

    linked.map_err(|log| RendererError::ProgramLink { log })
}

/// Projection (45° perspective), view (eye at +3Z looking at origin) and model (identity).
pub fn camera_matrices(canvas: &CanvasConfig) -> (Mat4, Mat4, Mat4) {
    let projection = Mat4::perspective_rh_gl(
        FOV_Y_DEGREES.to_radians(),
        canvas.aspect_ratio(),
        canvas.z_near(),
        canvas.z_far(),
    );
    let view = Mat4::look_at_rh(EYE, Vec3::ZERO, Vec3::Y);
    (projection, view, Mat4::IDENTITY)
}

// ── Shaders ──────────────────────────────────────────────────

pub const VERTEX_SHADER: &str = r#"#version 330 core
layout (location = 0) in vec3 aPos;

uniform mat4 projection;
uniform mat4 view;
uniform mat4 model;

void main() {
    gl_Position = projection * view * model * vec4(aPos, 1.0);
}
"#;

pub const FRAGMENT_SHADER: &str = r#"#version 330 core
out vec4 FragColor;

uniform vec4 color;

void main() {
    FragColor = color;
}
"#;
