//! Headless test harness.
//!
//! [`RecordingBackend`] stands in for a GL context: it records every call the
//! renderer makes and hands out fake object ids. [`TestHarness`] drives a
//! [`TriangleScene`] through the same lifecycle a window would.

use std::cell::{Cell, RefCell};

use glam::{Mat4, Vec3};
use shared::Color;

use crate::host::{RenderHost, TriangleScene};
use crate::render::{ContextInfo, GraphicsBackend, Primitive, RendererError, ShaderStage};
use crate::state::AppSettings;

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CompileShader { stage: ShaderStage, id: u32 },
    LinkProgram { id: u32, vertex: u32, fragment: u32 },
    DeleteShader(u32),
    DeleteProgram(u32),
    CreateVertexArray(u32),
    CreateBuffer(u32),
    DeleteVertexArray(u32),
    DeleteBuffer(u32),
    UseProgram(Option<u32>),
    UniformMat4 { name: String, value: Mat4 },
    UniformColor { name: String, color: Color },
    Upload { vao: u32, vbo: u32, vertices: Vec<Vec3> },
    Draw { primitive: Primitive, count: i32 },
    UnbindVertexArray,
    Viewport { x: i32, y: i32, width: i32, height: i32 },
    Clear(Color),
    EnableDepthTest,
}

/// Which setup step should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Failure {
    #[default]
    None,
    Compile(ShaderStage),
    Link,
    VertexArray,
    Buffer,
}

/// Backend that records calls instead of talking to a GPU.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: RefCell<Vec<GlCall>>,
    next_id: Cell<u32>,
    failure: Failure,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose setup fails at the given step
    pub fn failing(failure: Failure) -> Self {
        Self {
            failure,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<GlCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn draws(&self) -> Vec<(Primitive, i32)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                GlCall::Draw { primitive, count } => Some((*primitive, *count)),
                _ => None,
            })
            .collect()
    }

    pub fn uploads(&self) -> Vec<Vec<Vec3>> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                GlCall::Upload { vertices, .. } => Some(vertices.clone()),
                _ => None,
            })
            .collect()
    }

    /// Last value set for a color uniform
    pub fn last_color(&self, name: &str) -> Option<Color> {
        self.calls.borrow().iter().rev().find_map(|c| match c {
            GlCall::UniformColor { name: n, color } if n == name => Some(*color),
            _ => None,
        })
    }

    /// Last value set for a matrix uniform
    pub fn last_mat4(&self, name: &str) -> Option<Mat4> {
        self.calls.borrow().iter().rev().find_map(|c| match c {
            GlCall::UniformMat4 { name: n, value } if n == name => Some(*value),
            _ => None,
        })
    }

    /// Number of objects created minus objects deleted
    pub fn live_objects(&self) -> i64 {
        self.calls.borrow().iter().fold(0, |n, c| match c {
            GlCall::CompileShader { .. }
            | GlCall::LinkProgram { .. }
            | GlCall::CreateVertexArray(_)
            | GlCall::CreateBuffer(_) => n + 1,
            GlCall::DeleteShader(_)
            | GlCall::DeleteProgram(_)
            | GlCall::DeleteVertexArray(_)
            | GlCall::DeleteBuffer(_) => n - 1,
            _ => n,
        })
    }

    fn record(&self, call: GlCall) {
        self.calls.borrow_mut().push(call);
    }

    fn alloc(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

impl GraphicsBackend for RecordingBackend {
    type Shader = u32;
    type Program = u32;
    type VertexArray = u32;
    type Buffer = u32;

    fn context_info(&self) -> ContextInfo {
        ContextInfo {
            version: "3.3 (recording)".to_string(),
            vendor: "c3d".to_string(),
            renderer: "RecordingBackend".to_string(),
        }
    }

    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<u32, String> {
        if self.failure == Failure::Compile(stage) {
            return Err(format!("0:1(1): error: rejected {stage} shader"));
        }
        if source.trim().is_empty() {
            return Err("0:0(0): error: empty shader source".to_string());
        }
        let id = self.alloc();
        self.record(GlCall::CompileShader { stage, id });
        Ok(id)
    }

    fn link_program(&self, vertex: u32, fragment: u32) -> Result<u32, String> {
        if self.failure == Failure::Link {
            return Err("error: linking with uncompiled/unspecialized shader".to_string());
        }
        let id = self.alloc();
        self.record(GlCall::LinkProgram { id, vertex, fragment });
        Ok(id)
    }

    fn delete_shader(&self, shader: u32) {
        self.record(GlCall::DeleteShader(shader));
    }

    fn delete_program(&self, program: u32) {
        self.record(GlCall::DeleteProgram(program));
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        if self.failure == Failure::VertexArray {
            return Err("out of memory".to_string());
        }
        let id = self.alloc();
        self.record(GlCall::CreateVertexArray(id));
        Ok(id)
    }

    fn create_buffer(&self) -> Result<u32, String> {
        if self.failure == Failure::Buffer {
            return Err("out of memory".to_string());
        }
        let id = self.alloc();
        self.record(GlCall::CreateBuffer(id));
        Ok(id)
    }

    fn delete_vertex_array(&self, vao: u32) {
        self.record(GlCall::DeleteVertexArray(vao));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(GlCall::DeleteBuffer(buffer));
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(GlCall::UseProgram(program));
    }

    fn set_uniform_mat4(&self, _program: u32, name: &str, mat: &Mat4) {
        self.record(GlCall::UniformMat4 {
            name: name.to_string(),
            value: *mat,
        });
    }

    fn set_uniform_color(&self, _program: u32, name: &str, color: Color) {
        self.record(GlCall::UniformColor {
            name: name.to_string(),
            color,
        });
    }

    fn upload_vertices(&self, vao: u32, vbo: u32, vertices: &[Vec3]) {
        self.record(GlCall::Upload {
            vao,
            vbo,
            vertices: vertices.to_vec(),
        });
    }

    fn draw_arrays(&self, primitive: Primitive, count: i32) {
        self.record(GlCall::Draw { primitive, count });
    }

    fn unbind_vertex_array(&self) {
        self.record(GlCall::UnbindVertexArray);
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(GlCall::Viewport { x, y, width, height });
    }

    fn clear(&self, color: Color) {
        self.record(GlCall::Clear(color));
    }

    fn enable_depth_test(&self) {
        self.record(GlCall::EnableDepthTest);
    }
}

// ── Harness ──────────────────────────────────────────────────

/// Drives a [`TriangleScene`] the way the window host does, without a window.
pub struct TestHarness {
    scene: TriangleScene<RecordingBackend>,
    setup_result: Option<Result<(), RendererError>>,
    frames: u32,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_backend(RecordingBackend::new(), AppSettings::default())
    }

    pub fn with_backend(backend: RecordingBackend, settings: AppSettings) -> Self {
        Self {
            scene: TriangleScene::new(backend, settings.scene, settings.canvas),
            setup_result: None,
            frames: 0,
        }
    }

    /// Context realized: run setup once
    pub fn realize(&mut self) -> Result<(), RendererError> {
        let result = self.scene.on_setup();
        self.setup_result = Some(result.clone());
        result
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.scene.on_resize(width, height);
    }

    /// Resize to the given surface size, then render one frame
    pub fn frame(&mut self, width: i32, height: i32) {
        self.scene.on_resize(width, height);
        self.scene.on_render_frame();
        self.frames += 1;
    }

    pub fn teardown(&mut self) {
        self.scene.on_teardown();
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn setup_result(&self) -> Option<&Result<(), RendererError>> {
        self.setup_result.as_ref()
    }

    pub fn scene(&self) -> &TriangleScene<RecordingBackend> {
        &self.scene
    }

    pub fn backend(&self) -> &RecordingBackend {
        self.scene.renderer().backend()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
