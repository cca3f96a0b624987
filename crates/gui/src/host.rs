//! Lifecycle contract between a windowing host and the renderer.
//!
//! The host owns the window and the GL context and calls into a
//! [`RenderHost`] at fixed points: once when the context becomes current,
//! whenever the drawable is resized, once per frame, and once before the
//! context goes away. Presenting the frame stays with the host.

use shared::{CanvasConfig, Point3};

use crate::render::{GraphicsBackend, Renderer, RendererError};
use crate::state::{CanvasSettings, SceneSettings};

/// Callbacks a windowing layer drives
pub trait RenderHost {
    /// Context is current for the first time
    fn on_setup(&mut self) -> Result<(), RendererError>;

    /// Drawable size changed (physical pixels)
    fn on_resize(&mut self, width: i32, height: i32);

    /// Draw one frame
    fn on_render_frame(&mut self);

    /// Context is about to be destroyed
    fn on_teardown(&mut self);
}

/// Apex, bottom-left, bottom-right
pub const TRIANGLE: [Point3; 3] = [
    Point3::new(0.0, 1.0, 0.0),
    Point3::new(-1.0, 0.0, 0.0),
    Point3::new(1.0, 0.0, 0.0),
];

/// The demo: one static triangle with a white outline and an optional fill.
pub struct TriangleScene<B: GraphicsBackend> {
    renderer: Renderer<B>,
    scene: SceneSettings,
    canvas: CanvasSettings,
    last_size: Option<(i32, i32)>,
}

impl<B: GraphicsBackend> TriangleScene<B> {
    pub fn new(backend: B, scene: SceneSettings, canvas: CanvasSettings) -> Self {
        Self {
            renderer: Renderer::new(backend),
            scene,
            canvas,
            last_size: None,
        }
    }

    pub fn renderer(&self) -> &Renderer<B> {
        &self.renderer
    }

    pub fn canvas(&self) -> &CanvasConfig {
        self.renderer.canvas()
    }
}

impl<B: GraphicsBackend> RenderHost for TriangleScene<B> {
    fn on_setup(&mut self) -> Result<(), RendererError> {
        let info = self.renderer.describe_context();
        tracing::info!("OpenGL Version: {}", info.version);
        tracing::info!("OpenGL Vendor: {}", info.vendor);
        tracing::info!("OpenGL Renderer: {}", info.renderer);

        self.renderer.initialize()?;
        self.renderer
            .canvas_mut()
            .set_z_range(self.canvas.z_near, self.canvas.z_far);
        // a resize that arrived before setup had no program to upload to
        self.last_size = None;

        tracing::info!("C3D renderer initialized successfully");
        Ok(())
    }

    fn on_resize(&mut self, width: i32, height: i32) {
        if self.last_size == Some((width, height)) {
            return;
        }
        self.last_size = Some((width, height));
        self.renderer.set_viewport(width, height);
    }

    fn on_render_frame(&mut self) {
        if !self.renderer.is_ready() {
            return;
        }
        self.renderer.begin_frame();
        self.renderer
            .draw_triangle(&TRIANGLE, self.scene.line_color, self.scene.fill_color);
        self.renderer.end_frame();
    }

    fn on_teardown(&mut self) {
        self.renderer.cleanup();
    }
}
