//! OpenGL canvas panel: forwards egui paint callbacks to the render host

use std::sync::{Arc, Mutex};

use c3d_gui_lib::host::{RenderHost, TriangleScene};
use c3d_gui_lib::state::AppSettings;
use egui::Ui;

type GlScene = TriangleScene<Arc<glow::Context>>;

/// Full-window canvas drawing the triangle scene
pub struct CanvasPanel {
    scene: Option<Arc<Mutex<GlScene>>>,
}

impl CanvasPanel {
    /// Create the scene and run setup (must be called with the GL context current)
    pub fn new(gl: Option<Arc<glow::Context>>, settings: &AppSettings) -> Self {
        let Some(gl) = gl else {
            tracing::error!("No OpenGL context available, canvas disabled");
            return Self { scene: None };
        };

        let mut scene = TriangleScene::new(gl, settings.scene.clone(), settings.canvas.clone());
        if let Err(e) = scene.on_setup() {
            tracing::error!("Failed to initialize renderer: {e}");
        }

        Self {
            scene: Some(Arc::new(Mutex::new(scene))),
        }
    }

    pub fn show(&self, ui: &mut Ui) {
        let Some(scene) = &self.scene else {
            ui.centered_and_justified(|ui| {
                ui.label("OpenGL is not available");
            });
            return;
        };

        let (rect, _response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
        let scene = scene.clone();
        let callback = egui::PaintCallback {
            rect,
            callback: Arc::new(eframe::egui_glow::CallbackFn::new(move |info, _painter| {
                let viewport = info.viewport_in_pixels();
                if let Ok(mut s) = scene.lock() {
                    s.on_resize(viewport.width_px, viewport.height_px);
                    s.on_render_frame();
                }
            })),
        };
        ui.painter().add(callback);
    }

    /// Release GPU objects while the context is still alive
    pub fn destroy(&self) {
        if let Some(scene) = &self.scene {
            if let Ok(mut s) = scene.lock() {
                s.on_teardown();
            }
        }
    }
}
