//! Main application module

use eframe::egui;

use c3d_gui_lib::state::AppSettings;

use crate::viewport::CanvasPanel;

/// Main application
pub struct C3dApp {
    canvas: CanvasPanel,
    settings: AppSettings,
}

impl C3dApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: AppSettings) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        Self {
            canvas: CanvasPanel::new(cc.gl.clone(), &settings),
            settings,
        }
    }
}

impl eframe::App for C3dApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // remember the window size for the next start
        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.settings.window.width = rect.width();
            self.settings.window.height = rect.height();
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::default())
            .show(ctx, |ui| {
                self.canvas.show(ui);
            });
    }

    fn on_exit(&mut self, _gl: Option<&glow::Context>) {
        self.canvas.destroy();
        self.settings.save();
        tracing::info!("C3D application closed");
    }
}
