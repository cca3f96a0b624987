mod app;
mod viewport;

use c3d_gui_lib::state::AppSettings;

use app::C3dApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "c3d=info,c3d_gui_lib=info".into()),
        )
        .init();

    let settings = AppSettings::load();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(settings.window.title.clone())
            .with_inner_size([settings.window.width, settings.window.height])
            .with_resizable(true)
            .with_decorations(true),
        renderer: eframe::Renderer::Glow,
        depth_buffer: 24,
        centered: true,
        ..Default::default()
    };

    tracing::info!("Starting C3D application with eframe + OpenGL");

    if let Err(e) = eframe::run_native(
        "c3d",
        native_options,
        Box::new(move |cc| Ok(Box::new(C3dApp::new(cc, settings)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}
