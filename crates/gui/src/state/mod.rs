pub mod settings;

pub use settings::{AppSettings, CanvasSettings, SceneSettings, WindowSettings};
