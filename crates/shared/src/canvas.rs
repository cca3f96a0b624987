//! Canvas dimensions and clip range used for projection setup.

const DEFAULT_WIDTH: i32 = 900;
const DEFAULT_HEIGHT: i32 = 600;
const DEFAULT_Z_NEAR: f32 = 0.1;
const DEFAULT_Z_FAR: f32 = 100.0;

/// Viewport size and near/far planes.
///
/// `aspect_ratio` is derived from width and height and is kept in sync by
/// [`CanvasConfig::set_dimensions`].
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    width: i32,
    height: i32,
    z_near: f32,
    z_far: f32,
    aspect_ratio: f32,
}

impl CanvasConfig {
    pub fn new(width: i32, height: i32) -> Self {
        let mut config = Self {
            width,
            height,
            z_near: DEFAULT_Z_NEAR,
            z_far: DEFAULT_Z_FAR,
            aspect_ratio: 1.0,
        };
        config.update_aspect_ratio();
        config
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Store new dimensions and recompute the aspect ratio.
    /// A non-positive height yields an aspect ratio of 1.0.
    pub fn set_dimensions(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
        self.update_aspect_ratio();
    }

    /// Store the clip range verbatim
    pub fn set_z_range(&mut self, z_near: f32, z_far: f32) {
        self.z_near = z_near;
        self.z_far = z_far;
    }

    fn update_aspect_ratio(&mut self) {
        self.aspect_ratio = if self.height > 0 {
            self.width as f32 / self.height as f32
        } else {
            1.0
        };
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}
