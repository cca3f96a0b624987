//! Value types shared by the renderer and the application shell.
//!
//! Nothing in this crate touches the GPU, so it can be tested and reused
//! without a graphics context.

use serde::{Deserialize, Serialize};

pub mod canvas;
pub mod geometry;

pub use canvas::CanvasConfig;
pub use geometry::{rotate, rotate_all, scale, scale_all, translate, translate_all, Point3};

/// RGBA color with channels in `[0, 1]`.
///
/// The range is not enforced; out-of-range values are passed to the shader
/// as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB channels
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    pub const fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    pub const fn red() -> Self {
        Self::rgb(1.0, 0.0, 0.0)
    }

    pub const fn green() -> Self {
        Self::rgb(0.0, 1.0, 0.0)
    }

    pub const fn blue() -> Self {
        Self::rgb(0.0, 0.0, 1.0)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::white()
    }
}

impl From<[f32; 4]> for Color {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}
