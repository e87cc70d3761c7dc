//! 2D rendering
//!
//! The game draws through the `Surface` trait: an HTML canvas on the web, a
//! command recorder for the native runner and tests.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod hud;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasSurface, SpriteImages};
pub use surface::{Color, DrawCommand, RecordingSurface, Surface, colors};

/// The three canvases a frame draws to
#[derive(Debug, Clone)]
pub struct Layers<S> {
    /// Foreground field (bullets, baddies)
    pub field: S,
    /// Player rail canvas
    pub rail: S,
    /// Status bar
    pub status: S,
}
