/// Rendering module
///
/// This module handles:
/// - Encoding data and painting styled modules (renderer.rs, fill.rs, shape.rs)
/// - Memoized checkerboard backdrops (checkerboard.rs)
/// - Compositing renders over a backdrop for preview (compositor.rs)
/// - Writing finished renders to image files (export.rs)

pub mod checkerboard;
pub mod compositor;
pub mod export;
pub mod fill;
pub mod renderer;
pub mod shape;

pub use compositor::{BackdropPreset, BackdropSpec, Compositor, Target};
pub use renderer::{RenderRequest, RenderedImage};
