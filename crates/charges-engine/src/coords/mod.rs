//! Geometry shared by the draw list and renderers.
//!
//! All CPU-side coordinates are logical pixels, origin top-left, +Y down.
//! Renderers convert to NDC in their vertex shaders using a viewport uniform.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
