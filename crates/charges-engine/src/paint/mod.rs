//! Color model shared between the draw list and renderers.

mod color;

pub use color::Color;
