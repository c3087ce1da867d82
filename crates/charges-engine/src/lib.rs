//! Charges engine crate.
//!
//! Owns the platform + GPU runtime used by the demo: window and run loop,
//! mouse/touch/keyboard input, a z-ordered draw list and the renderers that
//! consume it (rectangles, bitmap sprites, text).

pub mod core;
pub mod device;
pub mod input;
pub mod window;

pub mod coords;
pub mod image;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
