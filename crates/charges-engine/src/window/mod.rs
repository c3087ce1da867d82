//! Window and run loop.
//!
//! Owns the `winit` event loop and the window, wires window events into the
//! input subsystem and drives one [`crate::core::App::on_frame`] per redraw.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
pub use winit::dpi::LogicalSize;
