//! Input subsystem.
//!
//! The public API is platform-agnostic and never exposes winit types. The
//! runtime translates window events into [`InputEvent`]s (see `platform`),
//! folds them into an [`InputState`] and records per-frame transitions in an
//! [`InputFrame`].

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{
    ButtonState,
    InputEvent,
    Key,
    MouseButton,
    PointerButtonEvent,
    TouchEvent,
    TouchId,
    TouchPhase,
};
