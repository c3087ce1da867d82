//! Per-frame draw stream.
//!
//! The application records rectangles, sprites and text into a [`DrawList`];
//! each renderer then walks the list in paint order (z-index, then insertion
//! order) and picks out the commands it draws. Push helpers live next to
//! their payload types in [`shapes`].

mod cmd;
mod key;
mod list;
mod z_index;

pub mod shapes;

pub use cmd::DrawCmd;
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
pub use z_index::ZIndex;
