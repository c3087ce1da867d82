//! CPU-side bitmaps.
//!
//! Bitmaps are decoded once at startup and kept in an [`ImageStore`]. The
//! sprite renderer uploads each one to the GPU on first use; hit testing reads
//! the CPU copy directly, so picking never touches the GPU.

mod bitmap;
mod store;

pub use bitmap::{Bitmap, ImageLoadError};
pub use store::{ImageId, ImageStore};
