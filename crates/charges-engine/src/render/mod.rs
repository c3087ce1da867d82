//! GPU rendering subsystem.
//!
//! Renderers consume the `scene` draw stream and issue wgpu commands. Each
//! renderer owns its pipelines and buffers and creates them lazily on the
//! first frame, rebuilding when the surface format changes.
//!
//! Geometry is in logical pixels (top-left origin, +Y down); vertex shaders
//! convert to NDC with a viewport uniform.

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
