use crate::coords::Vec2;
use crate::image::ImageId;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Bitmap draw payload.
///
/// The bitmap is drawn at its native size with its top-left corner at
/// `origin`. `tint` multiplies each channel; rgb may exceed 1.0 to brighten,
/// and `tint[3]` scales opacity.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteCmd {
    pub image: ImageId,
    pub origin: Vec2,
    pub tint: [f32; 4],
}

impl DrawList {
    /// Records a bitmap draw.
    #[inline]
    pub fn push_sprite(&mut self, z: ZIndex, image: ImageId, origin: Vec2, tint: [f32; 4]) {
        self.push(z, DrawCmd::Sprite(SpriteCmd { image, origin, tint }));
    }
}
