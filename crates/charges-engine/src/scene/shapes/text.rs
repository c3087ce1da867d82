use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};
use crate::text::FontId;

/// Font, size and color shared by runs of text.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextFormat {
    pub font: FontId,
    /// Logical pixels.
    pub size: f32,
    pub color: Color,
}

impl TextFormat {
    pub const fn new(font: FontId, size: f32, color: Color) -> Self {
        Self { font, size, color }
    }
}

/// One line of text, positioned by the top-left of its line box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub format: TextFormat,
    pub origin: Vec2,
}

impl DrawList {
    pub fn push_text(&mut self, z: ZIndex, text: impl Into<String>, format: TextFormat, origin: Vec2) {
        self.push(z, DrawCmd::Text(TextCmd { text: text.into(), format, origin }));
    }
}
