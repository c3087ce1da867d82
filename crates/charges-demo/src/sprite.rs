use std::fmt;

use charges_engine::coords::Vec2;
use charges_engine::image::{Bitmap, ImageId};

/// Stable sprite identity; survives reordering of the render list.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SpriteId(pub u32);

impl fmt::Display for SpriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bitmaps for each charge sign.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ChargeImages {
    pub negative: ImageId,
    pub neutral: ImageId,
    pub positive: ImageId,
}

impl ChargeImages {
    pub fn for_charge(&self, charge: f32) -> ImageId {
        if charge > 0.0 {
            self.positive
        } else if charge < 0.0 {
            self.negative
        } else {
            self.neutral
        }
    }
}

/// A draggable charge.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub id: SpriteId,
    pub name: String,
    pub image: ImageId,
    /// Top-left corner in canvas pixels.
    pub x: i32,
    pub y: i32,
    /// Charge in µC.
    pub charge: f32,
    pub chosen: bool,
}

impl Sprite {
    /// Whether the bitmap has a visible pixel at canvas point `(x, y)`.
    pub fn contains(&self, bitmap: &Bitmap, x: i32, y: i32) -> bool {
        bitmap.is_opaque_at(x - self.x, y - self.y)
    }

    /// Moves by `(dx, dy)`, keeping the bitmap inside `area`.
    pub fn move_by(&mut self, dx: i32, dy: i32, bitmap_size: (i32, i32), area: (i32, i32)) {
        let (w, h) = bitmap_size;
        // min before max: a bitmap larger than the area pins to the origin.
        self.x = (self.x + dx).min(area.0 - w).max(0);
        self.y = (self.y + dy).min(area.1 - h).max(0);
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::from_i32(self.x, self.y)
    }

    pub fn center(&self, bitmap_size: (i32, i32)) -> Vec2 {
        Vec2::new(
            self.x as f32 + bitmap_size.0 as f32 / 2.0,
            self.y as f32 + bitmap_size.1 as f32 / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charges_engine::image::ImageStore;

    fn sprite(x: i32, y: i32) -> Sprite {
        let mut store = ImageStore::new();
        let image = store.insert(Bitmap::from_rgba(1, 1, vec![0; 4]).unwrap());
        Sprite {
            id: SpriteId(1),
            name: "Q1".into(),
            image,
            x,
            y,
            charge: 0.0,
            chosen: false,
        }
    }

    /// 2x2 bitmap with only the top-left pixel opaque.
    fn corner_bitmap() -> Bitmap {
        let mut rgba = vec![0u8; 16];
        rgba[3] = 255;
        Bitmap::from_rgba(2, 2, rgba).unwrap()
    }

    #[test]
    fn contains_reads_alpha_relative_to_origin() {
        let s = sprite(10, 20);
        let bmp = corner_bitmap();
        assert!(s.contains(&bmp, 10, 20));
        assert!(!s.contains(&bmp, 11, 20));
        assert!(!s.contains(&bmp, 9, 20));
        assert!(!s.contains(&bmp, 10, 22));
    }

    #[test]
    fn move_by_clamps_to_area() {
        let mut s = sprite(10, 10);
        s.move_by(-50, 500, (32, 32), (400, 270));
        assert_eq!((s.x, s.y), (0, 238));

        s.move_by(1000, -1000, (32, 32), (400, 270));
        assert_eq!((s.x, s.y), (368, 0));

        s.move_by(5, 7, (32, 32), (400, 270));
        assert_eq!((s.x, s.y), (368, 7));
    }

    #[test]
    fn image_follows_charge_sign() {
        let mut store = ImageStore::new();
        let mut add = || store.insert(Bitmap::from_rgba(1, 1, vec![0; 4]).unwrap());
        let images = ChargeImages { negative: add(), neutral: add(), positive: add() };
        assert_eq!(images.for_charge(0.3), images.positive);
        assert_eq!(images.for_charge(-0.1), images.negative);
        assert_eq!(images.for_charge(0.0), images.neutral);
    }
}
