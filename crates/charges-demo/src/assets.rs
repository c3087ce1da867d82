//! Bundled bitmaps and font.

use anyhow::{Context, Result};
use charges_engine::image::ImageStore;
use charges_engine::text::{FontId, FontSystem};

use crate::sprite::ChargeImages;

const NEGATIVE_PNG: &[u8] = include_bytes!("../assets/negative.png");
const NEUTRAL_PNG: &[u8] = include_bytes!("../assets/neutral.png");
const POSITIVE_PNG: &[u8] = include_bytes!("../assets/positive.png");
const FONT_TTF: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

pub struct Assets {
    pub images: ImageStore,
    pub charge_images: ChargeImages,
    pub fonts: FontSystem,
    pub font: FontId,
}

impl Assets {
    /// Decodes everything embedded in the binary.
    pub fn load() -> Result<Self> {
        let mut images = ImageStore::new();
        let mut load = |name: &str, bytes: &[u8]| {
            images
                .load(bytes)
                .with_context(|| format!("failed to decode bundled image {name}"))
        };
        let charge_images = ChargeImages {
            negative: load("negative.png", NEGATIVE_PNG)?,
            neutral: load("neutral.png", NEUTRAL_PNG)?,
            positive: load("positive.png", POSITIVE_PNG)?,
        };

        let mut fonts = FontSystem::new();
        let font = fonts
            .load_font(FONT_TTF)
            .context("failed to parse bundled font DejaVuSans.ttf")?;

        log::info!("loaded {} bitmaps and 1 font", images.len());
        Ok(Self { images, charge_images, fonts, font })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_assets_decode() {
        let assets = Assets::load().unwrap();
        let sizes: Vec<_> = [
            assets.charge_images.negative,
            assets.charge_images.neutral,
            assets.charge_images.positive,
        ]
        .into_iter()
        .map(|id| assets.images.get(id).unwrap().size_i32())
        .collect();
        assert!(sizes.iter().all(|&s| s == sizes[0]));
        assert!(sizes[0].0 > 0);
        assert!(assets.fonts.line_height(assets.font, 10.0) > 0.0);
    }

    #[test]
    fn sprite_bitmaps_have_transparent_corners_and_solid_centers() {
        let assets = Assets::load().unwrap();
        let bmp = assets.images.get(assets.charge_images.neutral).unwrap();
        let (w, h) = bmp.size_i32();
        assert!(!bmp.is_opaque_at(0, 0));
        assert!(bmp.is_opaque_at(w / 2, h / 2));
    }
}
