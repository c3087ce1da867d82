use std::fmt;

/// Error returned when bundled image bytes cannot be decoded.
#[derive(Debug, Clone)]
pub struct ImageLoadError(pub String);

impl fmt::Display for ImageLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "image load error: {}", self.0)
    }
}

impl std::error::Error for ImageLoadError {}

/// Straight-alpha RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Bitmap {
    /// Decodes an encoded image (PNG) from memory.
    pub fn decode(bytes: &[u8]) -> Result<Self, ImageLoadError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| ImageLoadError(e.to_string()))?
            .to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self { width, height, rgba: img.into_raw() })
    }

    /// Wraps raw RGBA8 pixels.
    ///
    /// Fails when `rgba.len()` does not match `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, ImageLoadError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(ImageLoadError(format!(
                "expected {expected} bytes for {width}x{height} RGBA, got {}",
                rgba.len()
            )));
        }
        Ok(Self { width, height, rgba })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size as signed integers, convenient for canvas arithmetic.
    #[inline]
    pub fn size_i32(&self) -> (i32, i32) {
        (self.width as i32, self.height as i32)
    }

    #[inline]
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Alpha at a pixel relative to the bitmap's top-left corner.
    ///
    /// Coordinates outside the bitmap read as fully transparent.
    pub fn alpha_at(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return 0;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.rgba[idx + 3]
    }

    /// Whether the pixel at `(x, y)` has any coverage.
    #[inline]
    pub fn is_opaque_at(&self, x: i32, y: i32) -> bool {
        self.alpha_at(x, y) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Bitmap {
        // 2x2: opaque at (0,0) and (1,1), transparent elsewhere.
        let rgba = vec![
            255, 0, 0, 255, 0, 0, 0, 0, //
            0, 0, 0, 0, 0, 255, 0, 128,
        ];
        Bitmap::from_rgba(2, 2, rgba).unwrap()
    }

    #[test]
    fn alpha_reads_the_right_pixel() {
        let bmp = checker();
        assert_eq!(bmp.alpha_at(0, 0), 255);
        assert_eq!(bmp.alpha_at(1, 0), 0);
        assert_eq!(bmp.alpha_at(1, 1), 128);
        assert!(bmp.is_opaque_at(1, 1));
        assert!(!bmp.is_opaque_at(0, 1));
    }

    #[test]
    fn out_of_bounds_is_transparent() {
        let bmp = checker();
        assert_eq!(bmp.alpha_at(-1, 0), 0);
        assert_eq!(bmp.alpha_at(0, 2), 0);
        assert_eq!(bmp.alpha_at(2, 0), 0);
    }

    #[test]
    fn from_rgba_rejects_wrong_length() {
        assert!(Bitmap::from_rgba(2, 2, vec![0; 15]).is_err());
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = Bitmap::decode(b"not a png").unwrap_err();
        assert!(err.to_string().starts_with("image load error"));
    }
}
