use super::{Bitmap, ImageLoadError};

/// Opaque handle to a bitmap held by an [`ImageStore`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ImageId(pub(crate) usize);

/// Owns the application's bitmaps.
///
/// Bitmaps are immutable once inserted, so an `ImageId` always refers to the
/// same pixels and renderers may cache GPU textures by id.
#[derive(Debug, Default)]
pub struct ImageStore {
    images: Vec<Bitmap>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, bitmap: Bitmap) -> ImageId {
        let id = ImageId(self.images.len());
        self.images.push(bitmap);
        id
    }

    /// Decodes `bytes` and stores the result.
    pub fn load(&mut self, bytes: &[u8]) -> Result<ImageId, ImageLoadError> {
        let bitmap = Bitmap::decode(bytes)?;
        Ok(self.insert(bitmap))
    }

    pub fn get(&self, id: ImageId) -> Option<&Bitmap> {
        self.images.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
