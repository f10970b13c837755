use std::fmt;

/// A decoded, lossless raster ready to be embedded as an image XObject.
///
/// `rgb` holds `width * height * 3` bytes. `alpha`, when present, holds one
/// byte per pixel and becomes the image's soft mask.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    pub alpha: Option<Vec<u8>>,
}

impl RasterImage {
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Checks that the pixel planes agree with the declared dimensions.
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "image has empty dimensions {}x{}",
                self.width, self.height
            ));
        }
        let expected = self.pixel_count() * 3;
        if self.rgb.len() != expected {
            return Err(format!(
                "rgb plane has {} bytes, expected {} for {}x{}",
                self.rgb.len(),
                expected,
                self.width,
                self.height
            ));
        }
        if let Some(alpha) = &self.alpha
            && alpha.len() != self.pixel_count()
        {
            return Err(format!(
                "alpha plane has {} bytes, expected {}",
                alpha.len(),
                self.pixel_count()
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("rgb_len", &self.rgb.len())
            .field("has_alpha", &self.alpha.is_some())
            .finish()
    }
}
