//! Company logo loading and caching.

use fieldreport_traits::{ResourceError, ResourceProvider};
use fieldreport_types::RasterImage;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use thiserror::Error;

pub const DEFAULT_LOGO_PATH: &str = "logo.png";

#[derive(Error, Debug)]
pub enum LogoError {
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error("could not decode logo: {0}")]
    Decode(#[from] image::ImageError),
    #[error("no logo source configured")]
    NoSource,
}

/// Decodes PNG, JPEG or GIF bytes into an RGB plane plus an alpha plane.
/// The alpha plane is dropped when every pixel is opaque.
pub fn decode_logo(bytes: &[u8]) -> Result<RasterImage, LogoError> {
    let decoded = image::load_from_memory(bytes)?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    let mut alpha = Vec::with_capacity(width as usize * height as usize);
    let mut has_alpha = false;
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        if a != 255 {
            has_alpha = true;
        }
        rgb.extend_from_slice(&[r, g, b]);
        alpha.push(a);
    }

    Ok(RasterImage {
        width,
        height,
        rgb,
        alpha: has_alpha.then_some(alpha),
    })
}

/// Loads the logo once and hands out the same decoded image afterwards.
///
/// Only a successful load is remembered. A failed load is logged and the
/// next call tries again, so a logo that shows up later is still picked up.
/// Safe to share between threads.
#[derive(Debug)]
pub struct LogoCache {
    provider: Option<Arc<dyn ResourceProvider>>,
    path: String,
    cached: OnceCell<Arc<RasterImage>>,
}

impl LogoCache {
    pub fn new(provider: Arc<dyn ResourceProvider>) -> Self {
        Self::with_path(provider, DEFAULT_LOGO_PATH)
    }

    pub fn with_path(provider: Arc<dyn ResourceProvider>, path: impl Into<String>) -> Self {
        Self {
            provider: Some(provider),
            path: path.into(),
            cached: OnceCell::new(),
        }
    }

    /// A cache that already holds `image` and never touches a provider.
    pub fn preloaded(image: RasterImage) -> Self {
        Self {
            provider: None,
            path: DEFAULT_LOGO_PATH.to_string(),
            cached: OnceCell::with_value(Arc::new(image)),
        }
    }

    /// A cache with no logo source. Reports are produced without a logo.
    pub fn empty() -> Self {
        Self {
            provider: None,
            path: DEFAULT_LOGO_PATH.to_string(),
            cached: OnceCell::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.get().is_some()
    }

    pub fn get_logo(&self) -> Option<Arc<RasterImage>> {
        match self.cached.get_or_try_init(|| self.load()) {
            Ok(image) => Some(Arc::clone(image)),
            Err(LogoError::NoSource) => None,
            Err(e) => {
                log::warn!("Logo '{}' unavailable, continuing without it: {}", self.path, e);
                None
            }
        }
    }

    fn load(&self) -> Result<Arc<RasterImage>, LogoError> {
        let provider = self.provider.as_ref().ok_or(LogoError::NoSource)?;
        let bytes = provider.load(&self.path)?;
        let image = decode_logo(&bytes)?;
        log::debug!(
            "Loaded logo '{}' from {} ({}x{})",
            self.path,
            provider.name(),
            image.width,
            image.height
        );
        Ok(Arc::new(image))
    }
}
