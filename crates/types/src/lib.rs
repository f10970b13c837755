pub mod color;
pub mod geometry;
pub mod image;

pub use color::Color;
pub use geometry::{Rect, Size, mm_to_pt, pt_to_mm};
pub use image::RasterImage;
