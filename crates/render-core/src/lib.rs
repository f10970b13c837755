//! Core rendering abstractions for PDF generation.
//!
//! This crate provides the seam between layout and PDF writing:
//! - `DocumentRenderer` trait for turning a laid-out document into bytes
//! - Error types for rendering operations

mod error;
mod traits;

pub use error::RenderError;
pub use traits::DocumentRenderer;
