//! Layout primitives for the field report engine.
//!
//! Everything here works in millimetres with the origin at the top-left of
//! the page. Layout produces a [`LaidOutDocument`]: pages of
//! [`PositionedElement`]s that a renderer turns into PDF operators.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid table: {0}")]
    InvalidTable(String),
}

pub mod algorithms;
pub mod config;
pub mod fonts;
pub mod output;
pub mod page;
pub mod table;
pub mod wrap;

mod elements;

pub use self::config::PageGeometry;
pub use self::elements::{
    ImageElement, LayoutElement, LineElement, PositionedElement, RectElement, Stroke, TextAlign,
    TextElement,
};
pub use self::fonts::FontFace;
pub use self::output::LaidOutDocument;
pub use self::page::PageManager;
pub use self::table::{ColumnSpec, TableSpec, TableStyle, layout_table};

pub use fieldreport_types::{Color, RasterImage, Rect, Size};
