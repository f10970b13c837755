//! PDF renderer using lopdf.
//!
//! Builds the whole document in memory: one content stream per page, the
//! three base-14 Helvetica faces, and Flate-compressed image XObjects.

mod helpers;
mod renderer;

pub use helpers::{PageContext, to_win_ansi};
pub use renderer::LopdfRenderer;
