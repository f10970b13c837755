use fieldreport_layout::LayoutError;
use fieldreport_render_core::RenderError;
use thiserror::Error;

/// Error type for report generation and export.
///
/// A missing logo is never an error here; it is logged and the report is
/// produced without it.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid report snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Report generation is not authorized for this session")]
    Unauthorized,
}
