use crate::error::RenderError;
use fieldreport_layout::LaidOutDocument;

/// Turns a finished display list into a complete PDF file.
///
/// Implementations must be deterministic: the same document always yields
/// the same bytes.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, document: &LaidOutDocument) -> Result<Vec<u8>, RenderError>;
}
