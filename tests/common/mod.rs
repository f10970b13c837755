#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use fieldreport::{ReportEngine, ReportError, ReportSnapshot};
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text runs drawn on a page (1-based), in drawing order
    pub fn page_strings(&self, page_number: u32) -> Vec<String> {
        pdf_assertions::page_strings(&self.doc, page_number)
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// An engine with no logo source
pub fn engine() -> ReportEngine {
    ReportEngine::builder().build()
}

/// Render a snapshot with the given engine and parse the result
pub fn generate_with(
    engine: &ReportEngine,
    snapshot: &ReportSnapshot,
) -> Result<GeneratedPdf, ReportError> {
    let bytes = engine.generate_pdf(snapshot)?;
    GeneratedPdf::from_bytes(bytes).map_err(|e| ReportError::Export(e.to_string()))
}

/// Render a snapshot with a default engine and parse the result
pub fn generate(snapshot: &ReportSnapshot) -> Result<GeneratedPdf, ReportError> {
    generate_with(&engine(), snapshot)
}
