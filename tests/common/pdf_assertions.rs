use lopdf::Document as LopdfDocument;
use lopdf::content::Content;
use lopdf::{Dictionary, Object};
use std::collections::BTreeSet;

/// Maps WinAnsiEncoding bytes back to text for the characters the report uses
fn decode_win_ansi(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x91 => '‘',
            0x92 => '’',
            0x93 => '“',
            0x94 => '”',
            0x95 => '•',
            0x96 => '–',
            0x97 => '—',
            _ => b as char,
        })
        .collect()
}

/// Every `Tj` string on a page (1-based), in drawing order
pub fn page_strings(doc: &LopdfDocument, page_number: u32) -> Vec<String> {
    let pages = doc.get_pages();
    let Some(page_id) = pages.get(&page_number) else {
        return Vec::new();
    };
    let Ok(raw) = doc.get_page_content(*page_id) else {
        return Vec::new();
    };
    let Ok(content) = Content::decode(&raw) else {
        return Vec::new();
    };
    content
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| op.operands.first())
        .filter_map(|operand| operand.as_str().ok())
        .map(decode_win_ansi)
        .collect()
}

/// All text of the document, one run per line
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    for page_number in 1..=doc.get_pages().len() as u32 {
        for run in page_strings(doc, page_number) {
            text.push_str(&run);
            text.push('\n');
        }
    }
    text
}

fn collect_dicts<'a>(object: &'a Object, out: &mut Vec<&'a Dictionary>) {
    match object {
        Object::Dictionary(dict) => {
            out.push(dict);
            for (_, value) in dict.iter() {
                collect_dicts(value, out);
            }
        }
        Object::Array(items) => items.iter().for_each(|item| collect_dicts(item, out)),
        _ => {}
    }
}

/// Base font names of every font dictionary in the file
pub fn extract_font_names(doc: &LopdfDocument) -> BTreeSet<String> {
    let mut dicts = Vec::new();
    for object in doc.objects.values() {
        collect_dicts(object, &mut dicts);
    }
    dicts
        .into_iter()
        .filter(|dict| dict.get(b"Type").and_then(|t| t.as_name()).ok() == Some(b"Font".as_slice()))
        .filter_map(|dict| dict.get(b"BaseFont").and_then(|f| f.as_name()).ok())
        .map(|name| String::from_utf8_lossy(name).to_string())
        .collect()
}

/// Number of image XObjects, and how many of them carry a soft mask
pub fn image_counts(doc: &LopdfDocument) -> (usize, usize) {
    let images: Vec<_> = doc
        .objects
        .values()
        .filter_map(|object| object.as_stream().ok())
        .filter(|stream| {
            stream.dict.get(b"Subtype").and_then(|s| s.as_name()).ok() == Some(b"Image".as_slice())
        })
        .collect();
    let masked = images.iter().filter(|s| s.dict.has(b"SMask")).count();
    (images.len(), masked)
}

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert that PDF does NOT contain specific text
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            !extracted.contains($text),
            "PDF should NOT contain '{}', but it was found in:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert minimum number of pages
#[macro_export]
macro_rules! assert_pdf_min_pages {
    ($pdf:expr, $min:expr) => {
        assert!(
            $pdf.page_count() >= $min,
            "Expected at least {} pages, got {}",
            $min,
            $pdf.page_count()
        );
    };
}

/// Assert that PDF references a font whose base name contains a pattern
#[macro_export]
macro_rules! assert_pdf_has_font {
    ($pdf:expr, $pattern:expr) => {
        let fonts = $crate::common::pdf_assertions::extract_font_names(&$pdf.doc);
        assert!(
            fonts.iter().any(|f| f.contains($pattern)),
            "PDF should reference a font matching '{}', found: {:?}",
            $pattern,
            fonts
        );
    };
}
