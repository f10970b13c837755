//! Vertical cursor and page list for flowing content top to bottom.

use crate::algorithms::pagination::check_fit;
use crate::config::PageGeometry;
use crate::elements::PositionedElement;
use crate::output::LaidOutDocument;
use fieldreport_types::RasterImage;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Owns the pages being built and the vertical cursor on the current page.
///
/// There is always at least one page. The cursor is in millimetres from the
/// top of the current page and only the current page receives new elements.
#[derive(Debug)]
pub struct PageManager {
    geometry: PageGeometry,
    pages: Vec<Vec<PositionedElement>>,
    images: BTreeMap<String, Arc<RasterImage>>,
    cursor: f32,
}

impl PageManager {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Vec::new()],
            images: BTreeMap::new(),
            cursor: geometry.top_margin,
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn set_cursor(&mut self, y: f32) {
        self.cursor = y;
    }

    pub fn advance(&mut self, dy: f32) {
        self.cursor += dy;
    }

    /// Zero-based index of the page currently receiving content.
    pub fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Starts a new page if `required` millimetres would run past the bottom
    /// limit. Returns whether a break happened.
    pub fn ensure_space(&mut self, required: f32) -> bool {
        let analysis = check_fit(self.cursor, required, self.geometry.bottom_limit);
        if analysis.should_break {
            log::debug!(
                "Page break: need {:.1}mm, {:.1}mm left on page {}",
                required,
                analysis.remaining_height,
                self.page_count()
            );
            self.new_page();
            true
        } else {
            false
        }
    }

    pub fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor = self.geometry.top_margin;
    }

    pub fn push(&mut self, element: PositionedElement) {
        if let Some(page) = self.pages.last_mut() {
            page.push(element);
        }
    }

    pub fn extend(&mut self, elements: impl IntoIterator<Item = PositionedElement>) {
        if let Some(page) = self.pages.last_mut() {
            page.extend(elements);
        }
    }

    /// Makes `image` available to `ImageElement`s using `key`.
    pub fn register_image(&mut self, key: impl Into<String>, image: Arc<RasterImage>) {
        self.images.entry(key.into()).or_insert(image);
    }

    /// Runs `decorate` once per finished page, e.g. to add a footer.
    /// The callback receives the page index and the total page count.
    pub fn decorate_pages<F>(&mut self, mut decorate: F)
    where
        F: FnMut(usize, usize, &mut Vec<PositionedElement>),
    {
        let total = self.pages.len();
        for (index, page) in self.pages.iter_mut().enumerate() {
            decorate(index, total, page);
        }
    }

    pub fn finish(self) -> LaidOutDocument {
        LaidOutDocument {
            page_size: self.geometry.size,
            pages: self.pages,
            images: self.images,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{RectElement, TextAlign, TextElement};
    use crate::fonts::FontFace;
    use fieldreport_types::{Color, Rect};

    fn text(s: &str) -> PositionedElement {
        PositionedElement::text(
            20.0,
            30.0,
            TextAlign::Left,
            TextElement::new(s, FontFace::Regular, 10.0, Color::BLACK),
        )
    }

    #[test]
    fn starts_with_one_page_at_top_margin() {
        let pm = PageManager::new(PageGeometry::default());
        assert_eq!(pm.page_count(), 1);
        assert_eq!(pm.page_index(), 0);
        assert_eq!(pm.cursor(), 20.0);
    }

    #[test]
    fn ensure_space_breaks_only_when_needed() {
        let mut pm = PageManager::new(PageGeometry::default());
        pm.set_cursor(200.0);
        assert!(!pm.ensure_space(87.0));
        assert_eq!(pm.page_count(), 1);

        assert!(pm.ensure_space(87.5));
        assert_eq!(pm.page_count(), 2);
        assert_eq!(pm.cursor(), 20.0);
    }

    #[test]
    fn push_targets_current_page() {
        let mut pm = PageManager::new(PageGeometry::default());
        pm.push(text("first"));
        pm.new_page();
        pm.push(text("second"));
        pm.extend(vec![text("third")]);

        let doc = pm.finish();
        assert_eq!(doc.page_text(0), vec!["first"]);
        assert_eq!(doc.page_text(1), vec!["second", "third"]);
    }

    #[test]
    fn decorate_sees_every_page() {
        let mut pm = PageManager::new(PageGeometry::default());
        pm.new_page();
        pm.new_page();
        let mut seen = Vec::new();
        pm.decorate_pages(|index, total, page| {
            seen.push((index, total));
            page.push(PositionedElement::rect(
                Rect::new(0.0, 0.0, 1.0, 1.0),
                RectElement::default(),
            ));
        });
        assert_eq!(seen, vec![(0, 3), (1, 3), (2, 3)]);
        let doc = pm.finish();
        assert!(doc.pages.iter().all(|p| p.len() == 1));
    }

    #[test]
    fn first_registered_image_wins() {
        let mut pm = PageManager::new(PageGeometry::default());
        let a = Arc::new(RasterImage {
            width: 1,
            height: 1,
            rgb: vec![1, 2, 3],
            alpha: None,
        });
        let b = Arc::new(RasterImage {
            width: 1,
            height: 1,
            rgb: vec![9, 9, 9],
            alpha: None,
        });
        pm.register_image("logo", a);
        pm.register_image("logo", b);
        let doc = pm.finish();
        assert_eq!(doc.images["logo"].rgb, vec![1, 2, 3]);
    }
}
