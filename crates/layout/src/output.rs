use crate::elements::PositionedElement;
use fieldreport_types::{RasterImage, Size};
use std::collections::BTreeMap;
use std::sync::Arc;

/// The finished display list handed to a renderer.
#[derive(Debug, Clone)]
pub struct LaidOutDocument {
    pub page_size: Size,
    pub pages: Vec<Vec<PositionedElement>>,
    /// Images referenced by `ImageElement::key`.
    pub images: BTreeMap<String, Arc<RasterImage>>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All elements on all pages carrying the given tag, with their page index.
    pub fn tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = (usize, &'a PositionedElement)> + 'a {
        self.pages.iter().enumerate().flat_map(move |(index, page)| {
            page.iter()
                .filter(move |el| el.tag == Some(tag))
                .map(move |el| (index, el))
        })
    }

    /// Every text run on a page, in drawing order.
    pub fn page_text(&self, index: usize) -> Vec<&str> {
        self.pages
            .get(index)
            .map(|page| page.iter().filter_map(PositionedElement::as_text).collect())
            .unwrap_or_default()
    }
}
