//! Assembles the whole report into a laid-out document.

use super::header::{render_cover_page, render_report_header};
use super::sections::{
    render_boiler, render_closed_loops, render_general_notes, render_support_systems,
};
use super::settings::LayoutSettings;
use super::theme::{FOOTER_TEXT, TEXT_MUTED};
use crate::model::ReportSnapshot;
use fieldreport_layout::{
    FontFace, LaidOutDocument, LayoutError, PageManager, PositionedElement, RasterImage, TextAlign,
    TextElement,
};
use std::sync::Arc;

pub const FOOTER_TAG: &str = "footer";

/// Starts a new page when the cursor has passed `threshold`.
fn break_if_past(pages: &mut PageManager, settings: &LayoutSettings, threshold: f32) {
    pages.ensure_space(settings.reserve_below(threshold));
}

/// Lays out the cover page, header, sections, notes and footers.
///
/// The snapshot is only read. A missing logo simply leaves its space empty.
pub fn compose(
    snapshot: &ReportSnapshot,
    settings: &LayoutSettings,
    logo: Option<Arc<RasterImage>>,
) -> Result<LaidOutDocument, LayoutError> {
    let mut pages = PageManager::new(settings.geometry);
    let logo = logo.as_ref();

    if snapshot.include_cover_page {
        render_cover_page(&mut pages, snapshot, logo);
    }
    render_report_header(&mut pages, snapshot, logo);

    for boiler in &snapshot.boilers {
        break_if_past(&mut pages, settings, settings.boiler_break_after);
        render_boiler(&mut pages, boiler)?;
    }

    break_if_past(&mut pages, settings, settings.support_systems_break_after);
    render_support_systems(&mut pages, &snapshot.support_systems)?;

    break_if_past(&mut pages, settings, settings.closed_loops_break_after);
    render_closed_loops(&mut pages, &snapshot.closed_loops)?;

    if !snapshot.general_notes.trim().is_empty() {
        break_if_past(&mut pages, settings, settings.general_notes_break_after);
        render_general_notes(&mut pages, &snapshot.general_notes);
    }

    let geometry = settings.geometry;
    let has_cover = snapshot.include_cover_page;
    pages.decorate_pages(|index, _total, page| {
        let offset = if has_cover && index == 0 { 15.0 } else { 10.0 };
        page.push(
            PositionedElement::text(
                geometry.center_x(),
                geometry.height() - offset,
                TextAlign::Center,
                TextElement::new(FOOTER_TEXT, FontFace::Italic, 8.0, TEXT_MUTED),
            )
            .with_tag(FOOTER_TAG),
        );
    });

    log::debug!(
        "Composed report for '{}' with {} page(s)",
        snapshot.site_name,
        pages.page_count()
    );
    Ok(pages.finish())
}
