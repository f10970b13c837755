//! Cover page and the header block at the top of the first report page.

use super::theme::{
    COMPANY_ADDRESS_LINE1, COMPANY_ADDRESS_LINE2, COMPANY_PHONE, HEADER_BG, HEADER_TEXT, LOGO_KEY,
    MARGIN, PRIMARY, REPORT_TITLE, TEXT_MUTED,
};
use crate::format::{format_date_us, or_placeholder};
use crate::model::ReportSnapshot;
use fieldreport_layout::{
    Color, FontFace, PageManager, PositionedElement, RasterImage, Rect, RectElement, Stroke,
    TextAlign, TextElement,
};
use std::sync::Arc;

pub const SITE_INFO_TAG: &str = "site-info";

#[allow(clippy::too_many_arguments)]
fn text(
    pages: &mut PageManager,
    x: f32,
    y: f32,
    align: TextAlign,
    content: &str,
    font: FontFace,
    size: f32,
    color: Color,
) {
    pages.push(PositionedElement::text(
        x,
        y,
        align,
        TextElement::new(content, font, size, color),
    ));
}

fn place_logo(pages: &mut PageManager, logo: &Arc<RasterImage>, rect: Rect) {
    pages.register_image(LOGO_KEY, Arc::clone(logo));
    pages.push(PositionedElement::image(rect, LOGO_KEY));
}

/// Full-page cover. Leaves the manager on a fresh page.
pub fn render_cover_page(
    pages: &mut PageManager,
    snapshot: &ReportSnapshot,
    logo: Option<&Arc<RasterImage>>,
) {
    let center = pages.geometry().center_x();
    let page_width = pages.geometry().width();
    let mut y = 50.0;

    if let Some(logo) = logo {
        place_logo(pages, logo, Rect::new(center - 30.0, y, 60.0, 22.0));
        y += 35.0;
    }

    for (offset, line) in [COMPANY_ADDRESS_LINE1, COMPANY_ADDRESS_LINE2, COMPANY_PHONE]
        .iter()
        .enumerate()
    {
        text(
            pages,
            center,
            y + offset as f32 * 5.0,
            TextAlign::Center,
            line,
            FontFace::Regular,
            10.0,
            TEXT_MUTED,
        );
    }

    y += 30.0;
    text(pages, center, y, TextAlign::Center, REPORT_TITLE, FontFace::Bold, 24.0, PRIMARY);

    y += 8.0;
    pages.push(PositionedElement::line(
        50.0,
        y,
        page_width - 50.0,
        y,
        Stroke {
            color: PRIMARY,
            width: 1.0,
        },
    ));

    y += 15.0;
    pages.push(
        PositionedElement::rect(
            Rect::new(50.0, y, page_width - 100.0, 42.0),
            RectElement {
                fill: Some(HEADER_BG),
                stroke: Some(Stroke {
                    color: PRIMARY,
                    width: 0.5,
                }),
                corner_radius: 3.0,
            },
        )
        .with_tag(SITE_INFO_TAG),
    );

    y += 10.0;
    let site = if snapshot.site_name.trim().is_empty() {
        "Site Name"
    } else {
        snapshot.site_name.as_str()
    };
    text(pages, center, y, TextAlign::Center, site, FontFace::Bold, 13.0, PRIMARY);

    y += 7.0;
    if !snapshot.address.trim().is_empty() {
        text(pages, center, y, TextAlign::Center, &snapshot.address, FontFace::Regular, 10.0, HEADER_TEXT);
        y += 5.0;
    }
    if !snapshot.contact_name.trim().is_empty() {
        let contact = format!("Contact: {}", snapshot.contact_name);
        text(pages, center, y, TextAlign::Center, &contact, FontFace::Regular, 9.0, HEADER_TEXT);
        y += 5.0;
    }
    if !snapshot.contact_phone.trim().is_empty() {
        let phone = format!("Phone: {}", snapshot.contact_phone);
        text(pages, center, y, TextAlign::Center, &phone, FontFace::Regular, 9.0, HEADER_TEXT);
    }

    let date = format_date_us(&snapshot.date);
    let rows = [
        ("Service Date:", or_placeholder(&date)),
        ("Service Frequency:", snapshot.service_frequency.label()),
        ("Technician:", or_placeholder(&snapshot.technician)),
    ];
    let mut y = 220.0;
    for (label, value) in rows {
        text(pages, center - 5.0, y, TextAlign::Right, label, FontFace::Bold, 12.0, HEADER_TEXT);
        text(pages, center, y, TextAlign::Left, value, FontFace::Regular, 12.0, HEADER_TEXT);
        y += 8.0;
    }

    pages.new_page();
}

/// Logo, company block, title, rule and the Date / Site / Address list.
/// Leaves the cursor where the first section starts.
pub fn render_report_header(
    pages: &mut PageManager,
    snapshot: &ReportSnapshot,
    logo: Option<&Arc<RasterImage>>,
) {
    let page_width = pages.geometry().width();
    let right = page_width - MARGIN;
    let mut y = 15.0;

    if let Some(logo) = logo {
        place_logo(pages, logo, Rect::new(MARGIN, y, 40.0, 15.0));
    }
    for (line, dy) in [(COMPANY_ADDRESS_LINE1, 2.0), (COMPANY_ADDRESS_LINE2, 6.0), (COMPANY_PHONE, 10.0)] {
        text(pages, right, y + dy, TextAlign::Right, line, FontFace::Regular, 9.0, TEXT_MUTED);
    }

    y = 32.0;
    let center = pages.geometry().center_x();
    text(pages, center, y, TextAlign::Center, REPORT_TITLE, FontFace::Bold, 16.0, PRIMARY);

    y += 5.0;
    pages.push(PositionedElement::line(
        MARGIN,
        y,
        right,
        y,
        Stroke {
            color: PRIMARY,
            width: 0.8,
        },
    ));

    y += 8.0;
    let date = format_date_us(&snapshot.date);
    let rows = [
        ("Date:", or_placeholder(&date)),
        ("Site:", or_placeholder(&snapshot.site_name)),
        ("Address:", or_placeholder(&snapshot.address)),
    ];
    for (index, (label, value)) in rows.into_iter().enumerate() {
        if index > 0 {
            y += 5.0;
        }
        text(pages, MARGIN, y, TextAlign::Left, label, FontFace::Bold, 10.0, HEADER_TEXT);
        text(pages, 45.0, y, TextAlign::Left, value, FontFace::Regular, 10.0, HEADER_TEXT);
    }

    pages.set_cursor(y + 8.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldreport_layout::PageGeometry;

    fn logo() -> Arc<RasterImage> {
        Arc::new(RasterImage {
            width: 1,
            height: 1,
            rgb: vec![30, 58, 95],
            alpha: None,
        })
    }

    #[test]
    fn header_leaves_cursor_below_info_block() {
        let mut pages = PageManager::new(PageGeometry::default());
        let snapshot = ReportSnapshot {
            date: "2024-03-05".into(),
            site_name: "North Plant".into(),
            ..Default::default()
        };
        render_report_header(&mut pages, &snapshot, None);
        assert_eq!(pages.cursor(), 63.0);

        let doc = pages.finish();
        let text = doc.page_text(0);
        assert!(text.contains(&"03-05-2024"));
        assert!(text.contains(&"North Plant"));
        // blank address
        assert!(text.contains(&"—"));
        assert!(doc.images.is_empty());
    }

    #[test]
    fn company_block_is_right_aligned() {
        let mut pages = PageManager::new(PageGeometry::default());
        render_report_header(&mut pages, &ReportSnapshot::default(), Some(&logo()));
        let doc = pages.finish();
        let phone = doc.pages[0]
            .iter()
            .find(|e| e.as_text() == Some(COMPANY_PHONE))
            .unwrap();
        assert!((phone.x + phone.width - 190.0).abs() < 1e-3);
        assert!(doc.images.contains_key(LOGO_KEY));
    }

    #[test]
    fn cover_page_shows_site_box_and_breaks() {
        let mut pages = PageManager::new(PageGeometry::default());
        let snapshot = ReportSnapshot {
            site_name: String::new(),
            contact_name: "Dana Smith".into(),
            technician: String::new(),
            ..Default::default()
        };
        render_cover_page(&mut pages, &snapshot, Some(&logo()));
        assert_eq!(pages.page_count(), 2);

        let doc = pages.finish();
        assert_eq!(doc.tagged(SITE_INFO_TAG).count(), 1);
        let text = doc.page_text(0);
        assert!(text.contains(&"Site Name"));
        assert!(text.contains(&"Contact: Dana Smith"));
        assert!(!text.iter().any(|t| t.starts_with("Phone:")));
        assert!(text.contains(&"Weekly"));
        assert!(doc.pages[1].is_empty());
    }
}
