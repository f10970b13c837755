//! Colours, fixed text and table styling for the service report.

use fieldreport_layout::{Color, Stroke, TableStyle, TextAlign};

/// Navy used for title bars, headings and rules.
pub const PRIMARY: Color = Color::rgb(30, 58, 95);
pub const HEADER_BG: Color = Color::rgb(237, 242, 247);
pub const HEADER_TEXT: Color = Color::rgb(26, 32, 44);
pub const ALT_ROW: Color = Color::rgb(247, 250, 252);
pub const TEXT_MUTED: Color = Color::rgb(100, 100, 100);

pub const COMPANY_ADDRESS_LINE1: &str = "2350 Terry Lane";
pub const COMPANY_ADDRESS_LINE2: &str = "Jasper, IN 47546";
pub const COMPANY_PHONE: &str = "(812) 634-2501";
pub const REPORT_TITLE: &str = "Field Analysis / Service Report";
pub const FOOTER_TEXT: &str = "Jasper Equipment & Supply | www.jasperequipment.com";

/// Left and right page margin for bars, tables and rules.
pub const MARGIN: f32 = 20.0;
/// Indent for text inside or below a title bar.
pub const TEXT_INDENT: f32 = 25.0;

pub const TITLE_BAR_HEIGHT: f32 = 8.0;

/// Image key under which the logo is registered with the document.
pub const LOGO_KEY: &str = "logo";

pub fn table_style(body_align: TextAlign) -> TableStyle {
    TableStyle {
        head_fill: HEADER_BG,
        head_text: HEADER_TEXT,
        head_font_size: 10.0,
        body_text: HEADER_TEXT,
        body_font_size: 9.0,
        body_align,
        alternate_fill: Some(ALT_ROW),
        grid: Stroke {
            color: Color::gray(200),
            width: 0.1,
        },
        padding: 1.76,
    }
}
