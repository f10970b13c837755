//! Titled sections: a navy title bar, a grid table and optional notes.
//!
//! Every function draws at the page cursor and leaves the cursor at the
//! position it returns.

use super::theme::{self, HEADER_TEXT, MARGIN, PRIMARY, TEXT_INDENT, TITLE_BAR_HEIGHT};
use crate::format::or_placeholder;
use crate::limits;
use crate::model::{Boiler, ClosedLoop, InstrumentRecord, SupportSystem};
use fieldreport_layout::fonts::line_height;
use fieldreport_layout::wrap::wrap_text;
use fieldreport_layout::{
    Color, ColumnSpec, FontFace, LayoutError, PageManager, PositionedElement, Rect, RectElement,
    TableSpec, TextAlign, TextElement, layout_table,
};

pub const BOILER_TITLE_TAG: &str = "boiler-title";
pub const SYSTEMS_TITLE_TAG: &str = "support-systems-title";
pub const LOOPS_TITLE_TAG: &str = "closed-loops-title";
pub const NOTES_TITLE_TAG: &str = "general-notes-title";

const NOTES_FONT_SIZE: f32 = 9.0;

fn content_width(pages: &PageManager) -> f32 {
    pages.geometry().width() - 2.0 * MARGIN
}

/// Draws the section title bar at the cursor and moves the cursor below it.
pub fn render_title_bar(pages: &mut PageManager, title: &str, tag: &'static str) {
    let y = pages.cursor();
    let width = content_width(pages);
    pages.push(
        PositionedElement::rect(
            Rect::new(MARGIN, y, width, TITLE_BAR_HEIGHT),
            RectElement {
                fill: Some(PRIMARY),
                ..Default::default()
            },
        )
        .with_tag(tag),
    );
    pages.push(PositionedElement::text(
        TEXT_INDENT,
        y + 6.0,
        TextAlign::Left,
        TextElement::new(title, FontFace::Bold, 10.0, Color::WHITE),
    ));
    pages.advance(TITLE_BAR_HEIGHT + 2.0);
}

/// Draws already-wrapped lines from `first_baseline` down, starting a new
/// page whenever a line would cross the table bottom. Returns the baseline
/// of the last line drawn.
pub fn flow_lines(
    pages: &mut PageManager,
    lines: &[String],
    x: f32,
    first_baseline: f32,
    font: FontFace,
    size: f32,
    color: Color,
) -> f32 {
    let step = line_height(size);
    let bottom = pages.geometry().table_bottom;
    let mut baseline = first_baseline;
    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            baseline += step;
        }
        if baseline > bottom {
            pages.new_page();
            baseline = pages.cursor() + step;
        }
        pages.push(PositionedElement::text(
            x,
            baseline,
            TextAlign::Left,
            TextElement::new(line.as_str(), font, size, color),
        ));
    }
    baseline
}

pub fn render_boiler(pages: &mut PageManager, boiler: &Boiler) -> Result<f32, LayoutError> {
    render_title_bar(pages, &boiler.name, BOILER_TITLE_TAG);

    let readings = boiler.readings();
    let headers = ["pH", "SO3", "P-Alk", "M-Alk", "OH-Alk", "Cond", "Fluor"];
    let values: Vec<String> = readings
        .iter()
        .map(|(_, value)| or_placeholder(value).to_string())
        .collect();
    let reference: Vec<String> = readings.iter().map(|(field, _)| limits::display(field)).collect();

    let table = TableSpec {
        x: MARGIN,
        width: content_width(pages),
        columns: headers.iter().map(|h| ColumnSpec::auto(*h)).collect(),
        body: vec![values, reference],
        style: theme::table_style(TextAlign::Center),
    };
    let mut y = layout_table(pages, &table)? + 3.0;

    if !boiler.notes.trim().is_empty() {
        let width = pages.geometry().width() - 2.0 * TEXT_INDENT;
        let lines = wrap_text(&boiler.notes, FontFace::Italic, NOTES_FONT_SIZE, width);
        y = flow_lines(
            pages,
            &lines,
            TEXT_INDENT,
            y,
            FontFace::Italic,
            NOTES_FONT_SIZE,
            HEADER_TEXT,
        ) + 8.0;
    }

    let next = y + 5.0;
    pages.set_cursor(next);
    Ok(next)
}

/// Name, readings in record order, then notes. Blank cells get the placeholder.
fn record_row<R: InstrumentRecord>(record: &R) -> Vec<String> {
    std::iter::once(record.name())
        .chain(record.readings().into_iter().map(|(_, value)| value))
        .chain(std::iter::once(record.notes()))
        .map(|cell| or_placeholder(cell).to_string())
        .collect()
}

pub fn render_support_systems(
    pages: &mut PageManager,
    systems: &[SupportSystem],
) -> Result<f32, LayoutError> {
    render_title_bar(pages, "Support Systems", SYSTEMS_TITLE_TAG);

    let body = systems.iter().map(record_row).collect();

    let table = TableSpec {
        x: MARGIN,
        width: content_width(pages),
        columns: vec![
            ColumnSpec::fixed("System", 35.0).with_font(FontFace::Bold),
            ColumnSpec::auto("Cond"),
            ColumnSpec::auto("pH"),
            ColumnSpec::auto("TrH"),
            ColumnSpec::fixed("Notes", 50.0),
        ],
        body,
        style: theme::table_style(TextAlign::Left),
    };
    let next = layout_table(pages, &table)? + 8.0;
    pages.set_cursor(next);
    Ok(next)
}

pub fn render_closed_loops(pages: &mut PageManager, loops: &[ClosedLoop]) -> Result<f32, LayoutError> {
    render_title_bar(pages, "Closed Loops", LOOPS_TITLE_TAG);

    let body = loops.iter().map(record_row).collect();

    let table = TableSpec {
        x: MARGIN,
        width: content_width(pages),
        columns: vec![
            ColumnSpec::fixed("Loop", 25.0).with_font(FontFace::Bold),
            ColumnSpec::auto("pH"),
            ColumnSpec::auto("Cond"),
            ColumnSpec::auto("NO2 Hot"),
            ColumnSpec::auto("NO2 Cold"),
            ColumnSpec::fixed("Notes", 45.0),
        ],
        body,
        style: theme::table_style(TextAlign::Left),
    };
    let next = layout_table(pages, &table)? + 8.0;
    pages.set_cursor(next);
    Ok(next)
}

/// Title bar plus word-wrapped notes. Lines flow onto new pages as needed.
pub fn render_general_notes(pages: &mut PageManager, notes: &str) -> f32 {
    render_title_bar(pages, "General Notes", NOTES_TITLE_TAG);
    let width = pages.geometry().width() - 50.0;
    let lines = wrap_text(notes, FontFace::Regular, NOTES_FONT_SIZE, width);
    let first_baseline = pages.cursor() + 5.0;
    let last = flow_lines(
        pages,
        &lines,
        TEXT_INDENT,
        first_baseline,
        FontFace::Regular,
        NOTES_FONT_SIZE,
        HEADER_TEXT,
    );
    pages.set_cursor(last + line_height(NOTES_FONT_SIZE));
    pages.cursor()
}
