//! Grid tables that flow across pages.
//!
//! Column widths are resolved once: fixed columns keep their width and the
//! remaining table width is shared evenly by the auto columns. A row that
//! does not fit above `table_bottom` moves to a new page and the header row
//! is repeated there. A row taller than a whole page is split between its
//! wrapped lines instead.

use crate::LayoutError;
use crate::algorithms::pagination::check_fit;
use crate::elements::{PositionedElement, RectElement, Stroke, TextAlign, TextElement};
use crate::fonts::{self, FontFace};
use crate::page::PageManager;
use crate::wrap::wrap_text;
use fieldreport_types::{Color, Rect};

const WIDTH_EPSILON: f32 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub header: String,
    /// Fixed width in millimetres, or `None` to share the leftover width.
    pub width: Option<f32>,
    /// Body font for this column. Defaults to regular.
    pub font: Option<FontFace>,
}

impl ColumnSpec {
    pub fn auto(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            width: None,
            font: None,
        }
    }

    pub fn fixed(header: impl Into<String>, width: f32) -> Self {
        Self {
            width: Some(width),
            ..Self::auto(header)
        }
    }

    pub fn with_font(mut self, font: FontFace) -> Self {
        self.font = Some(font);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyle {
    pub head_fill: Color,
    pub head_text: Color,
    pub head_font_size: f32,
    pub body_text: Color,
    pub body_font_size: f32,
    pub body_align: TextAlign,
    /// Fill for every other body row, starting with the first.
    pub alternate_fill: Option<Color>,
    pub grid: Stroke,
    pub padding: f32,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            head_fill: Color::gray(230),
            head_text: Color::BLACK,
            head_font_size: 10.0,
            body_text: Color::BLACK,
            body_font_size: 10.0,
            body_align: TextAlign::Left,
            alternate_fill: None,
            grid: Stroke {
                color: Color::gray(200),
                width: 0.1,
            },
            padding: 1.76,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    /// Left edge in millimetres.
    pub x: f32,
    pub width: f32,
    pub columns: Vec<ColumnSpec>,
    pub body: Vec<Vec<String>>,
    pub style: TableStyle,
}

struct PreparedRow {
    cells: Vec<Vec<String>>,
    height: f32,
}

impl PreparedRow {
    fn new(cells: Vec<Vec<String>>, size: f32, padding: f32) -> Self {
        let max_lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        Self {
            height: max_lines as f32 * fonts::line_height(size) + 2.0 * padding,
            cells,
        }
    }

    fn line_count(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Splits off the first `lines` lines of every cell into a row of its own.
    /// `self` keeps the rest.
    fn take_lines(&mut self, lines: usize, size: f32, padding: f32) -> PreparedRow {
        let head = self
            .cells
            .iter_mut()
            .map(|cell| {
                let rest = cell.split_off(lines.min(cell.len()));
                std::mem::replace(cell, rest)
            })
            .collect();
        *self = PreparedRow::new(std::mem::take(&mut self.cells), size, padding);
        PreparedRow::new(head, size, padding)
    }
}

fn resolve_widths(spec: &TableSpec) -> Result<Vec<f32>, LayoutError> {
    let fixed: f32 = spec.columns.iter().filter_map(|c| c.width).sum();
    let auto_count = spec.columns.iter().filter(|c| c.width.is_none()).count();

    if fixed > spec.width + WIDTH_EPSILON {
        return Err(LayoutError::InvalidTable(format!(
            "fixed column widths ({:.1}mm) exceed table width ({:.1}mm)",
            fixed, spec.width
        )));
    }
    let share = if auto_count > 0 {
        let leftover = spec.width - fixed;
        if leftover <= WIDTH_EPSILON {
            return Err(LayoutError::InvalidTable(
                "no width left for auto-sized columns".to_string(),
            ));
        }
        leftover / auto_count as f32
    } else {
        0.0
    };

    Ok(spec.columns.iter().map(|c| c.width.unwrap_or(share)).collect())
}

fn prepare_row<'a>(
    texts: impl Iterator<Item = &'a str>,
    fonts: &[FontFace],
    widths: &[f32],
    size: f32,
    padding: f32,
) -> PreparedRow {
    let cells: Vec<Vec<String>> = texts
        .zip(fonts)
        .zip(widths)
        .map(|((text, font), width)| wrap_text(text, *font, size, (width - 2.0 * padding).max(1.0)))
        .collect();
    PreparedRow::new(cells, size, padding)
}

/// How many body lines fit between `top` and `limit_y`.
fn lines_that_fit(top: f32, limit_y: f32, size: f32, padding: f32) -> usize {
    let room = limit_y - top - 2.0 * padding + WIDTH_EPSILON;
    if room <= 0.0 {
        0
    } else {
        (room / fonts::line_height(size)).floor() as usize
    }
}

struct RowStyle {
    fill: Option<Color>,
    text: Color,
    size: f32,
    align: TextAlign,
}

fn draw_row(
    pages: &mut PageManager,
    spec: &TableSpec,
    widths: &[f32],
    fonts: &[FontFace],
    row: &PreparedRow,
    top: f32,
    style: &RowStyle,
) {
    let pad = spec.style.padding;
    let line_height = fonts::line_height(style.size);
    let mut x = spec.x;

    for ((lines, width), font) in row.cells.iter().zip(widths).zip(fonts) {
        pages.push(PositionedElement::rect(
            Rect::new(x, top, *width, row.height),
            RectElement {
                fill: style.fill,
                stroke: Some(spec.style.grid),
                corner_radius: 0.0,
            },
        ));

        let anchor = match style.align {
            TextAlign::Left => x + pad,
            TextAlign::Center => x + width / 2.0,
            TextAlign::Right => x + width - pad,
        };
        let first_baseline = top + pad + fonts::ascent(style.size);
        for (i, line) in lines.iter().enumerate().filter(|(_, l)| !l.is_empty()) {
            pages.push(PositionedElement::text(
                anchor,
                first_baseline + i as f32 * line_height,
                style.align,
                TextElement::new(line.as_str(), *font, style.size, style.text),
            ));
        }
        x += width;
    }
}

/// Lays out a grid table starting at the page cursor.
///
/// Returns the bottom edge of the last row, which is also where the cursor
/// is left. If the header and the first body row do not fit on the current
/// page the whole table starts on a new one. Nothing is drawn below
/// `table_bottom` unless a single wrapped line is taller than a page.
pub fn layout_table(pages: &mut PageManager, spec: &TableSpec) -> Result<f32, LayoutError> {
    if spec.columns.is_empty() {
        return Err(LayoutError::InvalidTable("table has no columns".to_string()));
    }
    if let Some((index, row)) = spec
        .body
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != spec.columns.len())
    {
        return Err(LayoutError::InvalidTable(format!(
            "row {} has {} cells, expected {}",
            index,
            row.len(),
            spec.columns.len()
        )));
    }

    let widths = resolve_widths(spec)?;
    let style = &spec.style;
    let head_fonts = vec![FontFace::Bold; spec.columns.len()];
    let body_fonts: Vec<FontFace> = spec
        .columns
        .iter()
        .map(|c| c.font.unwrap_or(FontFace::Regular))
        .collect();

    let head = prepare_row(
        spec.columns.iter().map(|c| c.header.as_str()),
        &head_fonts,
        &widths,
        style.head_font_size,
        style.padding,
    );
    let body: Vec<PreparedRow> = spec
        .body
        .iter()
        .map(|row| {
            prepare_row(
                row.iter().map(String::as_str),
                &body_fonts,
                &widths,
                style.body_font_size,
                style.padding,
            )
        })
        .collect();

    let head_style = RowStyle {
        fill: Some(style.head_fill),
        text: style.head_text,
        size: style.head_font_size,
        align: TextAlign::Left,
    };

    let geometry = *pages.geometry();
    let at_page_top = |y: f32| y <= geometry.top_margin + WIDTH_EPSILON;
    // Tallest row a continuation page can hold below the repeated header.
    let page_capacity = geometry.table_bottom - geometry.top_margin - head.height;
    let body_size = style.body_font_size;
    let one_line_row = fonts::line_height(body_size) + 2.0 * style.padding;

    let mut y = pages.cursor();
    let first_height = head.height
        + body.first().map_or(0.0, |r| {
            if r.height > page_capacity + WIDTH_EPSILON {
                one_line_row
            } else {
                r.height
            }
        });
    if check_fit(y, first_height, geometry.table_bottom).should_break && !at_page_top(y) {
        log::debug!("Table moved to a new page, needs {:.1}mm", first_height);
        pages.new_page();
        y = pages.cursor();
    }

    draw_row(pages, spec, &widths, &head_fonts, &head, y, &head_style);
    y += head.height;
    let mut page_body_top = y;

    for (index, mut row) in body.into_iter().enumerate() {
        let row_style = RowStyle {
            fill: style.alternate_fill.filter(|_| index % 2 == 0),
            text: style.body_text,
            size: body_size,
            align: style.body_align,
        };

        loop {
            let fits = !check_fit(y, row.height, geometry.table_bottom).should_break;
            if fits {
                draw_row(pages, spec, &widths, &body_fonts, &row, y, &row_style);
                y += row.height;
                break;
            }

            let splittable = row.height > page_capacity + WIDTH_EPSILON && row.line_count() > 1;
            let room = lines_that_fit(y, geometry.table_bottom, body_size, style.padding);
            if splittable && room > 0 {
                let part = row.take_lines(room, body_size, style.padding);
                log::debug!("Table row {} split after {} line(s)", index, room);
                draw_row(pages, spec, &widths, &body_fonts, &part, y, &row_style);
            } else if y <= page_body_top + WIDTH_EPSILON {
                // A single line taller than the page; nothing better to do.
                draw_row(pages, spec, &widths, &body_fonts, &row, y, &row_style);
                y += row.height;
                break;
            }

            log::debug!("Table row {} continues on page {}", index, pages.page_count() + 1);
            pages.new_page();
            y = pages.cursor();
            draw_row(pages, spec, &widths, &head_fonts, &head, y, &head_style);
            y += head.height;
            page_body_top = y;
        }
    }

    pages.set_cursor(y);
    Ok(y)
}
