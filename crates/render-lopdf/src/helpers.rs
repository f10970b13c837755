//! Page drawing context that turns positioned elements into content
//! stream operators.

use fieldreport_layout::{
    Color, ImageElement, LayoutElement, PositionedElement, RectElement, Stroke, TextElement,
};
use fieldreport_render_core::RenderError;
use fieldreport_types::mm_to_pt;
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use std::collections::HashMap;

/// Bezier control point distance for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font_name: &'static str,
    font_size: f32,
    fill_color: Option<Color>,
    stroke_color: Option<Color>,
    line_width: Option<f32>,
}

/// Accumulates the operators for one page.
///
/// Positions arrive in millimetres from the top-left corner and leave as
/// points from the bottom-left. Font, colour and line width are only
/// emitted when they change.
pub struct PageContext<'a> {
    page_height: f32,
    content: Content,
    state: PageRenderState,
    image_names: &'a HashMap<String, String>,
}

impl<'a> PageContext<'a> {
    /// `image_names` maps image keys to their XObject resource names.
    pub fn new(page_height_mm: f32, image_names: &'a HashMap<String, String>) -> Self {
        Self {
            page_height: mm_to_pt(page_height_mm),
            content: Content { operations: vec![] },
            state: PageRenderState::default(),
            image_names,
        }
    }

    pub fn finish(self) -> Content {
        self.content
    }

    pub fn draw_element(&mut self, el: &PositionedElement) -> Result<(), RenderError> {
        match &el.element {
            LayoutElement::Text(text) => self.draw_text(text, el),
            LayoutElement::Rectangle(rect) => self.draw_rect(rect, el),
            LayoutElement::Line(line) => self.draw_line(&line.stroke, el),
            LayoutElement::Image(image) => self.draw_image(image, el)?,
        }
        Ok(())
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn x(&self, mm: f32) -> f32 {
        mm_to_pt(mm)
    }

    fn y(&self, mm: f32) -> f32 {
        self.page_height - mm_to_pt(mm)
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            let [r, g, b] = color.to_unit();
            self.op("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill_color = Some(color);
        }
    }

    fn set_stroke(&mut self, stroke: &Stroke) {
        let width = mm_to_pt(stroke.width);
        if self.state.line_width != Some(width) {
            self.op("w", vec![width.into()]);
            self.state.line_width = Some(width);
        }
        if self.state.stroke_color != Some(stroke.color) {
            let [r, g, b] = stroke.color.to_unit();
            self.op("RG", vec![r.into(), g.into(), b.into()]);
            self.state.stroke_color = Some(stroke.color);
        }
    }

    fn draw_text(&mut self, text: &TextElement, el: &PositionedElement) {
        if text.content.trim().is_empty() {
            return;
        }
        self.op("BT", vec![]);
        let font_name = text.font.resource_name();
        if self.state.font_name != font_name || self.state.font_size != text.size {
            self.op(
                "Tf",
                vec![Object::Name(font_name.as_bytes().to_vec()), text.size.into()],
            );
            self.state.font_name = font_name;
            self.state.font_size = text.size;
        }
        self.set_fill_color(text.color);
        let (x, y) = (self.x(el.x), self.y(el.y));
        self.op("Td", vec![x.into(), y.into()]);
        self.op(
            "Tj",
            vec![Object::String(to_win_ansi(&text.content), StringFormat::Literal)],
        );
        self.op("ET", vec![]);
    }

    fn draw_rect(&mut self, rect: &RectElement, el: &PositionedElement) {
        let paint = match (rect.fill, rect.stroke) {
            (Some(_), Some(_)) => "B",
            (Some(_), None) => "f",
            (None, Some(_)) => "S",
            (None, None) => return,
        };
        if let Some(fill) = rect.fill {
            self.set_fill_color(fill);
        }
        if let Some(stroke) = &rect.stroke {
            self.set_stroke(stroke);
        }

        let x = self.x(el.x);
        let y = self.y(el.y + el.height);
        let w = mm_to_pt(el.width);
        let h = mm_to_pt(el.height);
        let r = mm_to_pt(rect.corner_radius).min(w / 2.0).min(h / 2.0);

        if r <= 0.0 {
            self.op("re", vec![x.into(), y.into(), w.into(), h.into()]);
        } else {
            self.rounded_path(x, y, w, h, r);
        }
        self.op(paint, vec![]);
    }

    fn rounded_path(&mut self, x: f32, y: f32, w: f32, h: f32, r: f32) {
        let k = KAPPA * r;
        let (right, top) = (x + w, y + h);
        self.op("m", vec![(x + r).into(), y.into()]);
        self.op("l", vec![(right - r).into(), y.into()]);
        self.curve([right - r + k, y, right, y + r - k, right, y + r]);
        self.op("l", vec![right.into(), (top - r).into()]);
        self.curve([right, top - r + k, right - r + k, top, right - r, top]);
        self.op("l", vec![(x + r).into(), top.into()]);
        self.curve([x + r - k, top, x, top - r + k, x, top - r]);
        self.op("l", vec![x.into(), (y + r).into()]);
        self.curve([x, y + r - k, x + r - k, y, x + r, y]);
        self.op("h", vec![]);
    }

    fn curve(&mut self, points: [f32; 6]) {
        self.op("c", points.iter().map(|&p| p.into()).collect());
    }

    fn draw_line(&mut self, stroke: &Stroke, el: &PositionedElement) {
        self.set_stroke(stroke);
        let (x1, y1) = (self.x(el.x), self.y(el.y));
        let (x2, y2) = (self.x(el.x + el.width), self.y(el.y + el.height));
        self.op("m", vec![x1.into(), y1.into()]);
        self.op("l", vec![x2.into(), y2.into()]);
        self.op("S", vec![]);
    }

    fn draw_image(&mut self, image: &ImageElement, el: &PositionedElement) -> Result<(), RenderError> {
        let name = self
            .image_names
            .get(&image.key)
            .ok_or_else(|| RenderError::InvalidImage {
                key: image.key.clone(),
                message: "image was never registered with the document".to_string(),
            })?
            .clone();
        let w = mm_to_pt(el.width);
        let h = mm_to_pt(el.height);
        let x = self.x(el.x);
        let y = self.y(el.y + el.height);

        self.op("q", vec![]);
        self.op(
            "cm",
            vec![w.into(), 0.0f32.into(), 0.0f32.into(), h.into(), x.into(), y.into()],
        );
        self.op("Do", vec![Object::Name(name.into_bytes())]);
        self.op("Q", vec![]);
        Ok(())
    }
}

/// Encodes text for a WinAnsiEncoding font. Characters outside the
/// encoding become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\u{0}'..='\u{7f}' | '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8a,
            '‹' => 0x8b,
            'Œ' => 0x8c,
            'Ž' => 0x8e,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9a,
            '›' => 0x9b,
            'œ' => 0x9c,
            'ž' => 0x9e,
            'Ÿ' => 0x9f,
            _ => b'?',
        })
        .collect()
}
