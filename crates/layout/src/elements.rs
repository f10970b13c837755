use crate::fonts::{self, FontFace};
use fieldreport_types::{Color, Rect};
use std::fmt;

/// A single drawable item with its absolute position on a page.
///
/// Text elements are anchored at their baseline: `y` is the baseline and
/// `height` is zero. All other elements use `y` as their top edge.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub element: LayoutElement,
    /// Optional semantic marker ("boiler-title", "site-info", ...) used to
    /// inspect a laid-out document without parsing PDF operators.
    pub tag: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LayoutElement {
    Text(TextElement),
    Rectangle(RectElement),
    Line(LineElement),
    Image(ImageElement),
}

impl fmt::Display for LayoutElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutElement::Text(t) => write!(f, "Text(\"{}\")", t.content),
            LayoutElement::Rectangle(_) => write!(f, "Rectangle"),
            LayoutElement::Line(_) => write!(f, "Line"),
            LayoutElement::Image(i) => write!(f, "Image(key=\"{}\")", i.key),
        }
    }
}

/// A single line of text. Wrapping happens before elements are created.
#[derive(Clone, Debug, PartialEq)]
pub struct TextElement {
    pub content: String,
    pub font: FontFace,
    /// Font size in points.
    pub size: f32,
    pub color: Color,
}

impl TextElement {
    pub fn new(content: impl Into<String>, font: FontFace, size: f32, color: Color) -> Self {
        Self {
            content: content.into(),
            font,
            size,
            color,
        }
    }

    pub fn width(&self) -> f32 {
        fonts::text_width(&self.content, self.font, self.size)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    /// Line width in millimetres.
    pub width: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct RectElement {
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
    pub corner_radius: f32,
}

/// A straight segment from `(x, y)` to `(x + width, y + height)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineElement {
    pub stroke: Stroke,
}

/// A reference to an image registered with the document by key.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageElement {
    pub key: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl PositionedElement {
    /// Places `text` so that `anchor_x` is its left edge, centre or right edge.
    pub fn text(anchor_x: f32, baseline: f32, align: TextAlign, text: TextElement) -> Self {
        let width = text.width();
        let x = match align {
            TextAlign::Left => anchor_x,
            TextAlign::Center => anchor_x - width / 2.0,
            TextAlign::Right => anchor_x - width,
        };
        Self {
            x,
            y: baseline,
            width,
            height: 0.0,
            element: LayoutElement::Text(text),
            tag: None,
        }
    }

    pub fn rect(rect: Rect, style: RectElement) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            element: LayoutElement::Rectangle(style),
            tag: None,
        }
    }

    pub fn line(x1: f32, y1: f32, x2: f32, y2: f32, stroke: Stroke) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
            element: LayoutElement::Line(LineElement { stroke }),
            tag: None,
        }
    }

    pub fn image(rect: Rect, key: impl Into<String>) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            element: LayoutElement::Image(ImageElement { key: key.into() }),
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.element {
            LayoutElement::Text(t) => Some(&t.content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(content: &str) -> TextElement {
        TextElement::new(content, FontFace::Regular, 10.0, Color::BLACK)
    }

    #[test]
    fn alignment_moves_left_edge() {
        let left = PositionedElement::text(100.0, 50.0, TextAlign::Left, sample("Weekly"));
        let center = PositionedElement::text(100.0, 50.0, TextAlign::Center, sample("Weekly"));
        let right = PositionedElement::text(100.0, 50.0, TextAlign::Right, sample("Weekly"));

        assert_eq!(left.x, 100.0);
        assert!((center.x - (100.0 - left.width / 2.0)).abs() < 1e-4);
        assert!((right.x + right.width - 100.0).abs() < 1e-4);
        assert_eq!(left.y, 50.0);
    }

    #[test]
    fn line_stores_delta() {
        let stroke = Stroke {
            color: Color::BLACK,
            width: 0.8,
        };
        let line = PositionedElement::line(20.0, 37.0, 190.0, 37.0, stroke);
        assert_eq!(line.width, 170.0);
        assert_eq!(line.height, 0.0);
    }

    #[test]
    fn tags_and_text_access() {
        let el = PositionedElement::text(0.0, 0.0, TextAlign::Left, sample("Boiler 1"))
            .with_tag("boiler-title");
        assert_eq!(el.tag, Some("boiler-title"));
        assert_eq!(el.as_text(), Some("Boiler 1"));
        assert_eq!(el.element.to_string(), "Text(\"Boiler 1\")");
    }
}
