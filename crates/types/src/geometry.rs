//! Page-space geometry. Layout works in millimetres with the origin at the
//! top-left corner of the page; the renderer converts to PDF points.

const MM_PER_INCH: f32 = 25.4;
const PT_PER_INCH: f32 = 72.0;

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_INCH / MM_PER_INCH
}

pub fn pt_to_mm(pt: f32) -> f32 {
    pt * MM_PER_INCH / PT_PER_INCH
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// ISO A4 portrait, in millimetres.
    pub fn a4() -> Self {
        Self::new(210.0, 297.0)
    }
}
