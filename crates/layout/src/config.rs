use fieldreport_types::Size;

/// Fixed page dimensions and flow boundaries, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub size: Size,
    /// Where the cursor lands after a page break.
    pub top_margin: f32,
    /// `ensure_space` starts a new page when content would extend past this line.
    pub bottom_limit: f32,
    /// Table rows are never drawn below this line; they move to the next page.
    pub table_bottom: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            size: Size::a4(),
            top_margin: 20.0,
            bottom_limit: 287.0,
            table_bottom: 282.0,
        }
    }
}

impl PageGeometry {
    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn center_x(&self) -> f32 {
        self.size.width / 2.0
    }
}
