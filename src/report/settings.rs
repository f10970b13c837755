use fieldreport_layout::PageGeometry;

/// Page geometry and the cursor positions past which a section starts on a
/// fresh page instead of below the previous one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    pub geometry: PageGeometry,
    pub boiler_break_after: f32,
    pub support_systems_break_after: f32,
    pub closed_loops_break_after: f32,
    pub general_notes_break_after: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::default(),
            boiler_break_after: 220.0,
            support_systems_break_after: 180.0,
            closed_loops_break_after: 180.0,
            general_notes_break_after: 240.0,
        }
    }
}

impl LayoutSettings {
    /// The space a section asks `ensure_space` for so that it breaks exactly
    /// when the cursor is past `threshold`.
    pub fn reserve_below(&self, threshold: f32) -> f32 {
        (self.geometry.bottom_limit - threshold).max(0.0)
    }
}
