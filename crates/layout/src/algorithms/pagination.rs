pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_height: f32,
}

/// Centralized logic to check if a block fits above a boundary.
///
/// * `cursor_y`: The current Y position on the page.
/// * `required_height`: The height the caller is about to draw.
/// * `limit_y`: The lowest Y position content may reach on this page.
pub fn check_fit(cursor_y: f32, required_height: f32, limit_y: f32) -> BreakAnalysis {
    let available = (limit_y - cursor_y).max(0.0);
    // Use a small epsilon to handle floating point inaccuracies
    const EPSILON: f32 = 0.01;
    BreakAnalysis {
        should_break: required_height > available + EPSILON,
        remaining_height: available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_when_exactly_at_limit() {
        let analysis = check_fit(200.0, 87.0, 287.0);
        assert!(!analysis.should_break);
        assert_eq!(analysis.remaining_height, 87.0);
    }

    #[test]
    fn breaks_when_overflowing() {
        assert!(check_fit(221.0, 67.0, 287.0).should_break);
    }

    #[test]
    fn cursor_past_limit_has_no_room() {
        let analysis = check_fit(290.0, 0.5, 287.0);
        assert!(analysis.should_break);
        assert_eq!(analysis.remaining_height, 0.0);
    }
}
