use ratatui::layout::{Constraint, Layout, Rect};

/// Screen areas for one frame
pub struct LayoutInfo {
    pub camera_area: Rect,
    pub result_area: Rect,
    pub upload_area: Rect,
    pub status_area: Rect,
}

/// Camera on the left; result above upload on the right; key hints at the bottom
pub fn calculate_layout(area: Rect) -> LayoutInfo {
    let [main, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    // Stack the panels on narrow terminals
    let [camera_area, side] = if main.width < 80 {
        Layout::vertical([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(main)
    } else {
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(main)
    };

    let [result_area, upload_area] =
        Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(side);

    LayoutInfo {
        camera_area,
        result_area,
        upload_area,
        status_area,
    }
}
