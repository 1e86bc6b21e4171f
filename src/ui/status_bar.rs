use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use trashcam::logic::ui::key_hints;
use trashcam::model::Mode;

/// Render the bottom bar: key hints for the current mode, then mode and backend
pub fn render_status_bar(f: &mut Frame, area: Rect, mode: Mode, stream_active: bool, base_url: &str) {
    let mut spans = Vec::new();
    for (key, action) in key_hints(mode, stream_active) {
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default().fg(Color::Black).bg(Color::Gray),
        ));
        spans.push(Span::raw(format!(" {}  ", action)));
    }
    spans.push(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
    spans.push(Span::styled(
        mode.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled(
        format!(" · {}", base_url),
        Style::default().fg(Color::DarkGray),
    ));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
