use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use super::icons::{badge_style, IconRenderer};
use trashcam::logic::view::result_view;
use trashcam::model::Session;

/// Render the result panel from the session
pub fn render_result(f: &mut Frame, area: Rect, session: &Session, icons: &IconRenderer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Classification ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(view) = result_view(session) else {
        let hint = Paragraph::new("No classification yet. Start the camera or upload an image.")
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: false });
        f.render_widget(hint, inner);
        return;
    };

    let [header_area, gauge_area, body_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(inner);

    let label_style = if view.manual {
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let header = Paragraph::new(Line::from(vec![
        icons.category_icon(view.display.icon),
        Span::styled(view.label_text.clone(), label_style),
    ]));
    f.render_widget(header, header_area);

    if let Some(confidence) = view.confidence {
        let gauge = Gauge::default()
            .ratio((confidence / 100.0).clamp(0.0, 1.0))
            .label(format!("Confidence {}", view.confidence_text))
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black));
        f.render_widget(gauge, gauge_area);
    }

    let body = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(" {} ", view.display.group.badge_text()),
            badge_style(view.badge),
        )),
        Line::from(""),
        Line::from(view.display.tip),
    ])
    .wrap(Wrap { trim: false });
    f.render_widget(body, body_area);
}
