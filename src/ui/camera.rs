use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::elements::region_lines;
use super::icons::IconRenderer;
use trashcam::logic::formatting::format_frame_count;
use trashcam::model::{Element, FeedSource, Interface, Mode};

/// Render the camera panel: feed state plus whatever is injected over it
pub fn render_camera(
    f: &mut Frame,
    area: Rect,
    interface: &Interface,
    mode: Mode,
    feed_url: Option<&str>,
    frames: u64,
    icons: &IconRenderer,
) {
    let feed = &interface.feed;
    let shaded = feed.overlay.elements().any(|e| *e == Element::Shade);

    let mut lines = Vec::new();
    match &feed.source {
        FeedSource::Off => {
            lines.push(Line::from(Span::styled(
                "Camera off. Press s to start streaming.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        FeedSource::Live => {
            if let Some(url) = feed_url {
                lines.push(Line::from(Span::styled(
                    url.to_string(),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            lines.push(Line::from(format_frame_count(frames)));
            if mode == Mode::Capturing {
                lines.push(Line::from(Span::styled(
                    "Capturing…",
                    Style::default().fg(Color::Yellow),
                )));
            }
        }
        FeedSource::Still { image_path } => {
            lines.push(Line::from(vec![
                Span::styled("Captured frame: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(image_path.clone()),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.extend(region_lines(&feed.overlay, icons));

    let border_color = if interface.controls.capture_enabled {
        Color::Green
    } else {
        Color::Gray
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} Camera ", icons.camera()))
        .border_style(Style::default().fg(border_color));
    if shaded {
        block = block.style(Style::default().add_modifier(Modifier::DIM));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
