use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::elements::region_lines;
use super::icons::IconRenderer;
use trashcam::logic::formatting::{format_dimensions, format_size};
use trashcam::model::{Interface, Mode, UploadArea};

/// Render the upload area and its review panel
pub fn render_upload(f: &mut Frame, area: Rect, interface: &Interface, mode: Mode, icons: &IconRenderer) {
    let mut lines = Vec::new();

    match &interface.upload.area {
        UploadArea::Empty => {
            lines.push(Line::from(Span::styled(
                "No image selected. Press o to enter a path, or drop a file on the terminal.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        UploadArea::Preview(file) => {
            lines.push(Line::from(Span::styled(
                file.file_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!(
                "{} · {} · {}",
                file.mime,
                format_size(file.size),
                format_dimensions(file.dimensions)
            )));
            if mode == Mode::ProcessingUpload {
                lines.push(Line::from(Span::styled(
                    "Classifying…",
                    Style::default().fg(Color::Yellow),
                )));
            } else if mode != Mode::UploadReview {
                lines.push(Line::from(Span::styled(
                    "[u] Upload  [r] Remove",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
    }

    if !interface.upload.review.is_empty() {
        lines.push(Line::from(""));
        lines.extend(region_lines(&interface.upload.review, icons));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Upload "))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
