use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use super::icons::IconRenderer;
use trashcam::model::{Element, Region};

/// One line per injected element, in insertion order
pub fn region_lines(region: &Region, icons: &IconRenderer) -> Vec<Line<'static>> {
    region
        .elements()
        .filter_map(|element| element_line(element, icons))
        .collect()
}

fn key(label: &str) -> Span<'static> {
    Span::styled(
        format!("[{}] ", label),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )
}

fn element_line(element: &Element, icons: &IconRenderer) -> Option<Line<'static>> {
    let line = match element {
        Element::LiveIndicator => Line::from(icons.live_indicator()),
        // The shade only dims the panel; it has no line of its own
        Element::Shade => return None,
        Element::ReturnButton => Line::from(vec![key("Esc"), Span::raw("Return to stream")]),
        Element::CancelButton => Line::from(vec![key("Esc"), Span::raw("Cancel review")]),
        Element::DownloadButton => Line::from(vec![key("d"), Span::raw("Download")]),
        Element::OverrideSwitch { on } => {
            let (text, color) = if *on { ("ON", Color::Green) } else { ("OFF", Color::DarkGray) };
            Line::from(vec![
                key("m"),
                Span::raw("Manual override: "),
                Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            ])
        }
        Element::CategorySelector { selected, enabled } => {
            let style = if *enabled {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(vec![
                key("←/→"),
                Span::styled(format!("◀ {} ▶", selected.display_name()), style),
            ])
        }
    };
    Some(line)
}
