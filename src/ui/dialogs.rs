use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Center a box of the given size inside `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

/// Render a blocking notice; only dismissal keys are accepted while shown
pub fn render_notice(f: &mut Frame, message: &str) {
    let area = f.area();
    let text_width = message.width() as u16;
    let width = (text_width + 4).clamp(30, 70);
    // Rough line count after wrapping, plus borders and the hint line
    let inner = width.saturating_sub(2).max(1);
    let height = text_width.div_ceil(inner) + 4;
    let notice_area = centered(area, width, height);

    let text = format!("{}\n\n(Enter to dismiss)", message);
    let notice = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Notice ")
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, notice_area);
    f.render_widget(notice, notice_area);
}

/// Render the choose-file path prompt
pub fn render_file_prompt(f: &mut Frame, input: &str) {
    let area = f.area();
    let prompt_area = centered(area, 70, 5);

    let text = format!("{}█\n(Enter to select, Esc to cancel)", input);
    let prompt = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Image path (png, jpg, jpeg, gif) ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, prompt_area);
    f.render_widget(prompt, prompt_area);
}
