use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

use trashcam::logic::presenter::{BadgeStyle, Icon};

/// Icon display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconMode {
    Emoji,    // Standard emoji icons (🔋, 🥤, etc.)
    NerdFont, // Nerd Fonts icons (U+F240, etc.)
}

impl IconMode {
    /// Parse the `icon_mode` config value; anything unknown is emoji
    pub fn from_config(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "nerdfont" | "nerd" | "nerd-font" => IconMode::NerdFont,
            _ => IconMode::Emoji,
        }
    }
}

/// Icon theme using terminal colors (respects user's terminal theme)
#[derive(Debug, Clone)]
pub struct IconTheme {
    pub hazardous_color: Color,
    pub organic_color: Color,
    pub recyclable_color: Color,
    pub glass_color: Color,
    pub mixed_color: Color,
    pub unknown_color: Color,
    pub live_color: Color,
}

impl Default for IconTheme {
    fn default() -> Self {
        Self {
            hazardous_color: Color::Red,
            organic_color: Color::Green,
            recyclable_color: Color::Blue,
            glass_color: Color::Cyan,
            mixed_color: Color::Yellow,
            unknown_color: Color::Gray,
            live_color: Color::Red,
        }
    }
}

/// Icon renderer that handles both emoji and Nerd Font modes
pub struct IconRenderer {
    mode: IconMode,
    theme: IconTheme,
}

impl IconRenderer {
    pub fn new(mode: IconMode, theme: IconTheme) -> Self {
        Self { mode, theme }
    }

    /// Icon for a classification result
    pub fn category_icon(&self, icon: Icon) -> Span<'static> {
        let (emoji, nerd, color) = match icon {
            Icon::Hazardous => ("🔋", "\u{f240}", self.theme.hazardous_color),
            Icon::Organic => ("🍂", "\u{f06c}", self.theme.organic_color),
            Icon::Paper => ("📦", "\u{f1ea}", self.theme.recyclable_color),
            Icon::Plastic => ("🥤", "\u{f1b8}", self.theme.recyclable_color),
            Icon::Metal => ("🥫", "\u{f013}", self.theme.recyclable_color),
            Icon::Glass => ("🍾", "\u{f000}", self.theme.glass_color),
            Icon::MixedWaste => ("🗑️", "\u{f1f8}", self.theme.mixed_color),
            Icon::Unknown => ("❓", "\u{f128}", self.theme.unknown_color),
        };
        let glyph = match self.mode {
            IconMode::Emoji => emoji,
            IconMode::NerdFont => nerd,
        };
        Span::styled(format!("{} ", glyph), Style::default().fg(color))
    }

    /// Streaming indicator
    pub fn live_indicator(&self) -> Span<'static> {
        let glyph = match self.mode {
            IconMode::Emoji => "🔴",
            IconMode::NerdFont => "\u{f111}",
        };
        Span::styled(
            format!("{} LIVE", glyph),
            Style::default()
                .fg(self.theme.live_color)
                .add_modifier(Modifier::BOLD),
        )
    }

    /// Camera glyph for the panel title
    pub fn camera(&self) -> &'static str {
        match self.mode {
            IconMode::Emoji => "📷",
            IconMode::NerdFont => "\u{f030}",
        }
    }
}

/// Badge colors per style
pub fn badge_style(style: BadgeStyle) -> Style {
    let (fg, bg) = match style {
        BadgeStyle::Success => (Color::Black, Color::Green),
        BadgeStyle::Primary => (Color::White, Color::Blue),
        BadgeStyle::Warning => (Color::Black, Color::Yellow),
        BadgeStyle::Danger => (Color::White, Color::Red),
        BadgeStyle::Secondary => (Color::Black, Color::Gray),
    };
    Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD)
}
