//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

use crate::view::summary::MetricStyle;

/// Dashboard palette.
pub struct Theme;

impl Theme {
    // Metrics pane
    pub const METRIC: Color = Color::Cyan;
    pub const SUCCESS: Color = Color::Green;
    pub const WARN: Color = Color::Yellow;
    pub const FAIL: Color = Color::Red;

    // Progress bars
    pub const BAR_DESCRIPTION: Color = Color::Cyan;
    pub const BAR_BOUNDARY: Color = Color::White;
    pub const BAR_FILL: Color = Color::Green;
    pub const BAR_EMPTY: Color = Color::DarkGray;

    // Apps table
    pub const HEADER_FG: Color = Color::Black;
    pub const HEADER_BG: Color = Color::Green;
    pub const ROW_FG: Color = Color::White;
    pub const SELECTED_BG: Color = Color::DarkGray;

    // Footer
    pub const FOOTER_FG: Color = Color::Black;
    pub const FOOTER_BG: Color = Color::Cyan;
    pub const FOOTER_KEY: Color = Color::White;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Maps a UI-agnostic [`MetricStyle`] to a ratatui [`Style`].
    pub fn metric(class: MetricStyle) -> Style {
        let base = Style::default();
        match class {
            MetricStyle::Text => base.fg(Theme::METRIC),
            MetricStyle::Number => base.fg(Theme::METRIC).add_modifier(Modifier::BOLD),
            MetricStyle::TextSuccess => base.fg(Theme::SUCCESS),
            MetricStyle::NumberSuccess => base.fg(Theme::SUCCESS).add_modifier(Modifier::BOLD),
            MetricStyle::TextWarn => base.fg(Theme::WARN),
            MetricStyle::NumberWarn => base.fg(Theme::WARN).add_modifier(Modifier::BOLD),
            MetricStyle::TextFail => base.fg(Theme::FAIL),
            MetricStyle::NumberFail => base.fg(Theme::FAIL).add_modifier(Modifier::BOLD),
        }
    }

    /// Label left of a progress bar (`vCore`, `Mem`).
    pub fn bar_description() -> Style {
        Style::default().fg(Theme::BAR_DESCRIPTION)
    }

    /// Brackets around a progress bar.
    pub fn bar_boundary() -> Style {
        Style::default()
            .fg(Theme::BAR_BOUNDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Filled part of a progress bar.
    pub fn bar_fill() -> Style {
        Style::default().fg(Theme::BAR_FILL)
    }

    /// Unfilled part of a progress bar, label included.
    pub fn bar_empty() -> Style {
        Style::default()
            .fg(Theme::BAR_EMPTY)
            .add_modifier(Modifier::BOLD)
    }

    /// Table header style.
    pub fn table_header() -> Style {
        Style::default().fg(Theme::HEADER_FG).bg(Theme::HEADER_BG)
    }

    /// Application row style.
    pub fn table_row() -> Style {
        Style::default().fg(Theme::ROW_FG)
    }

    /// Selected row style.
    pub fn selected() -> Style {
        Style::default()
            .fg(Theme::ROW_FG)
            .bg(Theme::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn footer() -> Style {
        Style::default().fg(Theme::FOOTER_FG).bg(Theme::FOOTER_BG)
    }

    /// Highlighted keys in the footer.
    pub fn footer_key() -> Style {
        Style::default().fg(Theme::FOOTER_KEY).bg(Theme::FOOTER_BG)
    }

    pub fn footer_alert() -> Style {
        Style::default()
            .fg(Theme::FOOTER_KEY)
            .bg(Theme::FAIL)
            .add_modifier(Modifier::BOLD)
    }
}
