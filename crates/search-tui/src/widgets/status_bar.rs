//! Status bar: bottom line with input mode, theme, and keybindings.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::Palette;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    /// Typing into the search field.
    Input,
    /// Moving through result cards.
    Browse,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Input => "INPUT",
            Self::Browse => "BROWSE",
        }
    }
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(
    frame: &mut Frame,
    area: Rect,
    mode: InputMode,
    dark_mode: bool,
    palette: &Palette,
) {
    let label_color = match mode {
        InputMode::Input => palette.input_fg,
        InputMode::Browse => palette.secondary,
    };

    let keys = match mode {
        InputMode::Input => {
            " type query  Enter search  Esc clear  Tab results  Ctrl+T theme  F1 help  Ctrl+C quit"
        }
        InputMode::Browse => {
            " ↑↓/jk select  g/G first/last  y copy  / search  t theme  K keys  ? help  q quit"
        }
    };

    let theme_label = if dark_mode { "☾ dark" } else { "☀ light" };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default().fg(label_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(theme_label, Style::default().fg(palette.secondary)),
        Span::raw(" "),
        Span::styled(keys, Style::default().fg(palette.muted)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
