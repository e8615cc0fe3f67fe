//! Header: app title, subtitle, endpoint and theme indicator (two rows).

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{app_state::AppState, theme::Palette, widgets::text::truncate};

pub const TITLE: &str = "NCO Semantic Search";
pub const SUBTITLE: &str = "Find occupational roles using intelligent search";

pub fn draw_header(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    endpoint: &str,
    palette: &Palette,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let theme_icon = if state.dark_mode { "☾ " } else { "☀ " };

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" {}", TITLE),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ))),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(theme_icon, palette.style_secondary()))
            .alignment(Alignment::Right),
        rows[0],
    );

    let endpoint_w = (area.width as usize / 3).max(8);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" {}", SUBTITLE),
            palette.style_secondary(),
        ))),
        rows[1],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("{} ", truncate(endpoint, endpoint_w)),
            palette.style_muted(),
        ))
        .alignment(Alignment::Right),
        rows[1],
    );
}
