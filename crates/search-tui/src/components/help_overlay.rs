//! HelpOverlay component: centered popup with keyboard shortcut reference.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::Palette,
};

pub struct HelpOverlay;

impl HelpOverlay {
    pub fn new() -> Self {
        Self
    }
}

impl Component for HelpOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::HelpOverlay
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !state.show_help {
            return vec![];
        }
        match key.code {
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc | KeyCode::F(1) => {
                vec![Action::ToggleHelp]
            }
            // Consume all other keys while overlay is open
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, _event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        _focused: bool,
        state: &AppState,
        palette: &Palette,
    ) {
        if !state.show_help {
            return;
        }

        let popup = centered_rect(64, 24, area);
        let section = |title: &'static str| {
            Line::from(Span::styled(
                title,
                Style::default()
                    .fg(palette.muted)
                    .add_modifier(Modifier::BOLD),
            ))
        };

        let help_lines: Vec<Line> = vec![
            Line::from(Span::styled(" keyboard shortcuts", palette.style_title())),
            Line::from(""),
            section(" search field"),
            help_row("type", "edit the query", palette),
            help_row("enter", "search (ignored while searching or blank)", palette),
            help_row("esc", "clear text, then move to results", palette),
            help_row("ctrl+t", "toggle light / dark theme", palette),
            Line::from(""),
            section(" results"),
            help_row("↑ / ↓  or  k / j", "move selection", palette),
            help_row("pg up / pg dn", "jump 5 cards", palette),
            help_row("home / end  or  g / G", "first / last card", palette),
            help_row("y", "copy selected card", palette),
            help_row("/  or  i", "back to the search field", palette),
            help_row("t", "toggle light / dark theme", palette),
            help_row("K", "toggle keys bar", palette),
            Line::from(""),
            section(" anywhere"),
            help_row("tab / shift-tab", "switch pane", palette),
            help_row("F1  or  ?", "toggle this help", palette),
            help_row("ctrl+c  or  q", "quit", palette),
            Line::from(""),
            Line::from(Span::styled(" press ? or esc to close", palette.style_muted())),
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(help_lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(palette.style_unfocused_border())
                        .style(Style::default().bg(palette.bg)),
                )
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}

fn help_row<'a>(key: &'a str, desc: &'a str, palette: &Palette) -> Line<'a> {
    Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!("{:<22}", key),
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc, palette.style_secondary()),
    ])
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
