//! SearchBar component: controlled query field plus the submit control.
//!
//! The bar keeps no copy of the query. Every render and every key press
//! rebuilds a `tui_input::Input` from `AppState::query`/`query_cursor`, applies
//! the key, and reports the resulting full string upward as
//! `Action::QueryChanged`. What is displayed is therefore always exactly what
//! the App holds.

use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};
use unicode_width::UnicodeWidthStr;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::Palette,
    widgets::{pane_chrome::pane_chrome, text::skip_columns},
};

const PROMPT: &str = "› ";
const BUTTON_IDLE: &str = "[ search ]";
const BUTTON_BUSY: &str = "[ searching… ]";

pub struct SearchBar {
    placeholder: String,
    /// Last drawn rect of the submit control, for mouse hit-testing.
    button_area: Rect,
}

impl SearchBar {
    pub fn new() -> Self {
        Self {
            placeholder: "search occupational roles, e.g. teacher".to_string(),
            button_area: Rect::default(),
        }
    }

    fn input_from(state: &AppState) -> Input {
        Input::new(state.query.clone()).with_cursor(state.query_cursor)
    }

    fn submit(state: &AppState) -> Vec<Action> {
        if state.can_submit() {
            vec![Action::Submit(state.query.clone())]
        } else {
            vec![]
        }
    }
}

impl Component for SearchBar {
    fn id(&self) -> ComponentId {
        ComponentId::SearchBar
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Enter => Self::submit(state),
            KeyCode::Esc => {
                if state.query.is_empty() {
                    vec![Action::FocusPane(ComponentId::Results)]
                } else {
                    vec![Action::QueryChanged {
                        value: String::new(),
                        cursor: 0,
                    }]
                }
            }
            _ => {
                let mut input = Self::input_from(state);
                match input.handle_event(&Event::Key(key)) {
                    Some(changed) if changed.value || changed.cursor => {
                        vec![Action::QueryChanged {
                            value: input.value().to_string(),
                            cursor: input.cursor(),
                        }]
                    }
                    _ => vec![],
                }
            }
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        if !matches!(event.kind, MouseEventKind::Down(MouseButton::Left)) {
            return vec![];
        }
        let pos = Position::new(event.column, event.row);
        if self.button_area.contains(pos) {
            let mut actions = vec![Action::FocusPane(ComponentId::SearchBar)];
            actions.extend(Self::submit(state));
            actions
        } else {
            vec![Action::FocusPane(ComponentId::SearchBar)]
        }
    }

    fn draw(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        focused: bool,
        state: &AppState,
        palette: &Palette,
    ) {
        let block = pane_chrome("search", focused, None, palette);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            self.button_area = Rect::default();
            return;
        }

        let label = if state.is_loading {
            BUTTON_BUSY
        } else {
            BUTTON_IDLE
        };
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(label.width() as u16),
            ])
            .split(inner);
        let text_area = chunks[0];
        self.button_area = chunks[2];

        // ── Text field ────────────────────────────────────────────────────
        let input = Self::input_from(state);
        let field_w = (text_area.width as usize).saturating_sub(PROMPT.width());
        let scroll = input.visual_scroll(field_w);
        let value = input.value();
        let body = if value.is_empty() {
            Span::styled(self.placeholder.as_str(), palette.style_muted())
        } else {
            Span::styled(skip_columns(value, scroll), Style::default().fg(palette.input_fg))
        };
        let line = Line::from(vec![
            Span::styled(PROMPT, Style::default().fg(palette.secondary)),
            body,
        ]);
        frame.render_widget(
            Paragraph::new(line).style(palette.style_input()),
            text_area,
        );

        if focused {
            let cursor_x = text_area.x
                + PROMPT.width() as u16
                + input.visual_cursor().saturating_sub(scroll) as u16;
            let max_x = text_area.x + text_area.width.saturating_sub(1);
            frame.set_cursor_position((cursor_x.min(max_x), text_area.y));
        }

        // ── Submit control ────────────────────────────────────────────────
        let button_style = if state.can_submit() {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            palette.style_muted()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(label, button_style)),
            self.button_area,
        );
    }
}
