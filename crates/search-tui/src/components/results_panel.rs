//! ResultsPanel component: one card per result record, in server order.
//!
//! What a card says is a pure function of the record (`card_views`); the
//! panel itself only adds view state: which card is selected and which card
//! is at the top of the viewport.

use ratatui::buffer::Buffer;
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use search_proto::record::ResultRecord;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::Palette,
    widgets::{
        pane_chrome::{pane_chrome, Badge},
        text::{truncate, wrap},
    },
};

/// Shown when the record sequence is empty.
pub const NO_RESULTS: &str = "No results found. Try a different search query.";

const MAX_BODY_LINES: usize = 6;
const PAGE: usize = 5;

/// Display-ready content of one card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView<'a> {
    pub title: &'a str,
    pub role_badge: String,
    pub body: &'a str,
    pub score: Option<f64>,
}

impl<'a> CardView<'a> {
    pub fn from_record(record: &'a ResultRecord) -> Self {
        Self {
            title: record.display_title(),
            role_badge: format!("Role {}", record.display_role_number()),
            body: record.display_body(),
            score: record.combined_score,
        }
    }

    /// Body wrapped to `width`, capped at `MAX_BODY_LINES` with an ellipsis.
    fn body_lines(&self, width: usize) -> Vec<String> {
        let mut lines = wrap(self.body, width);
        if lines.len() > MAX_BODY_LINES {
            lines.truncate(MAX_BODY_LINES);
            if let Some(last) = lines.last_mut() {
                let cut = truncate(last, width.saturating_sub(1));
                *last = format!("{}…", cut.trim_end_matches('…'));
            }
        }
        if lines.is_empty() {
            lines.push(String::new());
        }
        lines
    }

    fn height(&self, inner_width: u16) -> u16 {
        self.body_lines(card_text_width(inner_width)).len() as u16 + 2
    }
}

pub fn card_views(records: &[ResultRecord]) -> Vec<CardView<'_>> {
    records.iter().map(CardView::from_record).collect()
}

fn card_text_width(inner_width: u16) -> usize {
    // card borders + one column of padding each side
    (inner_width as usize).saturating_sub(4).max(1)
}

pub struct ResultsPanel {
    selected: usize,
    /// Index of the first card drawn.
    scroll: usize,
    /// Last drawn card rects, for mouse hit-testing.
    card_areas: Vec<(usize, Rect)>,
}

impl ResultsPanel {
    pub fn new() -> Self {
        Self {
            selected: 0,
            scroll: 0,
            card_areas: Vec::new(),
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_record<'a>(&self, state: &'a AppState) -> Option<&'a ResultRecord> {
        state.results.get(self.selected)
    }

    /// Back to the top; called whenever a new result list lands.
    pub fn reset(&mut self) {
        self.selected = 0;
        self.scroll = 0;
        self.card_areas.clear();
    }

    fn select(&mut self, idx: usize, len: usize) {
        self.selected = idx.min(len.saturating_sub(1));
    }

    fn ensure_visible(&mut self, cards: &[CardView<'_>], inner: Rect) {
        if self.selected < self.scroll {
            self.scroll = self.selected;
            return;
        }
        let avail = inner.height;
        loop {
            let used: u16 = cards[self.scroll..=self.selected]
                .iter()
                .map(|c| c.height(inner.width))
                .sum();
            if used <= avail || self.scroll >= self.selected {
                break;
            }
            self.scroll += 1;
        }
    }

    /// Render into a buffer. Used by `draw` and directly by tests.
    pub fn render(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        focused: bool,
        records: &[ResultRecord],
        palette: &Palette,
    ) {
        self.card_areas.clear();
        self.select(self.selected, records.len());
        let title = format!("Search Results ({} found)", records.len());
        let position = format!("{}/{}", self.selected + 1, records.len());
        let badge = (!records.is_empty()).then(|| Badge {
            text: &position,
            color: palette.badge,
        });
        let block = pane_chrome(&title, focused, badge, palette);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if records.is_empty() {
            self.reset();
            Paragraph::new(Line::from(Span::styled(NO_RESULTS, palette.style_secondary())))
                .render(inner, buf);
            return;
        }

        let cards = card_views(records);
        self.scroll = self.scroll.min(self.selected);
        self.ensure_visible(&cards, inner);

        let bottom = inner.y + inner.height;
        let mut y = inner.y;
        for (idx, card) in cards.iter().enumerate().skip(self.scroll) {
            if y >= bottom {
                break;
            }
            let h = card.height(inner.width).min(bottom - y);
            let card_area = Rect::new(inner.x, y, inner.width, h);
            render_card(card, card_area, buf, idx == self.selected, focused, palette);
            self.card_areas.push((idx, card_area));
            y += h;
        }
    }
}

fn render_card(
    card: &CardView<'_>,
    area: Rect,
    buf: &mut Buffer,
    selected: bool,
    focused: bool,
    palette: &Palette,
) {
    let border_style = if selected && focused {
        palette.style_focused_border()
    } else if selected {
        Style::default().fg(palette.secondary)
    } else {
        palette.style_unfocused_border()
    };
    let base = if selected {
        palette.style_selected()
    } else {
        Style::default().fg(palette.primary)
    };

    let badge_w = card.role_badge.width() + 2;
    let title_w = (area.width as usize).saturating_sub(badge_w + 4);
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(base)
        .title(Line::from(Span::styled(
            format!(" {} ", truncate(card.title, title_w)),
            palette.style_title(),
        )))
        .title_top(
            Line::from(Span::styled(
                format!(" {} ", card.role_badge),
                Style::default()
                    .fg(palette.badge)
                    .add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        );
    if let Some(score) = card.score {
        block = block.title_bottom(
            Line::from(Span::styled(
                format!(" score {:.3} ", score),
                Style::default().fg(palette.score),
            ))
            .right_aligned(),
        );
    }

    let inner = block.inner(area);
    block.render(area, buf);

    let lines: Vec<Line> = card
        .body_lines(card_text_width(area.width))
        .into_iter()
        .map(|l| Line::from(format!(" {}", l)))
        .collect();
    Paragraph::new(lines).style(base).render(inner, buf);
}

impl Component for ResultsPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Results
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => vec![Action::SelectUp(1)],
            KeyCode::Down | KeyCode::Char('j') => vec![Action::SelectDown(1)],
            KeyCode::PageUp => vec![Action::SelectUp(PAGE)],
            KeyCode::PageDown => vec![Action::SelectDown(PAGE)],
            KeyCode::Home | KeyCode::Char('g') => vec![Action::SelectFirst],
            KeyCode::End | KeyCode::Char('G') => vec![Action::SelectLast],
            KeyCode::Char('y') => match self.selected_record(state) {
                Some(record) => vec![Action::CopyToClipboard(record.to_plain_text())],
                None => vec![],
            },
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => vec![Action::SelectUp(1)],
            MouseEventKind::ScrollDown => vec![Action::SelectDown(1)],
            MouseEventKind::Down(MouseButton::Left) => {
                let pos = Position::new(event.column, event.row);
                let hit = self
                    .card_areas
                    .iter()
                    .find(|(_, r)| r.contains(pos))
                    .map(|(idx, _)| *idx);
                let mut actions = vec![Action::FocusPane(ComponentId::Results)];
                if let Some(idx) = hit {
                    actions.push(Action::SelectIndex(idx));
                }
                actions
            }
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        let len = state.results.len();
        match action {
            Action::SelectUp(n) => self.select(self.selected.saturating_sub(*n), len),
            Action::SelectDown(n) => self.select(self.selected.saturating_add(*n), len),
            Action::SelectFirst => self.select(0, len),
            Action::SelectLast => self.select(len.saturating_sub(1), len),
            Action::SelectIndex(idx) => self.select(*idx, len),
            _ => {}
        }
        vec![]
    }

    fn draw(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        focused: bool,
        state: &AppState,
        palette: &Palette,
    ) {
        self.render(area, frame.buffer_mut(), focused, &state.results, palette);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::LIGHT;
    use search_proto::record::{BODY_PLACEHOLDER, TITLE_PLACEHOLDER};

    fn record(title: Option<&str>, body: Option<&str>) -> ResultRecord {
        ResultRecord {
            role_title: title.map(str::to_string),
            chunk_text: body.map(str::to_string),
            ..ResultRecord::default()
        }
    }

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn render(panel: &mut ResultsPanel, records: &[ResultRecord], w: u16, h: u16) -> String {
        let area = Rect::new(0, 0, w, h);
        let mut buf = Buffer::empty(area);
        panel.render(area, &mut buf, true, records, &LIGHT);
        buffer_text(&buf)
    }

    #[test]
    fn test_card_views_keep_order_and_count() {
        let records: Vec<ResultRecord> = (0..4)
            .map(|i| record(Some(&format!("Role {}", i)), None))
            .collect();
        let cards = card_views(&records);
        assert_eq!(cards.len(), 4);
        let titles: Vec<&str> = cards.iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["Role 0", "Role 1", "Role 2", "Role 3"]);
    }

    #[test]
    fn test_card_view_placeholders() {
        let r = record(None, Some("Educates students"));
        let card = CardView::from_record(&r);
        assert_eq!(card.title, TITLE_PLACEHOLDER);
        assert_eq!(card.body, "Educates students");
        assert_eq!(card.role_badge, "Role N/A");

        let blank = ResultRecord::default();
        assert_eq!(CardView::from_record(&blank).body, BODY_PLACEHOLDER);
    }

    #[test]
    fn test_empty_renders_no_results_message() {
        let mut panel = ResultsPanel::new();
        let text = render(&mut panel, &[], 70, 10);
        assert!(text.contains(NO_RESULTS));
        assert!(text.contains("Search Results (0 found)"));
    }

    #[test]
    fn test_renders_one_card_per_record_in_order() {
        let records = vec![
            record(Some("Teacher"), Some("Educates students")),
            record(Some("Nurse"), Some("Cares for patients")),
            record(Some("Welder"), Some("Joins metal")),
        ];
        let mut panel = ResultsPanel::new();
        let text = render(&mut panel, &records, 60, 30);

        assert!(text.contains("Search Results (3 found)"));
        assert_eq!(text.matches("Role N/A").count(), 3);
        let t = text.find("Teacher").unwrap();
        let n = text.find("Nurse").unwrap();
        let w = text.find("Welder").unwrap();
        assert!(t < n && n < w);
        assert!(text.contains("Educates students"));
        assert_eq!(panel.card_areas.len(), 3);
    }

    #[test]
    fn test_missing_title_renders_placeholder() {
        let records = vec![record(None, Some("Only body text"))];
        let mut panel = ResultsPanel::new();
        let text = render(&mut panel, &records, 70, 10);
        assert!(text.contains(TITLE_PLACEHOLDER));
        assert!(text.contains("Only body text"));
    }

    #[test]
    fn test_selection_scrolls_into_view() {
        let records: Vec<ResultRecord> = (0..10)
            .map(|i| record(Some(&format!("Card{}", i)), Some("short")))
            .collect();
        let mut panel = ResultsPanel::new();
        let state = {
            let mut s = AppState::new(false, true);
            s.results = records.clone();
            s
        };
        panel.on_action(&Action::SelectLast, &state);
        assert_eq!(panel.selected(), 9);

        // Each card is 3 rows; 8 inner rows fit two cards.
        let text = render(&mut panel, &records, 40, 10);
        assert!(text.contains("Card9"));
        assert!(!text.contains("Card0"));
        assert!(text.contains("10/10"));
    }

    #[test]
    fn test_selection_clamps() {
        let mut panel = ResultsPanel::new();
        let mut state = AppState::new(false, true);
        state.results = vec![record(Some("A"), None), record(Some("B"), None)];
        panel.on_action(&Action::SelectDown(10), &state);
        assert_eq!(panel.selected(), 1);
        panel.on_action(&Action::SelectUp(10), &state);
        assert_eq!(panel.selected(), 0);
    }

    #[test]
    fn test_copy_selected_record() {
        let mut panel = ResultsPanel::new();
        let mut state = AppState::new(false, true);
        state.results = vec![record(Some("Teacher"), Some("Educates students"))];
        let actions = panel.handle_key(
            KeyEvent::new(KeyCode::Char('y'), ratatui::crossterm::event::KeyModifiers::NONE),
            &state,
        );
        assert_eq!(
            actions,
            vec![Action::CopyToClipboard(
                "Teacher (Role N/A)\nEducates students".to_string()
            )]
        );
    }
}
