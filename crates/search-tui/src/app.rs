//! App: the search shell.
//!
//! Architecture:
//! - `App` owns every component and the authoritative `AppState`.
//! - A `tokio::mpsc` channel carries `AppMessage`s in from background tasks
//!   (terminal events, finished search requests).
//! - The event loop draws a frame, then awaits the next message or timer.
//! - Components return `Vec<Action>`; the App dispatches each Action.
//! - Each submitted search runs on its own task and reports back with the
//!   generation it was started under; stale reports are dropped.

use std::io;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use search_proto::client::SearchClient;
use search_proto::error::SearchError;
use search_proto::prefs::PreferenceStore;
use search_proto::record::ResultRecord;

use crate::{
    action::{Action, ComponentId},
    app_state::{AppState, SearchPhase},
    component::Component,
    components::{
        header::draw_header, help_overlay::HelpOverlay, results_panel::ResultsPanel,
        search_bar::SearchBar,
    },
    focus::FocusRing,
    theme::{self, Palette},
    widgets::{
        pane_chrome::pane_chrome,
        status_bar::{self, InputMode},
        text::truncate,
        toast::ToastManager,
    },
};

/// Messages delivered to the event loop.
#[derive(Debug)]
pub enum AppMessage {
    Event(Event),
    SearchResolved {
        generation: u64,
        outcome: Result<Vec<ResultRecord>, SearchError>,
    },
}

/// Last drawn pane rects, for mouse hit-testing.
#[derive(Debug, Default, Clone, Copy)]
struct PaneAreas {
    search_bar: Rect,
    results: Rect,
}

pub struct App {
    pub state: AppState,
    client: SearchClient,
    prefs: Box<dyn PreferenceStore>,

    search_bar: SearchBar,
    results_panel: ResultsPanel,
    help_overlay: HelpOverlay,
    toast: ToastManager,
    focus: FocusRing,
    pane_areas: PaneAreas,

    tx: mpsc::Sender<AppMessage>,
    rx: Option<mpsc::Receiver<AppMessage>>,
    should_quit: bool,
}

impl App {
    /// Build the shell. The theme preference is read exactly once, here;
    /// an absent or unreadable value means light.
    pub fn new(client: SearchClient, prefs: Box<dyn PreferenceStore>, show_keys_bar: bool) -> Self {
        let dark_mode = match prefs.load_dark_mode() {
            Ok(Some(dark)) => dark,
            Ok(None) => false,
            Err(e) => {
                warn!("could not read theme preference, using light: {:#}", e);
                false
            }
        };
        debug!("startup theme: {}", if dark_mode { "dark" } else { "light" });

        let (tx, rx) = mpsc::channel::<AppMessage>(256);
        Self {
            state: AppState::new(dark_mode, show_keys_bar),
            client,
            prefs,
            search_bar: SearchBar::new(),
            results_panel: ResultsPanel::new(),
            help_overlay: HelpOverlay::new(),
            toast: ToastManager::new(),
            focus: FocusRing::new(vec![ComponentId::SearchBar, ComponentId::Results]),
            pane_areas: PaneAreas::default(),
            tx,
            rx: Some(rx),
            should_quit: false,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut rx = self
            .rx
            .take()
            .ok_or_else(|| anyhow::anyhow!("event loop already started"))?;

        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        // ── Background task: keyboard/mouse events ────────────────────────────
        // Polls so the thread notices the receiver going away on quit.
        let event_tx = self.tx.clone();
        tokio::task::spawn_blocking(move || loop {
            if event_tx.is_closed() {
                break;
            }
            match event::poll(Duration::from_millis(200)) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                },
                Ok(false) => {}
                Err(_) => break,
            }
        });

        let result = self.event_loop(&mut terminal, &mut rx).await;

        // ── Teardown ──────────────────────────────────────────────────────────
        drop(rx);
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        info!("nco-search exiting");

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        rx: &mut mpsc::Receiver<AppMessage>,
    ) -> anyhow::Result<()> {
        // Toast expiry + spinner animation
        let mut toast_tick = tokio::time::interval(Duration::from_millis(100));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
                needs_redraw = false;
            }

            tokio::select! {
                msg = rx.recv() => match msg {
                    Some(msg) => {
                        self.handle_message(msg);
                        while let Ok(next) = rx.try_recv() {
                            self.handle_message(next);
                        }
                        needs_redraw = true;
                    }
                    None => break,
                },

                _ = toast_tick.tick() => {
                    if !self.toast.is_empty() {
                        self.toast.tick();
                        needs_redraw = true;
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    // ── Messages ──────────────────────────────────────────────────────────────

    pub fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                if key.kind == KeyEventKind::Release {
                    return;
                }
                for action in self.handle_key(key) {
                    self.dispatch(action);
                }
            }
            AppMessage::Event(Event::Mouse(mouse)) => {
                for action in self.handle_mouse(mouse) {
                    self.dispatch(action);
                }
            }
            AppMessage::Event(Event::Resize(w, h)) => self.dispatch(Action::Resize(w, h)),
            AppMessage::Event(_) => {}
            AppMessage::SearchResolved {
                generation,
                outcome,
            } => self.on_search_resolved(generation, outcome),
        }
    }

    /// Start a search for `text`. Blank text is a no-op; nothing is sent.
    pub fn submit_query(&mut self, text: &str) {
        let Some(ticket) = self.state.begin_search(text) else {
            debug!("blank query ignored");
            return;
        };
        info!("search #{} for {:?}", ticket.generation, ticket.query);
        self.toast
            .spinner(format!("searching \"{}\"", truncate(&ticket.query, 32)));

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = client.search(&ticket.query).await;
            let _ = tx
                .send(AppMessage::SearchResolved {
                    generation: ticket.generation,
                    outcome,
                })
                .await;
        });
    }

    fn on_search_resolved(
        &mut self,
        generation: u64,
        outcome: Result<Vec<ResultRecord>, SearchError>,
    ) {
        let count = match &outcome {
            Ok(records) => Some(records.len()),
            Err(e) => {
                error!("search #{} failed: {}", generation, e);
                None
            }
        };
        if self.state.resolve_search(generation, outcome) {
            if let Some(n) = count {
                info!("search #{} returned {} result(s)", generation, n);
            }
            self.results_panel.reset();
            self.toast.dismiss_spinner();
        } else {
            debug!(
                "dropping stale search #{} (current #{})",
                generation,
                self.state.current_generation()
            );
        }
    }

    /// Flip the theme, persist it, and keep going even if persisting fails.
    pub fn toggle_theme(&mut self) {
        let dark = !self.state.dark_mode;
        self.state.set_dark_mode(dark);
        if let Err(e) = self.prefs.save_dark_mode(dark) {
            warn!("could not save theme preference: {:#}", e);
        }
        self.toast
            .info(if dark { "dark theme" } else { "light theme" });
    }

    // ── Input routing ─────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            return vec![Action::Quit];
        }

        // Help overlay swallows everything else while open.
        if self.state.show_help {
            return self.help_overlay.handle_key(key, &self.state);
        }

        if ctrl && key.code == KeyCode::Char('t') {
            return vec![Action::ToggleTheme];
        }
        match key.code {
            KeyCode::Tab => return vec![Action::FocusNext],
            KeyCode::BackTab => return vec![Action::FocusPrev],
            KeyCode::F(1) => return vec![Action::ToggleHelp],
            _ => {}
        }

        match self.focus.current() {
            Some(ComponentId::SearchBar) => self.search_bar.handle_key(key, &self.state),
            _ => match key.code {
                KeyCode::Char('q') => vec![Action::Quit],
                KeyCode::Char('?') => vec![Action::ToggleHelp],
                KeyCode::Char('t') => vec![Action::ToggleTheme],
                KeyCode::Char('K') => vec![Action::ToggleKeys],
                KeyCode::Char('/') | KeyCode::Char('i') => {
                    vec![Action::FocusPane(ComponentId::SearchBar)]
                }
                _ => self.results_panel.handle_key(key, &self.state),
            },
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Vec<Action> {
        if self.state.show_help {
            return vec![];
        }
        let pos = Position::new(mouse.column, mouse.row);
        let areas = self.pane_areas;
        if areas.search_bar.contains(pos) {
            self.search_bar
                .handle_mouse(mouse, areas.search_bar, &self.state)
        } else if areas.results.contains(pos) {
            self.results_panel
                .handle_mouse(mouse, areas.results, &self.state)
        } else {
            vec![]
        }
    }

    /// Let components react first, then apply the action and any follow-ups.
    fn dispatch(&mut self, action: Action) {
        let follow_ups: Vec<Action> = {
            let s = &self.state;
            let mut all = Vec::new();
            all.extend(self.search_bar.on_action(&action, s));
            all.extend(self.results_panel.on_action(&action, s));
            all.extend(self.help_overlay.on_action(&action, s));
            all
        };
        self.apply_action(action);
        for action in follow_ups {
            self.apply_action(action);
        }
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::QueryChanged { value, cursor } => self.state.set_query(value, cursor),
            Action::Submit(text) => self.submit_query(&text),

            Action::FocusNext => {
                self.focus.next();
                self.sync_input_mode();
            }
            Action::FocusPrev => {
                self.focus.prev();
                self.sync_input_mode();
            }
            Action::FocusPane(id) => {
                self.focus.set(id);
                self.sync_input_mode();
            }
            // Selection is view state owned by the results panel.
            Action::SelectUp(_)
            | Action::SelectDown(_)
            | Action::SelectFirst
            | Action::SelectLast
            | Action::SelectIndex(_) => {}

            Action::ToggleTheme => self.toggle_theme(),
            Action::ToggleHelp => self.state.show_help = !self.state.show_help,
            Action::ToggleKeys => self.state.show_keys_bar = !self.state.show_keys_bar,
            Action::CopyToClipboard(text) => self.copy_to_clipboard(text),

            Action::Quit => self.should_quit = true,
            Action::Resize(w, h) => debug!("terminal resized to {}x{}", w, h),
        }
    }

    fn sync_input_mode(&mut self) {
        self.state.input_mode = if self.focus.is_focused(ComponentId::SearchBar) {
            InputMode::Input
        } else {
            InputMode::Browse
        };
    }

    fn copy_to_clipboard(&mut self, text: String) {
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text)) {
            Ok(()) => self.toast.success("copied card to clipboard"),
            Err(e) => {
                warn!("clipboard error: {}", e);
                self.toast.error("clipboard unavailable");
            }
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    pub fn draw(&mut self, frame: &mut Frame) {
        let palette = theme::palette(self.state.dark_mode);
        let area = frame.area();

        // Base fill so gaps between panes take the theme background.
        frame.render_widget(Block::default().style(palette.style_default()), area);

        let keys_h = if self.state.show_keys_bar { 1u16 } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(keys_h),
            ])
            .split(area);

        draw_header(frame, outer[0], &self.state, self.client.base_url(), palette);

        let bar_focused = self.focus.is_focused(ComponentId::SearchBar);
        self.search_bar
            .draw(frame, outer[1], bar_focused, &self.state, palette);
        self.pane_areas.search_bar = outer[1];

        self.draw_status_line(frame, outer[2], palette);
        self.draw_results_area(frame, outer[3], palette);
        self.pane_areas.results = outer[3];

        if self.state.show_keys_bar {
            status_bar::draw_keys_bar(
                frame,
                outer[4],
                self.state.input_mode,
                self.state.dark_mode,
                palette,
            );
        }

        if self.state.show_help {
            self.help_overlay
                .draw(frame, area, false, &self.state, palette);
        }
        self.toast.draw(frame, area, palette);
    }

    fn draw_status_line(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let (text, style) = match self.state.phase() {
            SearchPhase::Idle => (
                "type a query and press enter".to_string(),
                palette.style_muted(),
            ),
            SearchPhase::Searching => (
                format!("searching for \"{}\"", self.state.last_query),
                palette.style_accent(),
            ),
            SearchPhase::Populated => (
                format!(
                    "{} result(s) for \"{}\"",
                    self.state.results.len(),
                    self.state.last_query
                ),
                palette.style_secondary(),
            ),
            SearchPhase::Empty => (
                format!("No results found for \"{}\"", self.state.last_query),
                palette.style_secondary(),
            ),
        };
        let width = area.width.saturating_sub(1) as usize;
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" {}", truncate(&text, width)),
                style,
            ))),
            area,
        );
    }

    fn draw_results_area(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let focused = self.focus.is_focused(ComponentId::Results);
        let message = match self.state.phase() {
            SearchPhase::Populated | SearchPhase::Empty => {
                self.results_panel
                    .draw(frame, area, focused, &self.state, palette);
                return;
            }
            SearchPhase::Searching => "Searching...",
            SearchPhase::Idle => "Results appear here once you search.",
        };

        let block = pane_chrome("Search Results", focused, None, palette);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(inner.height.saturating_sub(1) / 2),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);
        frame.render_widget(
            Paragraph::new(Span::styled(message, palette.style_muted()))
                .alignment(Alignment::Center),
            rows[1],
        );
    }

    #[cfg(test)]
    async fn next_message(&mut self) -> AppMessage {
        let rx = self.rx.as_mut().expect("receiver taken");
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for a message")
            .expect("channel closed")
    }
}
