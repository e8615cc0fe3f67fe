//! AppState: the single authoritative UI state.
//!
//! Components read this during render/event handling but never mutate it.
//! The App is the only writer, and it writes exclusively through the
//! transition methods below (`set_query`, `begin_search`, `resolve_search`,
//! `set_dark_mode`).
//!
//! # Search lifecycle
//! ```text
//!  Idle ──submit──▶ Searching ──ok(n>0)──▶ Populated
//!                      ▲  │
//!                      │  └──ok(0) / err──▶ Empty
//!                      └──────submit (from any state)
//! ```
//! Every submission gets a fresh generation number. Only the completion that
//! carries the newest generation may leave `Searching`; older completions are
//! dropped so a slow early request can never overwrite a newer result list.

use search_proto::error::SearchError;
use search_proto::record::ResultRecord;

use crate::widgets::status_bar::InputMode;

/// Coarse phase derived from the flags, used for rendering decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Searching,
    Populated,
    Empty,
}

/// Handle for one dispatched search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    /// Trimmed query text that goes on the wire.
    pub query: String,
}

#[derive(Debug, Clone)]
pub struct AppState {
    // ── Query ─────────────────────────────────────────────────────────────
    pub query: String,
    /// Cursor position inside `query`, in chars.
    pub query_cursor: usize,
    /// Trimmed text of the newest submission.
    pub last_query: String,

    // ── Results ───────────────────────────────────────────────────────────
    pub results: Vec<ResultRecord>,
    pub is_loading: bool,
    pub has_searched: bool,
    generation: u64,

    // ── Presentation ──────────────────────────────────────────────────────
    pub dark_mode: bool,
    pub input_mode: InputMode,
    pub show_keys_bar: bool,
    pub show_help: bool,
}

impl AppState {
    pub fn new(dark_mode: bool, show_keys_bar: bool) -> Self {
        Self {
            query: String::new(),
            query_cursor: 0,
            last_query: String::new(),
            results: Vec::new(),
            is_loading: false,
            has_searched: false,
            generation: 0,
            dark_mode,
            input_mode: InputMode::Input,
            show_keys_bar,
            show_help: false,
        }
    }

    pub fn set_query(&mut self, value: String, cursor: usize) {
        self.query_cursor = cursor.min(value.chars().count());
        self.query = value;
    }

    /// True when the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_loading && !self.query.trim().is_empty()
    }

    /// Enter `Searching` for `text`. Returns `None` (and changes nothing)
    /// when the trimmed text is empty.
    pub fn begin_search(&mut self, text: &str) -> Option<SearchTicket> {
        let query = text.trim();
        if query.is_empty() {
            return None;
        }
        self.generation += 1;
        self.is_loading = true;
        self.has_searched = true;
        self.last_query = query.to_string();
        Some(SearchTicket {
            generation: self.generation,
            query: query.to_string(),
        })
    }

    /// Apply the outcome of request `generation`. Returns `false` when the
    /// completion is stale and was ignored.
    ///
    /// A failure clears the result list; there is no separate error state.
    pub fn resolve_search(
        &mut self,
        generation: u64,
        outcome: Result<Vec<ResultRecord>, SearchError>,
    ) -> bool {
        if generation != self.generation || !self.is_loading {
            return false;
        }
        self.results = outcome.unwrap_or_default();
        self.is_loading = false;
        true
    }

    pub fn current_generation(&self) -> u64 {
        self.generation
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;
    }

    pub fn phase(&self) -> SearchPhase {
        if self.is_loading {
            SearchPhase::Searching
        } else if !self.has_searched {
            SearchPhase::Idle
        } else if self.results.is_empty() {
            SearchPhase::Empty
        } else {
            SearchPhase::Populated
        }
    }
}
