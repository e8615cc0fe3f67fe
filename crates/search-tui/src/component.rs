//! Component trait: the interface every focusable panel implements.
//!
//! - Components receive `AppState` read-only; they never mutate it.
//! - Components produce `Vec<Action>`; the App applies them.
//! - Components may keep view-only state (scroll offsets, last drawn areas).

use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

use crate::action::{Action, ComponentId};
use crate::app_state::AppState;
use crate::theme::Palette;

pub trait Component {
    /// Which component is this?
    fn id(&self) -> ComponentId;

    /// Handle a key event. Only called when this component has focus.
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action>;

    /// Handle a mouse event that landed inside `area`.
    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action>;

    /// Receive an action applied by the App. Components can react to actions
    /// even when not focused.
    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    /// Render the component into `area`.
    fn draw(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        focused: bool,
        state: &AppState,
        palette: &Palette,
    );
}
