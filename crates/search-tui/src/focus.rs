//! FocusRing: keyboard focus cycling between the search field and results.

use crate::action::ComponentId;

pub struct FocusRing {
    items: Vec<ComponentId>,
    current: usize,
}

impl FocusRing {
    pub fn new(items: Vec<ComponentId>) -> Self {
        Self { items, current: 0 }
    }

    pub fn current(&self) -> Option<ComponentId> {
        self.items.get(self.current).copied()
    }

    pub fn next(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.items.len();
        self.current()
    }

    pub fn prev(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = if self.current == 0 {
            self.items.len() - 1
        } else {
            self.current - 1
        };
        self.current()
    }

    pub fn set(&mut self, id: ComponentId) {
        if let Some(pos) = self.items.iter().position(|&x| x == id) {
            self.current = pos;
        }
    }

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.current() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles_both_ways() {
        let mut ring = FocusRing::new(vec![ComponentId::SearchBar, ComponentId::Results]);
        assert!(ring.is_focused(ComponentId::SearchBar));
        assert_eq!(ring.next(), Some(ComponentId::Results));
        assert_eq!(ring.next(), Some(ComponentId::SearchBar));
        assert_eq!(ring.prev(), Some(ComponentId::Results));
    }

    #[test]
    fn test_set_ignores_unknown() {
        let mut ring = FocusRing::new(vec![ComponentId::SearchBar, ComponentId::Results]);
        ring.set(ComponentId::HelpOverlay);
        assert!(ring.is_focused(ComponentId::SearchBar));
        ring.set(ComponentId::Results);
        assert!(ring.is_focused(ComponentId::Results));
    }
}
