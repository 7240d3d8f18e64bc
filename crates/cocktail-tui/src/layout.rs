//! LayoutManager: which overlays are visible and which pane has focus.

use crate::action::ComponentId;
use crate::focus::FocusRing;

pub struct LayoutManager {
    pub show_help: bool,
    /// Footer keybindings bar.
    pub show_keys_bar: bool,
    pub focus: FocusRing,
}

impl LayoutManager {
    pub fn new(show_keys_bar: bool) -> Self {
        Self {
            show_help: false,
            show_keys_bar,
            focus: FocusRing::new(vec![ComponentId::CocktailList, ComponentId::RecipePanels]),
        }
    }

    pub fn focused(&self) -> Option<ComponentId> {
        self.focus.current()
    }

    pub fn focus_next(&mut self) -> Option<ComponentId> {
        self.focus.next()
    }

    pub fn focus_prev(&mut self) -> Option<ComponentId> {
        self.focus.prev()
    }

    pub fn focus_set(&mut self, id: ComponentId) {
        self.focus.set(id);
    }
}
