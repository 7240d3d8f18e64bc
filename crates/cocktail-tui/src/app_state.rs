//! AppState: shared read-only data passed to all components.
//!
//! Components read this during render/event handling but never mutate it.
//! The App event-loop is the only writer: it forwards selection events to the
//! controller and applies the returned `RenderInstruction` to `panels`.

use cocktail_core::format::FormatOptions;
use cocktail_core::recipe::{Recipe, RecipeId};
use cocktail_core::selection::{Panel, RenderInstruction, SelectionController};

pub struct AppState {
    pub selection: SelectionController,
    /// Panels as currently displayed, in slot order.
    pub panels: Vec<Panel>,
    /// Reason the catalog failed to load, if it did.
    pub load_error: Option<String>,
}

impl AppState {
    pub fn new(selection: SelectionController, load_error: Option<String>) -> Self {
        let panels = selection.panels();
        Self {
            selection,
            panels,
            load_error,
        }
    }

    pub fn recipe(&self, id: RecipeId) -> Option<&Recipe> {
        self.selection.catalog().get(id)
    }

    pub fn options(&self) -> FormatOptions {
        self.selection.options()
    }

    /// Slot number (1-based) shown next to an active selector.
    pub fn slot_label(&self, id: RecipeId) -> Option<usize> {
        self.selection.slot_of(id).map(|s| s + 1)
    }

    /// Apply a controller instruction to the displayed panels.
    pub fn apply(&mut self, instruction: RenderInstruction) {
        match instruction {
            RenderInstruction::AddPanel(panel) => self.panels.push(panel),
            RenderInstruction::RemovePanel { recipe } => {
                self.panels.retain(|p| p.recipe != recipe);
            }
            RenderInstruction::ClearPanels { .. } => self.panels.clear(),
            RenderInstruction::RedrawPanels(panels) => self.panels = panels,
            RenderInstruction::Noop => {}
        }
        debug_assert_eq!(
            self.panels.iter().map(|p| p.recipe).collect::<Vec<_>>(),
            self.selection.active(),
            "displayed panels diverged from the selection"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cocktail_core::catalog::Catalog;

    fn state() -> AppState {
        let catalog = Catalog::from_json_str(
            r#"[
                {"title": "A", "base": "Gin", "glass": "Rocks"},
                {"title": "B", "base": "Rum", "glass": "Coupe"},
                {"title": "C", "base": "Vodka", "glass": "Highball"}
            ]"#,
        )
        .unwrap();
        AppState::new(
            SelectionController::new(catalog, FormatOptions::default()),
            None,
        )
    }

    #[test]
    fn test_panels_track_selection() {
        let mut s = state();
        let i = s.selection.toggle(RecipeId(2));
        s.apply(i);
        let i = s.selection.toggle(RecipeId(0));
        s.apply(i);
        assert_eq!(s.panels.len(), 2);
        assert_eq!(s.slot_label(RecipeId(0)), Some(2));

        let i = s.selection.dismiss(RecipeId(2));
        s.apply(i);
        assert_eq!(s.panels.len(), 1);
        assert_eq!(s.slot_label(RecipeId(0)), Some(1));
        assert_eq!(s.slot_label(RecipeId(2)), None);

        let i = s.selection.reset_all();
        s.apply(i);
        assert!(s.panels.is_empty());
    }
}
