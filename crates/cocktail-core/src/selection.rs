//! Selection controller: which recipes are shown, and what their panels say.
//!
//! Every recipe is either inactive or active. At most [`MAX_ACTIVE`] recipes
//! are active at once; a selection beyond the cap is ignored, nothing is
//! evicted. Selector appearance and panel presence are both derived from the
//! same ordered active list, so they cannot drift apart.
//!
//! Each operation returns a [`RenderInstruction`] describing what the
//! presentation layer has to change.

use tracing::debug;

use crate::assets::AssetSource;
use crate::catalog::{Catalog, LoadError};
use crate::format::{render_lines, DetailLine, FormatOptions};
use crate::recipe::RecipeId;

/// Maximum number of recipe panels shown at once.
pub const MAX_ACTIVE: usize = 4;

/// A displayed recipe panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub recipe: RecipeId,
    pub lines: Vec<DetailLine>,
}

/// What the presentation layer must add, remove or redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderInstruction {
    /// Show a new panel and mark its selector active.
    AddPanel(Panel),
    /// Drop the panel and mark its selector inactive.
    RemovePanel { recipe: RecipeId },
    /// Drop every panel; all selectors become inactive.
    ClearPanels { removed: Vec<RecipeId> },
    /// Replace the contents of every shown panel, in panel order.
    RedrawPanels(Vec<Panel>),
    /// Nothing changes.
    Noop,
}

impl RenderInstruction {
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Noop)
    }
}

pub struct SelectionController {
    catalog: Catalog,
    /// Active recipes in activation order.
    active: Vec<RecipeId>,
    options: FormatOptions,
}

impl SelectionController {
    pub fn new(catalog: Catalog, options: FormatOptions) -> Self {
        Self {
            catalog,
            active: Vec::with_capacity(MAX_ACTIVE),
            options,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn options(&self) -> FormatOptions {
        self.options
    }

    /// Active recipes, in panel order.
    pub fn active(&self) -> &[RecipeId] {
        &self.active
    }

    pub fn is_active(&self, id: RecipeId) -> bool {
        self.active.contains(&id)
    }

    /// Panel slot (0-based) of an active recipe.
    pub fn slot_of(&self, id: RecipeId) -> Option<usize> {
        self.active.iter().position(|&a| a == id)
    }

    pub fn is_full(&self) -> bool {
        self.active.len() >= MAX_ACTIVE
    }

    /// Flip a recipe between inactive and active.
    pub fn toggle(&mut self, id: RecipeId) -> RenderInstruction {
        if let Some(slot) = self.slot_of(id) {
            self.active.remove(slot);
            debug!("deactivated recipe {} ({} active)", id.index(), self.active.len());
            return RenderInstruction::RemovePanel { recipe: id };
        }
        if self.is_full() {
            debug!("ignoring recipe {}: {} already active", id.index(), MAX_ACTIVE);
            return RenderInstruction::Noop;
        }
        let Some(panel) = self.panel_for(id) else {
            debug!("ignoring unknown recipe {}", id.index());
            return RenderInstruction::Noop;
        };
        self.active.push(id);
        debug!("activated recipe {} ({} active)", id.index(), self.active.len());
        RenderInstruction::AddPanel(panel)
    }

    /// The user clicked a shown panel: hide it. Clicking where no panel is
    /// shown for `id` never activates anything.
    pub fn dismiss(&mut self, id: RecipeId) -> RenderInstruction {
        if self.is_active(id) {
            self.toggle(id)
        } else {
            RenderInstruction::Noop
        }
    }

    pub fn reset_all(&mut self) -> RenderInstruction {
        let removed = std::mem::take(&mut self.active);
        debug!("reset: cleared {} active recipes", removed.len());
        RenderInstruction::ClearPanels { removed }
    }

    /// Switch presentation options and re-render every shown panel.
    pub fn set_options(&mut self, options: FormatOptions) -> RenderInstruction {
        if options == self.options {
            return RenderInstruction::Noop;
        }
        self.options = options;
        RenderInstruction::RedrawPanels(self.panels())
    }

    /// Re-read the catalog from `assets`. Ids may refer to different recipes
    /// afterwards, so the active set is dropped; apply [`Self::reset_all`]
    /// first to clear the panels. On failure the catalog is left empty.
    pub fn reload_catalog(&mut self, assets: &dyn AssetSource) -> Result<(), LoadError> {
        self.active.clear();
        self.catalog.reload(assets)
    }

    /// Current panels, in slot order.
    pub fn panels(&self) -> Vec<Panel> {
        self.active
            .iter()
            .filter_map(|&id| self.panel_for(id))
            .collect()
    }

    fn panel_for(&self, id: RecipeId) -> Option<Panel> {
        let recipe = self.catalog.get(id)?;
        Some(Panel {
            recipe: id,
            lines: render_lines(recipe, &self.options),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ViewMode;
    use crate::recipe::{Component, Field, Recipe};

    fn recipe(title: &str) -> Recipe {
        Recipe {
            title: title.to_string(),
            base: format!("{} base", title),
            liqueur1: Some(Component::text("Rum (50ml)")),
            glass: "Rocks".to_string(),
            image: Some("rocks".to_string()),
            ..Default::default()
        }
    }

    fn controller(n: usize) -> SelectionController {
        let recipes = (1..=n).map(|i| recipe(&format!("Cocktail {}", i))).collect();
        SelectionController::new(Catalog::from_recipes(recipes), FormatOptions::default())
    }

    #[test]
    fn test_toggle_on_adds_panel_with_details() {
        let mut c = controller(3);
        match c.toggle(RecipeId(1)) {
            RenderInstruction::AddPanel(panel) => {
                assert_eq!(panel.recipe, RecipeId(1));
                assert_eq!(panel.lines[0].text, "Cocktail 2");
                assert_eq!(panel.lines.last().unwrap().field, Field::Glass);
            }
            other => panic!("expected AddPanel, got {:?}", other),
        }
        assert!(c.is_active(RecipeId(1)));
        assert_eq!(c.active(), &[RecipeId(1)]);
    }

    #[test]
    fn test_toggle_twice_is_involution() {
        let mut c = controller(3);
        c.toggle(RecipeId(0));
        let before = c.active().to_vec();
        c.toggle(RecipeId(2));
        assert_eq!(
            c.toggle(RecipeId(2)),
            RenderInstruction::RemovePanel { recipe: RecipeId(2) }
        );
        assert_eq!(c.active(), before.as_slice());
        assert!(!c.is_active(RecipeId(2)));
    }

    #[test]
    fn test_cap_is_silently_enforced() {
        let mut c = controller(6);
        for i in 0..4 {
            assert!(matches!(c.toggle(RecipeId(i)), RenderInstruction::AddPanel(_)));
        }
        assert!(c.is_full());
        assert_eq!(c.toggle(RecipeId(4)), RenderInstruction::Noop);
        assert_eq!(c.toggle(RecipeId(5)), RenderInstruction::Noop);
        assert_eq!(c.active().len(), MAX_ACTIVE);
        assert!(!c.is_active(RecipeId(4)));
        // The oldest panel is not evicted.
        assert!(c.is_active(RecipeId(0)));
    }

    #[test]
    fn test_unknown_recipe_is_noop() {
        let mut c = controller(2);
        assert_eq!(c.toggle(RecipeId(9)), RenderInstruction::Noop);
        assert!(c.active().is_empty());
    }

    #[test]
    fn test_reset_all_clears_everything() {
        let mut c = controller(5);
        c.toggle(RecipeId(3));
        c.toggle(RecipeId(0));
        assert_eq!(
            c.reset_all(),
            RenderInstruction::ClearPanels {
                removed: vec![RecipeId(3), RecipeId(0)]
            }
        );
        assert!(c.active().is_empty());
        assert!(c.panels().is_empty());

        assert_eq!(
            c.reset_all(),
            RenderInstruction::ClearPanels { removed: vec![] }
        );
    }

    #[test]
    fn test_dismiss_only_removes() {
        let mut c = controller(3);
        assert_eq!(c.dismiss(RecipeId(1)), RenderInstruction::Noop);
        assert!(!c.is_active(RecipeId(1)));

        c.toggle(RecipeId(1));
        assert_eq!(
            c.dismiss(RecipeId(1)),
            RenderInstruction::RemovePanel { recipe: RecipeId(1) }
        );
        assert!(!c.is_active(RecipeId(1)));
        assert_eq!(c.slot_of(RecipeId(1)), None);
    }

    #[test]
    fn test_panels_follow_activation_order() {
        let mut c = controller(4);
        c.toggle(RecipeId(2));
        c.toggle(RecipeId(0));
        c.toggle(RecipeId(3));
        let order: Vec<RecipeId> = c.panels().iter().map(|p| p.recipe).collect();
        assert_eq!(order, vec![RecipeId(2), RecipeId(0), RecipeId(3)]);
        assert_eq!(c.slot_of(RecipeId(3)), Some(2));

        c.toggle(RecipeId(0));
        assert_eq!(c.slot_of(RecipeId(3)), Some(1));
    }

    #[test]
    fn test_duplicate_titles_are_independent() {
        let catalog = Catalog::from_recipes(vec![recipe("Twin"), recipe("Twin")]);
        let mut c = SelectionController::new(catalog, FormatOptions::default());
        c.toggle(RecipeId(1));
        assert!(c.is_active(RecipeId(1)));
        assert!(!c.is_active(RecipeId(0)));
    }

    #[test]
    fn test_set_options_redraws_active_panels() {
        let mut c = controller(3);
        c.toggle(RecipeId(0));
        c.toggle(RecipeId(2));

        let opts = FormatOptions {
            view: ViewMode::Image,
            uppercase: true,
        };
        match c.set_options(opts) {
            RenderInstruction::RedrawPanels(panels) => {
                assert_eq!(panels.len(), 2);
                assert_eq!(panels[0].recipe, RecipeId(0));
                assert_eq!(panels[0].lines[0].text, "COCKTAIL 1");
                assert_eq!(panels[0].lines.last().unwrap().field, Field::Image);
            }
            other => panic!("expected RedrawPanels, got {:?}", other),
        }
        assert_eq!(c.options(), opts);
        assert_eq!(c.set_options(opts), RenderInstruction::Noop);
        assert_eq!(c.active(), &[RecipeId(0), RecipeId(2)]);
    }

    #[test]
    fn test_reload_catalog_drops_selection() {
        let mut c = controller(3);
        c.toggle(RecipeId(0));
        c.reload_catalog(&crate::assets::BundledAssets).unwrap();
        assert!(c.active().is_empty());
        assert!(c.catalog().len() > 3);
    }

    #[test]
    fn test_active_set_never_exceeds_cap() {
        let mut c = controller(7);
        // A deterministic pseudo-random walk over the catalog.
        let mut x: usize = 17;
        for _ in 0..500 {
            x = (x * 1103515245 + 12345) % 2147483648;
            let id = RecipeId(x % 8);
            let _ = if x % 11 == 0 {
                c.reset_all()
            } else if x % 5 == 0 {
                c.dismiss(id)
            } else {
                c.toggle(id)
            };
            assert!(c.active().len() <= MAX_ACTIVE);
            let mut sorted = c.active().to_vec();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), c.active().len());
        }
    }
}
