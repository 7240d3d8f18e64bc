//! Action enum: all user-initiated intents.

use cocktail_core::recipe::RecipeId;

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    CocktailList,
    RecipePanels,
    HelpOverlay,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Selection ────────────────────────────────────────────────────────────
    Toggle(RecipeId),
    /// Click / delete on a shown panel.
    Dismiss(RecipeId),
    ResetAll,
    /// Re-read the bundled catalog.
    ReloadCatalog,

    // ── Presentation ─────────────────────────────────────────────────────────
    CycleView,
    ToggleUppercase,

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleHelp,
    ToggleKeys,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
}
