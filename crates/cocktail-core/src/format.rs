//! Detail formatting: turns a [`Recipe`] into display lines.
//!
//! Line order is fixed: title, base, liqueur1, liqueur2, puree, syrup, juice,
//! bitters, topUp, garnish, glass, then the image reference when requested.
//! Absent optional fields produce no line.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::recipe::{Field, Recipe};

/// What a recipe panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Title and ingredient names only.
    Ingredients,
    /// Every field in the fixed detail order.
    #[default]
    Recipe,
    /// Full detail plus the glass image.
    Image,
}

impl ViewMode {
    pub fn next(self) -> Self {
        match self {
            Self::Ingredients => Self::Recipe,
            Self::Recipe => Self::Image,
            Self::Image => Self::Ingredients,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ingredients => "ingredients",
            Self::Recipe => "recipe",
            Self::Image => "image",
        }
    }
}

/// Presentation options applied while formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatOptions {
    pub view: ViewMode,
    /// Upper-case every line. Purely cosmetic.
    pub uppercase: bool,
}

/// One formatted line of recipe detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    pub field: Field,
    pub text: String,
    /// Byte range of the parenthesised dosage in `text`, e.g. `(50ml)`.
    pub highlight: Option<Range<usize>>,
}

impl DetailLine {
    fn new(field: Field, text: &str, opts: &FormatOptions) -> Self {
        let text = if opts.uppercase {
            text.to_uppercase()
        } else {
            text.to_string()
        };
        let highlight = match field {
            Field::Image => None,
            _ => dosage_span(&text),
        };
        Self {
            field,
            text,
            highlight,
        }
    }

    /// `(before, highlighted, after)` slices of `text`.
    pub fn split_highlight(&self) -> (&str, &str, &str) {
        match &self.highlight {
            Some(r) => (
                &self.text[..r.start],
                &self.text[r.clone()],
                &self.text[r.end..],
            ),
            None => (self.text.as_str(), "", ""),
        }
    }
}

fn dosage_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\([^()]*\)").expect("dosage pattern is valid"))
}

/// Byte range of the first `(...)` group in `text`, parentheses included.
pub fn dosage_span(text: &str) -> Option<Range<usize>> {
    dosage_pattern().find(text).map(|m| m.range())
}

/// Lines for the recipe and image views.
pub fn format_details(recipe: &Recipe, opts: &FormatOptions) -> Vec<DetailLine> {
    let mut lines = Vec::with_capacity(12);
    lines.push(DetailLine::new(Field::Title, &recipe.title, opts));
    lines.push(DetailLine::new(Field::Base, &recipe.base, opts));
    for (field, component) in recipe.components() {
        if let Some(c) = component {
            lines.push(DetailLine::new(field, &c.display(), opts));
        }
    }
    if let Some(garnish) = recipe.garnish.as_deref().filter(|g| !g.is_empty()) {
        lines.push(DetailLine::new(Field::Garnish, garnish, opts));
    }
    lines.push(DetailLine::new(Field::Glass, &recipe.glass, opts));
    if opts.view == ViewMode::Image {
        if let Some(image) = recipe.image.as_deref().filter(|i| !i.is_empty()) {
            lines.push(DetailLine::new(Field::Image, image, opts));
        }
    }
    lines
}

/// Lines for the ingredients view: the title, then the explicit ingredient
/// list or, without one, the base and every present component.
pub fn ingredient_lines(recipe: &Recipe, opts: &FormatOptions) -> Vec<DetailLine> {
    let mut lines = vec![DetailLine::new(Field::Title, &recipe.title, opts)];
    if !recipe.ingredients.is_empty() {
        lines.extend(
            recipe
                .ingredients
                .iter()
                .map(|i| DetailLine::new(Field::Ingredient, i, opts)),
        );
        return lines;
    }
    lines.push(DetailLine::new(Field::Base, &recipe.base, opts));
    for (field, component) in recipe.components() {
        if let Some(c) = component {
            lines.push(DetailLine::new(field, &c.display(), opts));
        }
    }
    lines
}

/// Lines for whichever view `opts` selects.
pub fn render_lines(recipe: &Recipe, opts: &FormatOptions) -> Vec<DetailLine> {
    match opts.view {
        ViewMode::Ingredients => ingredient_lines(recipe, opts),
        ViewMode::Recipe | ViewMode::Image => format_details(recipe, opts),
    }
}
