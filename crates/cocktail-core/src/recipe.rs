use serde::Deserialize;

/// Position of a recipe in catalog order.
///
/// Selection is keyed by this rather than by the title, since nothing in the
/// catalog guarantees titles are unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipeId(pub usize);

impl RecipeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One ingredient slot of a recipe: a name plus an optional dosage.
///
/// `amount: None` means the component is textual-only and `name` is shown
/// verbatim (the catalog may already carry the dosage inside the text, as in
/// `"Rum (50ml)"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Component {
    pub name: String,
    #[serde(default)]
    pub amount: Option<u32>,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "ml".to_string()
}

impl Component {
    /// A component whose text already contains everything to display.
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: None,
            unit: default_unit(),
        }
    }

    pub fn measured(name: impl Into<String>, amount: u32) -> Self {
        Self {
            name: name.into(),
            amount: Some(amount),
            unit: default_unit(),
        }
    }

    /// Display text: `name (amount unit)` when measured, `name` otherwise.
    pub fn display(&self) -> String {
        match self.amount {
            Some(amount) => format!("{} ({}{})", self.name, amount, self.unit),
            None => self.name.clone(),
        }
    }
}

/// One cocktail's composition and display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Recipe {
    pub title: String,
    pub base: String,
    pub liqueur1: Option<Component>,
    pub liqueur2: Option<Component>,
    pub puree: Option<Component>,
    pub syrup: Option<Component>,
    pub juice: Option<Component>,
    pub bitters: Option<Component>,
    pub top_up: Option<Component>,
    pub garnish: Option<String>,
    pub glass: String,
    pub image: Option<String>,
    /// Explicit ingredient list, when the catalog provides one.
    pub ingredients: Vec<String>,
}

impl Recipe {
    /// The optional components in display order, paired with their field.
    pub fn components(&self) -> [(Field, Option<&Component>); 7] {
        [
            (Field::Liqueur1, self.liqueur1.as_ref()),
            (Field::Liqueur2, self.liqueur2.as_ref()),
            (Field::Puree, self.puree.as_ref()),
            (Field::Syrup, self.syrup.as_ref()),
            (Field::Juice, self.juice.as_ref()),
            (Field::Bitters, self.bitters.as_ref()),
            (Field::TopUp, self.top_up.as_ref()),
        ]
    }
}

/// Every field a detail line can come from, in the fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Base,
    Liqueur1,
    Liqueur2,
    Puree,
    Syrup,
    Juice,
    Bitters,
    TopUp,
    Garnish,
    Glass,
    Image,
    /// An entry of an explicit ingredient list.
    Ingredient,
}

impl Field {
    /// Short label for the presentation layer.
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "",
            Self::Base => "base",
            Self::Liqueur1 | Self::Liqueur2 => "liqueur",
            Self::Puree => "purée",
            Self::Syrup => "syrup",
            Self::Juice => "juice",
            Self::Bitters => "bitters",
            Self::TopUp => "top up",
            Self::Garnish => "garnish",
            Self::Glass => "glass",
            Self::Image => "image",
            Self::Ingredient => "·",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_display() {
        assert_eq!(Component::measured("Cointreau", 20).display(), "Cointreau (20ml)");
        assert_eq!(Component::text("Rum (50ml)").display(), "Rum (50ml)");

        let dashes = Component {
            name: "Angostura".to_string(),
            amount: Some(2),
            unit: " dashes".to_string(),
        };
        assert_eq!(dashes.display(), "Angostura (2 dashes)");
    }

    #[test]
    fn test_components_order() {
        let recipe = Recipe {
            top_up: Some(Component::text("Soda")),
            liqueur1: Some(Component::text("Triple sec")),
            ..Default::default()
        };
        let fields: Vec<Field> = recipe
            .components()
            .iter()
            .filter(|(_, c)| c.is_some())
            .map(|(f, _)| *f)
            .collect();
        assert_eq!(fields, vec![Field::Liqueur1, Field::TopUp]);
    }
}
