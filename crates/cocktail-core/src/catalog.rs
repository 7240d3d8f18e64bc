//! Catalog loader: turns the bundled `cocktails.json` into an ordered list of
//! [`Recipe`]s.
//!
//! Three record shapes are accepted and unified into one `Recipe`:
//!
//! ```json
//! { "title": "A", "base": "Gin", "liqueur1": { "name": "Campari", "amount": 30 }, "glass": "Rocks" }
//! { "title": "B", "base": "Rum", "liqueur1": "Rum (50ml)", "glass": "Coupe" }
//! { "name":  "C", "base": "Rye", "syrup": "Sugar", "syrupAmount": 10, "glass": "Rocks" }
//! ```
//!
//! Optional fields that are null, empty or of the wrong type are treated as
//! absent. A record without a title, base or glass is skipped.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::assets::{AssetSource, CATALOG_ASSET};
use crate::recipe::{Component, Recipe, RecipeId};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("catalog resource `{name}` unavailable: {source}")]
    Missing {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog resource is empty")]
    Empty,
    #[error("catalog is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("catalog root must be a list of recipes")]
    NotAList,
}

impl LoadError {
    /// Human-readable reason, suitable for a notice.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

/// The ordered, read-only recipe list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

/// Optional components in display order: (accepted keys, flat amount key).
const COMPONENT_KEYS: [(&[&str], &str); 7] = [
    (&["liqueur1"], "liqueur1Amount"),
    (&["liqueur2"], "liqueur2Amount"),
    (&["puree"], "pureeAmount"),
    (&["syrup"], "syrupAmount"),
    (&["juice"], "juiceAmount"),
    (&["bitters"], "bittersAmount"),
    (&["topUp", "top_up", "topup"], "topUpAmount"),
];

impl Catalog {
    /// Read and parse the bundled catalog resource.
    pub fn load(assets: &dyn AssetSource) -> Result<Self, LoadError> {
        let content = assets
            .read_to_string(CATALOG_ASSET)
            .map_err(|source| LoadError::Missing {
                name: CATALOG_ASSET.to_string(),
                source,
            })?;
        let catalog = Self::from_json_str(&content)?;
        info!("loaded {} recipes from {}", catalog.len(), CATALOG_ASSET);
        Ok(catalog)
    }

    /// Re-parse the resource and replace the contents. On failure the
    /// catalog is left empty.
    pub fn reload(&mut self, assets: &dyn AssetSource) -> Result<(), LoadError> {
        match Self::load(assets) {
            Ok(fresh) => {
                *self = fresh;
                Ok(())
            }
            Err(e) => {
                self.recipes.clear();
                Err(e)
            }
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        if content.trim().is_empty() {
            return Err(LoadError::Empty);
        }
        let root: Value = serde_json::from_str(content)?;
        let Value::Array(records) = root else {
            return Err(LoadError::NotAList);
        };

        let mut recipes = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            let Some(obj) = record.as_object() else {
                warn!("catalog record #{} is not an object, skipping", idx);
                continue;
            };
            match parse_recipe(obj) {
                Ok(recipe) => recipes.push(recipe),
                Err(missing) => {
                    warn!("catalog record #{} has no {}, skipping", idx, missing);
                }
            }
        }
        debug!("parsed {} of {} catalog records", recipes.len(), records.len());
        Ok(Self { recipes })
    }

    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.get(id.index())
    }

    /// `(id, recipe)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (RecipeId, &Recipe)> {
        self.recipes
            .iter()
            .enumerate()
            .map(|(i, r)| (RecipeId(i), r))
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// Build a recipe from one JSON object. `Err` names the first missing
/// required field.
fn parse_recipe(obj: &Map<String, Value>) -> Result<Recipe, &'static str> {
    let title = text_field(obj, &["title", "name"]).ok_or("title")?;
    let base = text_field(obj, &["base"]).ok_or("base")?;
    let glass = text_field(obj, &["glass"]).ok_or("glass")?;

    let mut components = COMPONENT_KEYS
        .iter()
        .map(|(keys, amount_key)| component_field(obj, keys, amount_key));

    let mut next = || components.next().flatten();
    Ok(Recipe {
        title,
        base,
        liqueur1: next(),
        liqueur2: next(),
        puree: next(),
        syrup: next(),
        juice: next(),
        bitters: next(),
        top_up: next(),
        garnish: text_field(obj, &["garnish"]),
        glass,
        image: text_field(obj, &["image"]),
        ingredients: ingredients_field(obj),
    })
}

/// First of `keys` holding a non-blank string, trimmed.
fn text_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn component_field(obj: &Map<String, Value>, keys: &[&str], amount_key: &str) -> Option<Component> {
    let value = keys.iter().find_map(|k| obj.get(*k))?;
    let component = match value {
        Value::String(_) => {
            let name = text_field(obj, keys)?;
            match positive_amount(obj.get(amount_key)) {
                Some(amount) => Component::measured(name, amount),
                None => Component::text(name),
            }
        }
        Value::Object(_) => {
            let mut c: Component = serde_json::from_value(value.clone()).ok()?;
            c.name = c.name.trim().to_string();
            if c.name.is_empty() {
                return None;
            }
            if c.amount == Some(0) {
                c.amount = None;
            }
            c
        }
        _ => return None,
    };
    Some(component)
}

fn positive_amount(value: Option<&Value>) -> Option<u32> {
    value
        .and_then(Value::as_u64)
        .filter(|n| *n > 0)
        .and_then(|n| u32::try_from(n).ok())
}

fn ingredients_field(obj: &Map<String, Value>) -> Vec<String> {
    obj.get("ingredients")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
