pub mod cocktail_list;
pub mod header;
pub mod help_overlay;
pub mod recipe_panels;
