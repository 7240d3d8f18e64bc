//! Bundled cocktail catalog: loading, selection and detail formatting.
//!
//! Presentation lives elsewhere; it drives a [`selection::SelectionController`]
//! with selection events and applies the [`selection::RenderInstruction`]s it
//! gets back.

pub mod assets;
pub mod catalog;
pub mod config;
pub mod format;
pub mod platform;
pub mod recipe;
pub mod selection;
