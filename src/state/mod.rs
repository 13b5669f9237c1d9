/// State management module
///
/// This module handles all browsing state, including:
/// - Catalog data structures (data.rs) and loading (catalog.rs, sample.rs)
/// - The filter/sort/paginate query engine (query.rs)
/// - Display preferences and their storage (preferences.rs, settings.rs)
/// - The controller that owns it all and applies user intents (controller.rs)

pub mod catalog;
pub mod controller;
pub mod data;
pub mod preferences;
pub mod query;
pub mod sample;
pub mod settings;
