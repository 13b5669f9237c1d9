/// The item collection and its reference sets
///
/// A catalog is loaded once at startup, either from the seeded sample
/// generator or from a JSON catalog file, and is read-only afterwards.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;

use super::data::{ArchiveItem, Category, ItemId, ItemMetadata, Source};
use crate::error::CatalogError;

/// Sources, categories and every item that references them
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub sources: Vec<Arc<Source>>,
    pub categories: Vec<Arc<Category>>,
    pub items: Vec<ArchiveItem>,
}

/// On-disk catalog layout. Items reference sources and categories by id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    sources: Vec<Source>,
    categories: Vec<Category>,
    items: Vec<ItemRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemRecord {
    id: ItemId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image_ref: String,
    date: NaiveDate,
    source_id: i64,
    category_id: i64,
    #[serde(default)]
    metadata: ItemMetadata,
}

impl Catalog {
    /// Read and resolve a JSON catalog file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_json(&json)?;
        tracing::info!(
            "📚 Loaded catalog from {}: {} items, {} sources, {} categories",
            path.display(),
            catalog.items.len(),
            catalog.sources.len(),
            catalog.categories.len()
        );
        Ok(catalog)
    }

    /// Parse a catalog and resolve item references.
    /// Dangling references, repeated ids and item ids below 1 are rejected.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;

        let sources: Vec<Arc<Source>> = file.sources.into_iter().map(Arc::new).collect();
        let categories: Vec<Arc<Category>> = file.categories.into_iter().map(Arc::new).collect();

        let mut source_by_id: HashMap<i64, &Arc<Source>> = HashMap::with_capacity(sources.len());
        for source in &sources {
            if source_by_id.insert(source.id, source).is_some() {
                return Err(CatalogError::DuplicateSource(source.id));
            }
        }

        let mut category_by_id: HashMap<i64, &Arc<Category>> = HashMap::with_capacity(categories.len());
        for category in &categories {
            if category_by_id.insert(category.id, category).is_some() {
                return Err(CatalogError::DuplicateCategory(category.id));
            }
        }

        let mut seen = HashSet::with_capacity(file.items.len());
        let mut items = Vec::with_capacity(file.items.len());

        for record in file.items {
            if record.id <= 0 {
                return Err(CatalogError::InvalidItemId(record.id));
            }
            if !seen.insert(record.id) {
                return Err(CatalogError::DuplicateItem(record.id));
            }

            let source = source_by_id
                .get(&record.source_id)
                .ok_or(CatalogError::UnknownSource {
                    item_id: record.id,
                    source_id: record.source_id,
                })?;
            let category = category_by_id
                .get(&record.category_id)
                .ok_or(CatalogError::UnknownCategory {
                    item_id: record.id,
                    category_id: record.category_id,
                })?;

            items.push(ArchiveItem {
                id: record.id,
                title: record.title,
                description: record.description,
                image_ref: record.image_ref,
                date: record.date,
                source: Arc::clone(source),
                category: Arc::clone(category),
                metadata: record.metadata,
            });
        }

        Ok(Self {
            sources,
            categories,
            items,
        })
    }
}
