/// Shared data structures for the application state
///
/// These structs represent the catalog model that flows between
/// the catalog loader, the query engine and the UI layer.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;

pub type ItemId = i64;
pub type SourceId = i64;
pub type CategoryId = i64;

/// An archive an item was collected from (e.g., "National Archives")
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Source {
    pub id: SourceId,
    pub name: String,
}

/// A media category (e.g., "Photos")
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Descriptive metadata. Shown in the detail view, never filtered on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ItemMetadata {
    /// File format (e.g., "PDF")
    pub format: String,
    /// Human readable size (e.g., "4.2 MB")
    pub size: String,
    /// Pixel dimensions (e.g., "800x600")
    pub resolution: String,
    pub language: String,
}

/// Represents a single item in the archive
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveItem {
    /// Unique, stable ID
    pub id: ItemId,
    pub title: String,
    pub description: String,
    /// Opaque image locator (URL or path), displayed as-is
    pub image_ref: String,
    pub date: NaiveDate,
    /// Shared with every other item from the same source
    pub source: Arc<Source>,
    /// Shared with every other item in the same category
    pub category: Arc<Category>,
    pub metadata: ItemMetadata,
}

impl ArchiveItem {
    /// Date formatted for display (e.g., "3/14/1952")
    pub fn display_date(&self) -> String {
        self.date.format("%-m/%-d/%Y").to_string()
    }

    /// Shortened description for gallery cards
    pub fn excerpt(&self, max_chars: usize) -> String {
        let mut chars = self.description.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{}...", head)
        } else {
            head
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(description: &str) -> ArchiveItem {
        ArchiveItem {
            id: 1,
            title: "Harbor at dawn".to_string(),
            description: description.to_string(),
            image_ref: "harbor.jpg".to_string(),
            date: NaiveDate::from_ymd_opt(1952, 3, 4).unwrap(),
            source: Arc::new(Source { id: 1, name: "Media Archive".to_string() }),
            category: Arc::new(Category { id: 2, name: "Photos".to_string() }),
            metadata: ItemMetadata::default(),
        }
    }

    #[test]
    fn test_display_date() {
        assert_eq!(item("").display_date(), "3/4/1952");
    }

    #[test]
    fn test_excerpt_truncates_long_descriptions() {
        let long = "x".repeat(100);
        let excerpt = item(&long).excerpt(80);
        assert_eq!(excerpt.len(), 83);
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn test_excerpt_keeps_short_descriptions() {
        assert_eq!(item("Short note").excerpt(80), "Short note");
        assert_eq!(item(&"y".repeat(80)).excerpt(80), "y".repeat(80));
    }
}
