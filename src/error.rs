/// Error types for the archive browser
///
/// None of these ever reach the user as a crash. The controller and the
/// application shell turn every one of them into a default value, an ignored
/// write or a log line.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of the key-value persistence surface
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("settings database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("could not create data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure while saving preferences
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("could not encode preferences: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("could not write preferences: {0}")]
    Store(#[from] StoreError),
}

/// Failure while loading a catalog file
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("item {item_id} references unknown source {source_id}")]
    UnknownSource { item_id: i64, source_id: i64 },

    #[error("item {item_id} references unknown category {category_id}")]
    UnknownCategory { item_id: i64, category_id: i64 },

    #[error("duplicate item id {0}")]
    DuplicateItem(i64),

    #[error("item id {0} is not a positive integer")]
    InvalidItemId(i64),

    #[error("duplicate source id {0}")]
    DuplicateSource(i64),

    #[error("duplicate category id {0}")]
    DuplicateCategory(i64),
}
