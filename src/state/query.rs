/// Filter → sort → paginate query engine
///
/// `evaluate` is a pure function of the full collection and the query
/// parameters. It is total: every combination of parameters yields a
/// valid page, and the current page number is clamped into range as part
/// of the same pass because its validity depends on the filter result.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::data::{ArchiveItem, CategoryId, SourceId};

/// Default number of items per page
pub const DEFAULT_ITEMS_PER_PAGE: usize = 12;

/// Sort order for gallery listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Newest first
    #[default]
    DateDesc,
    /// Oldest first
    DateAsc,
    /// Title A → Z
    NameAsc,
    /// Title Z → A
    NameDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::DateDesc,
        SortKey::DateAsc,
        SortKey::NameAsc,
        SortKey::NameDesc,
    ];

    /// Wire name used in stored preferences
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::DateDesc => "date-desc",
            SortKey::DateAsc => "date-asc",
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
        }
    }

    /// Parse a wire name. Unrecognized keys fall back to `DateDesc`.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "date-asc" => SortKey::DateAsc,
            "name-asc" => SortKey::NameAsc,
            "name-desc" => SortKey::NameDesc,
            _ => SortKey::DateDesc,
        }
    }

    /// Human readable label for the sort picker
    pub fn label(self) -> &'static str {
        match self {
            SortKey::DateDesc => "Date (Newest first)",
            SortKey::DateAsc => "Date (Oldest first)",
            SortKey::NameAsc => "Name (A-Z)",
            SortKey::NameDesc => "Name (Z-A)",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for SortKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SortKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(SortKey::parse(&raw))
    }
}

/// Everything that determines which items are shown, in which order,
/// and which page of them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameters {
    /// None = all sources
    pub active_source: Option<SourceId>,
    /// Empty = all categories
    pub active_categories: BTreeSet<CategoryId>,
    /// Inclusive lower date bound
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub date_to: Option<NaiveDate>,
    /// Empty = no text filter
    pub search_query: String,
    pub sort_key: SortKey,
    /// 1-based
    pub current_page: usize,
    pub items_per_page: usize,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            active_source: None,
            active_categories: BTreeSet::new(),
            date_from: None,
            date_to: None,
            search_query: String::new(),
            sort_key: SortKey::default(),
            current_page: 1,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl QueryParameters {
    /// Drop every filter (source, categories, dates, search) and go back to page 1.
    /// Sort order and page size are display preferences and survive a reset.
    pub fn clear_filters(&mut self) {
        self.active_source = None;
        self.active_categories.clear();
        self.date_from = None;
        self.date_to = None;
        self.search_query.clear();
        self.current_page = 1;
    }
}

/// One evaluated page
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<'a> {
    /// Items on the current page, in display order
    pub page: Vec<&'a ArchiveItem>,
    /// Always >= 1
    pub total_pages: usize,
    /// Clamped into [1, total_pages]
    pub current_page: usize,
    /// Number of items that passed the filters
    pub total_matches: usize,
}

/// An evaluated page given as positions in the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice {
    pub positions: Vec<usize>,
    pub total_pages: usize,
    pub current_page: usize,
    pub total_matches: usize,
}

/// Parse a date filter input (`YYYY-MM-DD`).
/// Blank or malformed input disables the filter instead of failing.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Run the full filter → sort → paginate pipeline
pub fn evaluate<'a>(items: &'a [ArchiveItem], params: &QueryParameters) -> QueryResult<'a> {
    let slice = evaluate_positions(items, params);

    QueryResult {
        page: slice.positions.iter().map(|&position| &items[position]).collect(),
        total_pages: slice.total_pages,
        current_page: slice.current_page,
        total_matches: slice.total_matches,
    }
}

/// Same pipeline as `evaluate`, but the page is given as positions in
/// `items`. Items are never identified by id here, so a collection with
/// repeated ids still pages correctly.
pub fn evaluate_positions(items: &[ArchiveItem], params: &QueryParameters) -> PageSlice {
    let needle = params.search_query.to_lowercase();

    let mut filtered: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| matches(item, params, &needle))
        .map(|(position, _)| position)
        .collect();

    sort_positions(items, &mut filtered, params.sort_key);

    let per_page = params.items_per_page.max(1);
    let total_matches = filtered.len();
    let total_pages = total_matches.div_ceil(per_page).max(1);
    let current_page = params.current_page.clamp(1, total_pages);

    let positions = filtered
        .into_iter()
        .skip((current_page - 1) * per_page)
        .take(per_page)
        .collect();

    PageSlice {
        positions,
        total_pages,
        current_page,
        total_matches,
    }
}

/// All predicates are AND-combined, including search and the date bounds
fn matches(item: &ArchiveItem, params: &QueryParameters, needle: &str) -> bool {
    if let Some(source_id) = params.active_source {
        if item.source.id != source_id {
            return false;
        }
    }

    if !params.active_categories.is_empty()
        && !params.active_categories.contains(&item.category.id)
    {
        return false;
    }

    if let Some(from) = params.date_from {
        if item.date < from {
            return false;
        }
    }

    if let Some(to) = params.date_to {
        if item.date > to {
            return false;
        }
    }

    if needle.is_empty() {
        return true;
    }

    item.title.to_lowercase().contains(needle)
        || item.description.to_lowercase().contains(needle)
        || item.source.name.to_lowercase().contains(needle)
        || item.category.name.to_lowercase().contains(needle)
}

/// Stable sort: ties keep their collection order
fn sort_positions(items: &[ArchiveItem], positions: &mut [usize], key: SortKey) {
    match key {
        SortKey::DateDesc => positions.sort_by(|&a, &b| items[b].date.cmp(&items[a].date)),
        SortKey::DateAsc => positions.sort_by(|&a, &b| items[a].date.cmp(&items[b].date)),
        SortKey::NameAsc => {
            positions.sort_by_cached_key(|&position| TitleKey::new(&items[position].title))
        }
        SortKey::NameDesc => positions.sort_by_cached_key(|&position| {
            std::cmp::Reverse(TitleKey::new(&items[position].title))
        }),
    }
}

/// Collation key for titles, compared level by level like a locale
/// collator: base letters first (accents and case folded away), then
/// accents (unaccented first), then case (lowercase first).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct TitleKey {
    base: String,
    accented: String,
    case: Vec<bool>,
}

impl TitleKey {
    fn new(title: &str) -> Self {
        let mut base = String::with_capacity(title.len());
        for c in title.chars() {
            fold_char(c, &mut base);
        }

        Self {
            base,
            accented: title.chars().flat_map(char::to_lowercase).collect(),
            case: title.chars().map(char::is_uppercase).collect(),
        }
    }
}

/// Push the lowercase base letter(s) of `c`, without diacritics
fn fold_char(c: char, out: &mut String) {
    let base = match c {
        'à'..='å' | 'À'..='Å' | 'ā' | 'Ā' | 'ă' | 'Ă' | 'ą' | 'Ą' => 'a',
        'ç' | 'Ç' | 'ć' | 'Ć' | 'ĉ' | 'Ĉ' | 'ċ' | 'Ċ' | 'č' | 'Č' => 'c',
        'ď' | 'Ď' | 'đ' | 'Đ' | 'ð' | 'Ð' => 'd',
        'è'..='ë' | 'È'..='Ë' | 'ē' | 'Ē' | 'ĕ' | 'Ĕ' | 'ė' | 'Ė' | 'ę' | 'Ę' | 'ě' | 'Ě' => 'e',
        'ĝ' | 'Ĝ' | 'ğ' | 'Ğ' | 'ġ' | 'Ġ' | 'ģ' | 'Ģ' => 'g',
        'ĥ' | 'Ĥ' | 'ħ' | 'Ħ' => 'h',
        'ì'..='ï' | 'Ì'..='Ï' | 'ĩ' | 'Ĩ' | 'ī' | 'Ī' | 'ĭ' | 'Ĭ' | 'į' | 'Į' | 'ı' | 'İ' => 'i',
        'ĵ' | 'Ĵ' => 'j',
        'ķ' | 'Ķ' => 'k',
        'ĺ' | 'Ĺ' | 'ļ' | 'Ļ' | 'ľ' | 'Ľ' | 'ŀ' | 'Ŀ' | 'ł' | 'Ł' => 'l',
        'ñ' | 'Ñ' | 'ń' | 'Ń' | 'ņ' | 'Ņ' | 'ň' | 'Ň' => 'n',
        'ò'..='ö' | 'Ò'..='Ö' | 'ø' | 'Ø' | 'ō' | 'Ō' | 'ŏ' | 'Ŏ' | 'ő' | 'Ő' => 'o',
        'ŕ' | 'Ŕ' | 'ŗ' | 'Ŗ' | 'ř' | 'Ř' => 'r',
        'ś' | 'Ś' | 'ŝ' | 'Ŝ' | 'ş' | 'Ş' | 'š' | 'Š' => 's',
        'ţ' | 'Ţ' | 'ť' | 'Ť' | 'ŧ' | 'Ŧ' => 't',
        'ù'..='ü' | 'Ù'..='Ü' | 'ũ' | 'Ũ' | 'ū' | 'Ū' | 'ŭ' | 'Ŭ' | 'ů' | 'Ů' | 'ű' | 'Ű' | 'ų' | 'Ų' => 'u',
        'ŵ' | 'Ŵ' => 'w',
        'ý' | 'Ý' | 'ÿ' | 'Ÿ' | 'ŷ' | 'Ŷ' => 'y',
        'ź' | 'Ź' | 'ż' | 'Ż' | 'ž' | 'Ž' => 'z',
        'æ' | 'Æ' => return out.push_str("ae"),
        'œ' | 'Œ' => return out.push_str("oe"),
        'ß' => return out.push_str("ss"),
        'þ' | 'Þ' => return out.push_str("th"),
        _ => return out.extend(c.to_lowercase()),
    };
    out.push(base);
}
