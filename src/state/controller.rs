/// Controller: the single owner of browsing state
///
/// The catalog, the query parameters, the view mode and the selected item
/// live here and change only through `dispatch`. Every intent ends with a
/// fresh engine evaluation, so the visible page and the clamped page
/// number are always consistent with the parameters.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use super::catalog::Catalog;
use super::data::{ArchiveItem, Category, CategoryId, ItemId, Source, SourceId};
use super::preferences::{Preferences, ViewMode};
use super::query::{self, QueryParameters, SortKey};
use super::settings::KeyValueStore;
use crate::deep_link;
use crate::error::PreferenceError;

/// A user intent, independent of any rendering technology
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// None = all sources
    SelectSource(Option<SourceId>),
    /// Category and date filters are applied together.
    /// Dates are raw `YYYY-MM-DD` input; malformed text disables the bound.
    ApplyFilters {
        categories: BTreeSet<CategoryId>,
        date_from: String,
        date_to: String,
    },
    Search(String),
    ResetFilters,
    SetSort(SortKey),
    SetViewMode(ViewMode),
    SetItemsPerPage(usize),
    NextPage,
    PreviousPage,
    GoToPage(usize),
    OpenItem(ItemId),
    CloseItem,
}

pub struct Controller {
    catalog: Catalog,
    /// Item id → position in `catalog.items`
    index: HashMap<ItemId, usize>,
    params: QueryParameters,
    view_mode: ViewMode,
    /// Positions (in `catalog.items`) of the items on the current page
    page: Vec<usize>,
    total_pages: usize,
    total_matches: usize,
    selected: Option<ItemId>,
    store: Box<dyn KeyValueStore>,
}

impl Controller {
    /// Load saved preferences, merge them over the defaults and
    /// evaluate the first page
    pub fn new(catalog: Catalog, store: Box<dyn KeyValueStore>) -> Self {
        let index = catalog
            .items
            .iter()
            .enumerate()
            .map(|(position, item)| (item.id, position))
            .collect();

        let mut params = QueryParameters::default();
        let mut view_mode = ViewMode::default();

        if let Some(preferences) = Preferences::load(&*store) {
            tracing::debug!("Restoring preferences: {:?}", preferences);
            preferences.apply(&mut view_mode, &mut params);
        }

        let mut controller = Self {
            catalog,
            index,
            params,
            view_mode,
            page: Vec::new(),
            total_pages: 1,
            total_matches: 0,
            selected: None,
            store,
        };
        controller.refresh();
        controller
    }

    /// Apply an intent and recompute the visible page.
    ///
    /// The state change always takes effect. `Err` only reports that the
    /// preferences could not be persisted.
    pub fn dispatch(&mut self, intent: Intent) -> Result<(), PreferenceError> {
        tracing::debug!("Intent: {:?}", intent);

        let mut preferences_changed = false;

        match intent {
            Intent::SelectSource(source) => {
                self.params.active_source = source;
                self.params.current_page = 1;
            }
            Intent::ApplyFilters {
                categories,
                date_from,
                date_to,
            } => {
                self.params.active_categories = categories;
                self.params.date_from = query::parse_date(&date_from);
                self.params.date_to = query::parse_date(&date_to);
                self.params.current_page = 1;
            }
            Intent::Search(text) => {
                self.params.search_query = text.trim().to_string();
                self.params.current_page = 1;
            }
            Intent::ResetFilters => {
                self.params.clear_filters();
            }
            Intent::SetSort(sort_key) => {
                self.params.sort_key = sort_key;
                preferences_changed = true;
            }
            Intent::SetViewMode(view_mode) => {
                self.view_mode = view_mode;
                preferences_changed = true;
            }
            Intent::SetItemsPerPage(per_page) => {
                self.params.items_per_page = per_page.max(1);
                preferences_changed = true;
            }
            Intent::NextPage => {
                if self.params.current_page < self.total_pages {
                    self.params.current_page += 1;
                }
            }
            Intent::PreviousPage => {
                if self.params.current_page > 1 {
                    self.params.current_page -= 1;
                }
            }
            Intent::GoToPage(page) => {
                self.params.current_page = page;
            }
            Intent::OpenItem(id) => self.open_item(id),
            Intent::CloseItem => {
                self.selected = None;
            }
        }

        self.refresh();

        if preferences_changed {
            self.save_preferences()
        } else {
            Ok(())
        }
    }

    /// Open the item named by a deep link (`?item=<id>`), if there is one
    pub fn open_deep_link(&mut self, link: &str) {
        match deep_link::parse_item_id(link) {
            Some(id) => self.open_item(id),
            None => tracing::debug!("Ignoring deep link without a valid item id: {}", link),
        }
    }

    /// Look up an item in the full collection (not just the current page)
    pub fn item(&self, id: ItemId) -> Option<&ArchiveItem> {
        self.index.get(&id).map(|&position| &self.catalog.items[position])
    }

    /// Items on the current page, in display order
    pub fn page_items(&self) -> impl Iterator<Item = &ArchiveItem> + '_ {
        self.page.iter().map(|&position| &self.catalog.items[position])
    }

    /// The item shown in the detail view
    pub fn selected_item(&self) -> Option<&ArchiveItem> {
        self.selected.and_then(|id| self.item(id))
    }

    pub fn params(&self) -> &QueryParameters {
        &self.params
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn current_page(&self) -> usize {
        self.params.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn total_matches(&self) -> usize {
        self.total_matches
    }

    pub fn sources(&self) -> &[Arc<Source>] {
        &self.catalog.sources
    }

    pub fn categories(&self) -> &[Arc<Category>] {
        &self.catalog.categories
    }

    /// Size of the full collection
    pub fn item_count(&self) -> usize {
        self.catalog.items.len()
    }

    fn open_item(&mut self, id: ItemId) {
        if self.index.contains_key(&id) {
            self.selected = Some(id);
        } else {
            tracing::debug!("No item with id {}, nothing to open", id);
        }
    }

    /// Re-run the engine and write the clamped page back into the params
    fn refresh(&mut self) {
        let result = query::evaluate_positions(&self.catalog.items, &self.params);

        self.params.current_page = result.current_page;
        self.total_pages = result.total_pages;
        self.total_matches = result.total_matches;
        self.page = result.positions;
    }

    fn save_preferences(&mut self) -> Result<(), PreferenceError> {
        Preferences::capture(self.view_mode, &self.params).save(&mut *self.store)
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("items", &self.catalog.items.len())
            .field("params", &self.params)
            .field("view_mode", &self.view_mode)
            .field("selected", &self.selected)
            .finish()
    }
}
