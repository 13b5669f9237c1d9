use iced::keyboard::{self, key, Key};
use iced::{Element, Subscription, Task, Theme};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod deep_link;
mod error;
mod state;
mod ui;

use config::AppConfig;
use state::catalog::Catalog;
use state::controller::{Controller, Intent};
use state::data::{CategoryId, ItemId};
use state::settings::{KeyValueStore, MemoryStore, SqliteStore};
use ui::FilterDraft;

/// Main application state
struct ArchiveBrowser {
    /// Owns the catalog, query parameters and preferences
    controller: Controller,
    /// Filter inputs not yet applied
    draft: FilterDraft,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Anything that changes browsing state
    Intent(Intent),
    /// Search box edited
    SearchChanged(String),
    /// Search button or Enter in the search box
    SearchSubmitted,
    DateFromChanged(String),
    DateToChanged(String),
    CategoryToggled(CategoryId, bool),
    /// Apply category and date drafts
    ApplyFilters,
    /// Clear drafts and every filter
    ResetFilters,
    /// Put the item's deep link on the clipboard
    CopyShareLink(ItemId),
}

impl ArchiveBrowser {
    /// Create a new instance of the application
    fn new(config: AppConfig) -> (Self, Task<Message>) {
        let catalog = load_catalog(&config);
        let store = open_store(&config);

        let mut controller = Controller::new(catalog, store);
        if let Some(link) = &config.deep_link {
            controller.open_deep_link(link);
        }

        tracing::info!("🗂️  Archive Browser initialized with {} items", controller.item_count());

        let status = format!("Ready. {} items in catalog.", controller.item_count());

        (
            ArchiveBrowser {
                controller,
                draft: FilterDraft::default(),
                status,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Intent(intent) => self.dispatch(intent),
            Message::SearchChanged(text) => self.draft.search = text,
            Message::SearchSubmitted => {
                let query = self.draft.search.clone();
                self.dispatch(Intent::Search(query));
            }
            Message::DateFromChanged(text) => self.draft.date_from = text,
            Message::DateToChanged(text) => self.draft.date_to = text,
            Message::CategoryToggled(id, checked) => {
                if checked {
                    self.draft.categories.insert(id);
                } else {
                    self.draft.categories.remove(&id);
                }
            }
            Message::ApplyFilters => {
                self.dispatch(Intent::ApplyFilters {
                    categories: self.draft.categories.clone(),
                    date_from: self.draft.date_from.clone(),
                    date_to: self.draft.date_to.clone(),
                });
            }
            Message::ResetFilters => {
                self.draft = FilterDraft::default();
                self.dispatch(Intent::ResetFilters);
            }
            Message::CopyShareLink(id) => {
                let link = deep_link::share_link(deep_link::SHARE_BASE, id);
                self.status = format!("Copied {}", link);
                return iced::clipboard::write(link);
            }
        }

        Task::none()
    }

    /// Forward an intent to the controller. Failed preference writes are
    /// reported in the status line and otherwise ignored.
    fn dispatch(&mut self, intent: Intent) {
        if let Err(e) = self.controller.dispatch(intent) {
            tracing::warn!("⚠️  {}", e);
            self.status = "Preferences could not be saved.".to_string();
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        ui::view(&self.controller, &self.draft, &self.status)
    }

    /// Keyboard shortcuts: Escape closes the detail view, arrows flip pages
    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(handle_key)
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn handle_key(key: Key, _modifiers: keyboard::Modifiers) -> Option<Message> {
    let intent = match key {
        Key::Named(key::Named::Escape) => Intent::CloseItem,
        Key::Named(key::Named::ArrowLeft) => Intent::PreviousPage,
        Key::Named(key::Named::ArrowRight) => Intent::NextPage,
        _ => return None,
    };
    Some(Message::Intent(intent))
}

/// Configured catalog file, or seeded sample data when unset or unreadable
fn load_catalog(config: &AppConfig) -> Catalog {
    if let Some(path) = &config.catalog_path {
        match Catalog::load(path) {
            Ok(catalog) => return catalog,
            Err(e) => tracing::warn!("⚠️  {}; falling back to sample data", e),
        }
    }

    tracing::info!(
        "🎲 Generating {} sample items (seed {})",
        config.sample_size,
        config.seed
    );
    state::sample::generate(config.sample_size, config.seed)
}

/// Settings database, or an in-memory store if it can't be opened
fn open_store(config: &AppConfig) -> Box<dyn KeyValueStore> {
    match SqliteStore::open(&config.database_path()) {
        Ok(store) => {
            tracing::debug!("Preferences stored in {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!("⚠️  {}; preferences will not survive a restart", e);
            Box::new(MemoryStore::default())
        }
    }
}

fn main() -> iced::Result {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "archive_browser=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    iced::application("Archive Browser", ArchiveBrowser::update, ArchiveBrowser::view)
        .subscription(ArchiveBrowser::subscription)
        .theme(ArchiveBrowser::theme)
        .centered()
        .run_with(move || ArchiveBrowser::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::preferences::ViewMode;
    use crate::state::query::SortKey;

    fn app(deep_link: Option<&str>) -> ArchiveBrowser {
        let catalog = state::sample::generate(50, 42);
        let mut controller = Controller::new(catalog, Box::new(MemoryStore::default()));
        if let Some(link) = deep_link {
            controller.open_deep_link(link);
        }
        ArchiveBrowser {
            controller,
            draft: FilterDraft::default(),
            status: String::new(),
        }
    }

    #[test]
    fn test_drafts_apply_only_on_submit() {
        let mut app = app(None);

        let _ = app.update(Message::CategoryToggled(2, true));
        let _ = app.update(Message::DateFromChanged("1950-01-01".to_string()));
        assert!(app.controller.params().active_categories.is_empty());
        assert_eq!(app.controller.params().date_from, None);

        let _ = app.update(Message::ApplyFilters);
        assert!(app.controller.params().active_categories.contains(&2));
        assert!(app.controller.params().date_from.is_some());
        assert!(app
            .controller
            .page_items()
            .all(|item| item.category.id == 2));

        let _ = app.update(Message::CategoryToggled(2, false));
        let _ = app.update(Message::ApplyFilters);
        assert!(app.controller.params().active_categories.is_empty());
    }

    #[test]
    fn test_search_submit_and_reset() {
        let mut app = app(None);

        let _ = app.update(Message::SearchChanged("Archive Item 4".to_string()));
        let _ = app.update(Message::SearchSubmitted);
        assert_eq!(app.controller.total_matches(), 11);

        let _ = app.update(Message::ResetFilters);
        assert_eq!(app.draft, FilterDraft::default());
        assert_eq!(app.controller.total_matches(), 50);
    }

    #[test]
    fn test_intents_pass_through() {
        let mut app = app(None);

        let _ = app.update(Message::Intent(Intent::SetViewMode(ViewMode::List)));
        let _ = app.update(Message::Intent(Intent::SetSort(SortKey::NameDesc)));

        assert_eq!(app.controller.view_mode(), ViewMode::List);
        assert_eq!(app.controller.params().sort_key, SortKey::NameDesc);
        assert!(app.status.is_empty());
    }

    #[test]
    fn test_deep_link_opens_detail_view() {
        let app = app(Some("archive://browse?item=12"));
        assert_eq!(app.controller.selected_item().map(|item| item.id), Some(12));
    }

    #[test]
    fn test_keyboard_shortcuts() {
        assert!(matches!(
            handle_key(Key::Named(key::Named::Escape), keyboard::Modifiers::default()),
            Some(Message::Intent(Intent::CloseItem))
        ));
        assert!(matches!(
            handle_key(Key::Named(key::Named::ArrowRight), keyboard::Modifiers::default()),
            Some(Message::Intent(Intent::NextPage))
        ));
        assert!(handle_key(Key::Named(key::Named::Enter), keyboard::Modifiers::default()).is_none());
    }

    #[test]
    fn test_load_catalog_falls_back_to_sample_data() {
        let config = AppConfig {
            data_dir: std::env::temp_dir(),
            catalog_path: Some(std::env::temp_dir().join("no-such-catalog.json")),
            sample_size: 8,
            seed: 3,
            deep_link: None,
        };

        let catalog = load_catalog(&config);
        assert_eq!(catalog.items.len(), 8);
    }
}
