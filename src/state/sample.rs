/// Seeded sample catalog
///
/// Used when no catalog file is configured, and as the fixture for engine
/// tests. The same seed always produces the same catalog.

use std::sync::Arc;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::catalog::Catalog;
use super::data::{ArchiveItem, Category, ItemMetadata, Source};

const SOURCE_NAMES: [&str; 5] = [
    "National Archives",
    "Public Library",
    "Historical Society",
    "University Collection",
    "Media Archive",
];

const CATEGORY_NAMES: [&str; 6] = ["Documents", "Photos", "Videos", "Audio", "Maps", "Artifacts"];

const IMAGE_THEMES: [&str; 6] = ["nature", "city", "history", "people", "technology", "art"];
const FORMATS: [&str; 5] = ["PDF", "JPEG", "MP3", "MP4", "TXT"];
const LANGUAGES: [&str; 5] = ["English", "Spanish", "French", "German", "Italian"];

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Nullam eget mauris sed nisi luctus auctor. \
Duis porttitor, quam vel mattis pellentesque, nibh neque volutpat nulla, ut tempor enim elit in velit. \
Pellentesque habitant morbi tristique senectus et netus et malesuada fames ac turpis egestas.";

/// Default archive sources (ids 1..=5)
pub fn default_sources() -> Vec<Arc<Source>> {
    SOURCE_NAMES
        .iter()
        .zip(1..)
        .map(|(name, id)| Arc::new(Source { id, name: name.to_string() }))
        .collect()
}

/// Default media categories (ids 1..=6)
pub fn default_categories() -> Vec<Arc<Category>> {
    CATEGORY_NAMES
        .iter()
        .zip(1..)
        .map(|(name, id)| Arc::new(Category { id, name: name.to_string() }))
        .collect()
}

/// Generate `count` items with ids 1..=count
pub fn generate(count: usize, seed: u64) -> Catalog {
    let mut rng = StdRng::seed_from_u64(seed);
    let sources = default_sources();
    let categories = default_categories();

    let items = (1..=count as i64)
        .map(|id| {
            let source = Arc::clone(&sources[rng.gen_range(0..sources.len())]);
            let category = Arc::clone(&categories[rng.gen_range(0..categories.len())]);
            let theme = IMAGE_THEMES[rng.gen_range(0..IMAGE_THEMES.len())];
            let width: u32 = rng.gen_range(500..1000);
            let height: u32 = rng.gen_range(300..600);

            // Day 1..=28 keeps every month valid
            let year = rng.gen_range(1900..=2020);
            let month = rng.gen_range(1..=12);
            let day = rng.gen_range(1..=28);
            let date = NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN);

            let size_mb: f64 = rng.gen_range(1.0..21.0);

            ArchiveItem {
                id,
                title: format!("Archive Item {}", id),
                description: format!(
                    "This is a detailed description of archive item {}. It contains important historical \
                     information that has been preserved for future generations. The item was carefully \
                     digitized and cataloged to make it accessible to researchers and the general public. {}",
                    id, LOREM
                ),
                image_ref: format!("https://picsum.photos/seed/archive{}{}/{}/{}", id, theme, width, height),
                date,
                source,
                category,
                metadata: ItemMetadata {
                    format: FORMATS[rng.gen_range(0..FORMATS.len())].to_string(),
                    size: format!("{:.1} MB", size_mb),
                    resolution: format!("{}x{}", width, height),
                    language: LANGUAGES[rng.gen_range(0..LANGUAGES.len())].to_string(),
                },
            }
        })
        .collect();

    Catalog {
        sources,
        categories,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_catalog() {
        let a = generate(25, 1234);
        let b = generate(25, 1234);
        assert_eq!(a.items, b.items);

        let c = generate(25, 4321);
        assert_ne!(a.items, c.items);
    }

    #[test]
    fn test_generated_items_are_well_formed() {
        let catalog = generate(50, 99);
        let lower = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
        let upper = NaiveDate::from_ymd_opt(2020, 12, 28).unwrap();

        assert_eq!(catalog.sources.len(), 5);
        assert_eq!(catalog.categories.len(), 6);
        assert_eq!(catalog.items.len(), 50);

        for (expected_id, item) in (1..).zip(&catalog.items) {
            assert_eq!(item.id, expected_id);
            assert_eq!(item.title, format!("Archive Item {}", expected_id));
            assert!(item.date >= lower && item.date <= upper);
            assert!((1..=5).contains(&item.source.id));
            assert!((1..=6).contains(&item.category.id));
            assert!(item.metadata.size.ends_with(" MB"));
            assert!(item.image_ref.contains(&item.metadata.resolution.replace('x', "/")));
        }
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = generate(0, 1);
        assert!(catalog.items.is_empty());
        assert_eq!(catalog.sources.len(), 5);
    }
}
