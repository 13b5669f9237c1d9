use std::path::PathBuf;

/// Application configuration loaded from environment variables.
///
/// Every field has a default suitable for a normal desktop install.
/// Malformed values are logged and replaced by the default; configuration
/// problems never stop the application from starting.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Where the settings database lives
    pub data_dir: PathBuf,
    /// Optional JSON catalog; sample data is generated when unset
    pub catalog_path: Option<PathBuf>,
    /// Number of generated sample items (default: `50`)
    pub sample_size: usize,
    /// Seed for the sample generator
    pub seed: u64,
    /// `?item=<id>` link passed on the command line
    pub deep_link: Option<String>,
}

const DEFAULT_SAMPLE_SIZE: usize = 50;
const DB_FILE_NAME: &str = "archive_browser.db";

impl AppConfig {
    /// Load configuration from the process environment and arguments.
    ///
    /// | Env Var                       | Default                              |
    /// |-------------------------------|--------------------------------------|
    /// | `ARCHIVE_BROWSER_DATA_DIR`    | `<user data dir>/archive-browser`    |
    /// | `ARCHIVE_BROWSER_CATALOG`     | unset (sample data)                  |
    /// | `ARCHIVE_BROWSER_SAMPLE_SIZE` | `50`                                 |
    /// | `ARCHIVE_BROWSER_SEED`        | random                               |
    ///
    /// The first positional argument, if any, is the deep link.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), std::env::args().nth(1))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>, deep_link: Option<String>) -> Self {
        let data_dir = lookup("ARCHIVE_BROWSER_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let catalog_path = lookup("ARCHIVE_BROWSER_CATALOG")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let sample_size = parse_or(
            "ARCHIVE_BROWSER_SAMPLE_SIZE",
            lookup("ARCHIVE_BROWSER_SAMPLE_SIZE"),
            DEFAULT_SAMPLE_SIZE,
        );

        let seed = parse_or("ARCHIVE_BROWSER_SEED", lookup("ARCHIVE_BROWSER_SEED"), rand::random());

        Self {
            data_dir,
            catalog_path,
            sample_size,
            seed,
            deep_link: deep_link.filter(|link| !link.trim().is_empty()),
        }
    }

    /// Path of the settings database
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }
}

/// Get the directory where application data should be stored
fn default_data_dir() -> PathBuf {
    let mut path = dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    path.push("archive-browser");
    path
}

fn parse_or<T: std::str::FromStr>(name: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("⚠️  Ignoring invalid {}={:?}, using default", name, raw);
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)], deep_link: Option<&str>) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned(), deep_link.map(String::from))
    }

    #[test]
    fn test_defaults() {
        let config = config(&[], None);

        assert_eq!(config.sample_size, 50);
        assert!(config.catalog_path.is_none());
        assert!(config.deep_link.is_none());
        assert!(config.data_dir.ends_with("archive-browser"));
        assert!(config.database_path().ends_with("archive-browser/archive_browser.db"));
    }

    #[test]
    fn test_overrides() {
        let config = config(
            &[
                ("ARCHIVE_BROWSER_DATA_DIR", "/tmp/archive"),
                ("ARCHIVE_BROWSER_CATALOG", "/srv/catalog.json"),
                ("ARCHIVE_BROWSER_SAMPLE_SIZE", "200"),
                ("ARCHIVE_BROWSER_SEED", "7"),
            ],
            Some("?item=3"),
        );

        assert_eq!(config.database_path(), PathBuf::from("/tmp/archive/archive_browser.db"));
        assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/catalog.json")));
        assert_eq!(config.sample_size, 200);
        assert_eq!(config.seed, 7);
        assert_eq!(config.deep_link.as_deref(), Some("?item=3"));
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let config = config(
            &[
                ("ARCHIVE_BROWSER_SAMPLE_SIZE", "lots"),
                ("ARCHIVE_BROWSER_CATALOG", "  "),
            ],
            Some(""),
        );

        assert_eq!(config.sample_size, 50);
        assert!(config.catalog_path.is_none());
        assert!(config.deep_link.is_none());
    }
}
