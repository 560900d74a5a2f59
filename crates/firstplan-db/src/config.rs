use std::env;
use std::path::{Path, PathBuf};

/// Pace database location.
///
/// Reads from the `FIRSTPLAN_DATABASE` environment variable, falling back to
/// `<data dir>/firstplan/first_database.json` when unset.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to a JSON or TOML database file.
    pub database_path: PathBuf,
}

impl DbConfig {
    /// Environment variable consulted by [`DbConfig::from_env`].
    pub const ENV_VAR: &str = "FIRSTPLAN_DATABASE";

    /// File name used inside the default data directory.
    pub const DEFAULT_FILE_NAME: &str = "first_database.json";

    /// Build a config from the environment.
    ///
    /// Priority: `FIRSTPLAN_DATABASE` env var, then [`DbConfig::default_path`].
    pub fn from_env() -> Self {
        let database_path = env::var_os(Self::ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_path);
        Self { database_path }
    }

    /// Build a config from an explicit path (useful for tests and CLI flags).
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
        }
    }

    /// The platform data directory location of the database file.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("firstplan")
            .join(Self::DEFAULT_FILE_NAME)
    }

    /// Lower-cased file extension, if any.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.database_path)
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

pub(crate) fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_ends_with_file_name() {
        let path = DbConfig::default_path();
        assert!(
            path.ends_with("firstplan/first_database.json"),
            "unexpected default path: {}",
            path.display()
        );
    }

    #[test]
    fn explicit_new() {
        let cfg = DbConfig::new("/tmp/plans/db.TOML");
        assert_eq!(cfg.database_path, PathBuf::from("/tmp/plans/db.TOML"));
        assert_eq!(cfg.extension().as_deref(), Some("toml"));
    }

    #[test]
    fn extension_missing() {
        let cfg = DbConfig::new("/tmp/plans/database");
        assert_eq!(cfg.extension(), None);
    }
}
