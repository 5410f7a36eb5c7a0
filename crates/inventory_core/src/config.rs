//! Storage configuration supplied by the composition root.
//!
//! # Responsibility
//! - Describe where the inventory database lives and how connections behave.
//!
//! # Invariants
//! - Configuration is plain data; nothing here touches the file system.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name used when the database is placed inside an app data directory.
pub const DEFAULT_DB_FILE_NAME: &str = "item_database";

/// How long a statement waits on a locked database before failing.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Physical location of the SQLite database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// On-disk database file. Parent directories are created on open.
    File(PathBuf),
    /// Private in-memory database, lost when the engine is dropped.
    InMemory,
}

impl DatabaseLocation {
    /// Short label used in log events.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::InMemory => "memory",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub location: DatabaseLocation,
    pub busy_timeout: Duration,
}

impl DatabaseConfig {
    /// Database stored at an explicit file path.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: DatabaseLocation::File(path.into()),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Database stored as `DEFAULT_DB_FILE_NAME` inside `dir`.
    pub fn in_data_dir(dir: impl AsRef<Path>) -> Self {
        Self::file(dir.as_ref().join(DEFAULT_DB_FILE_NAME))
    }

    pub fn in_memory() -> Self {
        Self {
            location: DatabaseLocation::InMemory,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{DatabaseConfig, DatabaseLocation, DEFAULT_BUSY_TIMEOUT, DEFAULT_DB_FILE_NAME};
    use std::path::Path;
    use std::time::Duration;

    #[test]
    fn in_data_dir_appends_default_file_name() {
        let config = DatabaseConfig::in_data_dir("/data/app");
        assert_eq!(
            config.location,
            DatabaseLocation::File(Path::new("/data/app").join(DEFAULT_DB_FILE_NAME))
        );
        assert_eq!(config.busy_timeout, DEFAULT_BUSY_TIMEOUT);
    }

    #[test]
    fn busy_timeout_can_be_overridden() {
        let config = DatabaseConfig::in_memory().with_busy_timeout(Duration::from_millis(250));
        assert_eq!(config.location.mode(), "memory");
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
    }
}
