//! Run configuration: store location and default workbook names

use std::path::PathBuf;

/// Environment variable consulted for the database path.
pub const DATABASE_ENV: &str = "NFL_IMPORT_DB";

pub const DEFAULT_DATABASE: &str = "nfl-vacation.db";

pub const DEFAULT_TEAMS_FILE: &str = "teams-stadiums.xlsx";
pub const DEFAULT_DISTANCES_FILE: &str = "stadium-distances.xlsx";
pub const DEFAULT_SOUVENIRS_FILE: &str = "souvenirs.xlsx";

/// Where the document store lives.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub database: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
        }
    }
}

impl StoreConfig {
    pub fn new(database: impl Into<PathBuf>) -> Self {
        Self {
            database: database.into(),
        }
    }
}
