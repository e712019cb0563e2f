//! NFL Import - spreadsheet importer for the NFL vacation planner
//!
//! Loads teams (with their stadium and souvenirs), stadium-to-stadium
//! distances and souvenir catalogs from Excel workbooks into a document
//! store, reconciling each row with what is already stored.
//!
//! # Features
//!
//! - Team upsert that never touches an existing souvenir list
//! - Full-replace reloads for teams and distances
//! - Duplicate-free distance edges across multi-sheet workbooks
//! - Per-team souvenir replacement
//! - Default souvenir catalog restoration
//!
//! # Example
//!
//! ```no_run
//! use nfl_import::config::StoreConfig;
//! use nfl_import::excel::WorkbookReader;
//! use nfl_import::reconcile::{import_teams, ImportMode};
//! use nfl_import::store::with_store;
//!
//! let sheet = WorkbookReader::new("teams-stadiums.xlsx").first_sheet()?;
//! let report = with_store(&StoreConfig::default(), |store| {
//!     import_teams(store, &sheet, ImportMode::Upsert)
//! })?;
//!
//! println!("Inserted: {}", report.totals().inserted);
//! # Ok::<(), nfl_import::error::ImportError>(())
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod excel;
pub mod logging;
pub mod reconcile;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{ImportError, ImportResult};
pub use reconcile::{ImportKind, ImportMode, ImportReport, RestoreReport};
pub use store::{DocumentStore, MemoryStore, SqliteStore};
pub use types::{Distance, Souvenir, SouvenirCategory, Stadium, Team};
