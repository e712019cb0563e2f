//! Import reconciliation
//!
//! Each importer walks the rows of a workbook in order and decides, per row,
//! whether to insert, update or skip, using a store handle passed in by the
//! caller:
//!
//! - Teams: upsert by team name, or clear-and-reload in replace mode
//! - Distances: insert new (beginning, ending) pairs, skip known ones
//! - Souvenirs: replace each listed team's souvenir list
//! - Defaults: re-assert the default souvenir catalog on every team

mod defaults;
mod distances;
mod report;
mod souvenirs;
mod teams;

pub use defaults::{reconcile_souvenirs, restore_default_souvenirs, Reconciliation};
pub use distances::{import_distances, insert_distance, resolve_team_name};
pub use report::{Flow, ImportReport, Outcome, RestoreReport, SheetReport};
pub use souvenirs::{import_souvenirs, replace_souvenirs};
pub use teams::{import_teams, upsert_team};

use std::fmt;
use std::path::Path;

use crate::config::{DEFAULT_DISTANCES_FILE, DEFAULT_SOUVENIRS_FILE, DEFAULT_TEAMS_FILE};
use crate::error::{ImportError, ImportResult};
use crate::excel::{Sheet, WorkbookReader};
use crate::store::DocumentStore;

/// How rows are merged into an existing collection. One mode per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Insert new keys, update or skip known ones.
    #[default]
    Upsert,
    /// Delete every document of the collection first. No backup is taken.
    Replace,
}

/// Which entity a workbook holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Teams,
    Distances,
    Souvenirs,
}

impl ImportKind {
    /// Detect the import from the workbook's file name, the way uploads are named.
    pub fn detect(path: &Path) -> ImportResult<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if file_name.contains("teams-stadiums") {
            Ok(ImportKind::Teams)
        } else if file_name.contains("stadium-distances") {
            Ok(ImportKind::Distances)
        } else if file_name.contains("souvenirs") {
            Ok(ImportKind::Souvenirs)
        } else {
            Err(ImportError::UnknownImportKind(file_name))
        }
    }

    pub fn default_file(&self) -> &'static str {
        match self {
            ImportKind::Teams => DEFAULT_TEAMS_FILE,
            ImportKind::Distances => DEFAULT_DISTANCES_FILE,
            ImportKind::Souvenirs => DEFAULT_SOUVENIRS_FILE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Teams => "teams",
            ImportKind::Distances => "distances",
            ImportKind::Souvenirs => "souvenirs",
        }
    }

    /// Read the sheets this import consumes: every sheet for distances,
    /// the first sheet otherwise.
    pub fn load_sheets(&self, reader: &WorkbookReader) -> ImportResult<Vec<Sheet>> {
        match self {
            ImportKind::Distances => reader.sheets(),
            ImportKind::Teams | ImportKind::Souvenirs => Ok(vec![reader.first_sheet()?]),
        }
    }

    /// Run this import over already-loaded sheets.
    ///
    /// Souvenir imports always replace per team, so `mode` only applies to
    /// teams and distances.
    pub fn run<S: DocumentStore + ?Sized>(
        &self,
        store: &mut S,
        sheets: &[Sheet],
        mode: ImportMode,
    ) -> ImportResult<ImportReport> {
        match self {
            ImportKind::Distances => import_distances(store, sheets, mode),
            ImportKind::Teams | ImportKind::Souvenirs => {
                let sheet = sheets.first().ok_or_else(|| {
                    ImportError::Workbook("workbook contains no worksheets".to_string())
                })?;
                if *self == ImportKind::Teams {
                    import_teams(store, sheet, mode)
                } else {
                    import_souvenirs(store, sheet)
                }
            }
        }
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_detect_from_file_name() {
        assert_eq!(
            ImportKind::detect(&PathBuf::from("uploads/teams-stadiums.xlsx")).unwrap(),
            ImportKind::Teams
        );
        assert_eq!(
            ImportKind::detect(&PathBuf::from("2024-stadium-distances-v2.xlsx")).unwrap(),
            ImportKind::Distances
        );
        assert_eq!(
            ImportKind::detect(&PathBuf::from("souvenirs.xlsx")).unwrap(),
            ImportKind::Souvenirs
        );
    }

    #[test]
    fn test_detect_unknown_name() {
        let err = ImportKind::detect(&PathBuf::from("roster.xlsx")).unwrap_err();
        assert!(matches!(err, ImportError::UnknownImportKind(ref n) if n == "roster.xlsx"));
    }

    #[test]
    fn test_default_files() {
        assert_eq!(ImportKind::Teams.default_file(), "teams-stadiums.xlsx");
        assert_eq!(ImportKind::Distances.default_file(), "stadium-distances.xlsx");
        assert_eq!(ImportKind::Souvenirs.default_file(), "souvenirs.xlsx");
    }
}
