//! Import counters and summaries

use std::fmt;
use tracing::{error, warn};

use super::ImportKind;
use crate::error::{ImportError, ImportResult};

/// What happened to one unit of work (a row, or a team for souvenirs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Inserted,
    Updated,
    Skipped,
}

/// Whether processing of the current sheet continues after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    AbortSheet,
}

/// Counters for a single worksheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetReport {
    pub sheet: String,
    /// Data rows read, including skipped and invalid ones.
    pub rows: usize,
    pub inserted: usize,
    pub updated: usize,
    /// Excluded rows, duplicate keys and references to missing teams.
    pub skipped: usize,
    pub invalid: usize,
    /// Units whose store operation failed.
    pub failed: usize,
    /// Set when a schema mismatch stopped the sheet early.
    pub aborted: Option<String>,
}

impl SheetReport {
    pub fn new(sheet: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Inserted => self.inserted += 1,
            Outcome::Updated => self.updated += 1,
            Outcome::Skipped => self.skipped += 1,
        }
    }

    /// Account for an error raised while processing `unit`.
    ///
    /// Invalid rows and failed store operations are counted and processing
    /// continues. A schema mismatch marks the sheet aborted. Anything else is
    /// returned to the caller and ends the run.
    pub fn absorb(&mut self, unit: impl fmt::Display, err: ImportError) -> ImportResult<Flow> {
        match err {
            ImportError::RowInvalid { reason, .. } => {
                warn!(sheet = %self.sheet, "⚠️ Skipping {}: {}", unit, reason);
                self.invalid += 1;
                Ok(Flow::Continue)
            }
            ImportError::SchemaMismatch { .. } => {
                error!(sheet = %self.sheet, "❌ {}", err);
                self.aborted = Some(err.to_string());
                Ok(Flow::AbortSheet)
            }
            ImportError::Store(ref e) if !e.is_fatal() => {
                error!(sheet = %self.sheet, "❌ Error processing {}: {}", unit, err);
                self.failed += 1;
                Ok(Flow::Continue)
            }
            other => Err(other),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.aborted.is_none() && self.failed == 0
    }

    fn merge(&mut self, other: &SheetReport) {
        self.rows += other.rows;
        self.inserted += other.inserted;
        self.updated += other.updated;
        self.skipped += other.skipped;
        self.invalid += other.invalid;
        self.failed += other.failed;
    }
}

/// Result of one import run over a workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub kind: ImportKind,
    pub sheets: Vec<SheetReport>,
    /// Documents removed before importing (replace mode).
    pub cleared: u64,
    /// Documents in the target collection after the run.
    pub total_in_store: u64,
    /// One stored document, rendered for the operator.
    pub sample: Option<String>,
    /// Souvenir imports: each team whose list was replaced, with its new size.
    pub teams: Vec<(String, usize)>,
}

impl ImportReport {
    pub fn new(kind: ImportKind) -> Self {
        Self {
            kind,
            sheets: Vec::new(),
            cleared: 0,
            total_in_store: 0,
            sample: None,
            teams: Vec::new(),
        }
    }

    /// Counters summed over all sheets.
    pub fn totals(&self) -> SheetReport {
        let mut totals = SheetReport::new("total");
        for sheet in &self.sheets {
            totals.merge(sheet);
        }
        totals.aborted = self
            .sheets
            .iter()
            .filter_map(|s| s.aborted.as_ref().map(|_| s.sheet.clone()))
            .reduce(|a, b| format!("{}, {}", a, b));
        totals
    }

    pub fn aborted_sheets(&self) -> impl Iterator<Item = &SheetReport> {
        self.sheets.iter().filter(|s| s.aborted.is_some())
    }

    /// False when any sheet aborted or any store operation failed.
    pub fn is_success(&self) -> bool {
        self.sheets.iter().all(SheetReport::is_clean)
    }
}

/// Result of re-asserting the default souvenir catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestoreReport {
    pub teams_seen: usize,
    pub teams_updated: usize,
    /// Teams that already carried the full catalog with catalog values.
    pub teams_compliant: usize,
    /// Default-named souvenirs whose fields were rewritten.
    pub souvenirs_restored: usize,
    /// Missing defaults appended.
    pub souvenirs_added: usize,
    pub failed: usize,
}

impl RestoreReport {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}
