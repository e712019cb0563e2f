use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use super::report::{Flow, ImportReport, Outcome, SheetReport};
use super::{ImportKind, ImportMode};
use crate::error::ImportResult;
use crate::excel::{DistanceRow, Sheet};
use crate::store::{from_document, to_document, Collection, DocumentStore, Filter};
use crate::types::{Distance, UNKNOWN_TEAM};

/// Import distance edges from every sheet, in workbook order.
///
/// Each sheet is counted separately. A sheet missing a mandatory column is
/// aborted without affecting the sheets before or after it.
pub fn import_distances<S: DocumentStore + ?Sized>(
    store: &mut S,
    sheets: &[Sheet],
    mode: ImportMode,
) -> ImportResult<ImportReport> {
    let mut report = ImportReport::new(ImportKind::Distances);

    if mode == ImportMode::Replace {
        report.cleared = store.delete_many(Collection::Distances, &Filter::all())?;
        info!(removed = report.cleared, "🗑️ Cleared existing distance data");
    }

    for sheet in sheets {
        let sheet_report = import_sheet(store, sheet)?;
        info!(
            sheet = %sheet_report.sheet,
            inserted = sheet_report.inserted,
            skipped = sheet_report.skipped,
            invalid = sheet_report.invalid,
            "📊 Sheet processed"
        );
        report.sheets.push(sheet_report);
    }

    report.total_in_store = store.count(Collection::Distances, &Filter::all())?;
    report.sample = match store.find_one(Collection::Distances, &Filter::all())? {
        Some(doc) => {
            let d: Distance = from_document(doc)?;
            Some(format!(
                "{} → {} ({} miles)",
                d.beginning_stadium, d.ending_stadium, d.distance
            ))
        }
        None => None,
    };

    Ok(report)
}

fn import_sheet<S: DocumentStore + ?Sized>(store: &mut S, sheet: &Sheet) -> ImportResult<SheetReport> {
    let mut report = SheetReport::new(sheet.name());

    for row in sheet.rows() {
        report.rows += 1;
        let outcome = DistanceRow::extract(&row).and_then(|d| {
            let edge = format!("{} → {} ({} miles)", d.beginning_stadium, d.ending_stadium, d.distance);
            insert_distance(store, d).map(|outcome| (outcome, edge))
        });
        match outcome {
            Ok((outcome, edge)) => {
                match outcome {
                    Outcome::Inserted => info!(row = row.ordinal(), "✅ Added: {}", edge),
                    _ => info!(row = row.ordinal(), "⏭️ Already exists: {}", edge),
                }
                report.record(outcome)
            }
            Err(e) => {
                if report.absorb(format!("row {}", row.ordinal()), e)? == Flow::AbortSheet {
                    break;
                }
            }
        }
    }

    Ok(report)
}

/// Insert a distance unless its (beginning, ending) pair is already stored.
///
/// Known pairs are skipped, never overwritten. A missing team name is
/// resolved from the team playing at the beginning stadium.
pub fn insert_distance<S: DocumentStore + ?Sized>(
    store: &mut S,
    row: DistanceRow,
) -> ImportResult<Outcome> {
    let key = Filter::eq("beginningStadium", row.beginning_stadium.as_str())
        .and("endingStadium", row.ending_stadium.as_str());

    if store.count(Collection::Distances, &key)? > 0 {
        return Ok(Outcome::Skipped);
    }

    let team_name = match row.team_name {
        Some(name) => name,
        None => resolve_team_name(store, &row.beginning_stadium)?,
    };

    let now = Utc::now();
    let distance = Distance {
        id: None,
        team_name,
        beginning_stadium: row.beginning_stadium,
        ending_stadium: row.ending_stadium,
        distance: row.distance,
        created_at: Some(now),
        updated_at: Some(now),
    };
    store.insert_one(Collection::Distances, to_document(&distance)?)?;
    Ok(Outcome::Inserted)
}

/// Name of the team whose stadium is `stadium`, or "Unknown".
pub fn resolve_team_name<S: DocumentStore + ?Sized>(store: &S, stadium: &str) -> ImportResult<String> {
    let team = store.find_one(Collection::Teams, &Filter::eq("stadium.name", stadium))?;
    let name = team
        .as_ref()
        .and_then(|doc| doc.get("teamName"))
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty());

    match name {
        Some(name) => Ok(name.to_string()),
        None => {
            warn!("⚠️ No team plays at '{}', recording team as {}", stadium, UNKNOWN_TEAM);
            Ok(UNKNOWN_TEAM.to_string())
        }
    }
}
