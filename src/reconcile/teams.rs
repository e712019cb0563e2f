use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::report::{Flow, ImportReport, Outcome, SheetReport};
use super::{ImportKind, ImportMode};
use crate::catalog::default_souvenirs;
use crate::error::ImportResult;
use crate::excel::{RawRow, Sheet, TeamRow};
use crate::store::{
    document_id, from_document, to_document, Collection, DocumentStore, Filter,
};
use crate::types::{Stadium, Team};

/// Fields rewritten when a known team is imported again. Souvenirs are not
/// among them.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StadiumUpdate<'a> {
    conference: &'a str,
    division: &'a str,
    stadium: &'a Stadium,
    updated_at: DateTime<Utc>,
}

/// Import the team sheet.
///
/// In [`ImportMode::Replace`] every team is deleted first, so every row
/// becomes a fresh team with fresh default souvenirs.
pub fn import_teams<S: DocumentStore + ?Sized>(
    store: &mut S,
    sheet: &Sheet,
    mode: ImportMode,
) -> ImportResult<ImportReport> {
    let mut report = ImportReport::new(ImportKind::Teams);

    if mode == ImportMode::Replace {
        report.cleared = store.delete_many(Collection::Teams, &Filter::all())?;
        info!(removed = report.cleared, "🗑️ Cleared existing teams");
    }

    let mut sheet_report = SheetReport::new(sheet.name());
    for row in sheet.rows() {
        sheet_report.rows += 1;
        match import_row(store, &row) {
            Ok(outcome) => sheet_report.record(outcome),
            Err(e) => {
                if sheet_report.absorb(format!("row {}", row.ordinal()), e)? == Flow::AbortSheet {
                    break;
                }
            }
        }
    }
    report.sheets.push(sheet_report);

    report.total_in_store = store.count(Collection::Teams, &Filter::all())?;
    report.sample = match store.find_one(Collection::Teams, &Filter::all())? {
        Some(doc) => {
            let team: Team = from_document(doc)?;
            Some(format!("{} - {}", team.team_name, team.stadium.name))
        }
        None => None,
    };

    Ok(report)
}

fn import_row<S: DocumentStore + ?Sized>(store: &mut S, row: &RawRow<'_>) -> ImportResult<Outcome> {
    if TeamRow::is_expansion(row)? {
        info!(row = row.ordinal(), "⚠️ Skipping expansion row");
        return Ok(Outcome::Skipped);
    }

    let team = TeamRow::extract(row)?;
    let outcome = upsert_team(store, &team)?;
    info!(
        row = row.ordinal(),
        "✅ {}: {} - {} ({})",
        if outcome == Outcome::Inserted { "Added" } else { "Updated" },
        team.team_name,
        team.stadium.name,
        team.stadium.seating_capacity
    );
    Ok(outcome)
}

/// Insert a new team with the default souvenir catalog, or overwrite the
/// conference, division and stadium of the existing team with that name.
pub fn upsert_team<S: DocumentStore + ?Sized>(store: &mut S, row: &TeamRow) -> ImportResult<Outcome> {
    let now = Utc::now();
    let existing = store.find_one(
        Collection::Teams,
        &Filter::eq("teamName", row.team_name.as_str()),
    )?;

    match existing {
        Some(doc) => {
            let id = document_id(&doc)?;
            let update = StadiumUpdate {
                conference: &row.conference,
                division: &row.division,
                stadium: &row.stadium,
                updated_at: now,
            };
            store.update_one(Collection::Teams, &id, to_document(&update)?)?;
            Ok(Outcome::Updated)
        }
        None => {
            let team = Team {
                id: None,
                team_name: row.team_name.clone(),
                conference: row.conference.clone(),
                division: row.division.clone(),
                stadium: row.stadium.clone(),
                souvenirs: default_souvenirs(),
                created_at: Some(now),
                updated_at: Some(now),
            };
            store.insert_one(Collection::Teams, to_document(&team)?)?;
            Ok(Outcome::Inserted)
        }
    }
}
