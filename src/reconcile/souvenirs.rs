use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, warn};

use super::report::{Flow, ImportReport, SheetReport};
use super::ImportKind;
use crate::error::ImportResult;
use crate::excel::{Sheet, SouvenirRow};
use crate::store::{document_id, to_document, Collection, DocumentStore, Filter};
use crate::types::Souvenir;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SouvenirUpdate<'a> {
    souvenirs: &'a [Souvenir],
    updated_at: DateTime<Utc>,
}

/// Import the souvenir sheet.
///
/// Valid rows are grouped by team in order of first appearance, then each
/// team's souvenir list is replaced by its group. Teams missing from the
/// store are skipped, and teams absent from the sheet are left alone.
/// If the sheet's columns are wrong nothing is written.
///
/// Counters: `updated` is teams replaced, `inserted` is souvenirs written,
/// `skipped` is rows dropped because their team does not exist.
pub fn import_souvenirs<S: DocumentStore + ?Sized>(
    store: &mut S,
    sheet: &Sheet,
) -> ImportResult<ImportReport> {
    let mut report = ImportReport::new(ImportKind::Souvenirs);
    let mut sheet_report = SheetReport::new(sheet.name());

    let mut groups: Vec<(String, Vec<Souvenir>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for row in sheet.rows() {
        sheet_report.rows += 1;
        match SouvenirRow::extract(&row) {
            Ok(r) => {
                info!(
                    row = row.ordinal(),
                    "✅ Accepted '{}' (${:.2}, {}) for '{}'",
                    r.name,
                    r.price,
                    r.category,
                    r.team_name
                );
                let slot = match positions.get(&r.team_name) {
                    Some(&slot) => slot,
                    None => {
                        groups.push((r.team_name.clone(), Vec::new()));
                        positions.insert(r.team_name.clone(), groups.len() - 1);
                        groups.len() - 1
                    }
                };
                groups[slot]
                    .1
                    .push(Souvenir::new(r.name, r.price, r.category, r.is_traditional));
            }
            Err(e) => {
                if sheet_report.absorb(format!("row {}", row.ordinal()), e)? == Flow::AbortSheet {
                    report.sheets.push(sheet_report);
                    report.total_in_store = store.count(Collection::Teams, &Filter::all())?;
                    return Ok(report);
                }
            }
        }
    }

    for (team_name, souvenirs) in groups {
        let count = souvenirs.len();
        match replace_souvenirs(store, &team_name, &souvenirs) {
            Ok(true) => {
                info!("✅ Updated souvenirs for '{}': {} items", team_name, count);
                sheet_report.updated += 1;
                sheet_report.inserted += count;
                report.teams.push((team_name, count));
            }
            Ok(false) => {
                warn!("⚠️ Team '{}' not found, skipping souvenirs", team_name);
                sheet_report.skipped += count;
            }
            Err(e) => {
                sheet_report.absorb(format!("team '{}'", team_name), e)?;
            }
        }
    }

    report.sheets.push(sheet_report);
    report.total_in_store = store.count(Collection::Teams, &Filter::all())?;
    Ok(report)
}

/// Replace the whole souvenir list of `team_name`. Returns false when no such
/// team exists; no team is ever created here.
pub fn replace_souvenirs<S: DocumentStore + ?Sized>(
    store: &mut S,
    team_name: &str,
    souvenirs: &[Souvenir],
) -> ImportResult<bool> {
    let Some(team) = store.find_one(Collection::Teams, &Filter::eq("teamName", team_name))? else {
        return Ok(false);
    };

    let id = document_id(&team)?;
    let update = SouvenirUpdate {
        souvenirs,
        updated_at: Utc::now(),
    };
    Ok(store.update_one(Collection::Teams, &id, to_document(&update)?)?)
}
