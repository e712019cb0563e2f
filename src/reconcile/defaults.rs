use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use super::report::RestoreReport;
use crate::catalog::{DefaultSouvenir, DEFAULT_SOUVENIRS};
use crate::error::{ImportError, ImportResult};
use crate::store::{document_id, to_document, Collection, Document, DocumentStore, Filter};
use crate::types::UNKNOWN_TEAM;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SouvenirUpdate<'a> {
    souvenirs: &'a [Value],
    updated_at: DateTime<Utc>,
}

/// A team's souvenir list after re-asserting the default catalog.
///
/// Entries are kept as stored JSON so souvenirs outside the catalog are
/// written back exactly as they were read.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub souvenirs: Vec<Value>,
    /// Default-named souvenirs whose price, category or flag was reset.
    pub restored: usize,
    /// Catalog entries that were missing and got appended.
    pub added: usize,
}

impl Reconciliation {
    pub fn changed(&self) -> bool {
        self.restored > 0 || self.added > 0
    }
}

/// Reconcile stored souvenir entries against the default catalog, matching
/// by name.
///
/// Default-named entries are reset to catalog values but keep their
/// identifier. Every other entry is kept untouched, including entries this
/// crate could not decode. Missing catalog entries are appended with new
/// identifiers.
pub fn reconcile_souvenirs(current: &[Value]) -> Reconciliation {
    let mut souvenirs = Vec::with_capacity(current.len() + DEFAULT_SOUVENIRS.len());
    let mut restored = 0;

    for entry in current {
        match entry_name(entry).and_then(DefaultSouvenir::find) {
            Some(default) if !default.matches(entry) => {
                souvenirs.push(default.restore(entry));
                restored += 1;
            }
            _ => souvenirs.push(entry.clone()),
        }
    }

    let mut added = 0;
    for default in &DEFAULT_SOUVENIRS {
        if !souvenirs.iter().any(|s| entry_name(s) == Some(default.name)) {
            souvenirs.push(default.to_entry());
            added += 1;
        }
    }

    Reconciliation {
        souvenirs,
        restored,
        added,
    }
}

fn entry_name(entry: &Value) -> Option<&str> {
    entry.get("name").and_then(Value::as_str)
}

/// Re-assert the default souvenir catalog on every team in the store.
///
/// Teams already carrying every default with catalog values are not written.
pub fn restore_default_souvenirs<S: DocumentStore + ?Sized>(store: &mut S) -> ImportResult<RestoreReport> {
    let teams = store.find(Collection::Teams, &Filter::all())?;
    info!("📊 Found {} teams in database", teams.len());

    let mut report = RestoreReport::default();
    for team in teams {
        report.teams_seen += 1;
        let team_name = team
            .get("teamName")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_TEAM)
            .to_string();

        match restore_team(store, &team) {
            Ok(Some(plan)) => {
                report.teams_updated += 1;
                report.souvenirs_restored += plan.restored;
                report.souvenirs_added += plan.added;
                info!(
                    restored = plan.restored,
                    added = plan.added,
                    "✅ Restored defaults for '{}' (now has {} items)",
                    team_name,
                    plan.souvenirs.len()
                );
            }
            Ok(None) => {
                report.teams_compliant += 1;
                info!("⏭️ Team '{}' already has correct default souvenirs", team_name);
            }
            Err(ImportError::Store(e)) if !e.is_fatal() => {
                error!("❌ Error restoring souvenirs for '{}': {}", team_name, e);
                report.failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}

/// Reconcile one team document; writes and returns the plan only if it changed anything.
fn restore_team<S: DocumentStore + ?Sized>(
    store: &mut S,
    team: &Document,
) -> ImportResult<Option<Reconciliation>> {
    let id = document_id(team)?;
    let current: &[Value] = match team.get("souvenirs") {
        Some(Value::Array(list)) => list.as_slice(),
        _ => &[],
    };

    let plan = reconcile_souvenirs(current);
    if !plan.changed() {
        return Ok(None);
    }

    let update = SouvenirUpdate {
        souvenirs: &plan.souvenirs,
        updated_at: Utc::now(),
    };
    store.update_one(Collection::Teams, &id, to_document(&update)?)?;
    Ok(Some(plan))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_souvenirs;
    use serde_json::json;

    fn entries() -> Vec<Value> {
        default_souvenirs()
            .iter()
            .map(|s| serde_json::to_value(s).unwrap())
            .collect()
    }

    #[test]
    fn test_full_catalog_unchanged() {
        let current = entries();
        let plan = reconcile_souvenirs(&current);
        assert!(!plan.changed());
        assert_eq!(plan.souvenirs, current);
    }

    #[test]
    fn test_empty_list_gets_all_defaults() {
        let plan = reconcile_souvenirs(&[]);
        assert_eq!(plan.added, 5);
        assert_eq!(plan.restored, 0);
        let names: Vec<&str> = plan.souvenirs.iter().filter_map(entry_name).collect();
        assert_eq!(
            names,
            vec![
                "Signed helmets",
                "Autographed Football",
                "Team pennant",
                "Team picture",
                "Team jersey"
            ]
        );
    }

    #[test]
    fn test_category_drift_restored_in_place() {
        let mut current = entries();
        current[4]["category"] = json!("Collectibles");
        current[4]["isTraditional"] = json!(false);
        let original_id = current[4]["_id"].clone();

        let plan = reconcile_souvenirs(&current);
        assert_eq!(plan.restored, 1);
        assert_eq!(plan.added, 0);
        assert_eq!(plan.souvenirs[4]["_id"], original_id);
        assert_eq!(plan.souvenirs[4]["category"], json!("Apparel"));
        assert_eq!(plan.souvenirs[4]["isTraditional"], json!(true));
    }

    #[test]
    fn test_custom_entries_kept_verbatim() {
        let custom = json!({
            "_id": "c1",
            "name": "Cheesehead",
            "price": 24.99,
            "category": "Merchandise",
            "note": "foam",
        });
        let plan = reconcile_souvenirs(std::slice::from_ref(&custom));
        assert_eq!(plan.souvenirs[0], custom);
        assert_eq!(plan.added, 5);
        assert_eq!(plan.souvenirs.len(), 6);
    }

    #[test]
    fn test_duplicate_default_names_each_checked() {
        let mut current = entries();
        let mut copy = current[0].clone();
        copy["_id"] = json!("second");
        copy["price"] = json!(1.0);
        current.push(copy);

        let plan = reconcile_souvenirs(&current);
        assert_eq!(plan.restored, 1);
        assert_eq!(plan.souvenirs.len(), 6);
        assert_eq!(plan.souvenirs[5]["_id"], json!("second"));
        assert_eq!(plan.souvenirs[5]["price"], json!(74.99));
    }
}
