use crate::config::StoreConfig;
use crate::error::{ImportError, ImportResult};
use crate::excel::WorkbookReader;
use crate::reconcile::{restore_default_souvenirs, ImportKind, ImportMode, ImportReport, RestoreReport};
use crate::store::with_store;
use colored::Colorize;
use std::path::PathBuf;

fn title(kind: ImportKind) -> &'static str {
    match kind {
        ImportKind::Teams => "Teams & Stadiums",
        ImportKind::Distances => "Stadium Distances",
        ImportKind::Souvenirs => "Souvenirs",
    }
}

/// Import one workbook into the store.
///
/// The workbook is read in full before the store is opened, so a missing or
/// unreadable file never touches the database.
pub fn import(
    config: &StoreConfig,
    kind: ImportKind,
    file: Option<PathBuf>,
    mode: ImportMode,
) -> ImportResult<()> {
    let path = file.unwrap_or_else(|| PathBuf::from(kind.default_file()));

    println!("{}", format!("🏈 NFL Import - {}", title(kind)).bold().green());
    println!("   File:     {}", path.display());
    println!("   Database: {}", config.database.display());
    if mode == ImportMode::Replace && kind != ImportKind::Souvenirs {
        println!(
            "{}",
            format!("   ⚠️  REPLACE MODE - existing {} will be deleted", kind).yellow()
        );
    }
    println!();

    println!("{}", "📖 Reading Excel file...".cyan());
    let reader = WorkbookReader::new(&path);
    let sheets = kind.load_sheets(&reader)?;
    for sheet in &sheets {
        println!("   📊 Found {} rows in sheet '{}'", sheet.len(), sheet.name());
    }

    println!("{}", "🔌 Connecting to document store...".cyan());
    let report = with_store(config, |store| kind.run(store, &sheets, mode))?;

    print_import_report(&report);

    if report.is_success() {
        Ok(())
    } else {
        let aborted: Vec<&str> = report.aborted_sheets().map(|s| s.sheet.as_str()).collect();
        let totals = report.totals();
        Err(ImportError::Incomplete(format!(
            "{} sheet(s) aborted [{}], {} failed operation(s)",
            aborted.len(),
            aborted.join(", "),
            totals.failed
        )))
    }
}

/// Import a workbook whose kind is detected from its file name.
pub fn import_detected(config: &StoreConfig, file: PathBuf, mode: ImportMode) -> ImportResult<()> {
    let kind = ImportKind::detect(&file)?;
    println!("{}", format!("🔎 Detected {} import", kind).cyan());
    import(config, kind, Some(file), mode)
}

/// Re-assert the default souvenir catalog on every team.
pub fn restore_defaults(config: &StoreConfig) -> ImportResult<()> {
    println!("{}", "🏈 NFL Import - Restore Default Souvenirs".bold().green());
    println!("   Database: {}\n", config.database.display());

    println!("{}", "🔌 Connecting to document store...".cyan());
    let report = with_store(config, |store| restore_default_souvenirs(store))?;

    print_restore_report(&report);

    if report.is_success() {
        Ok(())
    } else {
        Err(ImportError::Incomplete(format!(
            "{} team(s) could not be updated",
            report.failed
        )))
    }
}

fn print_import_report(report: &ImportReport) {
    let totals = report.totals();

    println!();
    if report.cleared > 0 {
        println!("🗑️  Cleared {} existing {}", report.cleared, report.kind);
    }

    if report.sheets.len() > 1 {
        println!("{}", "📑 Sheets:".bold().cyan());
        for sheet in &report.sheets {
            println!(
                "   {}: {} rows, {} inserted, {} skipped, {} invalid",
                sheet.sheet.bright_blue(),
                sheet.rows,
                sheet.inserted,
                sheet.skipped,
                sheet.invalid
            );
        }
        println!();
    }

    println!("{}", "📊 Import Summary:".bold().green());
    match report.kind {
        ImportKind::Souvenirs => {
            println!("   ✅ Updated: {} teams", totals.updated);
            println!("   📦 Total souvenirs imported: {}", totals.inserted);
            println!(
                "   ⏭️  Skipped: {} rows (invalid data or team not found)",
                totals.skipped + totals.invalid
            );
        }
        ImportKind::Teams | ImportKind::Distances => {
            println!("   ✅ Inserted: {}", totals.inserted);
            println!("   🔄 Updated:  {}", totals.updated);
            println!("   ⏭️  Skipped:  {}", totals.skipped);
            println!("   ⚠️  Invalid:  {}", totals.invalid);
        }
    }
    if totals.failed > 0 {
        println!("{}", format!("   ❌ Failed:   {}", totals.failed).red());
    }

    for sheet in report.aborted_sheets() {
        if let Some(reason) = &sheet.aborted {
            println!(
                "{}",
                format!("   ❌ Sheet '{}' aborted: {}", sheet.sheet, reason).red()
            );
        }
    }

    if !report.teams.is_empty() {
        println!("\n{}", "📋 Teams processed:".bold().cyan());
        let mut teams = report.teams.clone();
        teams.sort();
        for (team, count) in teams {
            println!("   • {}: {} souvenirs", team, count);
        }
    }

    println!(
        "\n📈 Total {} in database: {}",
        match report.kind {
            ImportKind::Distances => "distances",
            ImportKind::Teams | ImportKind::Souvenirs => "teams",
        },
        report.total_in_store
    );
    if let Some(sample) = &report.sample {
        println!("📋 Sample: {}", sample);
    }
}

fn print_restore_report(report: &RestoreReport) {
    println!();
    println!("{}", "📊 Restoration Summary:".bold().green());
    println!("   📋 Teams checked: {}", report.teams_seen);
    println!("   ✅ Updated: {} teams", report.teams_updated);
    println!(
        "   ⏭️  Skipped: {} teams (already have default souvenirs)",
        report.teams_compliant
    );
    println!("   🔧 Souvenirs restored: {}", report.souvenirs_restored);
    println!("   ➕ Souvenirs added: {}", report.souvenirs_added);
    if report.failed > 0 {
        println!("{}", format!("   ❌ Failed: {} teams", report.failed).red());
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
