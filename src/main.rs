use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use nfl_import::cli;
use nfl_import::config::{StoreConfig, DATABASE_ENV, DEFAULT_DATABASE};
use nfl_import::logging;
use nfl_import::reconcile::{ImportKind, ImportMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nfl-import")]
#[command(about = "Load NFL teams, stadium distances and souvenirs from Excel into the planner database.")]
#[command(long_about = "NFL Import - spreadsheet loader for the NFL vacation planner

Reads Excel workbooks and reconciles their rows with the documents already
stored in the `teams` and `distances` collections.

COMMANDS:
  teams             - Teams and stadiums (teams-stadiums.xlsx)
  distances         - Stadium-to-stadium distances (stadium-distances.xlsx)
  souvenirs         - Replace team souvenir lists (souvenirs.xlsx)
  restore-defaults  - Re-assert the default souvenir catalog on every team
  import            - Any of the above, chosen from the file name

EXAMPLES:
  nfl-import teams                              # Upsert from teams-stadiums.xlsx
  nfl-import teams data/teams-stadiums.xlsx --replace
  nfl-import distances --database planner.db
  nfl-import import uploads/souvenirs.xlsx
  RUST_LOG=nfl_import=debug nfl-import restore-defaults")]
#[command(version)]
struct Cli {
    /// SQLite database holding the teams and distances collections
    #[arg(long, global = true, env = DATABASE_ENV, default_value = DEFAULT_DATABASE)]
    database: PathBuf,

    /// Show row-level diagnostics (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Import teams and their stadiums.

New teams are created with the five default souvenirs. Known teams get
their conference, division and stadium overwritten; their souvenir list
is left untouched. The 'Expansion' row is always skipped.

REQUIRED COLUMNS:
  Team(s), Conference, Division (with trailing space), Name, Location,
  Capacity, Surface, Roof Type, Opened

Use --replace to delete every team first and reload from the sheet.")]
    /// Import teams and stadiums
    Teams {
        /// Path to the workbook [default: teams-stadiums.xlsx]
        file: Option<PathBuf>,

        /// Delete all existing teams before importing (no backup is taken)
        #[arg(long)]
        replace: bool,
    },

    #[command(long_about = "Import stadium-to-stadium distances.

Every sheet of the workbook is imported. A (beginning, ending) pair that is
already stored is skipped, never updated. When a row has no team name, the
team playing at the beginning stadium is used, or 'Unknown'.

REQUIRED COLUMNS:
  Beginning Stadium, Ending Stadium, Distance
  Team Name (optional)")]
    /// Import stadium distances
    Distances {
        /// Path to the workbook [default: stadium-distances.xlsx]
        file: Option<PathBuf>,

        /// Delete all existing distances before importing (no backup is taken)
        #[arg(long)]
        replace: bool,
    },

    #[command(long_about = "Replace team souvenir lists.

Rows are grouped by team and each listed team's souvenirs are replaced by
its group. Teams that do not exist are skipped; teams not in the sheet are
left alone.

REQUIRED COLUMNS:
  Team Name, Souvenir Name, Price, Category
  Is Traditional (optional, defaults to false)

CATEGORIES:
  Apparel, Accessories, Collectibles, Food & Beverage")]
    /// Replace team souvenir lists
    Souvenirs {
        /// Path to the workbook [default: souvenirs.xlsx]
        file: Option<PathBuf>,
    },

    /// Restore the default souvenirs on every team
    RestoreDefaults,

    /// Import a workbook, choosing the import from its file name
    Import {
        /// Workbook named like teams-stadiums, stadium-distances or souvenirs
        file: PathBuf,

        /// Delete existing documents first (teams and distances only)
        #[arg(long)]
        replace: bool,
    },
}

fn mode(replace: bool) -> ImportMode {
    if replace {
        ImportMode::Replace
    } else {
        ImportMode::Upsert
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = StoreConfig::new(cli.database);

    let result = match cli.command {
        Commands::Teams { file, replace } => {
            cli::import(&config, ImportKind::Teams, file, mode(replace))
        }

        Commands::Distances { file, replace } => {
            cli::import(&config, ImportKind::Distances, file, mode(replace))
        }

        Commands::Souvenirs { file } => {
            cli::import(&config, ImportKind::Souvenirs, file, ImportMode::Upsert)
        }

        Commands::RestoreDefaults => cli::restore_defaults(&config),

        Commands::Import { file, replace } => cli::import_detected(&config, file, mode(replace)),
    };

    result.context("❌ Import failed")
}
