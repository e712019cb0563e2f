//! Excel input for the importers
//!
//! - Reader: workbook (.xlsx/.xls/.ods) → sheets of header-addressed rows
//! - Extract: rows → validated team, distance and souvenir records

pub mod extract;
mod reader;

pub use extract::{DistanceRow, SouvenirRow, TeamRow};
pub use reader::{RawRow, Sheet, WorkbookReader};
