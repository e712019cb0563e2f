//! Typed row extraction
//!
//! Turns header-addressed rows into validated records for each entity.
//! Every extractor checks its mandatory columns first, so a sheet with the
//! wrong schema fails with `SchemaMismatch` before any value is judged.

use super::reader::RawRow;
use crate::error::{ImportError, ImportResult};
use crate::types::{SouvenirCategory, Stadium};

/// Column labels as they appear in the source workbooks.
pub mod columns {
    pub const TEAMS: &str = "Team(s)";
    pub const CONFERENCE: &str = "Conference";
    /// The source sheet carries a trailing space on this header.
    pub const DIVISION: &str = "Division ";
    pub const STADIUM_NAME: &str = "Name";
    pub const LOCATION: &str = "Location";
    pub const CAPACITY: &str = "Capacity";
    pub const SURFACE: &str = "Surface";
    pub const ROOF_TYPE: &str = "Roof Type";
    pub const OPENED: &str = "Opened";

    pub const TEAM_NAME: &str = "Team Name";
    pub const BEGINNING_STADIUM: &str = "Beginning Stadium";
    pub const ENDING_STADIUM: &str = "Ending Stadium";
    pub const DISTANCE: &str = "Distance";

    pub const SOUVENIR_NAME: &str = "Souvenir Name";
    pub const PRICE: &str = "Price";
    pub const CATEGORY: &str = "Category";
    pub const IS_TRADITIONAL: &str = "Is Traditional";
}

use columns::*;

/// `Team(s)` value of the placeholder row that never becomes a team.
pub const EXPANSION_ROW: &str = "Expansion";

const TEAM_COLUMNS: [&str; 9] = [
    TEAMS,
    CONFERENCE,
    DIVISION,
    STADIUM_NAME,
    LOCATION,
    CAPACITY,
    SURFACE,
    ROOF_TYPE,
    OPENED,
];
const DISTANCE_COLUMNS: [&str; 3] = [BEGINNING_STADIUM, ENDING_STADIUM, DISTANCE];
const SOUVENIR_COLUMNS: [&str; 4] = [TEAM_NAME, SOUVENIR_NAME, PRICE, CATEGORY];

//==============================================================================
// Teams
//==============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TeamRow {
    pub team_name: String,
    pub conference: String,
    pub division: String,
    pub stadium: Stadium,
}

impl TeamRow {
    /// Whether the row is the "Expansion" placeholder.
    pub fn is_expansion(row: &RawRow<'_>) -> ImportResult<bool> {
        Ok(row.text(TEAMS)? == EXPANSION_ROW)
    }

    pub fn extract(row: &RawRow<'_>) -> ImportResult<Self> {
        row.require_columns(&TEAM_COLUMNS)?;
        let ordinal = row.ordinal();

        let capacity = row.whole_number(CAPACITY)?;
        let seating_capacity = u32::try_from(capacity).map_err(|_| {
            ImportError::invalid(ordinal, format!("Capacity out of range: {}", capacity))
        })?;

        let opened = row.whole_number(OPENED)?;
        let year_opened = i32::try_from(opened)
            .ok()
            .filter(|y| *y >= 0)
            .ok_or_else(|| ImportError::invalid(ordinal, format!("Opened out of range: {}", opened)))?;

        let team = Self {
            team_name: row.text(TEAMS)?,
            conference: row.text(CONFERENCE)?,
            division: row.text(DIVISION)?,
            stadium: Stadium {
                name: row.text(STADIUM_NAME)?,
                location: row.text(LOCATION)?,
                seating_capacity,
                surface_type: row.text(SURFACE)?,
                roof_type: row.text(ROOF_TYPE)?,
                year_opened,
            },
        };

        if team.team_name.is_empty()
            || team.conference.is_empty()
            || team.division.is_empty()
            || team.stadium.name.is_empty()
        {
            return Err(ImportError::invalid(
                ordinal,
                format!(
                    "Missing required fields (Team: '{}', Conference: '{}', Division: '{}', Stadium: '{}')",
                    team.team_name, team.conference, team.division, team.stadium.name
                ),
            ));
        }

        Ok(team)
    }
}

//==============================================================================
// Distances
//==============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceRow {
    /// None when the sheet has no `Team Name` column or the cell is blank.
    pub team_name: Option<String>,
    pub beginning_stadium: String,
    pub ending_stadium: String,
    pub distance: f64,
}

impl DistanceRow {
    pub fn extract(row: &RawRow<'_>) -> ImportResult<Self> {
        row.require_columns(&DISTANCE_COLUMNS)?;

        let distance = Self {
            team_name: row.optional_text(TEAM_NAME)?.filter(|t| !t.is_empty()),
            beginning_stadium: row.text(BEGINNING_STADIUM)?,
            ending_stadium: row.text(ENDING_STADIUM)?,
            distance: row.number(DISTANCE)?,
        };

        if distance.beginning_stadium.is_empty()
            || distance.ending_stadium.is_empty()
            || distance.distance <= 0.0
        {
            return Err(ImportError::invalid(
                row.ordinal(),
                format!(
                    "Missing required fields (Beginning: '{}', Ending: '{}', Distance: {})",
                    distance.beginning_stadium, distance.ending_stadium, distance.distance
                ),
            ));
        }

        Ok(distance)
    }
}

//==============================================================================
// Souvenirs
//==============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SouvenirRow {
    pub team_name: String,
    pub name: String,
    pub price: f64,
    pub category: SouvenirCategory,
    pub is_traditional: bool,
}

impl SouvenirRow {
    pub fn extract(row: &RawRow<'_>) -> ImportResult<Self> {
        row.require_columns(&SOUVENIR_COLUMNS)?;
        let ordinal = row.ordinal();

        let team_name = row.text(TEAM_NAME)?;
        let name = row.text(SOUVENIR_NAME)?;
        let price = row.number(PRICE)?;
        let category = row.text(CATEGORY)?;
        let is_traditional = row.optional_flag(IS_TRADITIONAL)?.unwrap_or(false);

        if team_name.is_empty() || name.is_empty() || price <= 0.0 || category.is_empty() {
            return Err(ImportError::invalid(ordinal, "Missing required fields"));
        }

        let category = category
            .parse::<SouvenirCategory>()
            .map_err(|reason| ImportError::invalid(ordinal, reason))?;

        Ok(Self {
            team_name,
            name,
            price,
            category,
            is_traditional,
        })
    }
}
