use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fresh document identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

//==============================================================================
// Teams
//==============================================================================

/// Team document as persisted in the `teams` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub team_name: String,
    pub conference: String,
    pub division: String,
    pub stadium: Stadium,
    #[serde(default)]
    pub souvenirs: Vec<Souvenir>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Stadium embedded in a team. Has no identity of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stadium {
    pub name: String,
    pub location: String,
    pub seating_capacity: u32,
    pub surface_type: String,
    pub roof_type: String,
    /// 0 when unknown
    pub year_opened: i32,
}

//==============================================================================
// Souvenirs
//==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Souvenir {
    #[serde(rename = "_id", default = "new_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: SouvenirCategory,
    #[serde(default)]
    pub is_traditional: bool,
}

impl Souvenir {
    /// Create a souvenir with a freshly assigned identifier.
    pub fn new(name: impl Into<String>, price: f64, category: SouvenirCategory, is_traditional: bool) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            price,
            category,
            is_traditional,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SouvenirCategory {
    Apparel,
    Accessories,
    Collectibles,
    #[serde(rename = "Food & Beverage")]
    FoodAndBeverage,
}

impl SouvenirCategory {
    pub const ALL: [SouvenirCategory; 4] = [
        SouvenirCategory::Apparel,
        SouvenirCategory::Accessories,
        SouvenirCategory::Collectibles,
        SouvenirCategory::FoodAndBeverage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SouvenirCategory::Apparel => "Apparel",
            SouvenirCategory::Accessories => "Accessories",
            SouvenirCategory::Collectibles => "Collectibles",
            SouvenirCategory::FoodAndBeverage => "Food & Beverage",
        }
    }
}

impl fmt::Display for SouvenirCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SouvenirCategory {
    type Err = String;

    /// Exact match only. "apparel" or "Merchandise" are rejected, not coerced.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
                format!(
                    "Invalid category '{}'. Must be one of: {}",
                    s,
                    valid.join(", ")
                )
            })
    }
}

//==============================================================================
// Distances
//==============================================================================

/// Team name stored when a distance cannot be attributed to any team.
pub const UNKNOWN_TEAM: &str = "Unknown";

/// Distance document as persisted in the `distances` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distance {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub team_name: String,
    pub beginning_stadium: String,
    pub ending_stadium: String,
    pub distance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
