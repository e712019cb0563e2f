//! Default souvenir catalog
//!
//! Every newly created team starts with these five souvenirs, and
//! `restore-defaults` re-asserts them across the whole `teams` collection.

use serde_json::{json, Map, Value};

use crate::store::ID_FIELD;
use crate::types::{new_id, Souvenir, SouvenirCategory};

/// One entry of the default catalog. Entries carry no identifier; one is
/// assigned whenever an entry is materialised into a team's list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultSouvenir {
    pub name: &'static str,
    pub price: f64,
    pub category: SouvenirCategory,
    pub is_traditional: bool,
}

pub const DEFAULT_SOUVENIRS: [DefaultSouvenir; 5] = [
    DefaultSouvenir {
        name: "Signed helmets",
        price: 74.99,
        category: SouvenirCategory::Collectibles,
        is_traditional: true,
    },
    DefaultSouvenir {
        name: "Autographed Football",
        price: 79.89,
        category: SouvenirCategory::Collectibles,
        is_traditional: true,
    },
    DefaultSouvenir {
        name: "Team pennant",
        price: 17.99,
        category: SouvenirCategory::Accessories,
        is_traditional: true,
    },
    DefaultSouvenir {
        name: "Team picture",
        price: 29.99,
        category: SouvenirCategory::Collectibles,
        is_traditional: true,
    },
    DefaultSouvenir {
        name: "Team jersey",
        price: 199.99,
        category: SouvenirCategory::Apparel,
        is_traditional: true,
    },
];

impl DefaultSouvenir {
    /// Look up a catalog entry by exact souvenir name.
    pub fn find(name: &str) -> Option<&'static DefaultSouvenir> {
        DEFAULT_SOUVENIRS.iter().find(|d| d.name == name)
    }

    /// Build a souvenir from this entry with a fresh identifier.
    pub fn materialize(&self) -> Souvenir {
        Souvenir::new(self.name, self.price, self.category, self.is_traditional)
    }

    /// Whether a stored souvenir entry already carries this entry's price,
    /// category and flag. Fields are compared as stored, so a missing or
    /// mistyped field counts as a mismatch.
    pub fn matches(&self, entry: &Value) -> bool {
        entry.get("price").and_then(Value::as_f64) == Some(self.price)
            && entry.get("category").and_then(Value::as_str) == Some(self.category.as_str())
            && entry.get("isTraditional").and_then(Value::as_bool) == Some(self.is_traditional)
    }

    /// Rewrite the catalog fields of a stored entry. Its `_id` and any other
    /// fields are kept; an entry without a string `_id` gets a fresh one.
    pub fn restore(&self, entry: &Value) -> Value {
        let mut fields = match entry {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        };
        if !fields.get(ID_FIELD).is_some_and(Value::is_string) {
            fields.insert(ID_FIELD.to_string(), Value::String(new_id()));
        }
        fields.insert("name".to_string(), json!(self.name));
        fields.insert("price".to_string(), json!(self.price));
        fields.insert("category".to_string(), json!(self.category.as_str()));
        fields.insert("isTraditional".to_string(), json!(self.is_traditional));
        Value::Object(fields)
    }

    /// A stored entry for this catalog item with a fresh identifier.
    pub fn to_entry(&self) -> Value {
        json!({
            "_id": new_id(),
            "name": self.name,
            "price": self.price,
            "category": self.category.as_str(),
            "isTraditional": self.is_traditional,
        })
    }
}

/// The full default catalog, each souvenir with its own fresh identifier.
pub fn default_souvenirs() -> Vec<Souvenir> {
    DEFAULT_SOUVENIRS.iter().map(DefaultSouvenir::materialize).collect()
}
