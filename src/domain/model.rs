use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// One parsed record from an uploaded file, keyed by header column name.
/// Field order follows the header so that generated templates round-trip
/// through the parser with their columns intact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Row {
    pub fields: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Field as text. Numbers and booleans that survived dynamic typing
    /// are rendered back to their string form; empty strings count as
    /// absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.fields.get(key)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    pub fn float(&self, key: &str) -> Option<f64> {
        match self.fields.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    pub fn boolean(&self, key: &str) -> Option<bool> {
        match self.fields.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Selects which of the three directory schemas applies to a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Business,
    Category,
    Review,
}

impl EntityKind {
    /// Target collection in the backing store.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Business => "businesses",
            EntityKind::Category => "categories",
            EntityKind::Review => "reviews",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Business => write!(f, "business"),
            EntityKind::Category => write!(f, "category"),
            EntityKind::Review => write!(f, "review"),
        }
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "business" => Ok(EntityKind::Business),
            "category" => Ok(EntityKind::Category),
            "review" => Ok(EntityKind::Review),
            other => Err(format!(
                "Unknown entity kind '{}' (expected business, category or review)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl BusinessStatus {
    /// Permissive parse: anything that is not a known status falls back
    /// to `Pending`, matching how the other coerced columns behave.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "approved" => BusinessStatus::Approved,
            Some(v) if v == "rejected" => BusinessStatus::Rejected,
            _ => BusinessStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessCreate {
    pub name: String,
    pub description: String,
    pub category_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub is_featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Left empty so the backend assigns the authenticated identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub status: BusinessStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    pub icon: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub business_id: String,
    pub rating: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Backend-assigned when absent, same as `owner_id` on businesses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Validated, typed data ready for persistence. Only the mapper builds
/// these, so required fields are always populated by the time the
/// importer sees one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EntityPayload {
    Business(BusinessCreate),
    Category(CategoryCreate),
    Review(ReviewCreate),
}

impl EntityPayload {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityPayload::Business(_) => EntityKind::Business,
            EntityPayload::Category(_) => EntityKind::Category,
            EntityPayload::Review(_) => EntityKind::Review,
        }
    }
}

/// Outcome of one batch import. `errors` holds one human-readable line
/// per rejected or failed row, each prefixed with its row number as it
/// appeared in the uploaded file (header included in the count).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportResult {
    pub count: usize,
    pub errors: Vec<String>,
}

impl ImportResult {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
