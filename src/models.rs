use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One journal entry. Serialized in camelCase to match the wire format the
/// client consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub note: Option<String>,
    pub date: Option<NaiveDate>,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}
