use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-named grouping of titles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    pub name: String,
    #[serde(rename = "movieIds", default)]
    pub title_ids: Vec<u64>,
    pub created_at: DateTime<Utc>,
}

impl Collection {
    /// Returns true if the collection lists `title_id`.
    pub fn contains(&self, title_id: u64) -> bool {
        self.title_ids.contains(&title_id)
    }
}
