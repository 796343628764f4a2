use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A scheduled redirect target, live for exactly one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub active_at: NaiveDate,
    pub target: Option<String>,
    #[serde(default)]
    pub comment: String,
    /// Stored and shown to admins only; public listings ignore it.
    #[serde(default)]
    pub visibility: String,
}

impl Entry {
    /// Whether the entry is live on `today` or was live before it.
    #[inline]
    pub fn is_visible_on(&self, today: NaiveDate) -> bool {
        self.active_at <= today
    }
}

/// Fields supplied by the admin when queueing an entry. The store assigns the
/// id and the scheduler the day.
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub target: String,
    pub comment: String,
    pub visibility: String,
}
