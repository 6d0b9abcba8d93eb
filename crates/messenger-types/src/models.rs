use serde::{Deserialize, Serialize};

/// A posted note. Both `id` and `dt` are assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    /// SQLite `datetime('now')` text, "YYYY-MM-DD HH:MM:SS" in UTC.
    pub dt: String,
    pub message: String,
    pub sender: String,
}
