/// Database row types, mapped directly from SQLite rows.
/// Distinct from messenger-types API models to keep the DB layer independent.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRow {
    pub id: i64,
    pub dt: String,
    pub message: String,
    pub sender: String,
}
