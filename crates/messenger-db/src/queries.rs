use crate::Database;
use crate::models::MessageRow;
use anyhow::Result;
use rusqlite::{Connection, Row};
use tracing::debug;

impl Database {
    // -- Messages --

    /// All messages, or the zero-or-one message with `id`. Newest first.
    pub fn list_messages(&self, id: Option<i64>) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| match id {
            Some(id) => query_message_by_id(conn, id),
            None => query_messages(conn),
        })
    }

    /// Insert a message stamped with the store's current time and return the
    /// generated id.
    pub fn create_message(&self, message: &str, sender: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (dt, message, sender) VALUES (datetime('now'), ?1, ?2)",
                (message, sender),
            )?;
            let id = conn.last_insert_rowid();
            debug!("Inserted message {}", id);
            Ok(id)
        })
    }

    /// Delete the message with `id`. Missing ids are not an error.
    pub fn delete_message(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM messages WHERE id = ?1", [id])?;
            debug!("Delete message {}: {} row(s) removed", id, removed);
            Ok(())
        })
    }

    /// Delete every id in `ids`, one autocommitted statement each.
    pub fn delete_messages(&self, ids: &[i64]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }

        self.with_conn(|conn| {
            let mut stmt = conn.prepare("DELETE FROM messages WHERE id = ?1")?;
            for id in ids {
                stmt.execute([id])?;
            }
            debug!("Bulk delete of {} message id(s)", ids.len());
            Ok(())
        })
    }
}

fn query_messages(conn: &Connection) -> Result<Vec<MessageRow>> {
    // id breaks ties between inserts landing in the same second
    let mut stmt = conn.prepare(
        "SELECT id, dt, message, sender FROM messages ORDER BY dt DESC, id DESC",
    )?;

    let rows = stmt
        .query_map([], map_message)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_message_by_id(conn: &Connection, id: i64) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, dt, message, sender FROM messages WHERE id = ?1 ORDER BY dt DESC",
    )?;

    let rows = stmt
        .query_map([id], map_message)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn map_message(row: &Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        dt: row.get(1)?,
        message: row.get(2)?,
        sender: row.get(3)?,
    })
}
