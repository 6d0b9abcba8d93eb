use rusqlite::Connection;
use tracing::info;

use crate::InitError;

/// Schema script run once, when the store file is first created.
pub const INIT_SCRIPT: &str = include_str!("../db_init.sql");

pub fn run(conn: &Connection) -> Result<(), InitError> {
    conn.execute_batch(INIT_SCRIPT).map_err(InitError::Script)?;

    info!("Database schema initialized");
    Ok(())
}
