pub mod init;
pub mod models;
pub mod queries;

use anyhow::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Startup failures. Any of these aborts the server.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("couldn't inspect database file {path}: {source}")]
    Inspect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("couldn't open database file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("couldn't execute the schema script: {0}")]
    Script(#[source] rusqlite::Error),
}

/// Handle to the message store. Holds only the file path: every operation
/// opens its own connection and commits as it goes.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Open the store at `path`, running the schema script if the file does
    /// not exist yet (or exists but is empty).
    pub fn open(path: &Path) -> Result<Self, InitError> {
        let fresh = match std::fs::metadata(path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(source) => {
                return Err(InitError::Inspect {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let conn = Connection::open(path).map_err(|source| InitError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        if fresh {
            init::run(&conn)?;
        }

        info!("Database opened at {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = Connection::open(&self.path)?;
        f(&conn)
    }
}
