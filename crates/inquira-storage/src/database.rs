// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use inquira_core::InquiraError;
use tokio_rusqlite::Connection;
use tracing::debug;

use crate::migrations;

/// Map a tokio_rusqlite error into InquiraError::Storage.
pub fn map_tr_err(e: tokio_rusqlite::Error) -> InquiraError {
    InquiraError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the inquiry-history SQLite database.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (creating if needed) the database at `path`, set PRAGMAs, and
    /// run pending migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, InquiraError> {
        if let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| InquiraError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = Connection::open(path.to_owned())
            .await
            .map_err(|e| map_tr_err(e.into()))?;
        conn.call(move |conn| {
            if wal_mode {
                conn.pragma_update(None, "journal_mode", "WAL")?;
            }
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.pragma_update(None, "busy_timeout", 5000)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| migrations::run_migrations(conn))
            .await
            .map_err(|e| InquiraError::Storage {
                source: Box::new(e),
            })?;

        debug!(path, "database opened");
        Ok(Self { conn })
    }

    /// The underlying serialized connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL and flush pending writes.
    pub async fn close(&self) -> Result<(), InquiraError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}
