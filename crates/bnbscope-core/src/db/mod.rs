//! SQLite database module for bnbscope

mod provider;
pub mod schema;

use std::path::Path;

use rusqlite::Connection;

use crate::error::{Result, ScopeError};

pub use schema::create_schema;

/// SQLite database holding the listings/security/tourism tables.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open an existing database file.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ScopeError::DatabaseNotFound {
                path: path.to_path_buf(),
            });
        }

        let conn = Connection::open(path).map_err(|e| {
            ScopeError::Other(format!("failed to open database at {}: {}", path.display(), e))
        })?;

        Ok(Database { conn })
    }

    /// Create (or open) a database file and ensure the schema exists.
    pub fn create(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| {
            ScopeError::Other(format!("failed to create database at {}: {}", path.display(), e))
        })?;

        create_schema(&conn)
            .map_err(|e| ScopeError::Other(format!("failed to create database schema: {}", e)))?;

        Ok(Database { conn })
    }

    /// In-memory database with the schema created. Used by tests and demos.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        create_schema(&conn)
            .map_err(|e| ScopeError::Other(format!("failed to create database schema: {}", e)))?;
        Ok(Database { conn })
    }

    /// Load the demonstration dataset so every chart has data to show.
    pub fn seed_demo(&self) -> Result<()> {
        schema::seed_demo(&self.conn)
            .map_err(|e| ScopeError::Other(format!("failed to seed demo data: {}", e)))
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn listing_count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM listings", [], |r| r.get(0))
            .map_err(|e| ScopeError::Other(format!("failed to get listing count: {}", e)))
    }

    pub fn borough_count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM borough", [], |r| r.get(0))
            .map_err(|e| ScopeError::Other(format!("failed to get borough count: {}", e)))
    }

    pub fn security_event_count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM security", [], |r| r.get(0))
            .map_err(|e| ScopeError::Other(format!("failed to get security event count: {}", e)))
    }
}
