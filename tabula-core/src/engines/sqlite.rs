//! SQLite dialect.
//!
//! SQLite databases are files. The connection string is used as-is when it
//! is already a `sqlite:` URL; otherwise the database name (or, failing that,
//! the connection string) is treated as a file path that is created on first
//! use.

use super::{quote_literal, sql::SqlDialect};
use crate::{Result, error::TabulaError, models::Engine, request::RequestDescriptor};

/// SQLite catalog queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    const ENGINE: Engine = Engine::Sqlite;

    fn connection_url(descriptor: &RequestDescriptor) -> Result<String> {
        if let Some(url) = descriptor
            .connection_string()
            .filter(|conn| conn.starts_with("sqlite:"))
        {
            return Ok(url.to_string());
        }

        let path = descriptor
            .database_name()
            .or_else(|| descriptor.connection_string())
            .ok_or(TabulaError::MissingRequiredField {
                field: "database name",
            })?;

        Ok(format!("sqlite:{path}?mode=rwc"))
    }

    fn tables_query(_descriptor: &RequestDescriptor) -> Result<String> {
        Ok("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name".to_string())
    }

    fn table_info_query(_descriptor: &RequestDescriptor, table: &str) -> Result<String> {
        Ok(format!("PRAGMA table_info('{}')", quote_literal(table)))
    }
}
