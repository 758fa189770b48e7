//! PostgreSQL dialect.
//!
//! Catalog columns are cast to `text` because the `Any` driver cannot decode
//! PostgreSQL's identifier domain types.

use super::{quote_literal, sql::SqlDialect};
use crate::{Result, models::Engine, request::RequestDescriptor};

/// PostgreSQL catalog queries, scoped to the `public` schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl SqlDialect for Postgres {
    const ENGINE: Engine = Engine::PostgreSql;

    fn connection_url(descriptor: &RequestDescriptor) -> Result<String> {
        descriptor.require_connection_string().map(str::to_string)
    }

    fn tables_query(_descriptor: &RequestDescriptor) -> Result<String> {
        Ok("SELECT table_name::text FROM information_schema.tables \
            WHERE table_schema = 'public' AND table_type = 'BASE TABLE' \
            ORDER BY table_name"
            .to_string())
    }

    fn table_info_query(_descriptor: &RequestDescriptor, table: &str) -> Result<String> {
        Ok(format!(
            "SELECT upper(c.column_name::text) AS column_name, \
                c.data_type::text AS data_type, \
                c.is_nullable::text AS nullable, \
                COALESCE(c.character_maximum_length::text, '-') AS length, \
                COALESCE(c.column_default::text, '-') AS default_value \
            FROM information_schema.columns c \
            WHERE c.table_schema = 'public' AND lower(c.table_name) = lower('{}') \
            ORDER BY c.ordinal_position",
            quote_literal(table)
        ))
    }
}
