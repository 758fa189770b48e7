//! Engine executors and the factory that picks one per engine.
//!
//! Every engine gets an [`EngineExecutor`]. The SQL engines compiled in
//! through the `postgresql`, `mysql` and `sqlite` features share
//! [`sql::SqlExecutor`] over a per-engine dialect. The remaining engines
//! are placeholders that reject every operation.
//!
//! # Module Structure
//! - `placeholder`: macro generating the placeholder executors
//! - `sql`: generic executor over the sqlx `Any` driver
//! - `sqlite`, `postgres`, `mysql`: dialects

use crate::{
    Result,
    models::{Engine, Outcome, ResultSet},
    request::RequestDescriptor,
};
use async_trait::async_trait;

pub mod placeholder;

#[cfg(any(feature = "postgresql", feature = "mysql", feature = "sqlite"))]
pub mod sql;

#[cfg(feature = "mysql")]
pub mod mysql;
#[cfg(feature = "postgresql")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

/// Executes operations against one database engine.
///
/// Object-safe, so the dispatcher works with `Box<dyn EngineExecutor>` and
/// tests can substitute their own implementation. Each method opens its own
/// connection and closes it before returning.
#[async_trait]
pub trait EngineExecutor: Send + Sync {
    /// Engine served by this executor.
    fn engine(&self) -> Engine;

    /// Executes the descriptor's queries.
    async fn run(&self, descriptor: &RequestDescriptor) -> Result<Outcome>;

    /// Lists table names, upper-cased, in engine order.
    async fn list_tables(&self, descriptor: &RequestDescriptor) -> Result<Vec<String>>;

    /// Describes the columns of the table named by the descriptor's queries.
    async fn table_info(&self, descriptor: &RequestDescriptor) -> Result<ResultSet>;

    /// Connects and checks the connection is alive.
    async fn ping(&self, descriptor: &RequestDescriptor) -> Result<()>;
}

/// Creates the executor for `engine`.
///
/// # Errors
/// Returns `UnsupportedFeature` when the engine's driver was not compiled in.
pub fn create_executor(engine: Engine) -> Result<Box<dyn EngineExecutor>> {
    match engine {
        #[cfg(feature = "postgresql")]
        Engine::PostgreSql => Ok(Box::new(sql::SqlExecutor::<postgres::Postgres>::new())),
        #[cfg(not(feature = "postgresql"))]
        Engine::PostgreSql => Err(crate::error::TabulaError::unsupported_feature(
            "PostgreSQL executor (compile with --features postgresql)",
            engine.to_string(),
        )),
        #[cfg(feature = "mysql")]
        Engine::MySql => Ok(Box::new(sql::SqlExecutor::<mysql::MySql>::new())),
        #[cfg(not(feature = "mysql"))]
        Engine::MySql => Err(crate::error::TabulaError::unsupported_feature(
            "MySQL executor (compile with --features mysql)",
            engine.to_string(),
        )),
        #[cfg(feature = "sqlite")]
        Engine::Sqlite => Ok(Box::new(sql::SqlExecutor::<sqlite::Sqlite>::new())),
        #[cfg(not(feature = "sqlite"))]
        Engine::Sqlite => Err(crate::error::TabulaError::unsupported_feature(
            "SQLite executor (compile with --features sqlite)",
            engine.to_string(),
        )),
        Engine::MsSql => Ok(Box::new(placeholder::MsSqlExecutor)),
        Engine::Oracle => Ok(Box::new(placeholder::OracleExecutor)),
        Engine::Db2 => Ok(Box::new(placeholder::Db2Executor)),
        Engine::Informix => Ok(Box::new(placeholder::InformixExecutor)),
        Engine::Mongo => Ok(Box::new(placeholder::MongoExecutor)),
        Engine::Redis => Ok(Box::new(placeholder::RedisExecutor)),
        Engine::Neo4j => Ok(Box::new(placeholder::Neo4jExecutor)),
    }
}

/// Table name for a table-info request, taken from the queries field.
///
/// # Errors
/// Returns `MissingRequiredField` when the queries are blank.
pub fn requested_table(descriptor: &RequestDescriptor) -> Result<&str> {
    let name = descriptor.require_queries()?;
    Ok(name.trim_end_matches(';').trim())
}

/// Escapes a value for use inside a single-quoted SQL literal.
pub fn quote_literal(value: &str) -> String {
    value.replace('\'', "''")
}
