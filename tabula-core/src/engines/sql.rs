//! Generic SQL executor over the sqlx `Any` driver.
//!
//! Engine differences live in a [`SqlDialect`]: how to build the connection
//! URL and which catalog queries list tables and describe columns. Everything
//! else (connecting, running statements, rendering cells) is shared.

use super::{EngineExecutor, requested_table};
use crate::{
    Result,
    error::TabulaError,
    models::{Engine, Outcome, ResultSet, StatementStatus},
    query::{is_insert_update_or_delete, is_select_query, split_queries, strip_sql_comments},
    request::RequestDescriptor,
};
use async_trait::async_trait;
use sqlx::{AnyConnection, Column, Connection, Row, any::AnyRow};
use std::marker::PhantomData;

/// Rendering of SQL `NULL` cells.
pub const NULL_CELL: &str = "NULL";

/// Rendering of cells the driver cannot decode.
pub const UNKNOWN_CELL: &str = "UNKNOWN TYPE";

/// Per-engine SQL details.
pub trait SqlDialect: Send + Sync + 'static {
    /// Engine this dialect speaks.
    const ENGINE: Engine;

    /// Connection URL understood by the sqlx `Any` driver.
    fn connection_url(descriptor: &RequestDescriptor) -> Result<String>;

    /// Query returning one table name per row.
    fn tables_query(descriptor: &RequestDescriptor) -> Result<String>;

    /// Query describing the columns of `table`.
    fn table_info_query(descriptor: &RequestDescriptor, table: &str) -> Result<String>;
}

/// Executor for SQL engines, parameterized by dialect.
pub struct SqlExecutor<D> {
    dialect: PhantomData<fn() -> D>,
}

impl<D: SqlDialect> SqlExecutor<D> {
    /// Creates an executor. No connection is opened until an operation runs.
    pub fn new() -> Self {
        Self {
            dialect: PhantomData,
        }
    }

    async fn connect(&self, descriptor: &RequestDescriptor) -> Result<AnyConnection> {
        sqlx::any::install_default_drivers();
        let url = D::connection_url(descriptor)?;

        tracing::debug!("Connecting to {}", D::ENGINE);
        AnyConnection::connect(&url)
            .await
            .map_err(|e| TabulaError::engine_failed(format!("Failed to connect to {}", D::ENGINE), e))
    }
}

impl<D: SqlDialect> Default for SqlExecutor<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> std::fmt::Debug for SqlExecutor<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlExecutor")
            .field("dialect", &std::any::type_name::<D>())
            .finish()
    }
}

#[async_trait]
impl<D: SqlDialect> EngineExecutor for SqlExecutor<D> {
    fn engine(&self) -> Engine {
        D::ENGINE
    }

    async fn run(&self, descriptor: &RequestDescriptor) -> Result<Outcome> {
        let queries = strip_sql_comments(descriptor.queries());
        if queries.trim().is_empty() {
            tracing::debug!("No queries to execute");
            return Ok(Outcome::Executed(Vec::new()));
        }

        let mut conn = self.connect(descriptor).await?;
        let outcome = if is_select_query(&queries) {
            let statements = split_queries(&queries);
            if statements.len() > 1 {
                tracing::debug!(
                    "Running the first of {} statements as a query",
                    statements.len()
                );
            }
            let query = statements.first().map_or(queries.as_str(), String::as_str);
            Outcome::Rows(select(&mut conn, query).await?)
        } else {
            tracing::debug!("Running statements");
            Outcome::Executed(execute_statements(&mut conn, &queries).await?)
        };
        close(conn).await;

        Ok(outcome)
    }

    async fn list_tables(&self, descriptor: &RequestDescriptor) -> Result<Vec<String>> {
        let query = D::tables_query(descriptor)?;
        let mut conn = self.connect(descriptor).await?;

        let rows = sqlx::query(query.as_str())
            .fetch_all(&mut conn)
            .await
            .map_err(|e| TabulaError::engine_failed("Failed to list tables", e))?;
        close(conn).await;

        let tables: Vec<String> = rows
            .iter()
            .map(|row| render_cell(row, 0).to_uppercase())
            .collect();
        tracing::debug!("Found {} tables", tables.len());

        Ok(tables)
    }

    async fn table_info(&self, descriptor: &RequestDescriptor) -> Result<ResultSet> {
        let table = requested_table(descriptor)?;
        let query = D::table_info_query(descriptor, table)?;
        tracing::debug!("Table info query: {}", query);

        let mut conn = self.connect(descriptor).await?;
        let result = select(&mut conn, &query).await?;
        close(conn).await;

        Ok(result)
    }

    async fn ping(&self, descriptor: &RequestDescriptor) -> Result<()> {
        let mut conn = self.connect(descriptor).await?;
        conn.ping()
            .await
            .map_err(|e| TabulaError::engine_failed(format!("Failed to ping {}", D::ENGINE), e))?;
        close(conn).await;

        Ok(())
    }
}

async fn close(conn: AnyConnection) {
    if let Err(e) = conn.close().await {
        tracing::debug!("Connection did not close cleanly: {}", e);
    }
}

async fn select(conn: &mut AnyConnection, query: &str) -> Result<ResultSet> {
    let rows = sqlx::query(query)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| TabulaError::engine_failed("Failed to execute query", e))?;

    let columns = rows
        .first()
        .map(|row| {
            row.columns()
                .iter()
                .map(|column| column.name().to_string())
                .collect()
        })
        .unwrap_or_default();

    let mut result = ResultSet::new(columns);
    result.rows = rows
        .iter()
        .map(|row| (0..row.len()).map(|index| render_cell(row, index)).collect())
        .collect();

    tracing::debug!("Query returned {} rows", result.rows.len());
    Ok(result)
}

async fn execute_statements(
    conn: &mut AnyConnection,
    queries: &str,
) -> Result<Vec<StatementStatus>> {
    let statements = split_queries(queries);

    if let [statement] = statements.as_slice() {
        let done = sqlx::query(statement.as_str())
            .execute(&mut *conn)
            .await
            .map_err(|e| TabulaError::engine_failed("Failed to execute statement", e))?;
        return Ok(vec![status_for(statement, done.rows_affected())]);
    }

    let mut statuses = Vec::with_capacity(statements.len());
    for (index, statement) in statements.iter().enumerate() {
        let status = match sqlx::query(statement.as_str()).execute(&mut *conn).await {
            Ok(done) => status_for(statement, done.rows_affected()),
            Err(e) => {
                tracing::warn!("Statement {} failed: {}", index + 1, e);
                StatementStatus::Failed(e.to_string())
            }
        };
        statuses.push(status);
    }

    Ok(statuses)
}

fn status_for(statement: &str, rows_affected: u64) -> StatementStatus {
    if is_insert_update_or_delete(statement) {
        StatementStatus::RowsAffected(rows_affected)
    } else {
        StatementStatus::Executed
    }
}

/// Renders one cell as text.
///
/// The `Any` driver only decodes a fixed set of primitive types, so each is
/// tried in turn.
fn render_cell(row: &AnyRow, index: usize) -> String {
    if let Ok(value) = row.try_get::<Option<String>, _>(index) {
        return value.unwrap_or_else(|| NULL_CELL.to_string());
    }
    if let Ok(value) = row.try_get::<i64, _>(index) {
        return value.to_string();
    }
    if let Ok(value) = row.try_get::<i32, _>(index) {
        return value.to_string();
    }
    if let Ok(value) = row.try_get::<i16, _>(index) {
        return value.to_string();
    }
    if let Ok(value) = row.try_get::<f64, _>(index) {
        return value.to_string();
    }
    if let Ok(value) = row.try_get::<f32, _>(index) {
        return value.to_string();
    }
    if let Ok(value) = row.try_get::<bool, _>(index) {
        return value.to_string();
    }
    if let Ok(value) = row.try_get::<Vec<u8>, _>(index) {
        return render_bytes(value);
    }
    UNKNOWN_CELL.to_string()
}

/// Binary cells: UTF-8 text as is, anything else as `0x` hex.
fn render_bytes(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            let hex: String = e.as_bytes().iter().map(|b| format!("{b:02x}")).collect();
            format!("0x{hex}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_bytes() {
        assert_eq!(render_bytes(b"plain".to_vec()), "plain");
        assert_eq!(render_bytes(vec![0x00, 0xff]), "0x00ff");
        assert_eq!(render_bytes(Vec::new()), "");
    }

    #[test]
    fn test_status_for() {
        assert_eq!(
            status_for("UPDATE t SET a = 1", 3),
            StatementStatus::RowsAffected(3)
        );
        assert_eq!(
            status_for("CREATE TABLE t (a INT)", 0),
            StatementStatus::Executed
        );
    }
}
