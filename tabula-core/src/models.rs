//! Closed enumerations shared by the request builder and the dispatcher.

use crate::{Result, error::TabulaError};
use serde::{Serialize, Serializer};
use std::str::FromStr;

/// Database engines a request can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engine {
    MySql,
    PostgreSql,
    Sqlite,
    MsSql,
    Oracle,
    Db2,
    Informix,
    Mongo,
    Redis,
    Neo4j,
}

impl Engine {
    /// Every supported engine, in declaration order.
    pub const ALL: [Engine; 10] = [
        Engine::MySql,
        Engine::PostgreSql,
        Engine::Sqlite,
        Engine::MsSql,
        Engine::Oracle,
        Engine::Db2,
        Engine::Informix,
        Engine::Mongo,
        Engine::Redis,
        Engine::Neo4j,
    ];

    /// Canonical upper-case name accepted on the command line.
    pub fn canonical_name(self) -> &'static str {
        match self {
            Engine::MySql => "MYSQL",
            Engine::PostgreSql => "POSTGRESQL",
            Engine::Sqlite => "SQLITE",
            Engine::MsSql => "MSSQL",
            Engine::Oracle => "ORACLE",
            Engine::Db2 => "DB2",
            Engine::Informix => "INFORMIX",
            Engine::Mongo => "MONGO",
            Engine::Redis => "REDIS",
            Engine::Neo4j => "NEO4J",
        }
    }
}

impl Serialize for Engine {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.canonical_name())
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Engine::MySql => write!(f, "MySQL"),
            Engine::PostgreSql => write!(f, "PostgreSQL"),
            Engine::Sqlite => write!(f, "SQLite"),
            Engine::MsSql => write!(f, "SQL Server"),
            Engine::Oracle => write!(f, "Oracle"),
            Engine::Db2 => write!(f, "DB2"),
            Engine::Informix => write!(f, "Informix"),
            Engine::Mongo => write!(f, "MongoDB"),
            Engine::Redis => write!(f, "Redis"),
            Engine::Neo4j => write!(f, "Neo4j"),
        }
    }
}

impl FromStr for Engine {
    type Err = TabulaError;

    /// Case-insensitive lookup by canonical name, plus the `POSTGRES` and
    /// `MONGODB` spellings editors commonly send.
    fn from_str(value: &str) -> Result<Self> {
        let normalized = value.trim().to_uppercase();
        match normalized.as_str() {
            "POSTGRES" => return Ok(Engine::PostgreSql),
            "MONGODB" => return Ok(Engine::Mongo),
            _ => {}
        }

        Engine::ALL
            .into_iter()
            .find(|engine| engine.canonical_name() == normalized)
            .ok_or_else(|| TabulaError::InvalidEngine {
                value: value.to_string(),
            })
    }
}

/// Actions selectable through the `--option` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Execute the request's queries
    Run,
    /// List the tables of the target database
    ListTables,
    /// Describe the columns of the table named in the queries field
    TableInfo,
    /// Connectivity check
    Ping,
}

impl Operation {
    /// Option code used when none is given.
    pub const DEFAULT_CODE: i64 = 1;

    /// Resolves an option code.
    ///
    /// # Errors
    /// Returns `UnknownOperation` for any code outside 1..=4.
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            1 => Ok(Operation::Run),
            2 => Ok(Operation::ListTables),
            3 => Ok(Operation::TableInfo),
            4 => Ok(Operation::Ping),
            _ => Err(TabulaError::UnknownOperation { code }),
        }
    }

    /// The option code selecting this operation.
    pub fn code(self) -> i64 {
        match self {
            Operation::Run => 1,
            Operation::ListTables => 2,
            Operation::TableInfo => 3,
            Operation::Ping => 4,
        }
    }
}

impl TryFrom<i64> for Operation {
    type Error = TabulaError;

    fn try_from(code: i64) -> Result<Self> {
        Operation::from_code(code)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Run => write!(f, "run"),
            Operation::ListTables => write!(f, "list tables"),
            Operation::TableInfo => write!(f, "table info"),
            Operation::Ping => write!(f, "ping"),
        }
    }
}

/// Tabular query result with every cell already rendered as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultSet {
    /// Creates an empty result set with the given column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Returns true when the query produced no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// How one non-SELECT statement ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementStatus {
    /// INSERT/UPDATE/DELETE with its affected row count
    RowsAffected(u64),
    /// Any other statement that completed
    Executed,
    /// The engine rejected the statement
    Failed(String),
}

/// Result of an operation, ready to be presented to the plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Ping succeeded
    Connected,
    /// Table names of the target database
    Tables(Vec<String>),
    /// Rows of a SELECT or of a table description
    Rows(ResultSet),
    /// One status per executed statement, in input order
    Executed(Vec<StatementStatus>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_canonical_names_round_trip() {
        for engine in Engine::ALL {
            assert_eq!(engine.canonical_name().parse::<Engine>().ok(), Some(engine));
        }
    }

    #[test]
    fn test_engine_aliases() {
        assert_eq!("postgres".parse::<Engine>().ok(), Some(Engine::PostgreSql));
        assert_eq!("MongoDB".parse::<Engine>().ok(), Some(Engine::Mongo));
        assert_eq!(" sqlite ".parse::<Engine>().ok(), Some(Engine::Sqlite));
    }

    #[test]
    fn test_engine_rejects_unknown() {
        let error = "cassandra".parse::<Engine>().unwrap_err();
        assert!(matches!(error, TabulaError::InvalidEngine { ref value } if value == "cassandra"));
        assert!("".parse::<Engine>().is_err());
    }

    #[test]
    fn test_operation_table() {
        assert_eq!(Operation::from_code(1).ok(), Some(Operation::Run));
        assert_eq!(Operation::from_code(2).ok(), Some(Operation::ListTables));
        assert_eq!(Operation::from_code(3).ok(), Some(Operation::TableInfo));
        assert_eq!(Operation::from_code(4).ok(), Some(Operation::Ping));

        for code in [0, 5, -1, 42, i64::MAX] {
            assert!(matches!(
                Operation::from_code(code),
                Err(TabulaError::UnknownOperation { code: c }) if c == code
            ));
        }
    }

    #[test]
    fn test_operation_code_round_trip() {
        for code in 1..=4 {
            let operation = Operation::try_from(code).unwrap();
            assert_eq!(operation.code(), code);
        }
    }

    #[test]
    fn test_engine_serializes_canonical_name() {
        let json = serde_json::to_string(&Engine::PostgreSql).unwrap();
        assert_eq!(json, "\"POSTGRESQL\"");
    }
}
