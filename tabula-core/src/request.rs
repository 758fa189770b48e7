//! Request descriptor construction.
//!
//! Raw flag values arrive as optional strings. [`RequestDescriptor::build`]
//! turns them into a typed, validated and immutable descriptor. Nothing here
//! touches global state, so building twice from the same flags yields equal
//! descriptors.

use crate::{
    Result,
    error::{TabulaError, redact_connection_string},
    models::{Engine, Operation},
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Border style used when the flag is absent.
pub const DEFAULT_BORDER_STYLE: i64 = 1;

/// Header highlight link used when the flag is absent.
pub const DEFAULT_HEADER_STYLE_LINK: &str = "Type";

/// Raw, unvalidated flag values as handed over by the command-line parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFlags {
    pub engine: Option<String>,
    pub conn_str: Option<String>,
    pub db_name: Option<String>,
    pub queries: Option<String>,
    pub border_style: Option<String>,
    pub dest_folder: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub option: Option<String>,
    pub header_style_link: Option<String>,
}

impl RequestFlags {
    /// Parses the operation code flag, defaulting to `1`.
    ///
    /// # Errors
    /// Returns `InvalidNumericOption` when the flag is present but not an integer.
    pub fn option_code(&self) -> Result<i64> {
        parse_integer("option", self.option.as_deref(), Operation::DEFAULT_CODE)
    }

    /// Parses the option code and resolves it against the operation table.
    ///
    /// # Errors
    /// `InvalidNumericOption` for non-numeric input, `UnknownOperation` for
    /// codes outside the table.
    pub fn operation(&self) -> Result<Operation> {
        Operation::from_code(self.option_code()?)
    }
}

/// Immutable description of one request.
///
/// Fields are private; the descriptor is read through accessors only and has
/// no mutating methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    engine: Engine,
    connection_string: Option<String>,
    database_name: Option<String>,
    queries: String,
    border_style: i64,
    dest_folder: PathBuf,
    log_file_path: Option<PathBuf>,
    header_style_link: String,
}

impl RequestDescriptor {
    /// Builds a descriptor from raw flags.
    ///
    /// # Errors
    /// - `InvalidEngine` when the engine is missing or unknown
    /// - `InvalidNumericOption` when the border style is not an integer
    ///
    /// Missing connection string or database name are not errors here; see
    /// [`RequestDescriptor::require_connection_string`].
    pub fn build(flags: &RequestFlags) -> Result<Self> {
        let engine = flags
            .engine
            .as_deref()
            .ok_or_else(|| TabulaError::InvalidEngine {
                value: String::new(),
            })?
            .parse::<Engine>()?;

        let border_style = parse_integer(
            "border-style",
            flags.border_style.as_deref(),
            DEFAULT_BORDER_STYLE,
        )?;

        Ok(Self {
            engine,
            connection_string: non_empty(flags.conn_str.as_deref()),
            database_name: non_empty(flags.db_name.as_deref()),
            queries: flags.queries.clone().unwrap_or_default(),
            border_style,
            dest_folder: flags
                .dest_folder
                .clone()
                .filter(|path| !path.as_os_str().is_empty())
                .unwrap_or_else(std::env::temp_dir),
            log_file_path: flags
                .log_file
                .clone()
                .filter(|path| !path.as_os_str().is_empty()),
            header_style_link: non_empty(flags.header_style_link.as_deref())
                .unwrap_or_else(|| DEFAULT_HEADER_STYLE_LINK.to_string()),
        })
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    pub fn connection_string(&self) -> Option<&str> {
        self.connection_string.as_deref()
    }

    pub fn database_name(&self) -> Option<&str> {
        self.database_name.as_deref()
    }

    /// Query text exactly as given, possibly empty.
    pub fn queries(&self) -> &str {
        &self.queries
    }

    pub fn border_style(&self) -> i64 {
        self.border_style
    }

    pub fn dest_folder(&self) -> &Path {
        &self.dest_folder
    }

    pub fn log_file_path(&self) -> Option<&Path> {
        self.log_file_path.as_deref()
    }

    pub fn header_style_link(&self) -> &str {
        &self.header_style_link
    }

    /// Connection string for operations that need one.
    ///
    /// # Errors
    /// Returns `MissingRequiredField` when none was given.
    pub fn require_connection_string(&self) -> Result<&str> {
        self.connection_string()
            .ok_or(TabulaError::MissingRequiredField {
                field: "connection string",
            })
    }

    /// Database name for operations that need one.
    ///
    /// # Errors
    /// Returns `MissingRequiredField` when none was given.
    pub fn require_database_name(&self) -> Result<&str> {
        self.database_name()
            .ok_or(TabulaError::MissingRequiredField {
                field: "database name",
            })
    }

    /// Non-empty query text for operations that need it.
    ///
    /// # Errors
    /// Returns `MissingRequiredField` when the queries are blank.
    pub fn require_queries(&self) -> Result<&str> {
        let queries = self.queries.trim();
        if queries.is_empty() {
            Err(TabulaError::MissingRequiredField { field: "queries" })
        } else {
            Ok(queries)
        }
    }

    /// Loggable view of the descriptor with the connection string redacted.
    pub fn redacted(&self) -> RedactedDescriptor<'_> {
        RedactedDescriptor {
            engine: self.engine,
            connection_string: self.connection_string.as_deref().map(redact_connection_string),
            database_name: self.database_name.as_deref(),
            queries: &self.queries,
            border_style: self.border_style,
            dest_folder: &self.dest_folder,
            log_file_path: self.log_file_path.as_deref(),
            header_style_link: &self.header_style_link,
        }
    }

    /// JSON rendering of [`RequestDescriptor::redacted`] for debug logs.
    ///
    /// # Errors
    /// Returns a configuration error if serialization fails.
    pub fn to_log_json(&self) -> Result<String> {
        serde_json::to_string(&self.redacted()).map_err(|e| {
            TabulaError::configuration(format!("Failed to serialize request: {}", e))
        })
    }
}

/// Serializable snapshot of a descriptor that is safe to write to logs.
#[derive(Debug, Serialize)]
pub struct RedactedDescriptor<'a> {
    engine: Engine,
    connection_string: Option<String>,
    database_name: Option<&'a str>,
    queries: &'a str,
    border_style: i64,
    dest_folder: &'a Path,
    log_file_path: Option<&'a Path>,
    header_style_link: &'a str,
}

fn parse_integer(flag: &'static str, value: Option<&str>, default: i64) -> Result<i64> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| TabulaError::InvalidNumericOption {
                flag,
                value: raw.to_string(),
            }),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests;
