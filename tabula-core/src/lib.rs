//! Core library for Tabula, the database bridge behind an editor plugin.
//!
//! A run turns raw command-line flags into an immutable
//! [`RequestDescriptor`], resolves the option code to an [`Operation`],
//! dispatches it once to the [`EngineExecutor`] for the requested engine and
//! renders the [`Outcome`] as lines and artifacts for the plugin.
//!
//! # Architecture
//! - `request`: flag validation and the descriptor
//! - `dispatch`: single-shot operation dispatch
//! - `engines`: executor trait, factory and per-engine implementations
//! - `output`: tables, artifacts and stdout lines
//! - `logging`: the per-record log file and `tracing` subscribers
//!
//! Connection strings never appear in error messages, and logged descriptors
//! have their passwords redacted.

pub mod dispatch;
pub mod engines;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod query;
pub mod request;

// Re-export commonly used types
pub use dispatch::{Dispatched, Invocation};
pub use engines::{EngineExecutor, create_executor};
pub use error::{Result, TabulaError};
pub use logging::LogRecorder;
pub use models::{Engine, Operation, Outcome, ResultSet, StatementStatus};
pub use output::present;
pub use request::{RequestDescriptor, RequestFlags};
