//! Operation dispatch.
//!
//! An [`Invocation`] pairs a resolved [`Operation`] with a validated
//! [`RequestDescriptor`]. Dispatching consumes it, so each invocation drives
//! at most one engine call.

use crate::{
    Result,
    engines::EngineExecutor,
    error::TabulaError,
    models::{Operation, Outcome},
    request::RequestDescriptor,
};

/// A resolved operation ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    operation: Operation,
    descriptor: RequestDescriptor,
}

/// Result of a dispatched invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub descriptor: RequestDescriptor,
    pub outcome: Outcome,
}

impl Invocation {
    pub fn new(operation: Operation, descriptor: RequestDescriptor) -> Self {
        Self {
            operation,
            descriptor,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }

    /// Performs the operation once through `executor`.
    ///
    /// # Errors
    /// - `Configuration` if `executor` serves a different engine
    /// - whatever the executor reports; engine failures are not retried
    pub async fn dispatch(self, executor: &dyn EngineExecutor) -> Result<Dispatched> {
        let engine = self.descriptor.engine();
        if executor.engine() != engine {
            return Err(TabulaError::configuration(format!(
                "executor for {} cannot serve a {} request",
                executor.engine(),
                engine
            )));
        }

        tracing::info!("Dispatching {} on {}", self.operation, engine);

        let outcome = match self.operation {
            Operation::Run => executor.run(&self.descriptor).await?,
            Operation::ListTables => Outcome::Tables(executor.list_tables(&self.descriptor).await?),
            Operation::TableInfo => Outcome::Rows(executor.table_info(&self.descriptor).await?),
            Operation::Ping => {
                executor.ping(&self.descriptor).await?;
                Outcome::Connected
            }
        };

        Ok(Dispatched {
            descriptor: self.descriptor,
            outcome,
        })
    }
}
