//! Placeholder executors for engines without a driver.
//!
//! The `define_placeholder_executor!` macro generates a unit struct whose
//! [`EngineExecutor`](super::EngineExecutor) implementation fails every
//! operation with `UnsupportedFeature`, naming the operation and the engine.

/// Generates a placeholder executor for `$engine`.
///
/// ```rust,ignore
/// define_placeholder_executor!(OracleExecutor, Engine::Oracle);
/// ```
macro_rules! define_placeholder_executor {
    ($executor_name:ident, $engine:expr) => {
        /// Placeholder executor; every operation is unsupported.
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $executor_name;

        #[async_trait::async_trait]
        impl $crate::engines::EngineExecutor for $executor_name {
            fn engine(&self) -> $crate::models::Engine {
                $engine
            }

            async fn run(
                &self,
                _descriptor: &$crate::request::RequestDescriptor,
            ) -> $crate::Result<$crate::models::Outcome> {
                Err($crate::error::TabulaError::unsupported_feature(
                    "run",
                    $engine.to_string(),
                ))
            }

            async fn list_tables(
                &self,
                _descriptor: &$crate::request::RequestDescriptor,
            ) -> $crate::Result<Vec<String>> {
                Err($crate::error::TabulaError::unsupported_feature(
                    "list tables",
                    $engine.to_string(),
                ))
            }

            async fn table_info(
                &self,
                _descriptor: &$crate::request::RequestDescriptor,
            ) -> $crate::Result<$crate::models::ResultSet> {
                Err($crate::error::TabulaError::unsupported_feature(
                    "table info",
                    $engine.to_string(),
                ))
            }

            async fn ping(
                &self,
                _descriptor: &$crate::request::RequestDescriptor,
            ) -> $crate::Result<()> {
                Err($crate::error::TabulaError::unsupported_feature(
                    "ping",
                    $engine.to_string(),
                ))
            }
        }
    };
}

use crate::models::Engine;

define_placeholder_executor!(MsSqlExecutor, Engine::MsSql);
define_placeholder_executor!(OracleExecutor, Engine::Oracle);
define_placeholder_executor!(Db2Executor, Engine::Db2);
define_placeholder_executor!(InformixExecutor, Engine::Informix);
define_placeholder_executor!(MongoExecutor, Engine::Mongo);
define_placeholder_executor!(RedisExecutor, Engine::Redis);
define_placeholder_executor!(Neo4jExecutor, Engine::Neo4j);
