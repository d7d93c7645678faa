//! Errors for query execution.

use query_engine_translation::translation;

/// A failure reported by a query engine implementation.
pub type EngineError = Box<dyn std::error::Error + Send + Sync>;

/// Query execution error.
///
/// Translation errors are caused by the request and will fail again if retried; engine
/// errors come from the database and may be transient.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Translation(#[from] translation::error::Error),
    #[error("Engine error: {0}")]
    Engine(EngineError),
}
