//! The seam between query planning and the database that runs the query.

use async_trait::async_trait;

use query_engine_sql::sql::descriptor::QueryDescriptor;

use crate::error::EngineError;

/// Runs query descriptors against the entities of a relational store.
///
/// Implementations typically render the descriptor with
/// [`QueryDescriptor::query_sql`] and bind its parameters in order.
#[async_trait]
pub trait QueryEngine: Send + Sync {
    /// Fetch the rows of `entity` matching the descriptor, as JSON objects.
    async fn fetch(
        &self,
        entity: &str,
        descriptor: &QueryDescriptor,
    ) -> Result<Vec<serde_json::Value>, EngineError>;

    /// Count the rows of `entity` matching the descriptor.
    async fn count(&self, entity: &str, descriptor: &QueryDescriptor) -> Result<u64, EngineError>;
}
