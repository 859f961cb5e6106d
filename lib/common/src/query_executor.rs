use crate::error::RemoteExecutionError;
use crate::SparqlEndpoint;
use async_trait::async_trait;
use sparql_slurper_model::WireRow;
use std::fmt::Debug;

/// Executes a synthesized SELECT query against a remote endpoint.
///
/// Implementations must forward every parameter of the [SparqlEndpoint] with each request and must
/// not retry on failure. Timeouts and cancellation are the concern of the implementation.
#[async_trait]
pub trait QueryExecutor: Debug + Send + Sync {
    /// Runs `query` and returns all result rows.
    async fn execute(
        &self,
        endpoint: &SparqlEndpoint,
        query: &str,
    ) -> Result<Vec<WireRow>, RemoteExecutionError>;
}
