use crate::results::{parse_solutions, SPARQL_RESULTS_JSON};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use sparql_slurper_common::error::RemoteExecutionError;
use sparql_slurper_common::{QueryExecutor, SparqlEndpoint};
use sparql_slurper_model::WireRow;
use std::time::Duration;

/// A [QueryExecutor] that sends queries over HTTP.
///
/// Queries are sent as GET requests with the query in the `query` parameter, followed by the
/// endpoint parameters.
#[derive(Debug, Clone, Default)]
pub struct HttpQueryExecutor {
    client: Client,
    timeout: Option<Duration>,
}

impl HttpQueryExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an executor that uses an existing [Client].
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Aborts requests that take longer than `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl QueryExecutor for HttpQueryExecutor {
    async fn execute(
        &self,
        endpoint: &SparqlEndpoint,
        query: &str,
    ) -> Result<Vec<WireRow>, RemoteExecutionError> {
        let mut parameters = Vec::with_capacity(endpoint.parameters().len() + 1);
        parameters.push(("query", query));
        parameters.extend(
            endpoint
                .parameters()
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        );

        let mut request = self
            .client
            .get(endpoint.url().clone())
            .query(&parameters)
            .header(ACCEPT, SPARQL_RESULTS_JSON);
        if let Some(user_agent) = endpoint.user_agent() {
            request = request.header(USER_AGENT, user_agent);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::trace!(endpoint = %endpoint.url(), "Sending query");
        let response = request
            .send()
            .await
            .map_err(RemoteExecutionError::transport)?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RemoteExecutionError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(RemoteExecutionError::transport)?;
        parse_solutions(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        // Port 9 (discard) is not expected to serve HTTP.
        let endpoint = SparqlEndpoint::parse("http://127.0.0.1:9/sparql").unwrap();
        let executor = HttpQueryExecutor::new().with_timeout(Duration::from_secs(5));

        let result = executor
            .execute(&endpoint, "SELECT ?s ?p ?o {?s ?p ?o}")
            .await;
        assert!(matches!(result, Err(RemoteExecutionError::Transport(_))));
    }
}
