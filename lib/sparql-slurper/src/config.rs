use crate::synthesizer::{GraphScope, QueryDialect};
use sparql_slurper_common::SparqlEndpoint;
use sparql_slurper_model::BlankNodeMode;

/// Holds the configuration of a [SlurpyGraph](crate::SlurpyGraph).
#[derive(Clone, Debug)]
pub struct SlurperConfig {
    /// The endpoint and the parameters sent with every request.
    pub endpoint: SparqlEndpoint,
    /// The named graphs that queries are restricted to.
    pub graph_scope: GraphScope,
    /// The query flavour, fixed at construction.
    pub dialect: QueryDialect,
    /// Whether blank node labels returned by the endpoint are trusted to be stable.
    pub blank_node_mode: BlankNodeMode,
    /// Whether every query is logged at `info` instead of `debug` level.
    pub trace_queries: bool,
}

impl SlurperConfig {
    pub fn new(endpoint: SparqlEndpoint) -> Self {
        Self {
            endpoint,
            graph_scope: GraphScope::default(),
            dialect: QueryDialect::default(),
            blank_node_mode: BlankNodeMode::default(),
            trace_queries: false,
        }
    }

    #[must_use]
    pub fn with_graph_scope(mut self, graph_scope: GraphScope) -> Self {
        self.graph_scope = graph_scope;
        self
    }

    #[must_use]
    pub fn with_dialect(mut self, dialect: QueryDialect) -> Self {
        self.dialect = dialect;
        self
    }

    #[must_use]
    pub fn with_persistent_blank_nodes(mut self, persistent: bool) -> Self {
        self.blank_node_mode = BlankNodeMode::from_persistent_flag(persistent);
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.endpoint = self.endpoint.with_user_agent(user_agent);
        self
    }

    #[must_use]
    pub fn with_trace_queries(mut self, trace_queries: bool) -> Self {
        self.trace_queries = trace_queries;
        self
    }
}
