mod endpoint;
pub mod error;
mod query_executor;
mod triple_storage;

pub use endpoint::SparqlEndpoint;
pub use query_executor::QueryExecutor;
pub use triple_storage::TripleStorage;
