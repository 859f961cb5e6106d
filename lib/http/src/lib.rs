//! Executes synthesized queries against a remote endpoint using the
//! [SPARQL 1.1 Protocol](https://www.w3.org/TR/sparql11-protocol/).

mod executor;
mod results;

pub use executor::HttpQueryExecutor;
pub use results::{parse_solutions, SPARQL_RESULTS_JSON};
