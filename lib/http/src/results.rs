use serde::Deserialize;
use sparql_slurper_common::error::RemoteExecutionError;
use sparql_slurper_model::{WireRow, WireTerm, WireTermKind};
use std::collections::HashMap;

/// The media type requested from the endpoint.
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// A SPARQL 1.1 Query Results JSON document.
#[derive(Deserialize)]
struct ResultsDocument {
    results: Option<Bindings>,
    boolean: Option<bool>,
}

#[derive(Deserialize)]
struct Bindings {
    bindings: Vec<HashMap<String, Binding>>,
}

#[derive(Deserialize)]
struct Binding {
    #[serde(rename = "type")]
    kind: String,
    value: String,
    datatype: Option<String>,
    #[serde(rename = "xml:lang")]
    language: Option<String>,
}

/// Decodes a SPARQL JSON results document into wire rows.
///
/// Bindings are kept as returned by the endpoint. In particular, blank node labels are not checked
/// here: whether and how they become terms is decided when the rows are resolved. Unbound
/// variables are simply absent from the row.
pub fn parse_solutions(body: &[u8]) -> Result<Vec<WireRow>, RemoteExecutionError> {
    let document: ResultsDocument =
        serde_json::from_slice(body).map_err(RemoteExecutionError::results)?;
    match (document.results, document.boolean) {
        (Some(results), _) => results.bindings.into_iter().map(wire_row).collect(),
        (None, Some(_)) => Err(RemoteExecutionError::UnexpectedBoolean),
        (None, None) => Err(RemoteExecutionError::results(
            "The document has neither results nor a boolean",
        )),
    }
}

fn wire_row(bindings: HashMap<String, Binding>) -> Result<WireRow, RemoteExecutionError> {
    bindings
        .into_iter()
        .map(|(variable, binding)| Ok((variable, wire_term(binding)?)))
        .collect()
}

fn wire_term(binding: Binding) -> Result<WireTerm, RemoteExecutionError> {
    let kind = binding
        .kind
        .parse::<WireTermKind>()
        .map_err(RemoteExecutionError::results)?;
    Ok(WireTerm {
        kind,
        value: binding.value,
        datatype: binding.datatype,
        language: binding.language,
    })
}
