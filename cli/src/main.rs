#![allow(clippy::print_stderr, reason = "Statistics are written to stderr")]
use crate::cli::{Args, Command, EndpointArgs};
use anyhow::{bail, Context};
use clap::Parser;
use sparql_slurper::common::SparqlEndpoint;
use sparql_slurper::hooks::{QueryResultPrinter, SharedSink};
use sparql_slurper::model::{NamedNode, Term, TriplePattern};
use sparql_slurper::synthesizer::{GraphScope, QueryDialect};
use sparql_slurper::{RdfFormat, SlurpyGraph, SlurperConfig};
use std::io::{self, stdout, Write};
use std::sync::{Arc, Mutex};

mod cli;
mod logging;

#[tokio::main(flavor = "current_thread")]
pub async fn main() -> anyhow::Result<()> {
    let matches = Args::parse();
    match matches.command {
        Command::Match {
            endpoint,
            subject,
            predicate,
            object,
            follow,
            format,
            prefixes,
            print_results,
            stats,
        } => {
            logging::init(endpoint.trace)?;
            let format = rdf_format_from_name(&format)?;
            let pattern =
                TriplePattern::parse(subject.as_deref(), predicate.as_deref(), object.as_deref())
                    .context("Invalid triple pattern")?;

            let mut graph = SlurpyGraph::with_config(slurper_config(endpoint)?);
            for (prefix, namespace) in prefixes {
                graph
                    .bind(prefix, namespace)
                    .context("Invalid --prefix option")?;
            }
            if print_results {
                let sink: SharedSink = Arc::new(Mutex::new(io::stderr()));
                graph.add_result_hook(QueryResultPrinter::factory(sink, false));
            }

            tracing::debug!(%pattern, "Matching pattern");
            let triples = graph.triples(&pattern).await?;
            tracing::debug!(triples = triples.len(), "Pattern matched");
            if follow {
                for triple in triples {
                    if let Term::NamedNode(object) = triple.object {
                        tracing::debug!(%object, "Following object");
                        graph.predicate_objects(object).await?;
                    }
                }
            }
            tracing::info!(stats = %graph.stats(), "Done");

            let mut output = graph.serialize(stdout().lock(), format).await?;
            output.flush()?;
            if stats {
                eprintln!("{}", graph.stats());
            }
            Ok(())
        }
    }
}

fn slurper_config(args: EndpointArgs) -> anyhow::Result<SlurperConfig> {
    let mut endpoint = SparqlEndpoint::parse(&args.endpoint)
        .with_context(|| format!("Invalid endpoint URL {}", args.endpoint))?;
    for (name, value) in args.parameters {
        endpoint.add_parameter(name, value);
    }

    let graph_scope = if let Some(graph) = args.graph {
        GraphScope::Named(
            NamedNode::new(&graph)
                .with_context(|| format!("The graph name {graph} is invalid"))?,
        )
    } else if args.any_graph {
        GraphScope::AnyGraph
    } else {
        GraphScope::Unscoped
    };
    let dialect = if args.graphdb {
        QueryDialect::GraphDb
    } else {
        QueryDialect::Standard
    };

    let mut config = SlurperConfig::new(endpoint)
        .with_graph_scope(graph_scope)
        .with_dialect(dialect)
        .with_persistent_blank_nodes(args.persistent_bnodes)
        .with_trace_queries(args.trace);
    if let Some(user_agent) = args.user_agent {
        config = config.with_user_agent(user_agent);
    }
    Ok(config)
}

fn rdf_format_from_name(name: &str) -> anyhow::Result<RdfFormat> {
    if let Some(t) = RdfFormat::from_extension(name) {
        return Ok(t);
    }
    if let Some(t) = RdfFormat::from_media_type(name) {
        return Ok(t);
    }
    bail!("The file format '{name}' is unknown")
}

#[cfg(test)]
#[allow(clippy::panic_in_result_fn, reason = "Tests assert inside fallible bodies")]
mod tests {
    use super::*;
    use anyhow::Result;
    use assert_cmd::Command;
    use predicates::prelude::*;

    fn cli_command() -> Command {
        let mut command = Command::new(env!("CARGO"));
        command
            .arg("run")
            .arg("--bin")
            .arg("sparql-slurper")
            .arg("--");
        command
    }

    #[test]
    fn cli_help() {
        cli_command()
            .assert()
            .failure()
            .stdout("")
            .stderr(predicate::str::contains("Usage"));
    }

    #[test]
    fn cli_rejects_invalid_endpoint() {
        cli_command()
            .arg("match")
            .arg("not a url")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid endpoint URL"));
    }

    #[test]
    fn cli_rejects_literal_subject() {
        cli_command()
            .arg("match")
            .arg("http://localhost:7200/repositories/test")
            .arg("--subject")
            .arg("\"Gas\"")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid triple pattern"));
    }

    #[test]
    fn cli_logs_the_matched_pattern() {
        cli_command()
            .env("RUST_LOG", "sparql_slurper=debug")
            .arg("match")
            .arg("http://127.0.0.1:9/sparql")
            .arg("--subject")
            .arg("<http://example.org/s>")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Matching pattern"));
    }

    #[test]
    fn cli_rejects_conflicting_scopes() {
        cli_command()
            .arg("match")
            .arg("http://localhost:7200/repositories/test")
            .arg("--graph")
            .arg("http://example.org/g")
            .arg("--any-graph")
            .assert()
            .failure();
    }

    #[test]
    fn formats_by_name() -> Result<()> {
        assert_eq!(rdf_format_from_name("ttl")?, RdfFormat::Turtle);
        assert_eq!(
            rdf_format_from_name("application/n-triples")?,
            RdfFormat::NTriples
        );
        assert!(rdf_format_from_name("foo").is_err());
        Ok(())
    }

    #[test]
    fn clap_debug() {
        use clap::CommandFactory;

        Args::command().debug_assert()
    }
}
