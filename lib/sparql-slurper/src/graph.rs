//! A lazily filled, local view of a remote [RDF graph](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-graph).
//!
//! The entry point of the module is the [`SlurpyGraph`] struct.
//!
//! Usage example:
//! ```no_run
//! use sparql_slurper::model::*;
//! use sparql_slurper::SlurpyGraph;
//!
//! # tokio_test::block_on(async {
//! let mut graph = SlurpyGraph::new("https://query.wikidata.org/sparql")?;
//! let paris = NamedNode::new("http://www.wikidata.org/entity/Q90")?;
//!
//! // The first lookup queries the endpoint...
//! let first = graph.predicate_objects(paris.clone()).await?;
//! // ...the second one is answered locally.
//! let second = graph.predicate_objects(paris).await?;
//! assert_eq!(first, second);
//! assert_eq!(graph.stats().queries_executed, 1);
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! # }).unwrap();
//! ```

use crate::cache::{CacheLock, PatternCache};
use crate::config::SlurperConfig;
use crate::error::{SerializerError, SlurpError};
use crate::hooks::{HookContext, ResultHookFactory, ResultHookRegistry};
use crate::metrics::SlurpStats;
use crate::synthesizer::{GraphScope, QuerySynthesizer};
use oxrdfio::{RdfFormat, RdfSerializer};
use sparql_slurper_common::{QueryExecutor, SparqlEndpoint, TripleStorage};
use sparql_slurper_http::HttpQueryExecutor;
use sparql_slurper_model::{
    term_to_predicate, term_to_subject, BlankNodeMode, Iri, NamedNode, Subject, Term, Triple,
    TriplePattern, TriplePosition, WireRow,
};
use sparql_slurper_storage::MemTripleStorage;
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

/// A graph that acts as a cache for a SPARQL endpoint.
///
/// Every pattern lookup first checks whether the pattern is covered by a previous lookup. If not,
/// the matching triples are fetched from the endpoint and added to the local storage. The result of
/// a lookup is always computed from the local storage, so it also contains triples that were
/// fetched for other patterns.
///
/// A graph has a single owner. Lookups take `&mut self` and wait for their query to finish.
pub struct SlurpyGraph {
    config: SlurperConfig,
    synthesizer: Box<dyn QuerySynthesizer>,
    executor: Arc<dyn QueryExecutor>,
    storage: Box<dyn TripleStorage>,
    cache: PatternCache,
    hooks: ResultHookRegistry,
    prefixes: Vec<(String, String)>,
    stats: SlurpStats,
}

impl SlurpyGraph {
    /// Creates a graph for the endpoint at `endpoint` using the default settings.
    ///
    /// Parameters in the query string of `endpoint` are sent with every query.
    pub fn new(endpoint: &str) -> Result<Self, SlurpError> {
        let endpoint =
            SparqlEndpoint::parse(endpoint).map_err(|error| SlurpError::InvalidEndpoint {
                url: endpoint.to_owned(),
                error,
            })?;
        Ok(Self::with_config(SlurperConfig::new(endpoint)))
    }

    /// Creates a graph that queries over HTTP with the given `config`.
    pub fn with_config(config: SlurperConfig) -> Self {
        Self::with_executor(config, Arc::new(HttpQueryExecutor::new()))
    }

    /// Creates a graph that sends its queries to `executor`.
    pub fn with_executor(config: SlurperConfig, executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            synthesizer: config.dialect.synthesizer(),
            config,
            executor,
            storage: Box::new(MemTripleStorage::new()),
            cache: PatternCache::new(),
            hooks: ResultHookRegistry::default(),
            prefixes: Vec::new(),
            stats: SlurpStats::default(),
        }
    }

    /// Replaces the local storage. Must be called before the first lookup.
    #[must_use]
    pub fn with_storage(mut self, storage: impl TripleStorage + 'static) -> Self {
        self.storage = Box::new(storage);
        self
    }

    pub fn config(&self) -> &SlurperConfig {
        &self.config
    }

    pub fn stats(&self) -> &SlurpStats {
        &self.stats
    }

    pub fn cache(&self) -> &PatternCache {
        &self.cache
    }

    /// Restricts subsequent queries to `scope`.
    ///
    /// Patterns that were resolved before the change stay resolved.
    pub fn set_graph_scope(&mut self, scope: GraphScope) {
        self.config.graph_scope = scope;
    }

    /// Adds a parameter that is sent with every subsequent query.
    pub fn add_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.config.endpoint.add_parameter(name, value);
    }

    pub fn set_blank_node_mode(&mut self, mode: BlankNodeMode) {
        self.config.blank_node_mode = mode;
    }

    pub fn set_trace_queries(&mut self, trace_queries: bool) {
        self.config.trace_queries = trace_queries;
    }

    /// Binds `prefix` to `namespace` for serialization and printing.
    pub fn bind(
        &mut self,
        prefix: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Result<&mut Self, SerializerError> {
        let prefix = prefix.into();
        let namespace = Iri::parse(namespace.into())
            .map_err(|error| SerializerError::InvalidPrefix {
                prefix: prefix.clone(),
                error,
            })?
            .into_inner();
        self.prefixes.retain(|(p, _)| *p != prefix);
        self.prefixes.push((prefix, namespace));
        Ok(self)
    }

    /// Registers a hook factory. Hooks registered later see the triples first.
    pub fn add_result_hook(&mut self, factory: impl ResultHookFactory + 'static) -> &mut Self {
        self.hooks.register(Arc::new(factory));
        self
    }

    /// Returns whether `pattern` would be answered without querying the endpoint.
    pub fn is_resolved(&self, pattern: &TriplePattern) -> bool {
        self.cache.is_resolved(pattern)
    }

    /// Marks `pattern` as resolved without querying the endpoint.
    pub fn mark_resolved(&mut self, pattern: TriplePattern) {
        self.cache.mark_resolved(pattern);
    }

    /// Stops all fetching until the returned guard is dropped.
    pub fn lock(&self) -> CacheLock {
        self.cache.lock()
    }

    /// Returns the number of triples in the local storage.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the triples matching `pattern`, fetching them from the endpoint if needed.
    ///
    /// If fetching fails, triples from rows processed before the failure stay in the storage but
    /// the pattern is not marked as resolved, so the next lookup queries the endpoint again.
    pub async fn triples(&mut self, pattern: &TriplePattern) -> Result<Vec<Triple>, SlurpError> {
        self.stats.record_pattern();
        if self.cache.is_resolved(pattern) {
            tracing::trace!(%pattern, "Pattern already resolved");
        } else {
            self.fetch(pattern).await?;
        }
        Ok(self.storage.triples_for_pattern(pattern)?)
    }

    /// Returns the objects of the triples with the given subject and predicate.
    pub async fn objects(
        &mut self,
        subject: impl Into<Subject>,
        predicate: impl Into<NamedNode>,
    ) -> Result<Vec<Term>, SlurpError> {
        let pattern = TriplePattern::new(Some(subject), Some(predicate), None::<Term>);
        Ok(self
            .triples(&pattern)
            .await?
            .into_iter()
            .map(|triple| triple.object)
            .collect())
    }

    /// Returns the subjects of the triples with the given predicate and object.
    pub async fn subjects(
        &mut self,
        predicate: impl Into<NamedNode>,
        object: impl Into<Term>,
    ) -> Result<Vec<Subject>, SlurpError> {
        let pattern = TriplePattern::new(None::<Subject>, Some(predicate), Some(object));
        Ok(self
            .triples(&pattern)
            .await?
            .into_iter()
            .map(|triple| triple.subject)
            .collect())
    }

    /// Returns the predicates and objects of the triples with the given subject.
    pub async fn predicate_objects(
        &mut self,
        subject: impl Into<Subject>,
    ) -> Result<Vec<(NamedNode, Term)>, SlurpError> {
        let pattern = TriplePattern::new(Some(subject), None::<NamedNode>, None::<Term>);
        Ok(self
            .triples(&pattern)
            .await?
            .into_iter()
            .map(|triple| (triple.predicate, triple.object))
            .collect())
    }

    /// Returns one object of the triples with the given subject and predicate.
    pub async fn value(
        &mut self,
        subject: impl Into<Subject>,
        predicate: impl Into<NamedNode>,
    ) -> Result<Option<Term>, SlurpError> {
        Ok(self.objects(subject, predicate).await?.into_iter().next())
    }

    /// Writes every triple of the local storage in `format`.
    ///
    /// The cache is locked for the whole operation, so nothing is fetched from the endpoint.
    pub async fn serialize<W: Write>(
        &mut self,
        writer: W,
        format: RdfFormat,
    ) -> Result<W, SerializerError> {
        let _lock = self.cache.lock();
        let triples = self.triples(&TriplePattern::wildcard()).await?;

        let mut serializer = RdfSerializer::from_format(format);
        for (prefix, namespace) in &self.prefixes {
            serializer = serializer
                .with_prefix(prefix.as_str(), namespace.as_str())
                .map_err(|error| SerializerError::InvalidPrefix {
                    prefix: prefix.clone(),
                    error,
                })?;
        }
        let mut writer = serializer.for_writer(writer);
        for triple in &triples {
            writer.serialize_triple(triple)?;
        }
        Ok(writer.finish()?)
    }

    async fn fetch(&mut self, pattern: &TriplePattern) -> Result<(), SlurpError> {
        let Self {
            config,
            synthesizer,
            executor,
            storage,
            cache,
            hooks,
            prefixes,
            stats,
        } = self;

        let query = synthesizer.build_query(pattern, &config.graph_scope);
        let rows = execute(executor.as_ref(), config, &query, stats).await?;

        let mut chain = hooks.instantiate(&HookContext {
            pattern,
            query: &query,
            prefixes,
        });
        for row in &rows {
            let triple =
                resolve_triple(synthesizer.as_ref(), pattern, row, config.blank_node_mode)?;
            storage.insert(triple.clone())?;
            chain.add(&triple);
        }
        chain.done();

        cache.mark_resolved(pattern.clone());
        Ok(())
    }
}

/// Runs `query` and records its cost in `stats`.
async fn execute(
    executor: &dyn QueryExecutor,
    config: &SlurperConfig,
    query: &str,
    stats: &mut SlurpStats,
) -> Result<Vec<WireRow>, SlurpError> {
    let start = Instant::now();
    let rows = executor.execute(&config.endpoint, query).await?;
    let latency = start.elapsed();
    stats.record_query(latency, rows.len());

    let secs = latency.as_secs_f64();
    if config.trace_queries {
        tracing::info!(query, secs, triples = rows.len(), "SLURPER");
    } else {
        tracing::debug!(query, secs, triples = rows.len(), "SLURPER");
    }
    Ok(rows)
}

/// Builds the triple for `row`. Positions bound by `pattern` keep the caller's term.
fn resolve_triple(
    synthesizer: &dyn QuerySynthesizer,
    pattern: &TriplePattern,
    row: &WireRow,
    blank_node_mode: BlankNodeMode,
) -> Result<Triple, SlurpError> {
    let subject = match &pattern.subject {
        Some(subject) => subject.clone(),
        None => term_to_subject(synthesizer.resolve_term(
            row,
            TriplePosition::Subject,
            blank_node_mode,
        )?)?,
    };
    let predicate = match &pattern.predicate {
        Some(predicate) => predicate.clone(),
        None => term_to_predicate(synthesizer.resolve_term(
            row,
            TriplePosition::Predicate,
            blank_node_mode,
        )?)?,
    };
    let object = match &pattern.object {
        Some(object) => object.clone(),
        None => synthesizer.resolve_term(row, TriplePosition::Object, blank_node_mode)?,
    };
    Ok(Triple::new(subject, predicate, object))
}
