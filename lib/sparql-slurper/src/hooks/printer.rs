use crate::hooks::{HookContext, HookFlow, ResultHook, ResultHookFactory};
use oxrdfio::{RdfFormat, RdfSerializer};
use sparql_slurper_model::Triple;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// A writer shared by all printers created by the same factory.
pub type SharedSink = Arc<Mutex<dyn Write + Send>>;

/// Prints the triples of every query once the query is done.
///
/// The output starts with `RESULTS:` followed by the Turtle serialization of the triples returned
/// by the query, each line indented with a tab:
///
/// ```text
/// RESULTS:
///     wd:Q29017194 wdt:P31 wd:Q13442814 .
/// ```
///
/// `@prefix` declarations are only printed if `include_namespaces` is set. The namespace bindings
/// of the graph are used for abbreviating IRIs in both cases.
///
/// Printing is best effort: if the sink cannot be written to, the failure is logged as a warning
/// and the lookup that triggered the query still succeeds.
pub struct QueryResultPrinter {
    sink: SharedSink,
    include_namespaces: bool,
    prefixes: Vec<(String, String)>,
    triples: Vec<Triple>,
}

impl QueryResultPrinter {
    pub fn new(
        sink: SharedSink,
        include_namespaces: bool,
        prefixes: Vec<(String, String)>,
    ) -> Self {
        Self {
            sink,
            include_namespaces,
            prefixes,
            triples: Vec::new(),
        }
    }

    /// Returns a factory creating printers that write to `sink`.
    pub fn factory(sink: SharedSink, include_namespaces: bool) -> impl ResultHookFactory {
        move |context: &HookContext<'_>| {
            Box::new(Self::new(
                Arc::clone(&sink),
                include_namespaces,
                context.prefixes.to_vec(),
            )) as Box<dyn ResultHook>
        }
    }

    /// Returns a factory creating printers that write to the standard output.
    pub fn stdout_factory(include_namespaces: bool) -> impl ResultHookFactory {
        let sink: SharedSink = Arc::new(Mutex::new(io::stdout()));
        Self::factory(sink, include_namespaces)
    }

    /// Renders the accumulated triples.
    pub fn render(&self) -> io::Result<String> {
        let mut serializer = RdfSerializer::from_format(RdfFormat::Turtle);
        for (prefix, namespace) in &self.prefixes {
            serializer = serializer
                .with_prefix(prefix.as_str(), namespace.as_str())
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        }
        let mut writer = serializer.for_writer(Vec::new());
        for triple in &self.triples {
            writer.serialize_triple(triple)?;
        }
        let turtle = String::from_utf8(writer.finish()?)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut output = String::from("RESULTS:\n");
        for line in turtle.lines() {
            if !self.include_namespaces && (line.starts_with("@prefix") || line.is_empty()) {
                continue;
            }
            output.push('\t');
            output.push_str(line);
            output.push('\n');
        }
        Ok(output)
    }

    fn print(&self) -> io::Result<()> {
        let output = self.render()?;
        let mut sink = self
            .sink
            .lock()
            .map_err(|_| io::Error::other("The printer sink is poisoned"))?;
        sink.write_all(output.as_bytes())?;
        sink.flush()
    }
}

impl ResultHook for QueryResultPrinter {
    fn add(&mut self, triple: &Triple) -> HookFlow {
        self.triples.push(triple.clone());
        HookFlow::Continue
    }

    fn done(&mut self) -> HookFlow {
        if let Err(error) = self.print() {
            tracing::warn!(%error, "Failed to print query results");
        }
        HookFlow::Continue
    }
}
