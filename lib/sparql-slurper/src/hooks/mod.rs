//! Observers that see every triple fetched from the endpoint.
//!
//! Hooks are registered as [ResultHookFactory]s. For every executed query, each factory creates a
//! fresh [ResultHook], so hooks may keep per-query state. The resulting [HookChain] runs the most
//! recently registered hook first. A hook that returns [HookFlow::Stop] hides the current triple
//! (or the completion) from the hooks registered before it.

mod printer;

pub use printer::{QueryResultPrinter, SharedSink};

use sparql_slurper_model::{Triple, TriplePattern};
use std::sync::Arc;

/// Tells the [HookChain] whether to forward an event to the next hook.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HookFlow {
    #[default]
    Continue,
    Stop,
}

/// Information about the query a hook is created for.
#[derive(Clone, Copy, Debug)]
pub struct HookContext<'a> {
    /// The pattern that triggered the query.
    pub pattern: &'a TriplePattern,
    /// The synthesized query.
    pub query: &'a str,
    /// The namespace bindings of the graph, as `(prefix, namespace)` pairs.
    pub prefixes: &'a [(String, String)],
}

/// Observes the triples of a single query.
pub trait ResultHook: Send {
    /// Called once for every triple returned by the query.
    fn add(&mut self, _triple: &Triple) -> HookFlow {
        HookFlow::Continue
    }

    /// Called once after the last triple of the query.
    fn done(&mut self) -> HookFlow {
        HookFlow::Continue
    }
}

/// Creates a new [ResultHook] for every executed query.
pub trait ResultHookFactory: Send + Sync {
    fn create_hook(&self, context: &HookContext<'_>) -> Box<dyn ResultHook>;
}

impl<F> ResultHookFactory for F
where
    F: Fn(&HookContext<'_>) -> Box<dyn ResultHook> + Send + Sync,
{
    fn create_hook(&self, context: &HookContext<'_>) -> Box<dyn ResultHook> {
        self(context)
    }
}

/// The registered hook factories, in registration order.
#[derive(Clone, Default)]
pub struct ResultHookRegistry {
    factories: Vec<Arc<dyn ResultHookFactory>>,
}

impl ResultHookRegistry {
    pub fn register(&mut self, factory: Arc<dyn ResultHookFactory>) {
        self.factories.push(factory);
    }

    /// Creates the chain for one query.
    pub fn instantiate(&self, context: &HookContext<'_>) -> HookChain {
        HookChain {
            hooks: self
                .factories
                .iter()
                .rev()
                .map(|factory| factory.create_hook(context))
                .collect(),
        }
    }
}

/// The hooks of a single query, most recently registered first.
pub struct HookChain {
    hooks: Vec<Box<dyn ResultHook>>,
}

impl HookChain {
    /// Forwards `triple` until a hook stops it.
    pub fn add(&mut self, triple: &Triple) {
        for hook in &mut self.hooks {
            if hook.add(triple) == HookFlow::Stop {
                break;
            }
        }
    }

    /// Signals the end of the query until a hook stops it.
    pub fn done(&mut self) {
        for hook in &mut self.hooks {
            if hook.done() == HookFlow::Stop {
                break;
            }
        }
    }
}
