//! Keeps track of the patterns that have already been fetched from the endpoint.

use sparql_slurper_model::TriplePattern;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The log of resolved patterns together with the lock used during full-graph operations.
///
/// A pattern is resolved if the cache is locked, if it is the wildcard pattern or if some logged
/// non-wildcard pattern agrees with it on every position that the logged pattern binds. The log is
/// append-only and never merged or pruned.
#[derive(Debug, Default)]
pub struct PatternCache {
    resolved: Vec<TriplePattern>,
    locked: Arc<AtomicBool>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the triples matching `pattern` are already in the local storage.
    pub fn is_resolved(&self, pattern: &TriplePattern) -> bool {
        if self.is_locked() || pattern.is_wildcard() {
            return true;
        }
        self.resolved
            .iter()
            .filter(|entry| !entry.is_wildcard())
            .any(|entry| pattern.is_subsumed_by(entry))
    }

    /// Records that `pattern` has been fetched. Duplicates are kept.
    pub fn mark_resolved(&mut self, pattern: TriplePattern) {
        self.resolved.push(pattern);
    }

    /// The logged patterns in the order they were resolved.
    pub fn resolved_patterns(&self) -> &[TriplePattern] {
        &self.resolved
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }

    /// Locks the cache until the returned guard is dropped.
    ///
    /// While locked, every pattern counts as resolved so nothing is fetched. Guards may be nested;
    /// dropping a guard restores the state it found.
    pub fn lock(&self) -> CacheLock {
        let previous = self.locked.swap(true, Ordering::AcqRel);
        CacheLock {
            locked: Arc::clone(&self.locked),
            previous,
        }
    }
}

/// A scoped lock on a [PatternCache]. See [PatternCache::lock].
#[derive(Debug)]
#[must_use = "the cache is unlocked as soon as the guard is dropped"]
pub struct CacheLock {
    locked: Arc<AtomicBool>,
    previous: bool,
}

impl Drop for CacheLock {
    fn drop(&mut self) {
        self.locked.store(self.previous, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparql_slurper_model::{Literal, NamedNode, Term};

    fn ex(local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.org/{local}"))
    }

    fn pattern(
        subject: Option<NamedNode>,
        predicate: Option<NamedNode>,
        object: Option<impl Into<Term>>,
    ) -> TriplePattern {
        TriplePattern::new(subject, predicate, object)
    }

    const NONE: Option<Term> = None;

    #[test]
    fn wildcard_is_always_resolved() {
        let cache = PatternCache::new();
        assert!(cache.is_resolved(&TriplePattern::wildcard()));
    }

    #[test]
    fn exact_pattern_is_resolved() {
        let mut cache = PatternCache::new();
        cache.mark_resolved(pattern(Some(ex("s1")), Some(ex("p1")), Some(ex("o1"))));

        assert!(cache.is_resolved(&pattern(Some(ex("s1")), Some(ex("p1")), Some(ex("o1")))));
        assert!(!cache.is_resolved(&pattern(Some(ex("s1")), Some(ex("p1")), Some(ex("o2")))));
        assert!(!cache.is_resolved(&pattern(Some(ex("s1")), None, Some(ex("o1")))));
        assert!(cache.is_resolved(&TriplePattern::wildcard()));
    }

    #[test]
    fn more_general_pattern_is_not_resolved() {
        let mut cache = PatternCache::new();
        cache.mark_resolved(pattern(Some(ex("s1")), Some(ex("p1")), NONE));

        assert!(!cache.is_resolved(&pattern(Some(ex("s1")), None, NONE)));
        assert!(!cache.is_resolved(&pattern(None, Some(ex("p1")), NONE)));
    }

    #[test]
    fn logged_wildcard_entries_are_ignored() {
        let mut cache = PatternCache::new();
        cache.mark_resolved(TriplePattern::wildcard());

        assert!(!cache.is_resolved(&pattern(Some(ex("s1")), None, NONE)));
    }

    #[test]
    fn subsumption_table() {
        let mut cache = PatternCache::new();
        cache.mark_resolved(pattern(Some(ex("s1")), Some(ex("p1")), Some(ex("o1"))));
        cache.mark_resolved(pattern(Some(ex("s1")), Some(ex("p1")), Some(Literal::from("Steam"))));
        cache.mark_resolved(pattern(Some(ex("s1")), Some(ex("p1")), Some(Literal::from(117))));
        cache.mark_resolved(pattern(Some(ex("s2")), Some(ex("p2")), NONE));
        cache.mark_resolved(pattern(Some(ex("s3")), None, Some(ex("o3"))));
        cache.mark_resolved(pattern(Some(ex("s3")), None, Some(Literal::from("Gas"))));
        cache.mark_resolved(pattern(Some(ex("s3")), None, Some(Literal::from(-42))));
        cache.mark_resolved(pattern(Some(ex("s4")), None, NONE));
        cache.mark_resolved(pattern(None, Some(ex("p5")), Some(ex("o5"))));
        cache.mark_resolved(pattern(None, Some(ex("p5")), Some(Literal::from("Coal"))));
        cache.mark_resolved(pattern(None, Some(ex("p5")), Some(Literal::from(11.2))));
        cache.mark_resolved(pattern(None, Some(ex("p6")), NONE));
        cache.mark_resolved(pattern(None, None, Some(ex("o7"))));
        cache.mark_resolved(pattern(None, None, Some(Literal::from("Wood"))));
        cache.mark_resolved(pattern(None, None, Some(Literal::from(6.5))));

        assert!(cache.is_resolved(&TriplePattern::wildcard()));

        assert!(cache.is_resolved(&pattern(Some(ex("s1")), Some(ex("p1")), Some(ex("o1")))));
        assert!(!cache.is_resolved(&pattern(Some(ex("s1")), Some(ex("p1")), Some(ex("o2")))));
        assert!(cache.is_resolved(&pattern(
            Some(ex("s1")),
            Some(ex("p1")),
            Some(Literal::from("Steam"))
        )));
        assert!(!cache.is_resolved(&pattern(
            Some(ex("s1")),
            Some(ex("p1")),
            Some(Literal::from("Gas"))
        )));
        assert!(cache.is_resolved(&pattern(Some(ex("s1")), Some(ex("p1")), Some(Literal::from(117)))));
        assert!(!cache.is_resolved(&pattern(Some(ex("s1")), Some(ex("p1")), Some(Literal::from(118)))));
        assert!(!cache.is_resolved(&pattern(Some(ex("s1")), None, Some(Literal::from(117)))));
        assert!(!cache.is_resolved(&pattern(None, Some(ex("p1")), Some(Literal::from(117)))));

        assert!(cache.is_resolved(&pattern(Some(ex("s2")), Some(ex("p2")), Some(Literal::from(143)))));
        assert!(!cache.is_resolved(&pattern(Some(ex("s2")), None, Some(Literal::from(143)))));
        assert!(cache.is_resolved(&pattern(Some(ex("s4")), Some(ex("p4")), NONE)));
        assert!(cache.is_resolved(&pattern(Some(ex("s4")), None, Some(Literal::from(12)))));
        assert!(cache.is_resolved(&pattern(Some(ex("s4")), None, NONE)));

        assert!(cache.is_resolved(&pattern(Some(ex("s5")), Some(ex("p5")), Some(ex("o5")))));
        assert!(!cache.is_resolved(&pattern(Some(ex("s5")), Some(ex("p5")), Some(ex("o5n")))));

        assert!(cache.is_resolved(&pattern(Some(ex("s7")), None, Some(ex("o7")))));
        assert!(cache.is_resolved(&pattern(None, Some(ex("p7")), Some(ex("o7")))));
        assert!(!cache.is_resolved(&pattern(Some(ex("s7")), None, NONE)));
    }

    #[test]
    fn log_keeps_duplicates() {
        let mut cache = PatternCache::new();
        let entry = pattern(Some(ex("s1")), None, NONE);
        cache.mark_resolved(entry.clone());
        cache.mark_resolved(entry.clone());
        assert_eq!(cache.resolved_patterns(), &[entry.clone(), entry]);
    }

    #[test]
    fn lock_resolves_everything_until_dropped() {
        let cache = PatternCache::new();
        let unresolved = pattern(Some(ex("s1")), None, NONE);
        {
            let _lock = cache.lock();
            assert!(cache.is_locked());
            assert!(cache.is_resolved(&unresolved));
        }
        assert!(!cache.is_locked());
        assert!(!cache.is_resolved(&unresolved));
    }

    #[test]
    fn nested_locks_restore_previous_state() {
        let cache = PatternCache::new();
        let outer = cache.lock();
        {
            let _inner = cache.lock();
        }
        assert!(cache.is_locked());
        drop(outer);
        assert!(!cache.is_locked());
    }

    #[test]
    fn lock_is_released_on_unwind() {
        let cache = PatternCache::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _lock = cache.lock();
            panic!("serialization failed");
        }));
        assert!(result.is_err());
        assert!(!cache.is_locked());
    }
}
