//! Identity correspondence across a transformation.
//!
//! A [`Trace`] says where each element went: a partial bijection of moved
//! elements plus the sets of elements that disappeared and appeared. Elements
//! it does not mention are unchanged. Traces of consecutive transformations
//! compose with [`Trace::followed_by`].

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace<T: Eq + Hash> {
    forward: HashMap<T, T>,
    backward: HashMap<T, T>,
    removed: HashSet<T>,
    added: HashSet<T>,
}

impl<T: Eq + Hash + Clone> Default for Trace<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Eq + Hash + Clone> Trace<T> {
    pub fn identity() -> Self {
        Self {
            forward: HashMap::new(),
            backward: HashMap::new(),
            removed: HashSet::new(),
            added: HashSet::new(),
        }
    }

    pub fn builder() -> TraceBuilder<T> {
        TraceBuilder { trace: Self::identity() }
    }

    /// Moved elements, keyed by their value before the transformation.
    #[inline]
    pub fn moved(&self) -> &HashMap<T, T> {
        &self.forward
    }

    #[inline]
    pub fn removed(&self) -> &HashSet<T> {
        &self.removed
    }

    #[inline]
    pub fn added(&self) -> &HashSet<T> {
        &self.added
    }

    pub fn is_identity(&self) -> bool {
        self.forward.is_empty() && self.removed.is_empty() && self.added.is_empty()
    }

    /// Where `element` ends up, or `None` when it was removed.
    pub fn destination(&self, element: &T) -> Option<T> {
        if self.removed.contains(element) {
            return None;
        }
        Some(self.forward.get(element).unwrap_or(element).clone())
    }

    /// Where `element` came from, or `None` when it was added.
    pub fn origin(&self, element: &T) -> Option<T> {
        if self.added.contains(element) {
            return None;
        }
        Some(self.backward.get(element).unwrap_or(element).clone())
    }

    /// The same correspondence read backwards.
    pub fn reversed(&self) -> Self {
        Self {
            forward: self.backward.clone(),
            backward: self.forward.clone(),
            removed: self.added.clone(),
            added: self.removed.clone(),
        }
    }

    /// This trace followed by `next`, which must start where this one ends.
    ///
    /// An element removed here and added back by `next` at the same value is
    /// unchanged overall, as is one moved back to where it started.
    pub fn followed_by(&self, next: &Trace<T>) -> Trace<T> {
        let mut composed = Trace::builder();

        for (from, via) in &self.forward {
            match next.destination(via) {
                Some(to) => composed.moved(from.clone(), to),
                None => composed.removed(from.clone()),
            };
        }
        for gone in &self.removed {
            composed.removed(gone.clone());
        }

        // Elements `next` touches that this trace left alone.
        let touched = next.forward.keys().chain(&next.removed);
        for element in touched {
            let untouched_here = !self.backward.contains_key(element)
                && !self.added.contains(element)
                && !self.forward.contains_key(element)
                && !self.removed.contains(element);
            if !untouched_here {
                continue;
            }
            match next.destination(element) {
                Some(to) => composed.moved(element.clone(), to),
                None => composed.removed(element.clone()),
            };
        }

        for appeared in &self.added {
            if let Some(to) = next.destination(appeared) {
                composed.added(to);
            }
        }
        for appeared in &next.added {
            composed.added(appeared.clone());
        }

        composed.build()
    }
}

/// Accumulates a trace, keeping the forward and backward maps consistent on
/// every insertion.
#[derive(Debug, Clone)]
pub struct TraceBuilder<T: Eq + Hash> {
    trace: Trace<T>,
}

impl<T: Eq + Hash + Clone> TraceBuilder<T> {
    /// Records `from ↦ to`, replacing any earlier edge out of `from` or into `to`.
    pub fn moved(&mut self, from: T, to: T) -> &mut Self {
        let trace = &mut self.trace;
        if let Some(stale_to) = trace.forward.remove(&from) {
            trace.backward.remove(&stale_to);
        }
        if let Some(stale_from) = trace.backward.remove(&to) {
            trace.forward.remove(&stale_from);
        }
        trace.removed.remove(&from);
        trace.added.remove(&to);
        trace.forward.insert(from.clone(), to.clone());
        trace.backward.insert(to, from);
        self
    }

    pub fn removed(&mut self, element: T) -> &mut Self {
        let trace = &mut self.trace;
        if let Some(stale_to) = trace.forward.remove(&element) {
            trace.backward.remove(&stale_to);
        }
        trace.removed.insert(element);
        self
    }

    pub fn added(&mut self, element: T) -> &mut Self {
        let trace = &mut self.trace;
        if let Some(stale_from) = trace.backward.remove(&element) {
            trace.forward.remove(&stale_from);
        }
        trace.added.insert(element);
        self
    }

    /// Freezes the trace. Identity edges are dropped, and an element both
    /// removed and added is treated as never having changed.
    pub fn build(&mut self) -> Trace<T> {
        let mut trace = std::mem::replace(&mut self.trace, Trace::identity());

        trace.forward.retain(|from, to| *from != *to);
        trace.backward.retain(|to, from| *from != *to);

        let restored: Vec<T> = trace.removed.intersection(&trace.added).cloned().collect();
        for element in &restored {
            trace.removed.remove(element);
            trace.added.remove(element);
        }

        trace
    }
}
