//! Deferred boolean queries over tag bitsets.
//!
//! A [`Query`] only records its start tag and an ordered list of steps.
//! Evaluation happens in [`Query::append_to`] (and the `get` helpers built
//! on it): the store is read-locked once, the start bitset is copied into a
//! private working set, the steps are applied left to right and the result
//! is decoded into records before the lock is released.

use std::borrow::Cow;

use tracing::{debug, trace};

use crate::index::bitset::Bitset;
use crate::index::store::{Inner, TagStore};
use crate::index::types::{Op, Step, Tag};
use crate::query::error::{QueryError, Result};
use crate::query::pool::QueryState;

/// Lazily evaluated tag query, borrowed from a [`TagStore`].
///
/// Chaining methods consume and return the builder. Evaluation does not
/// change it, so a query can be run any number of times.
#[derive(Debug)]
pub struct Query<'a, T> {
    store: &'a TagStore<T>,
    state: QueryState,
}

impl<'a, T> Query<'a, T> {
    pub(crate) fn new(store: &'a TagStore<T>, state: QueryState) -> Self {
        Self { store, state }
    }

    pub(crate) fn into_state(self) -> QueryState {
        self.state
    }

    fn push(mut self, op: Op, tag: Tag) -> Self {
        self.state.steps.push(Step { op, tag });
        self
    }

    /// Keep only records also tagged `tag`
    pub fn and(self, tag: Tag) -> Self {
        self.push(Op::And, tag)
    }

    /// Add records tagged `tag`
    pub fn or(self, tag: Tag) -> Self {
        self.push(Op::Or, tag)
    }

    /// Drop records tagged `tag`
    pub fn and_not(self, tag: Tag) -> Self {
        self.push(Op::AndNot, tag)
    }

    pub fn start_tag(&self) -> Tag {
        self.state.start
    }

    pub fn steps(&self) -> &[Step] {
        &self.state.steps
    }

    /// Number of matching records, without cloning any of them
    pub fn count(&self) -> Result<usize> {
        let inner = self.store.read();
        let working = evaluate(&inner, &self.state)?;
        Ok(working.count_below(inner.data.len()))
    }

    /// Return this query to its store's pool
    pub fn release(self) {
        let store = self.store;
        store.release_result(self);
    }
}

impl<T: Clone> Query<'_, T> {
    /// Evaluate the query and append the matching records to `dest` in
    /// insertion order.
    ///
    /// Returns the number of records appended. If the start tag or any step
    /// tag is unknown, nothing is appended.
    pub fn append_to(&self, dest: &mut Vec<T>) -> Result<usize> {
        let inner = self.store.read();
        let working = evaluate(&inner, &self.state)?;
        let added = inner.decode_into(&working, dest);

        trace!(
            start = self.state.start,
            steps = self.state.steps.len(),
            matches = added,
            "query evaluated"
        );
        Ok(added)
    }

    /// Evaluate into a new vector; `None` if a referenced tag is unknown
    pub fn get(&self) -> Option<Vec<T>> {
        self.get_into(Vec::new())
    }

    /// Evaluate, appending to a caller-supplied buffer; `None` if a
    /// referenced tag is unknown
    pub fn get_into(&self, mut dest: Vec<T>) -> Option<Vec<T>> {
        self.append_to(&mut dest).ok()?;
        Some(dest)
    }
}

/// Resolve every tag, then fold the steps into a working set.
///
/// The caller holds the read lock. Stored bitsets are never mutated: a query
/// without steps borrows the start bitset, anything else works on a copy.
fn evaluate<'s, T>(inner: &'s Inner<T>, state: &QueryState) -> Result<Cow<'s, Bitset>> {
    let start = lookup(inner, state.start)?;

    if state.steps.is_empty() {
        return Ok(Cow::Borrowed(start));
    }

    let operands = state
        .steps
        .iter()
        .map(|step| lookup(inner, step.tag).map(|bitset| (step.op, bitset)))
        .collect::<Result<Vec<_>>>()?;

    let mut working = start.clone();
    for (op, bitset) in operands {
        working.apply(op, bitset);
    }

    Ok(Cow::Owned(working))
}

fn lookup<T>(inner: &Inner<T>, tag: Tag) -> Result<&Bitset> {
    inner.indexes.get(&tag).ok_or_else(|| {
        debug!(tag, "query references unknown tag");
        QueryError::UnknownTag(tag)
    })
}
