//! Append-only record store with tag bitset indexes.
//!
//! Records and bitsets live behind one [`RwLock`]: every mutation takes it
//! exclusively, and query evaluation holds it shared from the first bitset
//! read until the last record is decoded.

use std::collections::HashMap;

use ahash::RandomState;
use parking_lot::{RwLock, RwLockReadGuard};
use tracing::debug;

use crate::index::bitset::Bitset;
use crate::index::stats::StoreStats;
use crate::index::types::{MATCH_ALL, Position, StoreConfig, Tag};
use crate::query::builder::Query;
use crate::query::pool::QueryPool;
use crate::utils::bits::{self, WORD_BITS};

pub(crate) type TagMap = HashMap<Tag, Bitset, RandomState>;

/// Lock-protected contents of a [`TagStore`]
#[derive(Debug)]
pub(crate) struct Inner<T> {
    pub(crate) data: Vec<T>,
    pub(crate) indexes: TagMap,
}

impl<T> Inner<T> {
    fn with_config(config: &StoreConfig) -> Self {
        Self {
            data: Vec::with_capacity(config.record_capacity),
            indexes: HashMap::with_capacity_and_hasher(config.tag_capacity, RandomState::new()),
        }
    }

    fn clear(&mut self) {
        self.data.clear();
        self.indexes.clear();
    }

    fn push(&mut self, record: T, tags: &[Tag]) {
        self.data.push(record);
        let pos = self.data.len() - 1;

        self.indexes.entry(MATCH_ALL).or_default().insert(pos);
        for &tag in tags {
            self.indexes.entry(tag).or_default().insert(pos);
        }
    }
}

impl<T: Clone> Inner<T> {
    /// Append the records selected by `bitset` to `dest`, in position order.
    ///
    /// The caller must already hold the store lock. Bits at or past the
    /// record count end translation of their word. Returns the number of
    /// records appended.
    pub(crate) fn decode_into(&self, bitset: &Bitset, dest: &mut Vec<T>) -> usize {
        let len = self.data.len();
        let before = dest.len();
        let mut offsets: Vec<u32> = Vec::with_capacity(WORD_BITS);
        let mut truncated = false;

        for (i, &word) in bitset.words().iter().enumerate() {
            if word == 0 {
                continue;
            }

            offsets.clear();
            bits::decode_word(word, &mut offsets);

            let base = i * WORD_BITS;
            for &bit in &offsets {
                let pos = base + bit as usize;
                if pos >= len {
                    truncated = true;
                    break;
                }
                dest.push(self.data[pos].clone());
            }
        }

        if truncated {
            debug!(records = len, words = bitset.len(), "bitset extends past record count");
        }

        dest.len() - before
    }
}

/// In-memory, append-only collection of records indexed by tag bitsets.
///
/// Every record is reachable through [`MATCH_ALL`]; other tags are created
/// on first use by [`add`](Self::add). Queries are built with
/// [`query_by_tag`](Self::query_by_tag) or [`query_all`](Self::query_all)
/// and handed back with [`release_result`](Self::release_result).
///
/// ```
/// use tagdb::TagStore;
///
/// const MALE: u32 = 1;
/// const FEMALE: u32 = 2;
/// const ADULT: u32 = 3;
///
/// let store = TagStore::new();
/// store
///     .add("Mark", &[MALE, ADULT])
///     .add("Mary", &[FEMALE])
///     .add("Kate", &[FEMALE, ADULT]);
///
/// let query = store.query_by_tag(FEMALE).and_not(ADULT);
/// assert_eq!(query.get(), Some(vec!["Mary"]));
/// store.release_result(query);
/// ```
#[derive(Debug)]
pub struct TagStore<T> {
    inner: RwLock<Inner<T>>,
    pool: QueryPool,
    config: StoreConfig,
}

impl<T> TagStore<T> {
    /// Create an empty store with default capacity hints
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store with custom capacity hints
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            inner: RwLock::new(Inner::with_config(&config)),
            pool: QueryPool::new(config.max_idle_queries),
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Shared access for query evaluation
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Inner<T>> {
        self.inner.read()
    }

    /// Remove every record and every tag, keeping allocations
    pub fn reset(&self) {
        let mut inner = self.inner.write();
        debug!(records = inner.data.len(), tags = inner.indexes.len(), "resetting store");
        inner.clear();
    }

    /// Append `record` and index it under [`MATCH_ALL`] and every tag in `tags`.
    pub fn add(&self, record: T, tags: &[Tag]) -> &Self {
        self.inner.write().push(record, tags);
        self
    }

    /// Append every record with the same `tags` under a single lock acquisition.
    ///
    /// Equivalent to calling [`add`](Self::add) for each record in order.
    pub fn add_batch<I>(&self, records: I, tags: &[Tag]) -> &Self
    where
        I: IntoIterator<Item = T>,
    {
        let records = records.into_iter();
        let mut inner = self.inner.write();
        inner.data.reserve(records.size_hint().0);

        let before = inner.data.len();
        for record in records {
            inner.push(record, tags);
        }
        debug!(added = inner.data.len() - before, tags = tags.len(), "batch added");

        self
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.inner.read().data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().data.is_empty()
    }

    /// Whether `tag` has ever been written since the last reset
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.inner.read().indexes.contains_key(&tag)
    }

    /// Number of records carrying `tag`, or `None` for an unknown tag
    pub fn tag_count(&self, tag: Tag) -> Option<usize> {
        self.inner.read().indexes.get(&tag).map(Bitset::count_ones)
    }

    /// Every known tag, ascending (includes [`MATCH_ALL`] once a record exists)
    pub fn tags(&self) -> Vec<Tag> {
        let mut tags: Vec<Tag> = self.inner.read().indexes.keys().copied().collect();
        tags.sort_unstable();
        tags
    }

    /// Snapshot of sizes and memory usage
    pub fn stats(&self) -> StoreStats {
        let inner = self.inner.read();
        StoreStats::collect(&inner.data, &inner.indexes, self.pool.idle())
    }

    /// Start a query from the records tagged `tag`. Nothing is read yet.
    pub fn query_by_tag(&self, tag: Tag) -> Query<'_, T> {
        let mut state = self.pool.acquire();
        state.start = tag;
        Query::new(self, state)
    }

    /// Start a query from every record
    pub fn query_all(&self) -> Query<'_, T> {
        self.query_by_tag(MATCH_ALL)
    }

    /// Hand a finished query back for reuse
    pub fn release_result(&self, query: Query<'_, T>) {
        self.pool.release(query.into_state());
    }
}

impl<T: Clone> TagStore<T> {
    /// Replace this store's contents with a copy of `source`.
    ///
    /// `source` is copied under its own read lock first; the destination is
    /// then cleared and refilled under one write lock, so readers of `self`
    /// see either the old contents or the new ones. Bitsets are copied by
    /// value and do not alias the source.
    pub fn fill_from(&self, source: &TagStore<T>) {
        if std::ptr::eq(self, source) {
            return;
        }

        let (data, indexes) = {
            let src = source.inner.read();
            (src.data.clone(), src.indexes.clone())
        };

        let mut inner = self.inner.write();
        inner.clear();
        inner.data.extend(data);
        inner.indexes.extend(indexes);
        debug!(records = inner.data.len(), tags = inner.indexes.len(), "store refilled");
    }

    /// Append the records at the positions set in `bitset` to `dest`.
    ///
    /// Positions at or beyond the record count are ignored. Returns the
    /// number of records appended.
    pub fn decode(&self, bitset: &Bitset, dest: &mut Vec<T>) -> usize {
        self.inner.read().decode_into(bitset, dest)
    }

    /// Record at `position`, if any
    pub fn get(&self, position: Position) -> Option<T> {
        self.inner.read().data.get(position).cloned()
    }
}

impl<T> Default for TagStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
