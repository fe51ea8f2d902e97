use serde::{Deserialize, Serialize};

/// Caller-chosen identifier of a secondary index
pub type Tag = u32;

/// Zero-based insertion index of a record in the store
pub type Position = usize;

/// Reserved tag whose bitset holds every position ever added.
///
/// Maintained automatically by [`TagStore::add`](crate::TagStore::add);
/// callers must not give it a meaning of their own.
pub const MATCH_ALL: Tag = 0;

/// Boolean operation applied by a chained query step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    And,
    Or,
    AndNot,
}

/// One deferred step of a query: combine the working set with `tag`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub op: Op,
    pub tag: Tag,
}

/// Configuration for a [`TagStore`](crate::TagStore).
///
/// All values are allocation hints; none of them changes query results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Initial capacity of the record array
    pub record_capacity: usize,
    /// Initial capacity of the tag -> bitset map
    pub tag_capacity: usize,
    /// Upper bound on released query builders kept for reuse (0 disables pooling)
    pub max_idle_queries: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            record_capacity: 64,
            tag_capacity: 16,
            max_idle_queries: 64,
        }
    }
}
