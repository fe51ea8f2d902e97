use thiserror::Error;

use crate::index::types::Tag;

/// Errors reported by query evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A tag referenced by the query has never been written to the store
    #[error("unknown tag {0}")]
    UnknownTag(Tag),
}

/// Result alias for query evaluation
pub type Result<T> = std::result::Result<T, QueryError>;
