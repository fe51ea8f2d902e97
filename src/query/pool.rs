//! Free list of query states so the read path does not allocate a new
//! step vector per query.

use parking_lot::Mutex;

use crate::index::types::{MATCH_ALL, Step, Tag};

/// The reusable part of a query builder: start tag plus deferred steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub(crate) start: Tag,
    pub(crate) steps: Vec<Step>,
}

impl QueryState {
    pub(crate) fn new() -> Self {
        Self {
            start: MATCH_ALL,
            steps: Vec::new(),
        }
    }

    /// Forget the previous query, keeping the step allocation
    pub(crate) fn reset(&mut self) {
        self.start = MATCH_ALL;
        self.steps.clear();
    }
}

/// Thread-safe cache of released query states.
///
/// Acquiring hands back either a recycled (already reset) state or a fresh
/// one; callers cannot tell them apart. No ordering is guaranteed.
#[derive(Debug)]
pub struct QueryPool {
    free: Mutex<Vec<QueryState>>,
    max_idle: usize,
}

impl QueryPool {
    pub fn new(max_idle: usize) -> Self {
        Self {
            free: Mutex::new(Vec::with_capacity(max_idle.min(64))),
            max_idle,
        }
    }

    /// Take a state from the free list, or allocate one
    pub(crate) fn acquire(&self) -> QueryState {
        self.free.lock().pop().unwrap_or_else(QueryState::new)
    }

    /// Reset `state` and park it for reuse; dropped if the pool is full
    pub(crate) fn release(&self, mut state: QueryState) {
        state.reset();

        let mut free = self.free.lock();
        if free.len() < self.max_idle {
            free.push(state);
        }
    }

    /// Number of states currently parked
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::Op;

    #[test]
    fn test_acquire_fresh() {
        let pool = QueryPool::new(4);
        let state = pool.acquire();
        assert_eq!(state, QueryState::new());
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_release_resets() {
        let pool = QueryPool::new(4);
        let mut state = pool.acquire();
        state.start = 7;
        state.steps.push(Step { op: Op::And, tag: 3 });
        state.steps.push(Step { op: Op::Or, tag: 9 });

        pool.release(state);
        assert_eq!(pool.idle(), 1);

        let reused = pool.acquire();
        assert_eq!(reused.start, MATCH_ALL);
        assert!(reused.steps.is_empty());
        assert!(reused.steps.capacity() >= 2);
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_bounded() {
        let pool = QueryPool::new(2);
        for _ in 0..5 {
            pool.release(QueryState::new());
        }
        assert_eq!(pool.idle(), 2);
    }

    #[test]
    fn test_disabled() {
        let pool = QueryPool::new(0);
        pool.release(QueryState::new());
        assert_eq!(pool.idle(), 0);
    }
}
