use std::fmt;

use crate::index::store::TagMap;

/// Point-in-time size figures for a [`TagStore`](crate::TagStore)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of records
    pub records: usize,
    /// Number of tags with a bitset, including the match-all tag
    pub tags: usize,
    /// Total words across all bitsets
    pub bitset_words: usize,
    /// Approximate heap usage of records and bitsets
    pub memory_bytes: usize,
    /// Query builders parked in the pool
    pub idle_queries: usize,
}

impl StoreStats {
    pub(crate) fn collect<T>(data: &[T], indexes: &TagMap, idle_queries: usize) -> Self {
        let bitset_words = indexes.values().map(|b| b.len()).sum();
        let bitset_bytes: usize = indexes.values().map(|b| b.memory_usage()).sum();

        Self {
            records: data.len(),
            tags: indexes.len(),
            bitset_words,
            memory_bytes: std::mem::size_of_val(data) + bitset_bytes,
            idle_queries,
        }
    }
}

impl fmt::Display for StoreStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Records:          {}", self.records)?;
        writeln!(f, "Tags:             {}", self.tags)?;
        writeln!(f, "Bitset words:     {}", self.bitset_words)?;
        writeln!(f, "Memory:           {}", format_size(self.memory_bytes as u64))?;
        write!(f, "Idle queries:     {}", self.idle_queries)
    }
}

/// Format byte size to human readable
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
