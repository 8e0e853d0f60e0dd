use dashmap::DashMap;

/// Per-connection event counts, keyed by connection id (1..=N).
///
/// Entries are created lazily on the first increment, so an id that never
/// received an event reads as zero and never appears in a snapshot. Each
/// key is written by at most one reader task, and the harness reads the
/// map only after every task has reached a terminal state.
#[derive(Debug, Default)]
pub struct EventCounter {
    counts: DashMap<u32, u64>,
}

impl EventCounter {
    pub fn new() -> Self {
        Self {
            counts: DashMap::new(),
        }
    }

    /// Record one received event for a connection - O(1)
    pub fn increment(&self, conn_id: u32) {
        *self.counts.entry(conn_id).or_insert(0) += 1;
    }

    /// Count for a connection; zero if it never received an event
    pub fn get(&self, conn_id: u32) -> u64 {
        self.counts.get(&conn_id).map(|c| *c).unwrap_or(0)
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|entry| *entry.value()).sum()
    }

    /// All (connection id, count) pairs, ascending by id
    pub fn snapshot(&self) -> Vec<(u32, u64)> {
        let mut counts: Vec<(u32, u64)> = self
            .counts
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect();
        counts.sort_unstable_by_key(|(conn_id, _)| *conn_id);
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_keys_read_as_zero() {
        let counter = EventCounter::new();

        assert_eq!(counter.get(1), 0);
        assert_eq!(counter.total(), 0);
        assert!(counter.snapshot().is_empty());
    }

    #[test]
    fn entries_are_created_on_first_increment() {
        let counter = EventCounter::new();

        counter.increment(3);
        counter.increment(3);
        counter.increment(1);

        assert_eq!(counter.get(3), 2);
        assert_eq!(counter.get(1), 1);
        assert_eq!(counter.get(2), 0);
        assert_eq!(counter.total(), 3);
    }

    #[test]
    fn snapshot_is_sorted_by_connection_id() {
        let counter = EventCounter::new();

        counter.increment(5);
        counter.increment(2);
        counter.increment(2);
        counter.increment(9);

        assert_eq!(counter.snapshot(), vec![(2, 2), (5, 1), (9, 1)]);
    }
}
