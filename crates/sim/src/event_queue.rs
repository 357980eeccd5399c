//! Event queue keys with deterministic ordering.

use gatetime_netlist::Tick;
use std::cmp::Ordering;

/// Key for ordering pending gate re-evaluations.
///
/// Events are ordered by:
/// 1. Fire time (earlier first)
/// 2. Sequence number (FIFO for same fire time)
///
/// The sequence number is assigned from a monotonically increasing counter
/// at schedule time, so `(time, sequence)` is a strict total order and
/// equal-time events always process in the order they were scheduled.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EventKey {
    /// When this re-evaluation fires.
    pub time: Tick,
    /// Monotonic tie-breaker for deterministic FIFO ordering.
    pub sequence: u64,
}

impl Ord for EventKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // Order by fire time first
        match self.time.cmp(&other.time) {
            Ordering::Equal => {}
            ord => return ord,
        }

        // Then by sequence (FIFO)
        self.sequence.cmp(&other.sequence)
    }
}

impl PartialOrd for EventKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_ordering() {
        let earlier = EventKey { time: 1, sequence: 9 };
        let later = EventKey { time: 2, sequence: 0 };
        assert!(earlier < later);
    }

    #[test]
    fn test_fifo_at_same_time() {
        let first = EventKey { time: 3, sequence: 0 };
        let second = EventKey { time: 3, sequence: 1 };
        assert!(first < second, "equal-time events must order by sequence");
    }
}
