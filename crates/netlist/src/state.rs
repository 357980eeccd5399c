//! Mutable per-run signal state.

use crate::identifiers::{SignalId, Tick};
use crate::netlist::Netlist;

/// Signal values and change timestamps for one simulation run.
///
/// Separated from the immutable [`Netlist`] so that parallel searches can
/// share one topology while each worker clones and mutates its own state.
/// `last_change` is `None` until a signal changes value in the current
/// measurement, the "unchanged this run" sentinel.
#[derive(Debug, Clone)]
pub struct NetState {
    values: Vec<bool>,
    last_change: Vec<Option<Tick>>,
}

impl NetState {
    /// All-low state with no recorded changes, sized for `netlist`.
    pub fn new(netlist: &Netlist) -> Self {
        Self {
            values: vec![false; netlist.signal_count()],
            last_change: vec![None; netlist.signal_count()],
        }
    }

    /// Current value of a signal.
    pub fn value(&self, id: SignalId) -> bool {
        self.values[id.index()]
    }

    /// Time of the signal's most recent value change, or `None` if it has
    /// not changed since the sentinel was last cleared.
    pub fn last_change(&self, id: SignalId) -> Option<Tick> {
        self.last_change[id.index()]
    }

    /// Commit a new value and stamp the change time.
    pub fn commit(&mut self, id: SignalId, value: bool, at: Tick) {
        self.values[id.index()] = value;
        self.last_change[id.index()] = Some(at);
    }

    /// Reset a signal's change stamp to the unchanged sentinel, keeping
    /// its value.
    pub fn clear_last_change(&mut self, id: SignalId) {
        self.last_change[id.index()] = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist::NetlistBuilder;

    #[test]
    fn test_commit_and_clear() {
        let mut b = NetlistBuilder::new();
        let a = b.signal("a");
        let netlist = b.finish();

        let mut state = NetState::new(&netlist);
        assert!(!state.value(a));
        assert_eq!(state.last_change(a), None);

        state.commit(a, true, 7);
        assert!(state.value(a));
        assert_eq!(state.last_change(a), Some(7));

        state.clear_last_change(a);
        assert!(state.value(a));
        assert_eq!(state.last_change(a), None);
    }
}
