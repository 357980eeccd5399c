//! Immutable circuit topology and its builder.

use crate::gate::Gate;
use crate::identifiers::{GateId, SignalId, Tick};
use thiserror::Error;

/// Errors during netlist construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NetlistError {
    /// A gate's output is wired to one of its own inputs. Such a gate can
    /// oscillate forever and is rejected outright.
    #[error("gate output {0} is wired to its own input")]
    SelfLoop(SignalId),

    /// Two gates drive the same signal. Each signal has at most one driver.
    #[error("signal {0} already has a driver")]
    MultipleDrivers(SignalId),
}

/// An immutable combinational circuit.
///
/// Signals and gates live in arenas indexed by [`SignalId`] / [`GateId`].
/// `fanout` maps each signal to the gates that read it (the gates to
/// re-evaluate when the signal changes); `driver` maps each signal to the
/// single gate driving it, if any. Wider combinational cycles that a
/// self-loop check cannot see are caught at simulation time by the
/// scheduler's event budget.
#[derive(Debug, Clone)]
pub struct Netlist {
    /// Signal names, for diagnostics only.
    names: Vec<String>,
    gates: Vec<Gate>,
    /// signal -> gates reading it, in wiring order.
    fanout: Vec<Vec<GateId>>,
    /// signal -> the gate driving it, if any.
    driver: Vec<Option<GateId>>,
}

impl Netlist {
    /// Number of signals in the arena.
    pub fn signal_count(&self) -> usize {
        self.names.len()
    }

    /// Number of gates in the arena.
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Diagnostic name of a signal.
    pub fn signal_name(&self, id: SignalId) -> &str {
        &self.names[id.index()]
    }

    /// Gate by id.
    pub fn gate(&self, id: GateId) -> &Gate {
        &self.gates[id.index()]
    }

    /// Gates that must be re-evaluated when `id` changes, in wiring order.
    pub fn fanout(&self, id: SignalId) -> &[GateId] {
        &self.fanout[id.index()]
    }

    /// The gate driving `id`, or `None` for primary inputs and undriven
    /// wires.
    pub fn driver(&self, id: SignalId) -> Option<GateId> {
        self.driver[id.index()]
    }

    /// Iterate over all signal ids.
    pub fn signals(&self) -> impl Iterator<Item = SignalId> + '_ {
        (0..self.names.len() as u32).map(SignalId)
    }

    /// Static longest-path arrival time at `id`: the sum of gate delays
    /// along the longest driver chain from any undriven signal.
    ///
    /// This is a structural upper bound on any measured propagation delay
    /// to `id` (a measured transition cannot arrive later than the longest
    /// chain feeding it). Undriven signals, including primary inputs, have
    /// arrival 0. Returns `None` if a combinational cycle is reachable
    /// from `id` through its drivers; no finite arrival exists there.
    pub fn longest_arrival(&self, id: SignalId) -> Option<Tick> {
        let mut memo = vec![Visit::Unvisited; self.names.len()];
        self.arrival(id, &mut memo)
    }

    fn arrival(&self, id: SignalId, memo: &mut [Visit]) -> Option<Tick> {
        match memo[id.index()] {
            Visit::Done(t) => return Some(t),
            // Re-entering a signal still on the traversal stack means the
            // driver chain loops back onto itself.
            Visit::InProgress => return None,
            Visit::Unvisited => {}
        }
        memo[id.index()] = Visit::InProgress;
        let t = match self.driver(id) {
            Some(gid) => {
                let gate = self.gate(gid);
                let from_a = self.arrival(gate.a, memo)?;
                let from_b = self.arrival(gate.b, memo)?;
                from_a.max(from_b) + gate.delay
            }
            None => 0,
        };
        memo[id.index()] = Visit::Done(t);
        Some(t)
    }
}

/// Traversal state of a signal during arrival memoization.
#[derive(Debug, Clone, Copy)]
enum Visit {
    Unvisited,
    InProgress,
    Done(Tick),
}

/// Builder composing signals and gates into a [`Netlist`].
///
/// Any topology may be built with it; the simulator core is agnostic to
/// how many gates or what wiring produced the netlist.
#[derive(Debug, Default)]
pub struct NetlistBuilder {
    names: Vec<String>,
    gates: Vec<Gate>,
    fanout: Vec<Vec<GateId>>,
    driver: Vec<Option<GateId>>,
}

impl NetlistBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh signal.
    pub fn signal(&mut self, name: impl Into<String>) -> SignalId {
        let id = SignalId(self.names.len() as u32);
        self.names.push(name.into());
        self.fanout.push(Vec::new());
        self.driver.push(None);
        id
    }

    /// Wire a NAND gate reading `a` and `b` and driving `out`.
    ///
    /// Registers the gate in the fanout of both inputs and records it as
    /// the driver of `out`.
    pub fn nand(
        &mut self,
        a: SignalId,
        b: SignalId,
        out: SignalId,
        delay: Tick,
    ) -> Result<GateId, NetlistError> {
        if out == a || out == b {
            return Err(NetlistError::SelfLoop(out));
        }
        if self.driver[out.index()].is_some() {
            return Err(NetlistError::MultipleDrivers(out));
        }
        let id = GateId(self.gates.len() as u32);
        self.gates.push(Gate { a, b, out, delay });
        self.fanout[a.index()].push(id);
        // A gate reading the same signal on both pins appears once in its
        // fanout.
        if b != a {
            self.fanout[b.index()].push(id);
        }
        self.driver[out.index()] = Some(id);
        Ok(id)
    }

    /// Finish construction.
    pub fn finish(self) -> Netlist {
        Netlist {
            names: self.names,
            gates: self.gates,
            fanout: self.fanout,
            driver: self.driver,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_single_gate() {
        let mut b = NetlistBuilder::new();
        let a = b.signal("a");
        let x = b.signal("x");
        let out = b.signal("out");
        let g = b.nand(a, x, out, 1).unwrap();
        let netlist = b.finish();

        assert_eq!(netlist.signal_count(), 3);
        assert_eq!(netlist.gate_count(), 1);
        assert_eq!(netlist.fanout(a), &[g]);
        assert_eq!(netlist.fanout(x), &[g]);
        assert_eq!(netlist.fanout(out), &[]);
        assert_eq!(netlist.driver(out), Some(g));
        assert_eq!(netlist.driver(a), None);
        assert_eq!(netlist.signal_name(out), "out");
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut b = NetlistBuilder::new();
        let a = b.signal("a");
        let out = b.signal("out");
        assert_eq!(b.nand(a, out, out, 1), Err(NetlistError::SelfLoop(out)));
        assert_eq!(b.nand(out, a, out, 1), Err(NetlistError::SelfLoop(out)));
    }

    #[test]
    fn test_multiple_drivers_rejected() {
        let mut b = NetlistBuilder::new();
        let a = b.signal("a");
        let x = b.signal("x");
        let out = b.signal("out");
        b.nand(a, x, out, 1).unwrap();
        assert_eq!(
            b.nand(x, a, out, 1),
            Err(NetlistError::MultipleDrivers(out))
        );
    }

    #[test]
    fn test_same_signal_both_pins_fans_out_once() {
        let mut b = NetlistBuilder::new();
        let a = b.signal("a");
        let out = b.signal("out");
        let g = b.nand(a, a, out, 1).unwrap();
        let netlist = b.finish();
        assert_eq!(netlist.fanout(a), &[g]);
    }

    #[test]
    fn test_longest_arrival_chain() {
        // a -> n1 -> n2 -> n3, unit delays: arrival 1, 2, 3.
        let mut b = NetlistBuilder::new();
        let a = b.signal("a");
        let n1 = b.signal("n1");
        let n2 = b.signal("n2");
        let n3 = b.signal("n3");
        b.nand(a, a, n1, 1).unwrap();
        b.nand(n1, n1, n2, 1).unwrap();
        b.nand(n2, n2, n3, 1).unwrap();
        let netlist = b.finish();

        assert_eq!(netlist.longest_arrival(a), Some(0));
        assert_eq!(netlist.longest_arrival(n1), Some(1));
        assert_eq!(netlist.longest_arrival(n2), Some(2));
        assert_eq!(netlist.longest_arrival(n3), Some(3));
    }

    #[test]
    fn test_longest_arrival_reports_cycle_as_none() {
        // s1 and s2 drive each other through separate gates, which the
        // self-loop check cannot see. Arrival must terminate, not recurse
        // forever.
        let mut b = NetlistBuilder::new();
        let x = b.signal("x");
        let s1 = b.signal("s1");
        let s2 = b.signal("s2");
        b.nand(x, s2, s1, 1).unwrap();
        b.nand(x, s1, s2, 1).unwrap();
        let netlist = b.finish();

        assert_eq!(netlist.longest_arrival(s1), None);
        assert_eq!(netlist.longest_arrival(s2), None);
        assert_eq!(netlist.longest_arrival(x), Some(0));
    }
}
