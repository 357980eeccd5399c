//! The event scheduler and input driver.

use crate::error::SimError;
use crate::event_queue::EventKey;
use gatetime_netlist::{Gate, GateId, NetState, Netlist, SignalId, Tick};
use std::collections::BTreeMap;
use tracing::trace;

/// Default cap on events processed per scheduler.
///
/// Acyclic networks settle in a number of events proportional to circuit
/// size; the cap exists to fail fast on accidental combinational cycles,
/// which would otherwise oscillate forever.
pub const DEFAULT_EVENT_BUDGET: u64 = 1_000_000;

/// Scheduler lifecycle phase.
///
/// The scheduler is `Idle` while quiescent and `Settling` while events are
/// pending. Applying inputs is only legal while `Idle`; the two-phase
/// transition-measurement protocol (settle the old vector, reset, settle
/// the new vector) is a sequence of `Idle → Settling → Idle` round trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Queue empty; inputs may be applied.
    Idle,
    /// Events pending; the network is propagating.
    Settling,
}

/// Time-ordered queue of pending gate re-evaluations.
///
/// Created fresh per simulation run and driven to quiescence by
/// [`run_until_stable`](Scheduler::run_until_stable). Between the baseline
/// and measurement phases of a transition,
/// [`reset_for_measurement`](Scheduler::reset_for_measurement) clears
/// residual events and zeroes time so no event from the prior run can leak
/// into the next.
#[derive(Debug, Clone)]
pub struct Scheduler {
    /// Current simulated time. Monotonically non-decreasing within a run.
    now: Tick,
    /// Pending re-evaluations, ordered by `(time, sequence)`.
    queue: BTreeMap<EventKey, GateId>,
    /// Monotonic counter assigning sequence numbers at schedule time.
    sequence: u64,
    phase: Phase,
    /// Events processed over this scheduler's lifetime.
    events_processed: u64,
    /// Watchdog cap on `events_processed`.
    event_budget: u64,
}

impl Scheduler {
    /// Create an idle scheduler at time 0 with the default event budget.
    pub fn new() -> Self {
        Self::with_event_budget(DEFAULT_EVENT_BUDGET)
    }

    /// Create an idle scheduler at time 0 with an explicit event budget.
    pub fn with_event_budget(event_budget: u64) -> Self {
        Self {
            now: 0,
            queue: BTreeMap::new(),
            sequence: 0,
            phase: Phase::Idle,
            events_processed: 0,
            event_budget,
        }
    }

    /// Current simulated time.
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Events processed over this scheduler's lifetime.
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    /// Number of pending events.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Schedule a re-evaluation of `gate` at `now + delay`.
    pub fn schedule(&mut self, gate: GateId, delay: Tick) {
        let key = EventKey {
            time: self.now + delay,
            sequence: self.sequence,
        };
        self.sequence += 1;
        self.queue.insert(key, gate);
        self.phase = Phase::Settling;
    }

    /// Apply an input vector to the ordered primary-input signals.
    ///
    /// For each input whose value differs from the target bit: commit the
    /// new value, stamp `last_change` with the current time, and schedule
    /// every fanout gate. Inputs already at their target are untouched, so
    /// they receive no spurious stamp and no event. The vector length must
    /// match `inputs`, checked before any mutation.
    pub fn apply_inputs(
        &mut self,
        netlist: &Netlist,
        state: &mut NetState,
        inputs: &[SignalId],
        vector: &[bool],
    ) -> Result<(), SimError> {
        if vector.len() != inputs.len() {
            return Err(SimError::VectorLength {
                expected: inputs.len(),
                got: vector.len(),
            });
        }
        if self.phase != Phase::Idle {
            return Err(SimError::NotIdle);
        }
        for (&input, &bit) in inputs.iter().zip(vector) {
            if state.value(input) != bit {
                state.commit(input, bit, self.now);
                for &dep in netlist.fanout(input) {
                    self.schedule(dep, netlist.gate(dep).delay);
                }
            }
        }
        Ok(())
    }

    /// Process one pending event.
    ///
    /// Pops the minimum `(time, sequence)` event, advances time
    /// monotonically, evaluates the gate, and commits the output only if
    /// the value changed, fanning out new events. Returns `Ok(false)` when
    /// the queue was already empty.
    pub fn step(&mut self, netlist: &Netlist, state: &mut NetState) -> Result<bool, SimError> {
        let Some((key, gate_id)) = self.queue.pop_first() else {
            self.phase = Phase::Idle;
            return Ok(false);
        };

        self.events_processed += 1;
        if self.events_processed > self.event_budget {
            return Err(SimError::EventBudgetExceeded {
                budget: self.event_budget,
            });
        }

        if key.time > self.now {
            self.now = key.time;
        }

        let gate = netlist.gate(gate_id);
        let value = Gate::evaluate(state.value(gate.a), state.value(gate.b));
        if value != state.value(gate.out) {
            state.commit(gate.out, value, self.now);
            trace!(
                time = self.now,
                signal = netlist.signal_name(gate.out),
                value,
                "signal changed"
            );
            for &dep in netlist.fanout(gate.out) {
                self.schedule(dep, netlist.gate(dep).delay);
            }
        }

        if self.queue.is_empty() {
            self.phase = Phase::Idle;
        }
        Ok(true)
    }

    /// Drain the queue until the network is quiescent.
    ///
    /// Returns the number of events processed. Time after the call is
    /// always ≥ time before. On an already-settled network this processes
    /// zero events and changes nothing.
    pub fn run_until_stable(
        &mut self,
        netlist: &Netlist,
        state: &mut NetState,
    ) -> Result<u64, SimError> {
        let mut processed = 0;
        while self.step(netlist, state)? {
            processed += 1;
        }
        Ok(processed)
    }

    /// Evaluate every gate once and settle, making `state` consistent.
    ///
    /// A freshly created [`NetState`] is all-low, which is not the steady
    /// state of all-low inputs. Priming schedules each gate at time 0 in
    /// arena order and drains the queue, establishing the quiescence
    /// invariant: every gate output equals its evaluation on current
    /// inputs. Call once before a measurement sequence, then
    /// [`reset_for_measurement`](Scheduler::reset_for_measurement).
    pub fn prime(&mut self, netlist: &Netlist, state: &mut NetState) -> Result<u64, SimError> {
        for gate_id in 0..netlist.gate_count() as u32 {
            self.schedule(GateId(gate_id), 0);
        }
        self.run_until_stable(netlist, state)
    }

    /// Clear residual events and restart time at 0, keeping signal values.
    ///
    /// Used between the baseline settle and the measured transition: delay
    /// is measured relative to when the new vector is applied, and no
    /// unfired event from the baseline run may leak into the measurement.
    /// The sequence counter keeps running; it only breaks ties and must
    /// stay monotonic across the whole scheduler lifetime.
    pub fn reset_for_measurement(&mut self) {
        self.queue.clear();
        self.now = 0;
        self.phase = Phase::Idle;
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
