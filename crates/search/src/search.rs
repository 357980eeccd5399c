//! The exhaustive transition-pair search loop.

use crate::report::{DelayReport, OutputReport, TransitionExtreme, Witness};
use crate::vectors::InputVector;
use gatetime_netlist::{NetState, Netlist, SignalId, Tick};
use gatetime_sim::{Scheduler, SimError, DEFAULT_EVENT_BUDGET};
use rayon::prelude::*;
use thiserror::Error;
use tracing::info;

/// Largest primary-input count accepted for exhaustive search.
///
/// The search is quadratic in `2^n`; past this width the pair count is no
/// longer practical to enumerate.
pub const MAX_EXHAUSTIVE_INPUTS: usize = 20;

/// Errors from the transition search.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// A simulation run failed (watchdog trip or driver misuse).
    #[error(transparent)]
    Sim(#[from] SimError),

    /// Too many primary inputs for an exhaustive pair enumeration.
    #[error("{count} primary inputs exceeds the exhaustive-search limit of {limit}")]
    TooManyInputs {
        /// Primary inputs supplied.
        count: usize,
        /// The accepted maximum.
        limit: usize,
    },
}

/// Transition direction of a monitored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Output settled high (0 → 1).
    Rise,
    /// Output settled low (1 → 0).
    Fall,
}

/// A qualifying transition observed on one monitored output for one pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Stabilization time relative to applying the new vector.
    pub delay: Tick,
    /// Which way the output settled.
    pub direction: Direction,
}

/// Outcome of measuring a single ordered vector pair.
#[derive(Debug, Clone)]
pub struct PairOutcome {
    /// Per monitored output: the observed transition, or `None` if the
    /// output never changed relative to its baseline.
    pub transitions: Vec<Option<Transition>>,
    /// Scheduler events processed for this pair.
    pub events: u64,
}

/// Search configuration.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Per-pair scheduler event budget (combinational-cycle watchdog).
    pub event_budget: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            event_budget: DEFAULT_EVENT_BUDGET,
        }
    }
}

/// Exhaustive worst-case delay search over a fixed netlist.
///
/// Borrows the read-only topology, the ordered primary inputs, and the
/// outputs to monitor. [`run`](Self::run) and
/// [`run_parallel`](Self::run_parallel) produce identical reports.
pub struct TransitionSearch<'a> {
    netlist: &'a Netlist,
    inputs: &'a [SignalId],
    monitored: &'a [SignalId],
    config: SearchConfig,
}

impl<'a> TransitionSearch<'a> {
    /// Create a search with the default configuration.
    pub fn new(netlist: &'a Netlist, inputs: &'a [SignalId], monitored: &'a [SignalId]) -> Self {
        Self {
            netlist,
            inputs,
            monitored,
            config: SearchConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Number of ordered pairs the search will evaluate.
    pub fn pair_count(&self) -> u64 {
        let total = 1u64 << self.inputs.len();
        total * (total - 1)
    }

    /// Run the search serially.
    pub fn run(&self) -> Result<DelayReport, SearchError> {
        let total = self.vector_count()?;
        info!(
            inputs = self.inputs.len(),
            pairs = self.pair_count(),
            "starting exhaustive transition search"
        );

        // Each old-vector block starts from a fresh primed clone, so the
        // event trace matches the per-worker blocks of
        // [`run_parallel`](Self::run_parallel) exactly.
        let template = self.primed_state()?;
        let mut acc = Accumulator::new(self.monitored.len());
        for old_idx in 0..total {
            let mut state = template.clone();
            for new_idx in 0..total {
                if new_idx == old_idx {
                    continue;
                }
                self.measure_into(&mut acc, &mut state, total, old_idx, new_idx)?;
            }
        }

        Ok(self.finish(acc))
    }

    /// Run the search with the outer loop parallelized over rayon workers.
    ///
    /// Each worker owns a private scheduler and signal-state clone; the
    /// shared netlist is read-only. Per-worker maxima are reduced by
    /// `(delay, pair index)` so the report is identical to [`run`](Self::run).
    pub fn run_parallel(&self) -> Result<DelayReport, SearchError> {
        let total = self.vector_count()?;
        info!(
            inputs = self.inputs.len(),
            pairs = self.pair_count(),
            "starting exhaustive transition search (parallel)"
        );

        let template = self.primed_state()?;
        let acc = (0..total)
            .into_par_iter()
            .map(|old_idx| -> Result<Accumulator, SearchError> {
                let mut state = template.clone();
                let mut acc = Accumulator::new(self.monitored.len());
                for new_idx in 0..total {
                    if new_idx == old_idx {
                        continue;
                    }
                    self.measure_into(&mut acc, &mut state, total, old_idx, new_idx)?;
                }
                Ok(acc)
            })
            .try_reduce(
                || Accumulator::new(self.monitored.len()),
                |a, b| Ok(a.merge(b)),
            )?;

        Ok(self.finish(acc))
    }

    /// Measure one ordered pair through the settle-then-transition
    /// protocol.
    ///
    /// `state` must be consistent (primed, or left settled by a previous
    /// pair). Phase 1 settles `old` and records the monitored baselines;
    /// the monitored change stamps are then cleared and the scheduler
    /// reset, so phase 2's change detection is relative to the transition
    /// only. Phase 2 applies `new` at time 0 and settles.
    pub fn measure_pair(
        &self,
        state: &mut NetState,
        old: &[bool],
        new: &[bool],
    ) -> Result<PairOutcome, SearchError> {
        let mut sched = Scheduler::with_event_budget(self.config.event_budget);

        sched.apply_inputs(self.netlist, state, self.inputs, old)?;
        let mut events = sched.run_until_stable(self.netlist, state)?;

        let baseline: Vec<bool> = self.monitored.iter().map(|&m| state.value(m)).collect();
        for &m in self.monitored {
            state.clear_last_change(m);
        }
        sched.reset_for_measurement();

        sched.apply_inputs(self.netlist, state, self.inputs, new)?;
        events += sched.run_until_stable(self.netlist, state)?;

        let transitions = self
            .monitored
            .iter()
            .zip(&baseline)
            .map(|(&m, &was)| match state.last_change(m) {
                Some(delay) if state.value(m) != was => Some(Transition {
                    delay,
                    direction: if state.value(m) {
                        Direction::Rise
                    } else {
                        Direction::Fall
                    },
                }),
                _ => None,
            })
            .collect();

        Ok(PairOutcome { transitions, events })
    }

    /// A consistent all-low-input state to start measuring from.
    pub fn primed_state(&self) -> Result<NetState, SearchError> {
        let mut state = NetState::new(self.netlist);
        let mut sched = Scheduler::with_event_budget(self.config.event_budget);
        sched.prime(self.netlist, &mut state)?;
        Ok(state)
    }

    fn vector_count(&self) -> Result<u64, SearchError> {
        if self.inputs.len() > MAX_EXHAUSTIVE_INPUTS {
            return Err(SearchError::TooManyInputs {
                count: self.inputs.len(),
                limit: MAX_EXHAUSTIVE_INPUTS,
            });
        }
        Ok(1u64 << self.inputs.len())
    }

    fn measure_into(
        &self,
        acc: &mut Accumulator,
        state: &mut NetState,
        total: u64,
        old_idx: u64,
        new_idx: u64,
    ) -> Result<(), SearchError> {
        let width = self.inputs.len();
        let old = InputVector::from_index(old_idx, width);
        let new = InputVector::from_index(new_idx, width);
        let outcome = self.measure_pair(state, old.bits(), new.bits())?;

        let pair_index = old_idx * total + new_idx;
        acc.pairs += 1;
        acc.events += outcome.events;
        for (slot, transition) in acc.outputs.iter_mut().zip(&outcome.transitions) {
            if let Some(t) = transition {
                let best = match t.direction {
                    Direction::Rise => &mut slot.rise,
                    Direction::Fall => &mut slot.fall,
                };
                // Strict improvement only: ties keep the earliest pair in
                // enumeration order.
                if best.as_ref().map_or(true, |b| t.delay > b.delay) {
                    *best = Some(Best {
                        delay: t.delay,
                        pair_index,
                        witness: Witness {
                            old: old.clone(),
                            new: new.clone(),
                        },
                    });
                }
            }
        }
        Ok(())
    }

    fn finish(&self, acc: Accumulator) -> DelayReport {
        let outputs = self
            .monitored
            .iter()
            .zip(acc.outputs)
            .map(|(&m, best)| OutputReport {
                name: self.netlist.signal_name(m).to_string(),
                rise: best.rise.map_or_else(TransitionExtreme::none, Best::into_extreme),
                fall: best.fall.map_or_else(TransitionExtreme::none, Best::into_extreme),
            })
            .collect();

        info!(
            pairs = acc.pairs,
            events = acc.events,
            "transition search finished"
        );

        DelayReport {
            outputs,
            pairs_evaluated: acc.pairs,
            events_processed: acc.events,
        }
    }
}

/// Running maximum for one direction of one output.
#[derive(Debug, Clone)]
struct Best {
    delay: Tick,
    /// Position in enumeration order; the merge tie-break that makes the
    /// parallel reduction reproduce the serial earliest-found winner.
    pair_index: u64,
    witness: Witness,
}

impl Best {
    fn into_extreme(self) -> TransitionExtreme {
        TransitionExtreme {
            delay: self.delay,
            witness: Some(self.witness),
        }
    }

    /// Prefer the later delay; on equal delay, the earlier pair.
    fn better(a: Option<Best>, b: Option<Best>) -> Option<Best> {
        match (a, b) {
            (Some(a), Some(b)) => {
                if a.delay > b.delay || (a.delay == b.delay && a.pair_index <= b.pair_index) {
                    Some(a)
                } else {
                    Some(b)
                }
            }
            (a, b) => a.or(b),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct OutputBest {
    rise: Option<Best>,
    fall: Option<Best>,
}

/// Per-worker running maxima plus counters.
#[derive(Debug, Clone)]
struct Accumulator {
    outputs: Vec<OutputBest>,
    pairs: u64,
    events: u64,
}

impl Accumulator {
    fn new(monitored: usize) -> Self {
        Self {
            outputs: vec![OutputBest::default(); monitored],
            pairs: 0,
            events: 0,
        }
    }

    fn merge(self, other: Self) -> Self {
        let outputs = self
            .outputs
            .into_iter()
            .zip(other.outputs)
            .map(|(a, b)| OutputBest {
                rise: Best::better(a.rise, b.rise),
                fall: Best::better(a.fall, b.fall),
            })
            .collect();
        Self {
            outputs,
            pairs: self.pairs + other.pairs,
            events: self.events + other.events,
        }
    }
}
