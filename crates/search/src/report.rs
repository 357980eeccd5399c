//! Search result types.

use crate::vectors::InputVector;
use gatetime_netlist::Tick;
use serde::Serialize;

/// The vector pair that achieved a maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Witness {
    /// Settled vector before the transition.
    pub old: InputVector,
    /// Vector applied at time 0 of the measurement.
    pub new: InputVector,
}

/// Worst delay found for one transition direction of one output.
///
/// `witness: None` means no qualifying transition was found across any
/// pair; the delay is then 0 by convention. A genuine zero-delay
/// transition (possible with zero-delay gates) carries a witness, so the
/// two cases stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionExtreme {
    /// Latest stabilization time observed, in ticks.
    pub delay: Tick,
    /// The pair achieving it, earliest-found on ties.
    pub witness: Option<Witness>,
}

impl TransitionExtreme {
    pub(crate) fn none() -> Self {
        Self {
            delay: 0,
            witness: None,
        }
    }

    /// Whether any qualifying transition was found.
    pub fn found(&self) -> bool {
        self.witness.is_some()
    }
}

/// Rise and fall extremes for one monitored output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputReport {
    /// Diagnostic name of the monitored signal.
    pub name: String,
    /// Worst low-to-high transition.
    pub rise: TransitionExtreme,
    /// Worst high-to-low transition.
    pub fall: TransitionExtreme,
}

/// Full result of an exhaustive transition search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DelayReport {
    /// One entry per monitored output, in monitor order.
    pub outputs: Vec<OutputReport>,
    /// Ordered pairs simulated.
    pub pairs_evaluated: u64,
    /// Total scheduler events processed across all pairs.
    pub events_processed: u64,
}
