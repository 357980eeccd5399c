//! Error types for simulation.

use thiserror::Error;

/// Errors during a simulation run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    /// The run processed more events than the configured budget allows.
    /// Combinational circuits settle quickly; exceeding the budget means
    /// the netlist almost certainly contains a combinational cycle.
    #[error("event budget of {budget} exceeded; netlist likely contains a combinational cycle")]
    EventBudgetExceeded {
        /// The budget that was exhausted.
        budget: u64,
    },

    /// An input vector's length does not match the primary-input count.
    #[error("input vector has {got} bits, expected {expected}")]
    VectorLength {
        /// Number of primary inputs.
        expected: usize,
        /// Length of the rejected vector.
        got: usize,
    },

    /// Inputs were applied while the scheduler was settling.
    #[error("inputs applied while the scheduler is settling")]
    NotIdle,
}
