//! The two-input NAND primitive.

use crate::identifiers::{SignalId, Tick};

/// A two-input NAND gate with a fixed propagation delay.
///
/// Gates are immutable after construction. They reference their input and
/// output signals by arena id and do not own them; the
/// [`Netlist`](crate::Netlist) is the longest-lived holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    /// First input signal.
    pub a: SignalId,
    /// Second input signal.
    pub b: SignalId,
    /// Output signal driven by this gate.
    pub out: SignalId,
    /// Propagation delay from an input event to the output committing.
    pub delay: Tick,
}

impl Gate {
    /// Evaluate the NAND function: false only when both inputs are true.
    ///
    /// Pure and total; a function of the two input values at call time.
    pub fn evaluate(a: bool, b: bool) -> bool {
        !(a && b)
    }
}
