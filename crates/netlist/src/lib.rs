//! Gate-level data model for gatetime.
//!
//! A circuit is an arena [`Netlist`]: signals and gates live in flat
//! vectors addressed by [`SignalId`] / [`GateId`], and the dependency
//! fan-out from a signal to the gates reading it is an explicit adjacency
//! table rather than embedded listener lists. This keeps the topology
//! immutable and trivially shareable across simulation workers, while all
//! mutable per-run data (values and change timestamps) lives in a separate
//! clonable [`NetState`].

mod gate;
mod generators;
mod identifiers;
mod netlist;
mod state;

pub use gate::Gate;
pub use generators::{ripple_carry_adder, RippleCarryAdder};
pub use identifiers::{GateId, SignalId, Tick};
pub use netlist::{Netlist, NetlistBuilder, NetlistError};
pub use state::NetState;
