//! Exhaustive worst-case propagation-delay search.
//!
//! Enumerates every ordered pair of distinct input vectors, drives the
//! simulator through a settle-then-transition protocol per pair, and keeps
//! the latest value-changing stabilization time (rise and fall separately)
//! for each monitored output, with the vector pair that produced it.
//!
//! Each pair is independent and shares only the read-only netlist, so the
//! outer loop is embarrassingly parallel: [`TransitionSearch::run_parallel`]
//! splits old vectors across rayon workers, each owning a private scheduler
//! and signal-state clone, and reduces the per-worker maxima by pair index
//! so the result is byte-identical to the serial run.

mod report;
mod search;
mod vectors;

pub use report::{DelayReport, OutputReport, TransitionExtreme, Witness};
pub use search::{
    Direction, PairOutcome, SearchConfig, SearchError, Transition, TransitionSearch,
    MAX_EXHAUSTIVE_INPUTS,
};
pub use vectors::InputVector;
