//! Deterministic event-driven gate simulation.
//!
//! The simulator drives a [`gatetime_netlist::Netlist`] to quiescence from
//! a fixed input vector. Pending gate re-evaluations live in a global event
//! queue ordered deterministically; given the same schedule calls, two runs
//! always produce identical final values and change stamps.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      Scheduler                          │
//! │                                                         │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     Event queue (BTreeMap<EventKey, GateId>)       │ │
//! │  │     Ordered by: fire time, sequence (FIFO)         │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │ pop_first                   │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     Evaluate gate; commit only on value change     │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │ changed                     │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     Schedule each fanout gate at now + delay       │ │
//! │  └────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────┘
//! ```

mod error;
mod event_queue;
mod scheduler;

pub use error::SimError;
pub use event_queue::EventKey;
pub use scheduler::{Phase, Scheduler, DEFAULT_EVENT_BUDGET};
