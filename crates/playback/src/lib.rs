//! Tick-driven driver for the orbital simulation.
//!
//! Arbitrates between live realtime stepping with a bounded rolling
//! history and indexed playback over a precomputed timeline of snapshots.

pub mod driver;


pub use driver::{Mode, PrecomputeOutcome, SimulationDriver, HISTORY_CAPACITY};
