//! Saved-scenario documents for the orbital simulation.
//!
//! A scenario is a JSON document holding the elapsed time and an ordered
//! body list with display settings. Saving is strict; loading recovers
//! per field, dropping malformed bodies instead of aborting the load.

pub mod document;


pub use document::{from_json, to_json, ScenarioDoc, ScenarioError};
