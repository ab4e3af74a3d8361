//! Gravitational N-body engine for small planetary systems.
//!
//! Mass is measured in kilograms, distance in gigameters (Gm), velocity in
//! Gm/year, and time in years throughout.

pub mod body;
pub mod ellipse;
pub mod forces;
pub mod integrator;
pub mod settings;
pub mod simulation;

#[cfg(test)]
mod body_test;
#[cfg(test)]
mod simulation_test;

pub use body::Body;
pub use ellipse::Ellipse;
pub use forces::{DirectGravity, ForceModel, G};
pub use integrator::{Integrator, Rk4, VelocityVerlet};
pub use settings::{BodySettings, DisplayKind};
pub use simulation::Simulation;
