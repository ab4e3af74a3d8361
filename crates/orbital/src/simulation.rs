//! The simulation container: the body list, its display settings, and
//! elapsed time, advanced by the RK4 integrator.

use nalgebra::{Point3, Vector3};

use crate::body::Body;
use crate::forces::DirectGravity;
use crate::integrator::{Integrator, Rk4};
use crate::settings::BodySettings;

/// Complete state of the simulated system at a point in time
///
/// Bodies are index-identified; their order is significant and stable, and
/// `settings` runs parallel to `bodies`. Cloning produces a fully
/// independent deep copy, which is how history and timeline snapshots are
/// isolated from the live instance.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub bodies: Vec<Body>,
    pub settings: Vec<BodySettings>,
    /// Elapsed simulation time in years
    pub time: f64,
    /// Flattened `[x, y, z, vx, vy, vz] × n` mirror of `bodies`. Leftover
    /// from an earlier external-ODE-solver integration path; refreshed on
    /// construction and body-list replacement, never read by the integrator.
    pub flat_state: Vec<f64>,
}

impl Simulation {
    pub fn new(bodies: Vec<Body>, settings: Vec<BodySettings>, time: f64) -> Self {
        debug_assert_eq!(bodies.len(), settings.len());
        let flat_state = flatten(&bodies);
        Self {
            bodies,
            settings,
            time,
            flat_state,
        }
    }

    /// Advance the system by `dt` years
    ///
    /// A zero `dt` is a strict no-op: neither bodies nor time are touched.
    pub fn step(&mut self, dt: f64) {
        if dt == 0.0 {
            return;
        }
        Rk4.step(&mut self.bodies, dt, &DirectGravity);
        self.time += dt;
    }

    /// Project the current bodies onto the flat `[pos, vel] × n` layout
    pub fn flatten(&self) -> Vec<f64> {
        flatten(&self.bodies)
    }

    /// Replace the whole body list and its settings atomically
    pub fn replace_bodies(&mut self, bodies: Vec<Body>, settings: Vec<BodySettings>) {
        debug_assert_eq!(bodies.len(), settings.len());
        self.bodies = bodies;
        self.settings = settings;
        self.flat_state = flatten(&self.bodies);
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

/// Flatten bodies into `[x, y, z, vx, vy, vz]` per body, in body order
pub fn flatten(bodies: &[Body]) -> Vec<f64> {
    let mut out = Vec::with_capacity(6 * bodies.len());
    for body in bodies {
        out.extend_from_slice(body.position.coords.as_slice());
        out.extend_from_slice(body.velocity.as_slice());
    }
    out
}

/// Write a flat `[pos, vel] × n` vector back into a body list of the same
/// count. Inverse of [`flatten`] for a fixed set of bodies.
pub fn unflatten(bodies: &mut [Body], flat: &[f64]) {
    debug_assert_eq!(flat.len(), 6 * bodies.len());
    for (body, chunk) in bodies.iter_mut().zip(flat.chunks_exact(6)) {
        body.position = Point3::new(chunk[0], chunk[1], chunk[2]);
        body.velocity = Vector3::new(chunk[3], chunk[4], chunk[5]);
    }
}
