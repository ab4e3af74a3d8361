//! Time integration for the N-body system
//!
//! The primary integrator is classical 4th-order Runge-Kutta with velocity
//! as the position derivative and the gravity field as the velocity
//! derivative. A velocity-Verlet integrator is kept as a cheaper
//! two-force-evaluation alternative.

use crate::body::Body;
use crate::forces::ForceModel;
use nalgebra::Vector3;

/// A fixed-step time integrator for N-body systems
///
/// Integrators advance positions and velocities in place. They do not touch
/// simulation time; the owning container accounts for it.
pub trait Integrator: Send + Sync {
    /// Advance every body by one timestep of `dt` years
    fn step(&self, bodies: &mut [Body], dt: f64, force: &dyn ForceModel);

    /// Advance every body by `n_steps` timesteps of `dt` years
    fn integrate(&self, bodies: &mut [Body], dt: f64, n_steps: usize, force: &dyn ForceModel) {
        for _ in 0..n_steps {
            self.step(bodies, dt, force);
        }
    }
}

/// Classical 4th-order Runge-Kutta integrator
///
/// Each step takes four slope samples:
///
/// 1. k1 at the current state,
/// 2. k2 at the state advanced dt/2 along k1,
/// 3. k3 at the state advanced dt/2 along k2,
/// 4. k4 at the state advanced dt along k3,
///
/// then applies the weighted average `(k1 + 2k2 + 2k3 + k4)/6` to the
/// original bodies. Sub-stage states are working copies; the current state
/// stays fixed while the estimates are taken. Fixed step, no adaptive error
/// control, deterministic for identical inputs.
pub struct Rk4;

impl Rk4 {
    /// Working copy of `bodies` advanced `h` years along the given slopes
    fn advanced(
        bodies: &[Body],
        velocities: &[Vector3<f64>],
        accelerations: &[Vector3<f64>],
        h: f64,
    ) -> Vec<Body> {
        bodies
            .iter()
            .enumerate()
            .map(|(i, body)| {
                let mut stage = body.clone();
                stage.position += velocities[i] * h;
                stage.velocity += accelerations[i] * h;
                stage
            })
            .collect()
    }
}

impl Integrator for Rk4 {
    fn step(&self, bodies: &mut [Body], dt: f64, force: &dyn ForceModel) {
        // k1: slopes at the current state
        let v1: Vec<Vector3<f64>> = bodies.iter().map(|b| b.velocity).collect();
        let a1 = force.accelerations(bodies);

        // k2: slopes half a step along k1
        let stage = Self::advanced(bodies, &v1, &a1, 0.5 * dt);
        let v2: Vec<Vector3<f64>> = stage.iter().map(|b| b.velocity).collect();
        let a2 = force.accelerations(&stage);

        // k3: slopes half a step along k2
        let stage = Self::advanced(bodies, &v2, &a2, 0.5 * dt);
        let v3: Vec<Vector3<f64>> = stage.iter().map(|b| b.velocity).collect();
        let a3 = force.accelerations(&stage);

        // k4: slopes a full step along k3
        let stage = Self::advanced(bodies, &v3, &a3, dt);
        let v4: Vec<Vector3<f64>> = stage.iter().map(|b| b.velocity).collect();
        let a4 = force.accelerations(&stage);

        // Weighted average of the four estimates, midpoints counted twice
        for (i, body) in bodies.iter_mut().enumerate() {
            body.position += (v1[i] + 2.0 * v2[i] + 2.0 * v3[i] + v4[i]) * (dt / 6.0);
            body.velocity += (a1[i] + 2.0 * a2[i] + 2.0 * a3[i] + a4[i]) * (dt / 6.0);
        }
    }
}

/// Velocity-Verlet integrator (2nd order, kick-drift-kick)
///
/// Two force evaluations per step:
///
/// 1. Kick: v(t + dt/2) = v(t) + a(t) · dt/2
/// 2. Drift: x(t + dt) = x(t) + v(t + dt/2) · dt
/// 3. Kick: v(t + dt) = v(t + dt/2) + a(t + dt) · dt/2
///
/// Symplectic, so it conserves energy well over long spans, but less
/// accurate per step than [`Rk4`].
pub struct VelocityVerlet;

impl Integrator for VelocityVerlet {
    fn step(&self, bodies: &mut [Body], dt: f64, force: &dyn ForceModel) {
        let half_dt = 0.5 * dt;

        let accelerations = force.accelerations(bodies);
        for (body, a) in bodies.iter_mut().zip(accelerations.iter()) {
            body.velocity += a * half_dt;
        }

        for body in bodies.iter_mut() {
            body.position += body.velocity * dt;
        }

        let accelerations = force.accelerations(bodies);
        for (body, a) in bodies.iter_mut().zip(accelerations.iter()) {
            body.velocity += a * half_dt;
        }
    }
}
