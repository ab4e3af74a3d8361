//! Force models for the N-body engine
//!
//! This module provides the `ForceModel` trait and the direct pairwise
//! Newtonian gravity implementation that drives the integrators.

use crate::body::Body;
use nalgebra::Vector3;

/// Gravitational constant in Gm³ kg⁻¹ year⁻²
///
/// The SI value 6.67408 × 10⁻¹¹ m³ kg⁻¹ s⁻², rescaled by (3.1536 × 10⁷ s/yr)²
/// for the time unit and (10⁹ m/Gm)³ for the distance unit.
pub const G: f64 = 6.67408e-11 * 9.94519e14 / 1.0e27;

/// A source of acceleration on bodies in an N-body system
///
/// Force models compute the instantaneous acceleration of every body given
/// the full body set. Integrators call this once per sub-stage.
pub trait ForceModel: Send + Sync {
    /// Compute accelerations for all bodies, one entry per body in input
    /// order, in Gm/year².
    fn accelerations(&self, bodies: &[Body]) -> Vec<Vector3<f64>>;
}

/// Direct O(N²) gravitational acceleration
///
/// Sums the Newtonian pull of every other body with no softening and no
/// spatial acceleration structure. Fine for the tens of bodies this engine
/// targets.
///
/// Two bodies at the same position have zero separation and an undefined
/// force; the division by zero produces NaN components that poison all
/// subsequent positions. Known degeneracy, not guarded against.
///
/// # Examples
///
/// ```
/// use nalgebra::Point3;
/// use orbital::body::Body;
/// use orbital::forces::{DirectGravity, ForceModel};
///
/// let bodies = vec![
///     Body::at_rest("Sun", 1.989e30, Point3::origin()),
///     Body::at_rest("Earth", 5.972e24, Point3::new(149.6, 0.0, 0.0)),
/// ];
///
/// let accels = DirectGravity.accelerations(&bodies);
///
/// // Earth is pulled toward the origin (negative x direction)
/// assert!(accels[1].x < 0.0);
/// ```
pub struct DirectGravity;

impl ForceModel for DirectGravity {
    fn accelerations(&self, bodies: &[Body]) -> Vec<Vector3<f64>> {
        let n = bodies.len();
        let mut out = vec![Vector3::zeros(); n];

        // Each unordered pair (i, j) contributes equal and opposite pulls.
        for i in 0..n {
            for j in (i + 1)..n {
                let dr = bodies[j].position - bodies[i].position;
                let r2 = dr.magnitude_squared();
                let inv_r = r2.sqrt().recip();
                let inv_r3 = inv_r * inv_r * inv_r;

                out[i] += dr * (G * bodies[j].mass * inv_r3);
                out[j] -= dr * (G * bodies[i].mass * inv_r3);
            }
        }

        out
    }
}
