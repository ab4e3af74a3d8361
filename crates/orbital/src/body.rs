use std::f64::consts::PI;

use nalgebra::{Point3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use crate::ellipse::Ellipse;
use crate::forces::G;

/// A point mass in the simulation
///
/// Positions are heliocentric Cartesian in Gm, velocities in Gm/year.
/// `name` is display-only and not required to be unique. `mass > 0` is
/// expected but not enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub name: String,
    pub mass: f64,              // kg
    pub position: Point3<f64>,  // Gm
    pub velocity: Vector3<f64>, // Gm/year
}

impl Body {
    /// Creates a body with an explicit initial velocity
    pub fn new(name: &str, mass: f64, position: Point3<f64>, velocity: Vector3<f64>) -> Self {
        Body {
            name: name.to_string(),
            mass,
            position,
            velocity,
        }
    }

    /// Creates a body with zero initial velocity
    pub fn at_rest(name: &str, mass: f64, position: Point3<f64>) -> Self {
        Self::new(name, mass, position, Vector3::zeros())
    }

    /// Creates a body on an elliptical orbit around `center`, deriving its
    /// velocity from the orbit geometry
    ///
    /// `position` must already lie on the ellipse. The speed comes from the
    /// vis-viva equation plus the center's own speed, so orbits can be
    /// defined around a moving center. The velocity direction is the radial
    /// unit vector rotated within the z = 0 plane; the derivation assumes a
    /// planar ecliptic orbit and is undefined for out-of-plane positions.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::Point3;
    /// use orbital::body::Body;
    /// use orbital::ellipse::Ellipse;
    /// use orbital::forces::G;
    ///
    /// let sun = Body::at_rest("Sun", 1.989e30, Point3::origin());
    /// let earth = Body::from_orbit(
    ///     "Earth",
    ///     5.972e24,
    ///     Point3::new(149.6, 0.0, 0.0),
    ///     &sun,
    ///     &Ellipse::circular(149.6),
    /// );
    ///
    /// // Circular orbit speed is sqrt(GM/r), tangential to the radius
    /// let expected = (G * sun.mass / 149.6).sqrt();
    /// assert!((earth.speed() - expected).abs() / expected < 1e-12);
    /// assert!(earth.velocity.x.abs() < 1e-9);
    /// ```
    pub fn from_orbit(
        name: &str,
        mass: f64,
        position: Point3<f64>,
        center: &Body,
        ellipse: &Ellipse,
    ) -> Self {
        let offset = position - center.position;
        let r = offset.magnitude();
        let speed = (G * center.mass * (2.0 / r - 1.0 / ellipse.a)).sqrt() + center.speed();

        // Angle between the radius vector and the velocity direction from the
        // ellipse geometry. Roundoff can push the cosine just past 1, which
        // would take acos out of its domain.
        let k = r / ellipse.a;
        let phi = ((2.0 - 2.0 * ellipse.e * ellipse.e) / (k * (2.0 - k)) - 1.0).min(1.0);
        let alpha = phi.acos();

        let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), (PI - alpha) / 2.0);
        let direction = rotation * (offset / r);

        Body {
            name: name.to_string(),
            mass,
            position,
            velocity: direction * speed,
        }
    }

    /// Magnitude of the velocity in Gm/year
    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    /// Overwrites one position component (0 = x, 1 = y, 2 = z)
    pub fn set_position_axis(&mut self, axis: usize, value: f64) {
        self.position[axis] = value;
    }

    /// Overwrites one velocity component (0 = x, 1 = y, 2 = z)
    pub fn set_velocity_axis(&mut self, axis: usize, value: f64) {
        self.velocity[axis] = value;
    }

    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
    }
}
