/// An orbital ellipse described by semi-major axis, semi-minor axis, and
/// eccentricity
///
/// Only two of the three quantities are independent; each constructor takes
/// one of the optional shape parameters and derives the rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    /// Semi-major axis in Gm
    pub a: f64,
    /// Semi-minor axis in Gm
    pub b: f64,
    /// Eccentricity, 0 for a circle
    pub e: f64,
}

impl Ellipse {
    /// Creates an ellipse from its semi-major axis and eccentricity
    pub fn from_eccentricity(a: f64, e: f64) -> Self {
        Self {
            a,
            b: a * (1.0 - e * e).sqrt(),
            e,
        }
    }

    /// Creates an ellipse from its semi-major and semi-minor axes
    pub fn from_semi_minor(a: f64, b: f64) -> Self {
        Self {
            a,
            b,
            e: (1.0 - (b * b) / (a * a)).sqrt(),
        }
    }

    /// Creates a circular orbit of the given radius
    pub fn circular(a: f64) -> Self {
        Self { a, b: a, e: 0.0 }
    }
}
