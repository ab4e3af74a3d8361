use nalgebra::{Point3, Vector3};

use crate::body::Body;
use crate::ellipse::Ellipse;
use crate::forces::G;

fn star() -> Body {
    Body::at_rest("Star", 2.0e30, Point3::origin())
}

#[test]
fn test_at_rest() {
    let body = star();

    assert_eq!(body.name, "Star");
    assert_eq!(body.speed(), 0.0);
}

#[test]
fn test_speed() {
    let body = Body::new(
        "Probe",
        1.0e3,
        Point3::origin(),
        Vector3::new(3.0, 4.0, 0.0),
    );

    assert!((body.speed() - 5.0).abs() < 1e-12);
}

#[test]
fn test_circular_orbit_speed() {
    let center = star();
    let body = Body::from_orbit(
        "Planet",
        6.0e24,
        Point3::new(150.0, 0.0, 0.0),
        &center,
        &Ellipse::circular(150.0),
    );

    // Vis-viva with r = a reduces to sqrt(GM/r)
    let expected = (G * center.mass / 150.0).sqrt();
    assert!((body.speed() - expected).abs() / expected < 1e-12);
}

#[test]
fn test_circular_orbit_velocity_is_tangential() {
    let center = star();
    let body = Body::from_orbit(
        "Planet",
        6.0e24,
        Point3::new(150.0, 0.0, 0.0),
        &center,
        &Ellipse::circular(150.0),
    );

    // Radial unit vector is +x; a circular orbit moves perpendicular to it,
    // counterclockwise in this convention, and stays in the ecliptic plane
    assert!(body.velocity.x.abs() < 1e-9 * body.speed());
    assert!(body.velocity.y > 0.0);
    assert_eq!(body.velocity.z, 0.0);
}

#[test]
fn test_orbit_velocity_perpendicular_at_perihelion() {
    let center = star();
    let ellipse = Ellipse::from_eccentricity(200.0, 0.5);

    // Perihelion distance is a(1 - e) = 100
    let body = Body::from_orbit(
        "Comet",
        1.0e15,
        Point3::new(100.0, 0.0, 0.0),
        &center,
        &ellipse,
    );

    let radial = Vector3::new(1.0, 0.0, 0.0);
    assert!(body.velocity.dot(&radial).abs() < 1e-9 * body.speed());

    let expected = (G * center.mass * (2.0 / 100.0 - 1.0 / 200.0)).sqrt();
    assert!((body.speed() - expected).abs() / expected < 1e-12);
}

#[test]
fn test_orbit_around_moving_center() {
    let mut center = star();
    center.velocity = Vector3::new(0.0, 25.0, 0.0);

    let body = Body::from_orbit(
        "Moon",
        7.0e22,
        Point3::new(150.0, 0.0, 0.0),
        &center,
        &Ellipse::circular(150.0),
    );

    // The center's own speed is added on top of the vis-viva speed
    let expected = (G * center.mass / 150.0).sqrt() + 25.0;
    assert!((body.speed() - expected).abs() / expected < 1e-12);
}

#[test]
fn test_axis_setters() {
    let mut body = star();

    body.set_position_axis(1, 42.0);
    body.set_velocity_axis(2, -7.0);
    body.set_mass(5.0e29);

    assert_eq!(body.position.y, 42.0);
    assert_eq!(body.velocity.z, -7.0);
    assert_eq!(body.mass, 5.0e29);
}
