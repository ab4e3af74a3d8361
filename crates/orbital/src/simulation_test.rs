use std::f64::consts::PI;

use nalgebra::{Point3, Vector3};

use crate::body::Body;
use crate::ellipse::Ellipse;
use crate::forces::G;
use crate::settings::BodySettings;
use crate::simulation::{flatten, unflatten, Simulation};

fn make_test_simulation() -> Simulation {
    let star = Body::at_rest("Star", 2.0e30, Point3::origin());
    let planet = Body::from_orbit(
        "Planet",
        6.0e24,
        Point3::new(150.0, 0.0, 0.0),
        &star,
        &Ellipse::circular(150.0),
    );
    let settings = vec![BodySettings::default(), BodySettings::default()];
    Simulation::new(vec![star, planet], settings, 0.0)
}

#[test]
fn test_new_simulation() {
    let sim = make_test_simulation();

    assert_eq!(sim.body_count(), 2);
    assert_eq!(sim.time, 0.0);
    assert_eq!(sim.flat_state.len(), 12);
}

#[test]
fn test_step_advances_time() {
    let mut sim = make_test_simulation();

    sim.step(0.25);
    sim.step(0.25);

    assert!((sim.time - 0.5).abs() < 1e-15);
}

#[test]
fn test_step_zero_is_noop() {
    let mut sim = make_test_simulation();
    let before = sim.flatten();
    let time_before = sim.time;

    sim.step(0.0);

    // Bit-for-bit unchanged
    assert_eq!(sim.flatten(), before);
    assert_eq!(sim.time, time_before);
}

#[test]
fn test_step_moves_bodies() {
    let mut sim = make_test_simulation();
    let start = sim.bodies[1].position;

    sim.step(0.01);

    assert!((sim.bodies[1].position - start).magnitude() > 0.0);
}

#[test]
fn test_flatten_layout() {
    let bodies = vec![
        Body::new(
            "A",
            1.0,
            Point3::new(1.0, 2.0, 3.0),
            Vector3::new(4.0, 5.0, 6.0),
        ),
        Body::new(
            "B",
            1.0,
            Point3::new(7.0, 8.0, 9.0),
            Vector3::new(10.0, 11.0, 12.0),
        ),
    ];
    let sim = Simulation::new(bodies, vec![BodySettings::default(); 2], 0.0);

    let flat = sim.flatten();
    let expected: Vec<f64> = (1..=12).map(f64::from).collect();
    assert_eq!(flat, expected);
}

#[test]
fn test_flatten_length() {
    let sim = make_test_simulation();
    assert_eq!(sim.flatten().len(), 6 * sim.body_count());
}

#[test]
fn test_unflatten_inverts_flatten() {
    let sim = make_test_simulation();
    let flat = sim.flatten();

    let mut bodies = sim.bodies.clone();
    for body in bodies.iter_mut() {
        body.position = Point3::origin();
        body.velocity = Vector3::zeros();
    }
    unflatten(&mut bodies, &flat);

    assert_eq!(flatten(&bodies), flat);
    assert_eq!(bodies[1].position, sim.bodies[1].position);
    assert_eq!(bodies[1].velocity, sim.bodies[1].velocity);
}

#[test]
fn test_clone_is_deep() {
    let mut sim = make_test_simulation();
    let snapshot = sim.clone();
    let frozen = snapshot.flatten();

    sim.step(0.1);
    sim.bodies[0].set_mass(1.0);

    // Stepping and editing the source leaves the snapshot untouched
    assert_eq!(snapshot.flatten(), frozen);
    assert_eq!(snapshot.bodies[0].mass, 2.0e30);
    assert_eq!(snapshot.time, 0.0);
}

#[test]
fn test_replace_bodies_refreshes_flat_state() {
    let mut sim = make_test_simulation();

    let probe = Body::new(
        "Probe",
        1.0e3,
        Point3::new(5.0, 0.0, 0.0),
        Vector3::zeros(),
    );
    sim.replace_bodies(vec![probe], vec![BodySettings::default()]);

    assert_eq!(sim.body_count(), 1);
    assert_eq!(sim.flat_state, vec![5.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_kepler_third_law_ordering() {
    // Star at rest with two planets on ellipse-derived circular orbits
    let star = Body::at_rest("Star", 2.0e30, Point3::origin());
    let inner = Body::from_orbit(
        "Inner",
        6.0e24,
        Point3::new(150.0, 0.0, 0.0),
        &star,
        &Ellipse::circular(150.0),
    );
    let outer = Body::from_orbit(
        "Outer",
        1.9e27,
        Point3::new(780.0, 0.0, 0.0),
        &star,
        &Ellipse::circular(780.0),
    );
    let mut sim = Simulation::new(
        vec![star, inner, outer],
        vec![BodySettings::default(); 3],
        0.0,
    );

    let inner_start = sim.bodies[1].position;
    let inner_period = 2.0 * PI * (150.0_f64.powi(3) / (G * 2.0e30)).sqrt();

    let n_steps = 2000;
    let dt = inner_period / n_steps as f64;
    for _ in 0..n_steps {
        sim.step(dt);
    }

    // The inner planet has closed its orbit
    let miss = (sim.bodies[1].position - inner_start).magnitude();
    assert!(miss < 1.5, "Inner orbit failed to close, off by {:.3} Gm", miss);

    // The outer planet has only covered (150/780)^1.5 of its own orbit
    let outer_angle = sim.bodies[2].position.y.atan2(sim.bodies[2].position.x);
    let expected_angle = 2.0 * PI * (150.0_f64 / 780.0).powf(1.5);
    assert!(
        (outer_angle - expected_angle).abs() < 0.01,
        "Outer planet advanced {:.4} rad, expected {:.4}",
        outer_angle,
        expected_angle
    );
    assert!(outer_angle < PI / 2.0);
}
