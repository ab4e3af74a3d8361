//! The persisted scenario shape and its conversions.
//!
//! Documents written by [`to_json`] are plain serde output. [`from_json`]
//! walks the document value by value so that one malformed field never
//! aborts a whole load: bad bodies are dropped, bad settings fall back to
//! defaults, and out-of-range colors are clamped.

use log::warn;
use nalgebra::{Point3, Vector3};
use orbital::{Body, BodySettings, DisplayKind, Simulation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors from scenario parsing
///
/// Only a document that fails to parse at all is an error; field-level
/// problems are recovered in place.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("malformed scenario document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Top-level saved scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDoc {
    /// Elapsed simulation time in years
    pub time: f64,
    pub bodies: Vec<BodyRecord>,
}

/// One body and its display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyRecord {
    pub name: String,
    pub mass: f64,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    pub settings: SettingsRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsRecord {
    pub show_history: bool,
    pub display: DisplayKind,
    pub color: [f64; 3],
}

impl ScenarioDoc {
    pub fn from_simulation(sim: &Simulation) -> Self {
        let bodies = sim
            .bodies
            .iter()
            .zip(sim.settings.iter())
            .map(|(body, settings)| BodyRecord {
                name: body.name.clone(),
                mass: body.mass,
                position: [body.position.x, body.position.y, body.position.z],
                velocity: [body.velocity.x, body.velocity.y, body.velocity.z],
                settings: SettingsRecord {
                    show_history: settings.show_history,
                    display: settings.display,
                    color: settings.color,
                },
            })
            .collect();

        Self {
            time: sim.time,
            bodies,
        }
    }
}

/// Serialize a simulation into a pretty-printed scenario document
pub fn to_json(sim: &Simulation) -> Result<String, ScenarioError> {
    Ok(serde_json::to_string_pretty(&ScenarioDoc::from_simulation(
        sim,
    ))?)
}

/// Parse a scenario document into a fresh simulation
///
/// A document that is not valid JSON is rejected outright. Within a valid
/// document, recovery is per field:
///
/// - a body with a missing/empty name or non-numeric mass, position, or
///   velocity is dropped and the load continues;
/// - `show_history` defaults to true, an unknown `display` falls back to
///   `Point`;
/// - color components outside [0, 1] clamp to 1; anything but three valid
///   components falls back to white;
/// - a malformed `time` falls back to 0.
pub fn from_json(text: &str) -> Result<Simulation, ScenarioError> {
    let doc: Value = serde_json::from_str(text)?;

    let time = match doc.get("time").and_then(number) {
        Some(time) => time,
        None => {
            warn!("scenario time missing or non-numeric, starting at 0");
            0.0
        }
    };

    let entries = doc
        .get("bodies")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut bodies = Vec::with_capacity(entries.len());
    let mut settings = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match parse_body(entry) {
            Some((body, body_settings)) => {
                bodies.push(body);
                settings.push(body_settings);
            }
            None => warn!("dropping body {index}: missing or non-numeric fields"),
        }
    }

    Ok(Simulation::new(bodies, settings, time))
}

fn parse_body(entry: &Value) -> Option<(Body, BodySettings)> {
    let name = entry.get("name")?.as_str()?;
    if name.is_empty() {
        return None;
    }

    let mass = number(entry.get("mass")?)?;
    let position = triple(entry.get("position")?)?;
    let velocity = triple(entry.get("velocity")?)?;

    let body = Body::new(
        name,
        mass,
        Point3::new(position[0], position[1], position[2]),
        Vector3::new(velocity[0], velocity[1], velocity[2]),
    );
    Some((body, parse_settings(entry.get("settings"))))
}

fn parse_settings(value: Option<&Value>) -> BodySettings {
    let Some(value) = value else {
        return BodySettings::default();
    };

    let show_history = value
        .get("show_history")
        .and_then(Value::as_bool)
        .unwrap_or(true);

    let display = match value.get("display").and_then(Value::as_str) {
        Some("Image") => DisplayKind::Image,
        _ => DisplayKind::Point,
    };

    BodySettings {
        display,
        show_history,
        color: parse_color(value.get("color")),
    }
}

fn parse_color(value: Option<&Value>) -> [f64; 3] {
    const WHITE: [f64; 3] = [1.0, 1.0, 1.0];

    let Some(parts) = value.and_then(Value::as_array) else {
        return WHITE;
    };

    let mut channels = Vec::with_capacity(3);
    for part in parts {
        let Some(channel) = number(part) else {
            continue;
        };
        channels.push(if (0.0..=1.0).contains(&channel) {
            channel
        } else {
            1.0
        });
    }

    match <[f64; 3]>::try_from(channels) {
        Ok(color) => color,
        Err(_) => {
            warn!("scenario color does not have three components, using white");
            WHITE
        }
    }
}

/// Accepts JSON numbers and numeric strings
fn number(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

fn triple(value: &Value) -> Option<[f64; 3]> {
    let parts = value.as_array()?;
    if parts.len() != 3 {
        return None;
    }
    Some([number(&parts[0])?, number(&parts[1])?, number(&parts[2])?])
}
