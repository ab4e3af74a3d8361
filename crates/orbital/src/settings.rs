use serde::{Deserialize, Serialize};

/// How the display layer draws a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayKind {
    #[default]
    Point,
    Image,
}

/// Per-body display state
///
/// Owned by the presentation layer, but carried in lock-step with the body
/// list so that snapshots and saved scenarios keep it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySettings {
    pub display: DisplayKind,
    pub show_history: bool,
    /// RGB components, each in [0, 1]
    pub color: [f64; 3],
}

impl Default for BodySettings {
    fn default() -> Self {
        Self {
            display: DisplayKind::Point,
            show_history: true,
            color: [1.0, 1.0, 1.0],
        }
    }
}
