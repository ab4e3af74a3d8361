//! The mode-arbitration layer between the UI tick and the simulation.
//!
//! Each external tick either advances the live simulation (realtime mode)
//! or walks a precomputed timeline of snapshots (playback). Snapshots are
//! deep copies, so consumers can read an older state while the live
//! simulation keeps moving. Everything here runs on one thread and runs to
//! completion per call; the only cancellation point is between precompute
//! iterations.

use std::collections::VecDeque;

use log::debug;
use orbital::Simulation;
use scenario::{from_json, to_json, ScenarioError};

/// Upper bound on retained realtime snapshots; the oldest entry is evicted
/// once the window is full.
pub const HISTORY_CAPACITY: usize = 1000;

/// How the driver advances the simulation each tick
///
/// Switched explicitly by the presentation layer, never inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Step the live simulation every tick, retaining a rolling history
    Realtime,
    /// Scrub a precomputed timeline with the playback cursor
    Precompute,
}

/// Result of a bulk precompute run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecomputeOutcome {
    /// Timeline fully built with this many snapshots
    Completed(usize),
    /// Cancelled cooperatively; the partial timeline was discarded
    Cancelled,
}

/// Owns the live simulation and every snapshot collection
///
/// The presentation layer drives it through ticks, mode switches, body
/// edits, and scenario load/save. All snapshot stores are invalidated the
/// moment the past they were computed from changes.
pub struct SimulationDriver {
    live: Simulation,
    mode: Mode,
    paused: bool,
    /// Simulated years per real second of tick time
    simulation_speed: f64,
    history: VecDeque<Simulation>,
    timeline: Vec<Simulation>,
    playback_index: usize,
    /// Timeline steps per tick; negative plays backwards, zero freezes
    playback_speed: f64,
    /// Body whose position consumers treat as the frame origin
    view_focus: Option<usize>,
}

impl SimulationDriver {
    pub fn new(live: Simulation) -> Self {
        Self {
            live,
            mode: Mode::Realtime,
            paused: true,
            simulation_speed: 0.5 / 365.0,
            history: VecDeque::new(),
            timeline: Vec::new(),
            playback_index: 0,
            playback_speed: 1.0,
            view_focus: None,
        }
    }

    /// The live simulation, regardless of mode
    pub fn live(&self) -> &Simulation {
        &self.live
    }

    /// The simulation consumers should render right now
    ///
    /// The current timeline snapshot during playback, otherwise the live
    /// instance. Read-only; the driver never mutates timeline entries.
    pub fn current(&self) -> &Simulation {
        if self.mode == Mode::Precompute && !self.timeline.is_empty() {
            &self.timeline[self.playback_index]
        } else {
            &self.live
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn history(&self) -> &VecDeque<Simulation> {
        &self.history
    }

    pub fn timeline(&self) -> &[Simulation] {
        &self.timeline
    }

    pub fn playback_index(&self) -> usize {
        self.playback_index
    }

    pub fn playback_speed(&self) -> f64 {
        self.playback_speed
    }

    pub fn simulation_speed(&self) -> f64 {
        self.simulation_speed
    }

    pub fn view_focus(&self) -> Option<usize> {
        self.view_focus
    }

    /// Advance one external tick
    ///
    /// Realtime: step the live simulation by `simulation_speed` times the
    /// elapsed real seconds and snapshot it into the history window.
    /// Playback: move the cursor by `playback_speed`; an advance that would
    /// leave the timeline wraps to the opposite endpoint instead of
    /// clamping. Does nothing while paused.
    pub fn tick(&mut self, elapsed_real_seconds: f64) {
        if self.paused {
            return;
        }

        match self.mode {
            Mode::Realtime => {
                let dt = self.simulation_speed * elapsed_real_seconds;
                self.live.step(dt);

                if self.history.len() == HISTORY_CAPACITY {
                    self.history.pop_front();
                }
                self.history.push_back(self.live.clone());
            }
            Mode::Precompute => self.advance_playback(),
        }
    }

    fn advance_playback(&mut self) {
        if self.timeline.is_empty() {
            return;
        }

        let last = self.timeline.len() - 1;
        let next = self.playback_index as f64 + self.playback_speed;
        self.playback_index = if (0.0..=last as f64).contains(&next) {
            next.round() as usize
        } else if self.playback_speed >= 0.0 {
            0
        } else {
            last
        };
    }

    /// Switch between realtime and precompute/playback
    ///
    /// A switch starts a fresh rolling history window.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        self.history.clear();
        self.mode = mode;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_paused(&mut self) {
        self.paused = !self.paused;
    }

    /// Simulated years per real second of realtime stepping
    pub fn set_simulation_speed(&mut self, speed: f64) {
        self.simulation_speed = speed;
    }

    pub fn set_playback_speed(&mut self, speed: f64) {
        self.playback_speed = speed;
    }

    /// Scrub the playback cursor; clamped to the timeline
    pub fn set_playback_index(&mut self, index: usize) {
        if self.timeline.is_empty() {
            return;
        }
        self.playback_index = index.min(self.timeline.len() - 1);
    }

    pub fn set_view_focus(&mut self, focus: Option<usize>) {
        self.view_focus = focus;
    }

    /// Precompute a timeline of `round(total_time / timestep)` snapshots
    ///
    /// Starts from a deep copy of the live simulation: the first snapshot
    /// is the unstepped copy, each further one advances by `timestep`
    /// years. `cancel` is polled once per iteration; cancelling discards
    /// the entire partial timeline and leaves the live simulation
    /// untouched. On completion the cursor rewinds to the first snapshot.
    pub fn precompute<F>(&mut self, timestep: f64, total_time: f64, mut cancel: F) -> PrecomputeOutcome
    where
        F: FnMut() -> bool,
    {
        let total_steps = (total_time / timestep).round() as usize;

        let mut cursor = self.live.clone();
        self.timeline = vec![cursor.clone()];
        let mut computed = 1;
        while computed < total_steps {
            if cancel() {
                self.timeline.clear();
                self.playback_index = 0;
                debug!("precompute cancelled after {computed} of {total_steps} snapshots");
                return PrecomputeOutcome::Cancelled;
            }

            cursor.step(timestep);
            self.timeline.push(cursor.clone());
            computed += 1;
        }

        self.playback_index = 0;
        debug!(
            "precomputed {} snapshots of {timestep} years each",
            self.timeline.len()
        );
        PrecomputeOutcome::Completed(self.timeline.len())
    }

    /// Overwrite one body's mass
    ///
    /// Like every body edit, this invalidates any precomputed future: the
    /// timeline was computed from a past that no longer exists.
    pub fn set_body_mass(&mut self, body: usize, mass: f64) {
        if let Some(body) = self.live.bodies.get_mut(body) {
            body.set_mass(mass);
            self.invalidate_timeline();
        }
    }

    /// Overwrite one position component (0 = x, 1 = y, 2 = z)
    pub fn set_body_position_axis(&mut self, body: usize, axis: usize, value: f64) {
        if let Some(body) = self.live.bodies.get_mut(body) {
            body.set_position_axis(axis, value);
            self.invalidate_timeline();
        }
    }

    /// Overwrite one velocity component (0 = x, 1 = y, 2 = z)
    pub fn set_body_velocity_axis(&mut self, body: usize, axis: usize, value: f64) {
        if let Some(body) = self.live.bodies.get_mut(body) {
            body.set_velocity_axis(axis, value);
            self.invalidate_timeline();
        }
    }

    fn invalidate_timeline(&mut self) {
        if self.mode == Mode::Precompute {
            self.timeline.clear();
            self.playback_index = 0;
        }
    }

    /// Replace the live simulation from a scenario document
    ///
    /// The whole body list is swapped atomically; both history and timeline
    /// describe a past that no longer applies and are dropped.
    pub fn load_scenario(&mut self, text: &str) -> Result<(), ScenarioError> {
        self.live = from_json(text)?;
        self.history.clear();
        self.timeline.clear();
        self.playback_index = 0;
        Ok(())
    }

    /// Serialize the live simulation into a scenario document
    pub fn save_scenario(&self) -> Result<String, ScenarioError> {
        to_json(&self.live)
    }
}
