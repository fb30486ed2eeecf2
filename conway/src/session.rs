// session.rs - Play/pause driver around the simulation engine
//
// Every command goes through `&mut self`, so a session serializes advances
// and edits by construction. Front ends own one session and feed it clock
// readings and user input.

use std::time::Instant;

use tracing::{debug, info};

use crate::autostop::{AutoStop, StopReason};
use crate::engine::SimulationEngine;
use crate::error::{GridError, SessionError};
use crate::patterns::{self, Pattern};
use crate::settings::{CellSize, Settings, Speed};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    Play,
    #[default]
    Pause,
}

#[derive(Debug, Clone)]
pub struct Session {
    engine: SimulationEngine,
    settings: Settings,
    status: Status,
    auto_stop: AutoStop,
    last_update: Option<Instant>,
    seeded: bool,
    stopped_by: Option<StopReason>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            engine: SimulationEngine::new(),
            settings,
            status: Status::Pause,
            auto_stop: AutoStop::with_history(settings.history),
            last_update: None,
            seeded: false,
            stopped_by: None,
        }
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == Status::Play
    }

    /// Why playback last stopped on its own, cleared by the next `play`.
    pub fn stopped_by(&self) -> Option<StopReason> {
        self.stopped_by
    }

    /// Starts auto-advance. An empty grid pauses again straight away.
    pub fn play(&mut self, now: Instant) -> Option<StopReason> {
        self.status = Status::Play;
        self.last_update = Some(now);
        self.stopped_by = None;
        if self.engine.live_cells().is_empty() {
            return self.halt(StopReason::Extinct);
        }
        None
    }

    pub fn pause(&mut self) {
        self.status = Status::Pause;
    }

    pub fn toggle_play(&mut self, now: Instant) -> Option<StopReason> {
        match self.status {
            Status::Play => {
                self.pause();
                None
            }
            Status::Pause => self.play(now),
        }
    }

    /// Advances once if a full interval has elapsed since the last update.
    pub fn tick(&mut self, now: Instant) -> Option<StopReason> {
        if !self.is_playing() {
            return None;
        }
        let due = self
            .last_update
            .is_none_or(|last| now.saturating_duration_since(last) >= self.settings.speed.interval());
        if !due {
            return None;
        }
        self.last_update = Some(now);
        self.advance()
    }

    /// Advances one generation while playing and applies the auto-stop check.
    pub fn advance(&mut self) -> Option<StopReason> {
        if !self.is_playing() {
            return None;
        }
        self.engine.advance();
        let reason = self.auto_stop.observe(self.engine.generation(), self.engine.live_cells())?;
        self.halt(reason)
    }

    fn halt(&mut self, reason: StopReason) -> Option<StopReason> {
        info!(generation = self.engine.generation(), %reason, "auto-stop");
        self.status = Status::Pause;
        self.stopped_by = Some(reason);
        Some(reason)
    }

    /// Pauses, then empties the grid.
    pub fn clear(&mut self) {
        self.pause();
        self.engine.clear();
        self.auto_stop.reset();
    }

    /// Pauses, then resizes. The first size that can hold a seed pattern gets one.
    pub fn resize(&mut self, width: i64, height: i64) -> Result<(), GridError> {
        self.pause();
        self.engine.resize(width, height)?;
        self.auto_stop.reset();
        self.seed_once()
    }

    /// Resizes to fit a viewport of the given pixel extent. Returns whether the size changed.
    pub fn fit_viewport(&mut self, width_px: f32, height_px: f32) -> Result<bool, GridError> {
        let cell = self.settings.cell_size;
        let (width, height) = (cell.cells_along(width_px), cell.cells_along(height_px));
        let current = self.engine.size();
        if (i64::from(current.width), i64::from(current.height)) == (width, height) {
            return Ok(false);
        }
        self.resize(width, height)?;
        Ok(true)
    }

    fn seed_once(&mut self) -> Result<(), GridError> {
        if self.seeded {
            return Ok(());
        }
        if let Some(seed) = patterns::initial_seed(self.engine.size()) {
            debug!(pattern = seed.name, "seeding initial pattern");
            self.engine.place(seed)?;
            self.seeded = true;
        }
        Ok(())
    }

    /// Pauses, then centers `pattern` on the grid.
    pub fn load_pattern(&mut self, pattern: &Pattern) -> Result<(), GridError> {
        self.pause();
        self.engine.place(pattern)?;
        self.auto_stop.reset();
        Ok(())
    }

    /// Pauses, then fills about a third of the grid from `seed`.
    pub fn randomize(&mut self, seed: u64) -> Result<(), GridError> {
        self.pause();
        let size = self.engine.size();
        let cells = patterns::random_cells(size, seed);
        self.engine.place_pattern(i64::from(size.width), i64::from(size.height), &cells)?;
        self.auto_stop.reset();
        Ok(())
    }

    /// Flips a cell: dead cells are set live, live cells are set dead.
    pub fn toggle_cell(&mut self, x: i64, y: i64) -> Result<bool, GridError> {
        self.engine.toggle(x, y)
    }

    pub fn set_speed(&mut self, speed: Speed) -> Result<(), SessionError> {
        self.ensure_paused()?;
        self.settings.speed = speed;
        Ok(())
    }

    /// Changing the cell size does not resize by itself; the next `fit_viewport` does.
    pub fn set_cell_size(&mut self, cell_size: CellSize) -> Result<(), SessionError> {
        self.ensure_paused()?;
        self.settings.cell_size = cell_size;
        Ok(())
    }

    fn ensure_paused(&self) -> Result<(), SessionError> {
        match self.status {
            Status::Play => Err(SessionError::Playing),
            Status::Pause => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_fitting_resize_seeds_once() {
        let mut session = Session::default();
        session.resize(4, 4).unwrap();
        assert!(session.engine().live_cells().is_empty());

        session.resize(20, 12).unwrap();
        assert_eq!(session.engine().live_cells().len(), patterns::DESKTOP.cells.len());

        session.resize(30, 30).unwrap();
        assert!(session.engine().live_cells().is_empty());
    }

    #[test]
    fn playing_an_empty_grid_stops_immediately() {
        let mut session = Session::default();
        session.resize(5, 5).unwrap();
        assert_eq!(session.play(Instant::now()), Some(StopReason::Extinct));
        assert_eq!(session.status(), Status::Pause);
    }

    #[test]
    fn settings_are_locked_while_playing() {
        let mut session = Session::default();
        session.resize(10, 10).unwrap();
        session.play(Instant::now());
        assert!(session.is_playing());
        assert_eq!(session.set_speed(Speed::new(3).unwrap()), Err(SessionError::Playing));
        session.pause();
        session.set_speed(Speed::new(3).unwrap()).unwrap();
        assert_eq!(session.settings().speed.per_second(), 3);
    }

    #[test]
    fn tick_waits_for_the_interval() {
        let mut session = Session::default();
        session.resize(8, 8).unwrap();
        let start = Instant::now();
        session.play(start);

        assert_eq!(session.tick(start + Duration::from_millis(500)), None);
        assert_eq!(session.engine().generation(), 0);

        session.tick(start + Duration::from_secs(1));
        assert_eq!(session.engine().generation(), 1);
    }

    #[test]
    fn toggle_play_flips_status() {
        let mut session = Session::default();
        session.resize(16, 9).unwrap();
        assert_eq!(session.toggle_play(Instant::now()), None);
        assert!(session.is_playing());
        session.toggle_play(Instant::now());
        assert_eq!(session.status(), Status::Pause);
    }

    #[test]
    fn fit_viewport_only_resizes_on_change() {
        let mut session = Session::default();
        assert!(session.fit_viewport(250.0, 250.0).unwrap());
        assert_eq!(session.engine().size(), crate::Size::new(9, 9));
        assert!(!session.fit_viewport(260.0, 270.0).unwrap());
    }
}
