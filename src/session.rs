//! Level progression
//!
//! A [`Session`] owns the ordered levels of a campaign and the index of the
//! one being played. Death retries the current level; clearing it waits for
//! the host to call [`Session::advance`].

use crate::config::LevelDef;
use crate::error::ConfigError;
use crate::sim::{DeathCause, Level, LevelStatus, TickInput};

/// Outcome of one session step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Playing,
    /// Current level cleared; call [`Session::advance`] to move on
    Cleared,
    /// Player died; the level has already been reset for another attempt
    Died(DeathCause),
    /// Every level has been cleared
    Finished,
    /// Host asked to stop
    Quit,
}

#[derive(Debug, Clone)]
pub struct Session {
    levels: Vec<Level>,
    index: usize,
    finished: bool,
    /// Attempts that ended in death, across the whole session
    pub deaths: u32,
}

impl Session {
    pub fn new(defs: &[LevelDef]) -> Result<Self, ConfigError> {
        if defs.is_empty() {
            return Err(ConfigError::EmptyCampaign);
        }
        let levels = defs.iter().map(Level::new).collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "Session started with {} levels, first is {}",
            levels.len(),
            levels[0].id
        );
        Ok(Self {
            levels,
            index: 0,
            finished: false,
            deaths: 0,
        })
    }

    pub fn current(&self) -> &Level {
        &self.levels[self.index]
    }

    pub fn current_mut(&mut self) -> &mut Level {
        &mut self.levels[self.index]
    }

    /// Zero-based index of the level being played
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of levels in the campaign, never zero
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance the current level by one frame
    pub fn step(&mut self, input: &TickInput, dt: f32) -> Progress {
        if self.finished {
            return Progress::Finished;
        }
        if input.quit {
            log::info!("Quit requested in {}", self.current().id);
            return Progress::Quit;
        }

        let level = &mut self.levels[self.index];
        match level.update(input, dt) {
            LevelStatus::Playing => Progress::Playing,
            LevelStatus::Cleared => Progress::Cleared,
            LevelStatus::Dead(cause) => {
                self.deaths += 1;
                level.reset();
                Progress::Died(cause)
            }
        }
    }

    /// Move to the next level, or finish after the last one
    pub fn advance(&mut self) -> Progress {
        if self.finished {
            return Progress::Finished;
        }
        if self.index + 1 >= self.levels.len() {
            self.finished = true;
            log::info!(
                "Campaign finished: {} levels, {} deaths",
                self.levels.len(),
                self.deaths
            );
            return Progress::Finished;
        }
        self.index += 1;
        let level = &mut self.levels[self.index];
        level.reset();
        log::info!("Advanced to level {} ({})", self.index + 1, level.id);
        Progress::Playing
    }
}
