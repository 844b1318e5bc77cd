//! Practice game progression, scoring and timer.

use std::time::{Duration, Instant};

use super::levels::{Level, default_levels};
use crate::board::PenState;
use crate::bus::{Envelope, Event};
use crate::config::Config;
use crate::input::{InteractionState, Outcome, SurfaceSettings};

/// Progress of the level being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelStatus {
    InProgress,
    /// Target covered; `score` was added to the running total
    Passed { score: u32 },
    /// Timer expired before the target was covered
    TimedOut,
}

/// Tutorial surface: an [`InteractionState`] on the current level's board
/// plus move counting, accuracy and scoring.
///
/// Only movement, mode and pen events reach the board; the practice game
/// has no menu.
pub struct TutorialSession {
    config: Config,
    levels: Vec<Level>,
    current: usize,
    surface: InteractionState,
    moves: u32,
    started_at: Instant,
    time_limit: Duration,
    threshold: f64,
    status: LevelStatus,
    score: u32,
    finished: bool,
}

impl TutorialSession {
    pub fn new(config: &Config, now: Instant) -> Self {
        Self::with_levels(config, default_levels(), now)
    }

    pub fn with_levels(config: &Config, levels: Vec<Level>, now: Instant) -> Self {
        let surface = InteractionState::new(Self::settings_for(config, levels.first()));
        Self {
            config: config.clone(),
            finished: levels.is_empty(),
            levels,
            current: 0,
            surface,
            moves: 0,
            started_at: now,
            time_limit: Duration::from_secs(config.tutorial.time_limit_secs),
            threshold: config.tutorial.completion_threshold,
            status: LevelStatus::InProgress,
            score: 0,
        }
    }

    fn settings_for(config: &Config, level: Option<&Level>) -> SurfaceSettings {
        let (columns, rows) = level.map_or((1, 1), |l| (l.columns(), l.rows()));
        SurfaceSettings::practice(columns, rows, config)
    }

    /// Applies a bus event to the practice board.
    pub fn handle(&mut self, envelope: &Envelope) -> Outcome {
        if self.finished {
            return Outcome::Ignored;
        }
        let now = envelope.received_at;
        self.tick(now);

        let outcome = match envelope.event {
            Event::Movement(_) if self.status != LevelStatus::InProgress => {
                log::debug!("Level complete; ignoring movement");
                Outcome::Ignored
            }
            Event::Movement(_) | Event::Mode(_) | Event::Pen(_) => self.surface.handle(envelope),
            _ => Outcome::Ignored,
        };

        match outcome {
            Outcome::Moved { .. } => {
                self.moves += 1;
                self.evaluate(now);
            }
            // A valid step against the edge still costs a move
            Outcome::Blocked(_) => self.moves += 1,
            _ => {}
        }
        outcome
    }

    /// Expires the level timer if the limit has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.status == LevelStatus::InProgress && self.time_left(now).is_zero() {
            log::info!("Time is up on {}", self.level_title());
            self.surface.log_mut().push("Time is up");
            self.status = LevelStatus::TimedOut;
        }
    }

    fn evaluate(&mut self, now: Instant) {
        if self.status != LevelStatus::InProgress {
            return;
        }
        if self.accuracy() >= self.threshold {
            let bonus = (self.time_left(now).as_secs() / 10) as i64;
            let score = (100 - self.moves as i64 + bonus).max(0) as u32;
            self.score += score;
            self.status = LevelStatus::Passed { score };
            self.surface
                .log_mut()
                .push(format!("Level complete! +{score} points"));
        }
    }

    /// Advances to the next level, or finishes the tutorial after the last.
    pub fn next_level(&mut self, now: Instant) {
        if self.current + 1 < self.levels.len() {
            self.current += 1;
            self.load_level(now);
        } else {
            log::info!("Tutorial finished with score {}", self.score);
            self.finished = true;
        }
    }

    /// Restarts the current level with a blank board and a full timer.
    pub fn reset_level(&mut self, now: Instant) {
        if !self.finished {
            self.load_level(now);
        }
    }

    /// Leaves the tutorial immediately.
    pub fn skip(&mut self) {
        self.finished = true;
    }

    /// Starts over from the first level.
    pub fn restart(&mut self, now: Instant) {
        self.current = 0;
        self.score = 0;
        self.finished = self.levels.is_empty();
        self.load_level(now);
    }

    fn load_level(&mut self, now: Instant) {
        let settings = Self::settings_for(&self.config, self.levels.get(self.current));
        self.surface.reset(settings);
        self.moves = 0;
        self.started_at = now;
        self.status = LevelStatus::InProgress;
        log::info!("Starting {}", self.level_title());
    }

    pub fn accuracy(&self) -> f64 {
        self.level()
            .map_or(0.0, |level| level.accuracy(self.surface.board()))
    }

    pub fn time_left(&self, now: Instant) -> Duration {
        self.time_limit
            .saturating_sub(now.saturating_duration_since(self.started_at))
    }

    pub fn level(&self) -> Option<&Level> {
        self.levels.get(self.current)
    }

    pub fn level_index(&self) -> usize {
        self.current
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    fn level_title(&self) -> &'static str {
        self.level().map_or("tutorial", |level| level.title)
    }

    pub fn surface(&self) -> &InteractionState {
        &self.surface
    }

    pub fn pen(&self) -> PenState {
        self.surface.pen()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn status(&self) -> LevelStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
