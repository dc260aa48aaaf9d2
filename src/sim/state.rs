//! Game session state and core simulation types
//!
//! One `GameState` is the whole session context: mode, bookkeeping, entity
//! and obstacles. Only the functions in `tick` change `mode`, `lives` and
//! pause timing.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::obstacle::ObstacleGenerator;
use crate::Playfield;
use crate::tuning::Tuning;

/// Top-level game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen, waiting for the start button
    Menu,
    /// Active gameplay
    Playing,
    /// Grace period after losing a life
    PauseAfterDeath,
    /// Run ended, waiting for the restart button
    GameOver,
}

/// Sound cue requested by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    Wing,
    Point,
    Death,
    RetryDeath,
}

/// Things that happened during a tick, drained by the frame driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Flap,
    ObstacleSpawned { id: u32 },
    Scored { score: u64 },
    BonusLife { lives: u8 },
    LifeLost { lives: u8 },
    Resumed,
    GameOver { score: u64 },
    /// Score beat the stored best; the driver persists it
    NewHighScore { score: u64 },
}

impl GameEvent {
    /// Audio cue for this event, if any
    pub fn cue(&self) -> Option<Cue> {
        match self {
            GameEvent::Flap => Some(Cue::Wing),
            GameEvent::Scored { .. } => Some(Cue::Point),
            GameEvent::LifeLost { .. } => Some(Cue::RetryDeath),
            GameEvent::GameOver { .. } => Some(Cue::Death),
            _ => None,
        }
    }
}

/// Transient on-screen message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub text: String,
    pub shown_at_ms: u64,
}

impl Notification {
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.shown_at_ms)
    }

    pub fn is_active(&self, now_ms: u64, duration_ms: u64) -> bool {
        self.age_ms(now_ms) < duration_ms
    }
}

/// Text shown when a bonus life is earned
pub const BONUS_LIFE_TEXT: &str = "+1 LIFE!";

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub field: Playfield,
    pub mode: GameMode,
    /// Obstacles passed this session
    pub score: u64,
    /// Best score across sessions
    pub high_score: u64,
    pub lives: u8,
    /// Passed-obstacle counter driving bonus lives
    pub obstacles_passed: u32,
    pub entity: Entity,
    pub obstacles: ObstacleGenerator,
    pub notification: Option<Notification>,
    pub pause_started_ms: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Process-start state: menu, full lives, no obstacles
    pub fn new(seed: u64, tuning: Tuning, field: Playfield, high_score: u64) -> Self {
        Self {
            entity: Entity::new(&tuning, field),
            obstacles: ObstacleGenerator::new(seed, &tuning),
            lives: tuning.initial_lives,
            tuning,
            field,
            mode: GameMode::Menu,
            score: 0,
            high_score,
            obstacles_passed: 0,
            notification: None,
            pause_started_ms: 0,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Notification still on screen at `now_ms`
    pub fn active_notification(&self, now_ms: u64) -> Option<&Notification> {
        self.notification
            .as_ref()
            .filter(|n| n.is_active(now_ms, self.tuning.notification_duration_ms))
    }

    /// Remaining grace time, only while paused after a death
    pub fn pause_remaining_ms(&self, now_ms: u64) -> Option<u64> {
        match self.mode {
            GameMode::PauseAfterDeath => Some(
                self.tuning
                    .pause_duration_ms
                    .saturating_sub(now_ms.saturating_sub(self.pause_started_ms)),
            ),
            _ => None,
        }
    }

    /// Adopt new playfield dimensions
    pub fn resize(&mut self, field: Playfield) {
        self.field = field;
        self.entity.relayout(&self.tuning, field);
    }
}
