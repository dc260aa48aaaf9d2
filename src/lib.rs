//! Gapwing - A side-scrolling gap-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, scoring, game modes)
//! - `game`: Frame driver wiring the clock, input, audio and storage to `sim`
//! - `platform`: Browser/native platform abstraction (time, input, web bridge)
//! - `persistence`: Key/value storage backends
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate. Tuning values are expressed per tick at this rate.
    pub const SIM_HZ: u32 = 60;
    /// Length of one simulation tick in milliseconds
    pub const SIM_DT_MS: f64 = 1000.0 / SIM_HZ as f64;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default playfield dimensions
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Visual tilt applied per unit of vertical velocity
    pub const ROTATION_PER_VELOCITY: f32 = 0.05;
}

/// Playfield dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(consts::DEFAULT_WIDTH, consts::DEFAULT_HEIGHT)
    }
}
