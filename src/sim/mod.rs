//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Time arrives as an argument, never read from a clock
//! - No rendering, audio or storage dependencies

pub mod collision;
pub mod entity;
pub mod obstacle;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{PassResult, credit_passed, entity_hits_obstacle, first_hit};
pub use entity::{Entity, Motion};
pub use obstacle::{Obstacle, ObstacleGenerator};
pub use snapshot::{EntityView, NotificationView, ObstacleView, Snapshot};
pub use state::{BONUS_LIFE_TEXT, Cue, GameEvent, GameMode, GameState, Notification};
pub use tick::{TickInput, check_pause_end, handle_collision, start_game, tick};
