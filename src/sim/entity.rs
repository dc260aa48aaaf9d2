//! The player-controlled entity
//!
//! Falls under gravity, kept aloft by impulses. Horizontal position is fixed;
//! the world scrolls past it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Playfield;
use crate::consts::ROTATION_PER_VELOCITY;
use crate::tuning::Tuning;

/// Result of advancing the entity one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Airborne,
    /// Hit the floor. Fatal.
    Grounded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Center position
    pub pos: Vec2,
    /// Vertical velocity (positive is down)
    pub velocity: f32,
    pub size: f32,
    pub gravity: f32,
    pub impulse_velocity: f32,
}

impl Entity {
    /// Fresh entity at its start position in the middle of the playfield
    pub fn new(tuning: &Tuning, field: Playfield) -> Self {
        Self {
            pos: Vec2::new(field.width * tuning.entity_x_ratio, field.height / 2.0),
            velocity: 0.0,
            size: tuning.entity_size,
            gravity: tuning.gravity,
            impulse_velocity: tuning.impulse_velocity,
        }
    }

    #[inline]
    pub fn half_size(&self) -> f32 {
        self.size / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.half_size()
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.half_size()
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.half_size()
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.half_size()
    }

    /// Visual tilt derived from velocity
    pub fn rotation(&self) -> f32 {
        self.velocity * ROTATION_PER_VELOCITY
    }

    /// Integrate one tick and clamp to the playfield.
    ///
    /// The ceiling stops the entity dead; the floor grounds it.
    pub fn advance(&mut self, field: Playfield) -> Motion {
        self.velocity += self.gravity;
        self.pos.y += self.velocity;

        let floor = field.height - self.half_size();
        let ceiling = self.half_size();

        if self.pos.y > floor {
            self.pos.y = floor;
            return Motion::Grounded;
        }
        if self.pos.y < ceiling {
            self.pos.y = ceiling;
            self.velocity = 0.0;
        }
        Motion::Airborne
    }

    /// Flap. Always resets velocity, no matter the current state.
    pub fn impulse(&mut self) {
        self.velocity = self.impulse_velocity;
    }

    /// Put the entity back mid-playfield at rest (after losing a life)
    pub fn reset(&mut self, field: Playfield) {
        self.pos.y = field.height / 2.0;
        self.velocity = 0.0;
    }

    /// Follow a playfield resize, keeping the same relative column
    pub fn relayout(&mut self, tuning: &Tuning, field: Playfield) {
        self.pos.x = field.width * tuning.entity_x_ratio;
        self.pos.y = self
            .pos
            .y
            .clamp(self.half_size(), (field.height - self.half_size()).max(self.half_size()));
    }
}
