//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be retuned from JSON
//! without touching the simulation. Physics values are per simulation tick
//! (see [`crate::consts::SIM_HZ`]), timers are wall-clock milliseconds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Playfield;

/// Gameplay tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Entity ===
    /// Side length of the player's square hitbox
    pub entity_size: f32,
    /// Downward acceleration added to velocity every tick
    pub gravity: f32,
    /// Velocity set by an impulse (negative is up)
    pub impulse_velocity: f32,
    /// Horizontal position of the entity as a fraction of playfield width
    pub entity_x_ratio: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    /// Leftward movement per tick
    pub obstacle_speed: f32,
    /// Gap height at score 0
    pub base_gap: f32,
    /// Smallest gap difficulty scaling can produce
    pub min_gap: f32,
    /// Gap shrink applied per completed difficulty step
    pub gap_shrink_step: f32,
    /// Points per difficulty step
    pub gap_shrink_every: u64,
    /// Minimum height of the top segment
    pub gap_margin_top: f32,
    /// Minimum height of the bottom segment
    pub gap_margin_bottom: f32,
    /// Steady-state spawn cadence
    pub spawn_interval_ms: u64,
    /// Spawn cadence right after a (re)start, until the first spawn
    pub restart_spawn_interval_ms: u64,

    // === Lives ===
    pub initial_lives: u8,
    /// Passed obstacles per bonus life
    pub bonus_life_every: u32,

    // === Timers ===
    /// Grace period after a non-fatal collision
    pub pause_duration_ms: u64,
    /// Bonus life message display time
    pub notification_duration_ms: u64,

    // === Safe zone ===
    /// Cleared distance ahead of the entity, as a fraction of playfield width
    pub safe_zone_ahead_ratio: f32,
    /// Cleared distance behind the entity, in pixels
    pub safe_zone_behind: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            entity_size: 40.0,
            gravity: 0.4,
            impulse_velocity: -8.0,
            entity_x_ratio: 0.2,

            obstacle_width: 80.0,
            obstacle_speed: 4.0,
            base_gap: 150.0,
            min_gap: 100.0,
            gap_shrink_step: 5.0,
            gap_shrink_every: 10,
            gap_margin_top: 50.0,
            gap_margin_bottom: 50.0,
            spawn_interval_ms: 1500,
            restart_spawn_interval_ms: 1800,

            initial_lives: 2,
            bonus_life_every: 10,

            pause_duration_ms: 4000,
            notification_duration_ms: 2000,

            safe_zone_ahead_ratio: 0.4,
            safe_zone_behind: 50.0,
        }
    }
}

/// Why a tuning file was rejected
#[derive(Debug)]
pub enum TuningError {
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning parse error: {e}"),
            TuningError::Invalid(reason) => write!(f, "invalid tuning: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// Parse and validate a tuning document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.entity_size <= 0.0 {
            return Err(TuningError::Invalid("entity_size must be positive"));
        }
        if self.obstacle_width <= 0.0 {
            return Err(TuningError::Invalid("obstacle_width must be positive"));
        }
        if self.obstacle_speed <= 0.0 {
            return Err(TuningError::Invalid("obstacle_speed must be positive"));
        }
        if self.min_gap <= 0.0 {
            return Err(TuningError::Invalid("min_gap must be positive"));
        }
        if self.min_gap > self.base_gap {
            return Err(TuningError::Invalid("min_gap exceeds base_gap"));
        }
        if self.gap_shrink_step < 0.0 {
            return Err(TuningError::Invalid("gap_shrink_step must not be negative"));
        }
        if self.gap_shrink_every == 0 {
            return Err(TuningError::Invalid("gap_shrink_every must be at least 1"));
        }
        if self.bonus_life_every == 0 {
            return Err(TuningError::Invalid("bonus_life_every must be at least 1"));
        }
        if self.spawn_interval_ms == 0 || self.restart_spawn_interval_ms == 0 {
            return Err(TuningError::Invalid("spawn intervals must be non-zero"));
        }
        Ok(())
    }

    /// Check that a playfield can hold the widest gap with both margins
    pub fn fits(&self, field: Playfield) -> Result<(), TuningError> {
        if field.height < self.base_gap + self.gap_margin_top + self.gap_margin_bottom {
            return Err(TuningError::Invalid("playfield too short for base_gap and margins"));
        }
        if field.height < self.entity_size {
            return Err(TuningError::Invalid("playfield shorter than entity"));
        }
        Ok(())
    }

    /// Gap height for an obstacle spawned at `score`
    pub fn gap_for_score(&self, score: u64) -> f32 {
        let steps = score / self.gap_shrink_every.max(1);
        (self.base_gap - steps as f32 * self.gap_shrink_step).max(self.min_gap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert!(tuning.fits(Playfield::default()).is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.5, "initial_lives": 3 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.initial_lives, 3);
        assert_eq!(tuning.obstacle_width, 80.0);
    }

    #[test]
    fn test_rejects_bad_json_and_values() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "min_gap": 200.0, "base_gap": 150.0 }"#),
            Err(TuningError::Invalid(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "gap_shrink_every": 0 }"#),
            Err(TuningError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_stalled_or_reversed_obstacles() {
        for speed in ["0.0", "-4.0"] {
            let json = format!(r#"{{ "obstacle_speed": {speed} }}"#);
            assert!(matches!(
                Tuning::from_json(&json),
                Err(TuningError::Invalid("obstacle_speed must be positive"))
            ));
        }
        assert!(Tuning::from_json(r#"{ "obstacle_speed": 0.5 }"#).is_ok());
    }

    #[test]
    fn test_fits_rejects_short_playfield() {
        let tuning = Tuning::default();
        assert!(tuning.fits(Playfield::new(800.0, 200.0)).is_err());
    }

    #[test]
    fn test_gap_at_score_23() {
        let tuning = Tuning {
            base_gap: 150.0,
            min_gap: 100.0,
            gap_shrink_step: 5.0,
            ..Default::default()
        };
        assert_eq!(tuning.gap_for_score(23), 140.0);
        assert_eq!(tuning.gap_for_score(9), 150.0);
        assert_eq!(tuning.gap_for_score(10_000), 100.0);
    }

    proptest! {
        #[test]
        fn gap_is_non_increasing_and_floored(a in 0u64..5_000, b in 0u64..5_000) {
            let tuning = Tuning::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(tuning.gap_for_score(hi) <= tuning.gap_for_score(lo));
            prop_assert!(tuning.gap_for_score(hi) >= tuning.min_gap);

            // Shrinks only in whole steps
            let shrink = tuning.base_gap - tuning.gap_for_score(lo);
            let steps = shrink / tuning.gap_shrink_step;
            prop_assert!((steps - steps.round()).abs() < 1e-4
                || tuning.gap_for_score(lo) == tuning.min_gap);
        }
    }
}
