//! Gap obstacles and their generator
//!
//! Obstacles enter at the right edge on a wall-clock cadence and scroll left.
//! Gap height shrinks with score; gap placement is drawn from the seeded RNG.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::Playfield;
use crate::tuning::Tuning;

/// A pair of segments with an opening between them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Top edge of the gap (height of the top segment)
    pub gap_top: f32,
    pub gap_height: f32,
    pub speed: f32,
    /// Entity has already been credited for passing this obstacle
    pub scored: bool,
}

impl Obstacle {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_height
    }

    /// Scroll one tick. Returns true once fully off the left edge.
    pub fn advance(&mut self) -> bool {
        self.x -= self.speed;
        self.is_offscreen()
    }

    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }
}

/// Owns the active obstacles, the spawn timer and the placement RNG
#[derive(Debug, Clone)]
pub struct ObstacleGenerator {
    obstacles: Vec<Obstacle>,
    rng: Pcg32,
    /// Wall-clock time of the last spawn (or timer rebase)
    last_spawn_ms: u64,
    /// Current cadence
    interval_ms: u64,
    next_id: u32,
}

impl ObstacleGenerator {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            obstacles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            last_spawn_ms: 0,
            interval_ms: tuning.spawn_interval_ms,
            next_id: 1,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn obstacles_mut(&mut self) -> &mut [Obstacle] {
        &mut self.obstacles
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Change the cadence from the next spawn on
    pub fn set_interval(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms.max(1);
    }

    pub fn last_spawn_ms(&self) -> u64 {
        self.last_spawn_ms
    }

    /// Restart the cadence from `now_ms`
    pub fn rebase_timer(&mut self, now_ms: u64) {
        self.last_spawn_ms = now_ms;
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Spawn if the interval has elapsed. Returns the new obstacle's id.
    pub fn maybe_spawn(
        &mut self,
        now_ms: u64,
        score: u64,
        tuning: &Tuning,
        field: Playfield,
    ) -> Option<u32> {
        if now_ms.saturating_sub(self.last_spawn_ms) <= self.interval_ms {
            return None;
        }
        self.last_spawn_ms = now_ms;
        Some(self.spawn(score, tuning, field))
    }

    /// Construct an obstacle at the right edge for the given score
    pub fn spawn(&mut self, score: u64, tuning: &Tuning, field: Playfield) -> u32 {
        let gap_height = tuning.gap_for_score(score);
        let lo = tuning.gap_margin_top;
        let hi = field.height - gap_height - tuning.gap_margin_bottom;
        // A playfield too short for the margins gets the top margin only
        let gap_top = if hi > lo {
            self.rng.random_range(lo..=hi)
        } else {
            lo
        };

        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            x: field.width,
            width: tuning.obstacle_width,
            gap_top,
            gap_height,
            speed: tuning.obstacle_speed,
            scored: false,
        });
        log::debug!("Spawned obstacle {id}: gap {gap_height} at {gap_top:.1}");
        id
    }

    /// Scroll every obstacle and drop those that left the playfield.
    /// Returns how many were retired.
    pub fn advance(&mut self) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain_mut(|o| !o.advance());
        before - self.obstacles.len()
    }

    /// Remove obstacles inside `[x - behind, x + ahead]`.
    ///
    /// An obstacle survives only if its left edge is beyond `ahead` or its
    /// right edge is already behind `behind`. Returns how many were removed.
    pub fn clear_safe_zone(&mut self, x: f32, ahead: f32, behind: f32) -> usize {
        let before = self.obstacles.len();
        self.obstacles
            .retain(|o| o.x > x + ahead || o.right() < x - behind);
        before - self.obstacles.len()
    }

    /// Reset for a new session. The slower restart cadence holds for the
    /// whole session.
    pub fn restart(&mut self, now_ms: u64, tuning: &Tuning) {
        self.obstacles.clear();
        self.interval_ms = tuning.restart_spawn_interval_ms;
        self.last_spawn_ms = now_ms;
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }
}
