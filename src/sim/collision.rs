//! Collision detection and pass scoring
//!
//! Axis-aligned checks between the entity's square hitbox and an obstacle's
//! two segments. The engine only reports; mode changes belong to `tick`.

use super::entity::Entity;
use super::obstacle::Obstacle;

/// True if the entity touches either segment of the obstacle.
///
/// Requires horizontal overlap, then the entity must stick out of the gap
/// above or below.
pub fn entity_hits_obstacle(entity: &Entity, obstacle: &Obstacle) -> bool {
    let overlaps_x = entity.right() > obstacle.x && entity.left() < obstacle.right();
    if !overlaps_x {
        return false;
    }
    entity.top() < obstacle.gap_top || entity.bottom() > obstacle.gap_bottom()
}

/// First obstacle the entity collides with, if any
pub fn first_hit<'a>(entity: &Entity, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    obstacles.iter().find(|o| entity_hits_obstacle(entity, o))
}

/// Outcome of crediting passed obstacles for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassResult {
    /// Obstacles newly passed this tick
    pub passed: u32,
    /// Bonus lives earned this tick
    pub bonus_lives: u32,
}

/// Mark every obstacle whose right edge is behind the entity as scored.
///
/// Each obstacle is credited at most once. `passed_total` is the running
/// passed-obstacle counter; every `bonus_every`-th pass earns a life.
pub fn credit_passed(
    entity_x: f32,
    obstacles: &mut [Obstacle],
    passed_total: &mut u32,
    bonus_every: u32,
) -> PassResult {
    let mut result = PassResult::default();
    for obstacle in obstacles.iter_mut().filter(|o| !o.scored) {
        if obstacle.right() < entity_x {
            obstacle.scored = true;
            *passed_total += 1;
            result.passed += 1;
            if bonus_every > 0 && (*passed_total).is_multiple_of(bonus_every) {
                result.bonus_lives += 1;
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Playfield;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn entity_at(y: f32) -> Entity {
        let mut e = Entity::new(&Tuning::default(), Playfield::new(800.0, 600.0));
        e.pos.y = y;
        e
    }

    fn obstacle(x: f32) -> Obstacle {
        Obstacle {
            id: 1,
            x,
            width: 80.0,
            gap_top: 200.0,
            gap_height: 150.0,
            speed: 4.0,
            scored: false,
        }
    }

    #[test]
    fn test_inside_gap_no_hit() {
        // Entity spans x 140..180, y 255..295, gap is 200..350
        let e = entity_at(275.0);
        assert!(!entity_hits_obstacle(&e, &obstacle(150.0)));
    }

    #[test]
    fn test_top_segment_hit() {
        let e = entity_at(215.0); // top at 195
        assert!(entity_hits_obstacle(&e, &obstacle(150.0)));
    }

    #[test]
    fn test_bottom_segment_hit() {
        let e = entity_at(335.0); // bottom at 355
        assert!(entity_hits_obstacle(&e, &obstacle(150.0)));
    }

    #[test]
    fn test_no_horizontal_overlap() {
        let e = entity_at(10.0);
        // Obstacle left edge exactly at entity right edge does not overlap
        assert!(!entity_hits_obstacle(&e, &obstacle(180.0)));
        // Obstacle right edge exactly at entity left edge does not overlap
        assert!(!entity_hits_obstacle(&e, &obstacle(60.0)));
        assert!(entity_hits_obstacle(&e, &obstacle(61.0)));
    }

    #[test]
    fn test_first_hit() {
        let e = entity_at(10.0);
        let obstacles = vec![obstacle(600.0), obstacle(150.0)];
        assert_eq!(first_hit(&e, &obstacles).map(|o| o.x), Some(150.0));
        assert!(first_hit(&e, &obstacles[..1]).is_none());
    }

    #[test]
    fn test_credit_once() {
        let mut obstacles = vec![obstacle(70.0)]; // right edge 150 < 160
        let mut passed = 0;
        let first = credit_passed(160.0, &mut obstacles, &mut passed, 10);
        assert_eq!(first.passed, 1);
        assert!(obstacles[0].scored);
        let second = credit_passed(160.0, &mut obstacles, &mut passed, 10);
        assert_eq!(second.passed, 0);
        assert_eq!(passed, 1);
    }

    #[test]
    fn test_not_credited_until_fully_past() {
        let mut obstacles = vec![obstacle(80.0)]; // right edge 160, not < 160
        let mut passed = 0;
        assert_eq!(credit_passed(160.0, &mut obstacles, &mut passed, 10).passed, 0);
        assert!(!obstacles[0].scored);
    }

    #[test]
    fn test_tenth_pass_earns_bonus() {
        let mut passed = 9;
        let mut obstacles = vec![obstacle(0.0)];
        let result = credit_passed(160.0, &mut obstacles, &mut passed, 10);
        assert_eq!(result, PassResult { passed: 1, bonus_lives: 1 });
        assert_eq!(passed, 10);
    }

    proptest! {
        #[test]
        fn bonus_every_tenth_only(count in 1u32..60) {
            let mut passed = 0;
            let mut bonuses = 0;
            for i in 1..=count {
                let mut obstacles = vec![obstacle(0.0)];
                let result = credit_passed(160.0, &mut obstacles, &mut passed, 10);
                prop_assert_eq!(result.passed, 1);
                prop_assert_eq!(result.bonus_lives, u32::from(i % 10 == 0));
                bonuses += result.bonus_lives;
            }
            prop_assert_eq!(passed, count);
            prop_assert_eq!(bonuses, count / 10);
        }

        #[test]
        fn scrolling_obstacle_scores_once(start_x in 100f32..800.0, ticks in 1usize..400) {
            let mut obstacles = vec![obstacle(start_x)];
            let mut passed = 0;
            let mut credited = 0;
            for _ in 0..ticks {
                obstacles[0].advance();
                credited += credit_passed(160.0, &mut obstacles, &mut passed, 10).passed;
                prop_assert!(credited <= 1);
            }
            let behind = obstacles[0].right() < 160.0;
            prop_assert_eq!(credited, u32::from(behind));
            prop_assert_eq!(obstacles[0].scored, behind);
            prop_assert_eq!(passed, credited);
        }
    }
}
