//! Read-only view of a tick for renderers
//!
//! Everything a frontend needs to draw one frame, detached from the live
//! state so it can be serialized and sent across the web bridge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GameMode, GameState};
use crate::Playfield;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub pos: Vec2,
    pub size: f32,
    pub velocity: f32,
    /// Tilt in radians, nose down when falling
    pub rotation: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub x: f32,
    pub width: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationView {
    pub text: String,
    /// 1.0 when shown, fading linearly to 0.0 at expiry
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub field: Playfield,
    pub mode: GameMode,
    pub score: u64,
    pub high_score: u64,
    pub lives: u8,
    pub entity: EntityView,
    pub obstacles: Vec<ObstacleView>,
    /// Milliseconds left in the grace period
    pub pause_remaining_ms: Option<u64>,
    /// Whole seconds left in the grace period, rounded up for display
    pub pause_countdown: Option<u64>,
    pub notification: Option<NotificationView>,
}

impl Snapshot {
    pub fn capture(state: &GameState, now_ms: u64) -> Self {
        let entity = &state.entity;
        let pause_remaining_ms = state.pause_remaining_ms(now_ms);
        let duration = state.tuning.notification_duration_ms.max(1);

        Self {
            field: state.field,
            mode: state.mode,
            score: state.score,
            high_score: state.high_score,
            lives: state.lives,
            entity: EntityView {
                pos: entity.pos,
                size: entity.size,
                velocity: entity.velocity,
                rotation: entity.rotation(),
            },
            obstacles: state
                .obstacles
                .obstacles()
                .iter()
                .map(|o| ObstacleView {
                    x: o.x,
                    width: o.width,
                    gap_top: o.gap_top,
                    gap_bottom: o.gap_bottom(),
                })
                .collect(),
            pause_remaining_ms,
            pause_countdown: pause_remaining_ms.map(|ms| ms.div_ceil(1000)),
            notification: state.active_notification(now_ms).map(|n| NotificationView {
                text: n.text.clone(),
                opacity: 1.0 - n.age_ms(now_ms) as f32 / duration as f32,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Notification;
    use crate::sim::tick::{handle_collision, start_game};
    use crate::tuning::Tuning;

    #[test]
    fn test_capture_playing() {
        let mut state = GameState::new(3, Tuning::default(), Playfield::default(), 4);
        start_game(&mut state, 0);
        state.entity.velocity = 2.0;
        let snap = Snapshot::capture(&state, 100);
        assert_eq!(snap.mode, GameMode::Playing);
        assert_eq!(snap.high_score, 4);
        assert_eq!(snap.lives, 2);
        assert!((snap.entity.rotation - 0.1).abs() < 1e-6);
        assert!(snap.pause_remaining_ms.is_none());
        assert!(snap.notification.is_none());
    }

    #[test]
    fn test_pause_countdown_rounds_up() {
        let mut state = GameState::new(3, Tuning::default(), Playfield::default(), 0);
        start_game(&mut state, 0);
        handle_collision(&mut state, 1_000);
        let snap = Snapshot::capture(&state, 1_500);
        assert_eq!(snap.pause_remaining_ms, Some(3_500));
        assert_eq!(snap.pause_countdown, Some(4));
        let snap = Snapshot::capture(&state, 4_000);
        assert_eq!(snap.pause_countdown, Some(1));
    }

    #[test]
    fn test_notification_fades() {
        let mut state = GameState::new(3, Tuning::default(), Playfield::default(), 0);
        state.notification = Some(Notification {
            text: "+1 LIFE!".to_string(),
            shown_at_ms: 0,
        });
        let snap = Snapshot::capture(&state, 1_000);
        let note = snap.notification.unwrap();
        assert!((note.opacity - 0.5).abs() < 1e-6);
        assert!(Snapshot::capture(&state, 2_000).notification.is_none());
    }

    #[test]
    fn test_serializes_to_json() {
        let state = GameState::new(3, Tuning::default(), Playfield::default(), 0);
        let json = serde_json::to_string(&Snapshot::capture(&state, 0)).unwrap();
        assert!(json.contains("\"mode\":\"Menu\""));
    }
}
