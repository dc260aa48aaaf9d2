//! Raw input and on-screen buttons
//!
//! Pointer presses and the jump key both mean "flap" while playing. In the
//! menu and on the game-over panel a pointer press activates the button
//! under it instead.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Playfield;
use crate::sim::GameMode;

/// Raw input from the platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse click or touch, in playfield pixels
    PointerDown { x: f32, y: f32 },
    /// Space bar (or equivalent)
    JumpKey,
}

impl InputEvent {
    /// Map a DOM `KeyboardEvent.code` / key name to an event
    pub fn from_key(code: &str) -> Option<Self> {
        match code {
            "Space" | " " | "Spacebar" => Some(InputEvent::JumpKey),
            _ => None,
        }
    }
}

/// Axis-aligned rectangle given by its center and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Strictly inside; the border does not count
    pub fn contains(&self, point: Vec2) -> bool {
        let half = self.size / 2.0;
        point.x > self.center.x - half.x
            && point.x < self.center.x + half.x
            && point.y > self.center.y - half.y
            && point.y < self.center.y + half.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    Start,
    Restart,
}

/// Button placement for a playfield size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UiLayout {
    pub start: Rect,
    pub restart: Rect,
}

/// Height of the game-over panel the restart button sits in
const PANEL_HEIGHT: f32 = 400.0;
/// Restart button offset from the panel's top edge
const RESTART_OFFSET: f32 = 280.0;

impl UiLayout {
    pub fn for_field(field: Playfield) -> Self {
        let cx = field.width / 2.0;
        let panel_top = field.height / 2.0 - PANEL_HEIGHT / 2.0;
        Self {
            start: Rect::new(Vec2::new(cx, field.height * 0.5), Vec2::new(250.0, 70.0)),
            restart: Rect::new(
                Vec2::new(cx, panel_top + RESTART_OFFSET),
                Vec2::new(220.0, 60.0),
            ),
        }
    }

    /// Button visible in `mode`, if the mode shows one
    pub fn button_for(&self, mode: GameMode) -> Option<(Button, Rect)> {
        match mode {
            GameMode::Menu => Some((Button::Start, self.start)),
            GameMode::GameOver => Some((Button::Restart, self.restart)),
            GameMode::Playing | GameMode::PauseAfterDeath => None,
        }
    }

    /// Button under the pointer in `mode`
    pub fn hit(&self, mode: GameMode, point: Vec2) -> Option<Button> {
        self.button_for(mode)
            .filter(|(_, rect)| rect.contains(point))
            .map(|(button, _)| button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_is_strict() {
        let rect = Rect::new(Vec2::new(100.0, 100.0), Vec2::new(20.0, 10.0));
        assert!(rect.contains(Vec2::new(100.0, 100.0)));
        assert!(rect.contains(Vec2::new(109.9, 104.9)));
        assert!(!rect.contains(Vec2::new(110.0, 100.0)));
        assert!(!rect.contains(Vec2::new(100.0, 95.0)));
    }

    #[test]
    fn test_layout_positions() {
        let layout = UiLayout::for_field(Playfield::new(800.0, 600.0));
        assert_eq!(layout.start.center, Vec2::new(400.0, 300.0));
        assert_eq!(layout.restart.center, Vec2::new(400.0, 380.0));
    }

    #[test]
    fn test_hit_depends_on_mode() {
        let layout = UiLayout::for_field(Playfield::new(800.0, 600.0));
        let on_start = Vec2::new(400.0, 300.0);
        let on_restart = Vec2::new(400.0, 380.0);
        assert_eq!(layout.hit(GameMode::Menu, on_start), Some(Button::Start));
        assert_eq!(layout.hit(GameMode::Menu, on_restart), None);
        assert_eq!(layout.hit(GameMode::GameOver, on_restart), Some(Button::Restart));
        assert_eq!(layout.hit(GameMode::Playing, on_start), None);
        assert_eq!(layout.hit(GameMode::PauseAfterDeath, on_restart), None);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(InputEvent::from_key("Space"), Some(InputEvent::JumpKey));
        assert_eq!(InputEvent::from_key("KeyA"), None);
    }
}
