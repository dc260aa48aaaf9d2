//! JS bridge
//!
//! Exposes the frame driver to a page-side renderer: forward input events,
//! call `frame()` once per animation frame and draw the returned JSON.

use wasm_bindgen::prelude::*;

use crate::Playfield;
use crate::audio::{CueBackend, CuePlayer, SilentBackend, WebAudioBackend};
use crate::game::Game;
use crate::persistence::{KeyValueStore, LocalStorageStore};
use crate::platform::{InputEvent, SystemClock};
use crate::settings::Settings;
use crate::tuning::Tuning;

#[wasm_bindgen]
pub struct WebGame {
    game: Game<SystemClock>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebGame {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Gapwing starting...");

        let store = LocalStorageStore::new();
        let settings = Settings::load(&store as &dyn KeyValueStore);
        let backend: Box<dyn CueBackend> = match WebAudioBackend::new() {
            Some(backend) => Box::new(backend),
            None => Box::new(SilentBackend),
        };
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;

        WebGame {
            game: Game::new(
                SystemClock::new(),
                Box::new(store),
                CuePlayer::new(backend, settings),
                Tuning::default(),
                Playfield::new(width, height),
                seed,
            ),
        }
    }

    /// Mouse click or touch at canvas coordinates
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.game.handle_input(InputEvent::PointerDown { x, y });
    }

    /// `KeyboardEvent.code` of a pressed key
    pub fn key_down(&mut self, code: &str) {
        if let Some(event) = InputEvent::from_key(code) {
            self.game.handle_input(event);
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        // Already logged by the driver; the page keeps the new size regardless
        let _ = self.game.resize(width, height);
    }

    pub fn set_muted(&mut self, muted: bool) {
        let mut settings = self.game.audio().settings().clone();
        settings.muted = muted;
        settings.save(self.game.store_mut());
        self.game.audio_mut().set_settings(settings);
    }

    /// Advance to now and return the frame as JSON
    pub fn frame(&mut self) -> String {
        let snapshot = self.game.frame();
        serde_json::to_string(&snapshot).unwrap_or_default()
    }
}
