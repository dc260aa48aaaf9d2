//! Player preferences
//!
//! Persisted separately from the high score, as JSON under its own key.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;
use crate::sim::Cue;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Wing flap volume (0.0 - 1.0)
    pub wing_volume: f32,
    /// Point volume (0.0 - 1.0)
    pub point_volume: f32,
    /// Final death volume (0.0 - 1.0)
    pub death_volume: f32,
    /// Life-lost volume (0.0 - 1.0)
    pub retry_death_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            wing_volume: 0.5,
            point_volume: 0.5,
            death_volume: 0.7,
            retry_death_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "gapwing_settings";

    /// Effective playback volume for a cue (respects mute)
    pub fn cue_volume(&self, cue: Cue) -> f32 {
        if self.muted {
            return 0.0;
        }
        let cue_volume = match cue {
            Cue::Wing => self.wing_volume,
            Cue::Point => self.point_volume,
            Cue::Death => self.death_volume,
            Cue::RetryDeath => self.retry_death_volume,
        };
        (self.master_volume * cue_volume).clamp(0.0, 1.0)
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        if let Some(json) = store.get_item(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        if let Ok(json) = serde_json::to_string(self) {
            store.set_item(Self::STORAGE_KEY, &json);
            log::info!("Settings saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_cue_volumes() {
        let mut settings = Settings::default();
        assert_eq!(settings.cue_volume(Cue::Wing), 0.5);
        assert_eq!(settings.cue_volume(Cue::Death), 0.7);
        settings.master_volume = 0.5;
        assert_eq!(settings.cue_volume(Cue::Point), 0.25);
        settings.muted = true;
        assert_eq!(settings.cue_volume(Cue::RetryDeath), 0.0);
    }

    #[test]
    fn test_load_save_and_fallback() {
        let mut store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());

        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        settings.save(&mut store);
        assert!(Settings::load(&store).muted);

        store.set_item(Settings::STORAGE_KEY, "{{{");
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
