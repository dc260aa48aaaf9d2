//! Sound cue playback
//!
//! At most one cue sounds at a time: playing a cue stops whatever is playing
//! first. Backends that cannot produce sound degrade to silence, and the
//! simulation never learns the difference.

use crate::settings::Settings;
use crate::sim::Cue;

/// Something that can make noise
pub trait CueBackend {
    /// Start a cue at the given volume. Returns false if nothing will sound.
    fn start(&mut self, cue: Cue, volume: f32) -> bool;
    /// Silence everything this backend started
    fn stop(&mut self);
}

/// Backend for platforms without audio, or when audio failed to initialize
#[derive(Debug, Default)]
pub struct SilentBackend;

impl CueBackend for SilentBackend {
    fn start(&mut self, _cue: Cue, _volume: f32) -> bool {
        false
    }

    fn stop(&mut self) {}
}

/// Single-slot cue player
pub struct CuePlayer {
    backend: Box<dyn CueBackend>,
    current: Option<Cue>,
    settings: Settings,
}

impl CuePlayer {
    pub fn new(backend: Box<dyn CueBackend>, settings: Settings) -> Self {
        Self {
            backend,
            current: None,
            settings,
        }
    }

    pub fn silent() -> Self {
        Self::new(Box::new(SilentBackend), Settings::default())
    }

    /// Cue occupying the slot, if any
    pub fn current(&self) -> Option<Cue> {
        self.current
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Replace whatever is playing with `cue`
    pub fn play(&mut self, cue: Cue) {
        self.stop();
        let volume = self.settings.cue_volume(cue);
        if volume <= 0.0 {
            return;
        }
        if self.backend.start(cue, volume) {
            self.current = Some(cue);
        }
    }

    pub fn stop(&mut self) {
        self.backend.stop();
        self.current = None;
    }
}

impl Default for CuePlayer {
    fn default() -> Self {
        Self::silent()
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudioBackend;

/// Procedurally generated cues - no external files needed
#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::CueBackend;
    use crate::sim::Cue;

    pub struct WebAudioBackend {
        ctx: AudioContext,
        voices: Vec<OscillatorNode>,
    }

    impl WebAudioBackend {
        /// Falls back to `None` (play silently) if the context can't be created
        pub fn new() -> Option<Self> {
            match AudioContext::new() {
                Ok(ctx) => Some(Self {
                    ctx,
                    voices: Vec::new(),
                }),
                Err(_) => {
                    log::warn!("Failed to create AudioContext - audio disabled");
                    None
                }
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(&self, freq: f32, osc_type: OscillatorType) -> Option<(OscillatorNode, GainNode)> {
            let osc = self.ctx.create_oscillator().ok()?;
            let gain = self.ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&self.ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Pitch sweep with exponential decay
        fn sweep(&mut self, from: f32, to: f32, len: f64, osc_type: OscillatorType, vol: f32, delay: f64) {
            let Some((osc, gain)) = self.create_osc(from, osc_type) else {
                return;
            };
            let t = self.ctx.current_time() + delay;

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + len)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + len)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + len + 0.05).ok();
            self.voices.push(osc);
        }
    }

    impl CueBackend for WebAudioBackend {
        fn start(&mut self, cue: Cue, vol: f32) -> bool {
            // Resume context if suspended (browsers require user gesture)
            if self.ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = self.ctx.resume();
            }

            match cue {
                // Wing - quick upward whoosh
                Cue::Wing => self.sweep(200.0, 600.0, 0.12, OscillatorType::Triangle, vol * 0.6, 0.0),
                // Point - two-note ding
                Cue::Point => {
                    self.sweep(800.0, 800.0, 0.08, OscillatorType::Sine, vol * 0.5, 0.0);
                    self.sweep(1200.0, 1200.0, 0.12, OscillatorType::Sine, vol * 0.5, 0.08);
                }
                // Death - long ominous descend
                Cue::Death => {
                    for (i, freq) in [400.0, 300.0, 200.0].iter().enumerate() {
                        let delay = i as f64 * 0.2;
                        self.sweep(*freq, *freq * 0.7, 0.3, OscillatorType::Sine, vol * 0.6, delay);
                    }
                }
                // Retry death - short thud
                Cue::RetryDeath => self.sweep(300.0, 60.0, 0.4, OscillatorType::Sawtooth, vol * 0.5, 0.0),
            }
            !self.voices.is_empty()
        }

        fn stop(&mut self) {
            for osc in self.voices.drain(..) {
                let _ = osc.stop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records calls so the slot behaviour can be checked
    #[derive(Clone, Default)]
    struct Recorder {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl CueBackend for Recorder {
        fn start(&mut self, cue: Cue, volume: f32) -> bool {
            self.log.borrow_mut().push(format!("start {cue:?} {volume}"));
            true
        }

        fn stop(&mut self) {
            self.log.borrow_mut().push("stop".to_string());
        }
    }

    #[test]
    fn test_play_replaces_current() {
        let recorder = Recorder::default();
        let mut player = CuePlayer::new(Box::new(recorder.clone()), Settings::default());
        player.play(Cue::Wing);
        assert_eq!(player.current(), Some(Cue::Wing));
        player.play(Cue::Point);
        assert_eq!(player.current(), Some(Cue::Point));
        assert_eq!(
            *recorder.log.borrow(),
            vec!["stop", "start Wing 0.5", "stop", "start Point 0.5"]
        );
    }

    #[test]
    fn test_muted_plays_nothing() {
        let recorder = Recorder::default();
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let mut player = CuePlayer::new(Box::new(recorder.clone()), settings);
        player.play(Cue::Death);
        assert_eq!(player.current(), None);
        assert_eq!(*recorder.log.borrow(), vec!["stop"]);
    }

    #[test]
    fn test_silent_backend_keeps_slot_empty() {
        let mut player = CuePlayer::silent();
        player.play(Cue::Wing);
        assert_eq!(player.current(), None);
    }
}
