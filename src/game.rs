//! Frame driver
//!
//! Owns the session plus its collaborators: reads the clock, turns raw input
//! into core actions, steps the simulation at a fixed rate, forwards cues to
//! audio and persists a beaten high score.

use glam::Vec2;

use crate::Playfield;
use crate::audio::CuePlayer;
use crate::consts::{MAX_SUBSTEPS, SIM_DT_MS};
use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::platform::{Button, Clock, InputEvent, UiLayout};
use crate::sim::{GameEvent, GameMode, GameState, Snapshot, TickInput, start_game, tick};
use crate::tuning::{Tuning, TuningError};

/// Longest wall-clock gap fed to the accumulator in one frame
const MAX_FRAME_MS: f64 = 100.0;

pub struct Game<C: Clock> {
    state: GameState,
    clock: C,
    store: Box<dyn KeyValueStore>,
    high_score: HighScore,
    audio: CuePlayer,
    layout: UiLayout,
    input: TickInput,
    accumulator: f64,
    last_frame_ms: Option<u64>,
}

impl<C: Clock> Game<C> {
    /// Create a game in the menu, with the stored high score loaded
    pub fn new(
        clock: C,
        store: Box<dyn KeyValueStore>,
        audio: CuePlayer,
        tuning: Tuning,
        field: Playfield,
        seed: u64,
    ) -> Self {
        if let Err(e) = tuning.fits(field) {
            log::warn!("{e}; gaps will hug the top margin");
        }
        let high_score = HighScore::load(store.as_ref());
        log::info!("Game initialized with seed: {seed}");
        Self {
            state: GameState::new(seed, tuning, field, high_score.best),
            clock,
            store,
            high_score,
            audio,
            layout: UiLayout::for_field(field),
            input: TickInput::default(),
            accumulator: 0.0,
            last_frame_ms: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best
    }

    pub fn layout(&self) -> &UiLayout {
        &self.layout
    }

    pub fn audio(&self) -> &CuePlayer {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut CuePlayer {
        &mut self.audio
    }

    pub fn store_mut(&mut self) -> &mut dyn KeyValueStore {
        self.store.as_mut()
    }

    /// Route a raw input according to the current mode
    pub fn handle_input(&mut self, event: InputEvent) {
        match (self.state.mode, event) {
            (GameMode::Playing, _) => {
                self.input.impulse = true;
            }
            (GameMode::Menu | GameMode::GameOver, InputEvent::PointerDown { x, y }) => {
                match self.layout.hit(self.state.mode, Vec2::new(x, y)) {
                    Some(Button::Start) | Some(Button::Restart) => self.start(),
                    None => {}
                }
            }
            // Keys don't press buttons; nothing reacts during the grace period
            (GameMode::Menu | GameMode::GameOver, InputEvent::JumpKey)
            | (GameMode::PauseAfterDeath, _) => {}
        }
    }

    /// Start (or restart) a session
    pub fn start(&mut self) {
        let now = self.clock.now_ms();
        start_game(&mut self.state, now);
        self.input = TickInput::default();
        self.accumulator = 0.0;
        self.last_frame_ms = Some(now);
        self.process_events();
    }

    /// Adopt a new playfield size.
    ///
    /// The size is applied even when the tuning doesn't fit it; the error is
    /// returned so callers can react.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), TuningError> {
        let field = Playfield::new(width, height);
        self.state.resize(field);
        self.layout = UiLayout::for_field(field);
        log::info!("Playfield resized to {width}x{height}");
        self.state.tuning.fits(field).inspect_err(|e| {
            log::warn!("{e}; gaps will hug the top margin");
        })
    }

    /// Run the simulation up to now and return the frame to draw
    pub fn frame(&mut self) -> Snapshot {
        let now = self.clock.now_ms();
        let elapsed = match self.last_frame_ms {
            Some(last) => now.saturating_sub(last) as f64,
            None => SIM_DT_MS,
        };
        self.last_frame_ms = Some(now);
        self.accumulator += elapsed.min(MAX_FRAME_MS);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, now);
            self.accumulator -= SIM_DT_MS;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input = TickInput::default();
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(SIM_DT_MS);
        }

        self.process_events();
        Snapshot::capture(&self.state, now)
    }

    fn process_events(&mut self) {
        for event in self.state.drain_events() {
            if let Some(cue) = event.cue() {
                self.audio.play(cue);
            }
            if let GameEvent::NewHighScore { score } = event {
                if self.high_score.commit(score) {
                    self.high_score.save(self.store.as_mut());
                }
            }
        }
    }
}
