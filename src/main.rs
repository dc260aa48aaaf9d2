//! Gapwing entry point
//!
//! The browser build is driven from JS through `platform::web::WebGame`.
//! Natively this runs a headless session with a simple autopilot, which is
//! handy for checking tuning files.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is WebGame, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::Context;

    use gapwing::audio::CuePlayer;
    use gapwing::consts::SIM_DT_MS;
    use gapwing::persistence;
    use gapwing::platform::{InputEvent, ManualClock};
    use gapwing::sim::{GameMode, Snapshot};
    use gapwing::{Game, Playfield, Settings, Tuning};

    /// Frames to simulate (one minute at 60 fps)
    const FRAMES: u32 = 60 * 60;

    pub fn run() -> anyhow::Result<()> {
        env_logger::init();
        log::info!("Gapwing (native) starting...");

        let tuning = match std::env::args().nth(1) {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading tuning file {path}"))?;
                Tuning::from_json(&json).with_context(|| format!("loading tuning file {path}"))?
            }
            None => Tuning::default(),
        };

        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);

        let store = persistence::default_store();
        let settings = Settings::load(store.as_ref());
        let clock = ManualClock::new(0);
        let mut game = Game::new(
            &clock,
            store,
            CuePlayer::new(Box::new(gapwing::audio::SilentBackend), settings),
            tuning,
            Playfield::default(),
            seed,
        );

        let start = game.layout().start.center;
        game.handle_input(InputEvent::PointerDown {
            x: start.x,
            y: start.y,
        });

        let mut snapshot = game.frame();
        for _ in 0..FRAMES {
            if snapshot.mode == GameMode::GameOver {
                break;
            }
            if should_flap(&snapshot) {
                game.handle_input(InputEvent::JumpKey);
            }
            clock.advance(SIM_DT_MS.ceil() as u64);
            snapshot = game.frame();
        }

        println!(
            "mode: {:?}  score: {}  lives: {}  best: {}",
            snapshot.mode, snapshot.score, snapshot.lives, snapshot.high_score
        );
        Ok(())
    }

    /// Flap when falling below the next gap's lower third
    fn should_flap(snapshot: &Snapshot) -> bool {
        let entity = &snapshot.entity;
        let target = snapshot
            .obstacles
            .iter()
            .find(|o| o.x + o.width > entity.pos.x - entity.size / 2.0)
            .map(|o| o.gap_bottom - (o.gap_bottom - o.gap_top) / 3.0)
            .unwrap_or(snapshot.field.height / 2.0);
        entity.velocity >= 0.0 && entity.pos.y + entity.size / 2.0 > target
    }
}
