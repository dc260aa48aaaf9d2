//! Simulation tick and mode transitions
//!
//! Advances the session one fixed step. All timing compares the injected
//! `now_ms` against stored timestamps, so the core never reads a clock.

use super::collision::{credit_passed, first_hit};
use super::entity::{Entity, Motion};
use super::state::{BONUS_LIFE_TEXT, GameEvent, GameMode, GameState, Notification};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (pointer press or jump key while playing)
    pub impulse: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) {
    match state.mode {
        GameMode::Menu | GameMode::GameOver => {}
        GameMode::PauseAfterDeath => {
            check_pause_end(state, now_ms);
        }
        GameMode::Playing => {
            state.time_ticks += 1;
            tick_playing(state, input, now_ms);
        }
    }
}

fn tick_playing(state: &mut GameState, input: &TickInput, now_ms: u64) {
    if input.impulse {
        state.entity.impulse();
        state.emit(GameEvent::Flap);
    }

    if let Some(id) =
        state
            .obstacles
            .maybe_spawn(now_ms, state.score, &state.tuning, state.field)
    {
        state.emit(GameEvent::ObstacleSpawned { id });
    }

    // Retire before any geometry checks
    state.obstacles.advance();

    if let Some(hit) = first_hit(&state.entity, state.obstacles.obstacles()) {
        log::debug!("Hit obstacle {}", hit.id);
        handle_collision(state, now_ms);
        return;
    }

    let entity_x = state.entity.pos.x;
    let bonus_every = state.tuning.bonus_life_every;
    let mut passed_total = state.obstacles_passed;
    let result = credit_passed(
        entity_x,
        state.obstacles.obstacles_mut(),
        &mut passed_total,
        bonus_every,
    );
    state.obstacles_passed = passed_total;

    for _ in 0..result.passed {
        state.score += 1;
        let score = state.score;
        state.emit(GameEvent::Scored { score });
    }
    for _ in 0..result.bonus_lives {
        state.lives = state.lives.saturating_add(1);
        state.notification = Some(Notification {
            text: BONUS_LIFE_TEXT.to_string(),
            shown_at_ms: now_ms,
        });
        let lives = state.lives;
        log::info!("Bonus life! Lives: {lives}");
        state.emit(GameEvent::BonusLife { lives });
    }

    if state.entity.advance(state.field) == Motion::Grounded {
        log::debug!("Entity hit the floor");
        handle_collision(state, now_ms);
    }
}

/// React to a fatal contact: lose a life and pause, or end the run
pub fn handle_collision(state: &mut GameState, now_ms: u64) {
    if state.lives == 0 {
        game_over(state);
        return;
    }

    state.lives -= 1;
    let lives = state.lives;
    log::info!("Life lost, {lives} remaining");
    state.emit(GameEvent::LifeLost { lives });

    state.mode = GameMode::PauseAfterDeath;
    state.pause_started_ms = now_ms;

    state.entity.reset(state.field);

    let ahead = state.field.width * state.tuning.safe_zone_ahead_ratio;
    let behind = state.tuning.safe_zone_behind;
    let cleared = state
        .obstacles
        .clear_safe_zone(state.entity.pos.x, ahead, behind);
    if cleared > 0 {
        log::debug!("Cleared {cleared} obstacles from the safe zone");
    }
    state.obstacles.rebase_timer(now_ms);
}

/// Resume play once the grace period has fully elapsed
pub fn check_pause_end(state: &mut GameState, now_ms: u64) {
    if state.mode != GameMode::PauseAfterDeath {
        return;
    }
    if now_ms.saturating_sub(state.pause_started_ms) >= state.tuning.pause_duration_ms {
        state.mode = GameMode::Playing;
        state.emit(GameEvent::Resumed);
    }
}

/// End the run and commit the score against the best
fn game_over(state: &mut GameState) {
    state.mode = GameMode::GameOver;
    let score = state.score;
    log::info!("Game over with score {score}");
    state.emit(GameEvent::GameOver { score });

    if score > state.high_score {
        log::info!("New high score: {score} (was {})", state.high_score);
        state.high_score = score;
        state.emit(GameEvent::NewHighScore { score });
    }
}

/// Begin a fresh session. The high score carries over.
pub fn start_game(state: &mut GameState, now_ms: u64) {
    state.score = 0;
    state.obstacles_passed = 0;
    state.lives = state.tuning.initial_lives;
    state.entity = Entity::new(&state.tuning, state.field);
    state.obstacles.restart(now_ms, &state.tuning);
    state.notification = None;
    state.pause_started_ms = 0;
    state.time_ticks = 0;
    state.mode = GameMode::Playing;
    log::info!("Game started (best {})", state.high_score);
    state.emit(GameEvent::Started);
}
