//! Per-tick simulation pipeline
//!
//! Order within a tick:
//! 1. real-time timers (hit pause, knockout blink)
//! 2. player integration with the scaled delta
//! 3. trajectory stepping
//! 4. lock-step replay: wall resolution and hit detection per sub-step
//! 5. collision flag upkeep
//! 6. camera and slow motion (real delta)

use super::camera::{self, Focus};
use super::collision::resolve_walls;
use super::dir::Dir;
use super::hit::{HitReport, detect};
use super::mask::MaskSource;
use super::player::PlayerId;
use super::state::MatchState;
use super::trajectory::{resample_index, trajectory};

/// Abstract controller actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Directional input for a player (1-based number); `Dir::None` when
    /// the stick is released
    Direction(u8, Dir),
    /// Activate button for a player
    Activate(u8, bool),
    Reset(bool),
    Escape(bool),
    /// Clear the scores and start a new match
    NewMatch,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickEvents {
    /// A new collision was detected
    pub collision: Option<HitReport>,
    /// Player who scored with that collision
    pub scored: Option<PlayerId>,
    /// Player knocked out when the hit pause expired
    pub knocked_out: Option<PlayerId>,
}

/// Apply a player action. Round-level actions (reset, escape, new match)
/// belong to the director and are ignored here, as are unknown players.
pub fn apply_action(state: &mut MatchState, action: Action) {
    match action {
        Action::Direction(n, dir) => {
            let Some(id) = PlayerId::from_number(n) else {
                log::trace!("Direction for unknown player {n}");
                return;
            };
            state.player_mut(id).register_dir(dir);
        }
        Action::Activate(n, pressed) => {
            let Some(id) = PlayerId::from_number(n) else {
                log::trace!("Activate for unknown player {n}");
                return;
            };
            let frozen = state.paused();
            let physics = state.settings.physics.clone();
            let player = state.player_mut(id);
            if frozen {
                if pressed {
                    player.activate_held = true;
                } else {
                    player.cancel_loading();
                }
            } else if pressed {
                player.press(&physics);
            } else {
                player.release();
            }
        }
        Action::Reset(_) | Action::Escape(_) | Action::NewMatch => {}
    }
}

/// Advance the match by `dt` seconds of real time
pub fn tick(state: &mut MatchState, masks: &(impl MaskSource + ?Sized), dt: f32) -> TickEvents {
    let mut events = TickEvents::default();
    state.time_ticks += 1;

    for player in &mut state.players {
        player.blink.advance(dt);
    }
    if state.pause.advance(dt) {
        resolve_pending(state, &mut events);
    }

    let scaled = if state.paused() { 0.0 } else { dt * state.time_scale };
    for player in &mut state.players {
        let start = player.rect;
        player.steps = if scaled > 0.0 {
            let step = player.integrate(scaled, &state.settings.physics);
            trajectory(start, start.translate(step))
        } else {
            vec![start]
        };
    }

    replay(state, masks, &mut events);

    if state.colliding && !state.paused() && !in_contact(state) {
        log::trace!("Players separated");
        state.colliding = false;
    }

    direct_camera(state);
    state.camera.update(dt);

    events
}

/// Walk both trajectories in lock-step, resolving walls and looking for a
/// hit at every sub-step. Stops at the first collision.
fn replay(state: &mut MatchState, masks: &(impl MaskSource + ?Sized), events: &mut TickEvents) {
    let steps = [
        std::mem::take(&mut state.players[0].steps),
        std::mem::take(&mut state.players[1].steps),
    ];
    let max_index = steps.iter().map(Vec::len).max().unwrap_or(1).saturating_sub(1);
    let border = state.arena.border;
    let ratio = state.settings.hit.hitbox_ratio;

    for i in 0..=max_index {
        for (player, path) in state.players.iter_mut().zip(&steps) {
            let Some(&rect) = path.get(resample_index(i, path.len(), max_index)) else {
                continue;
            };
            let contact = resolve_walls(rect, &border);
            player.rect = contact.rect;
            if let Some(surface) = contact.surface {
                player.attach(surface, &state.settings.physics);
            }
        }

        if state.colliding || state.round_over() {
            continue;
        }
        let report = detect(&state.players[0], &state.players[1], masks, ratio);
        if report.is_collision() {
            log::trace!("Collision at sub-step {i}/{max_index}");
            register_collision(state, report, events);
            break;
        }
    }

    for (player, path) in state.players.iter_mut().zip(steps) {
        player.steps = path;
    }
}

/// A new collision: score, flash, freeze
fn register_collision(state: &mut MatchState, report: HitReport, events: &mut TickEvents) {
    state.colliding = true;
    state.pending = Some(report);
    state.time_scale = 0.0;
    events.collision = Some(report);

    match report.striker() {
        Some(striker) => {
            let score = state.scores.award(striker);
            let blink = state.settings.hit.blink_duration;
            state.player_mut(striker.opponent()).blink.start(blink);
            state.pause.start(state.settings.hit.hit_pause);
            events.scored = Some(striker);
            log::info!(
                "Player {} hits player {} (score {})",
                striker.number(),
                striker.opponent().number(),
                score
            );
        }
        None => {
            state.pause.start(state.settings.hit.tie_pause);
            log::debug!("Tie, nobody scores");
        }
    }
}

/// Hit pause over: bounce the players apart and knock out the victim
fn resolve_pending(state: &mut MatchState, events: &mut TickEvents) {
    state.time_scale = 1.0;
    let Some(report) = state.pending.take() else {
        return;
    };

    let damping = state.settings.physics.bounce_damping;
    let [one, two] = &mut state.players;
    match (one.fixed, two.fixed) {
        (false, false) => std::mem::swap(&mut one.speed, &mut two.speed),
        (true, false) => two.speed *= -damping,
        (false, true) => one.speed *= -damping,
        (true, true) => {}
    }

    if let Some(striker) = report.striker() {
        let victim = striker.opponent();
        state.player_mut(victim).knock_out();
        events.knocked_out = Some(victim);
        log::info!("Player {} is knocked out", victim.number());
    }
}

fn in_contact(state: &MatchState) -> bool {
    state.players[0].rect.intersects(&state.players[1].rect)
}

/// Slow motion and zoom while the players are about to meet
fn direct_camera(state: &mut MatchState) {
    let paused = state.paused();
    if state.demo || !state.settings.camera.enabled {
        state.camera.reset(false);
        if !paused {
            state.time_scale = 1.0;
        }
        return;
    }

    let focus = camera::focus(
        &state.players[0],
        &state.players[1],
        &state.arena.bounds,
        state.settings.camera.proximity_threshold,
        state.settings.hit.hitbox_ratio,
        paused,
    );
    match focus {
        Focus::Wide => {
            state.camera.reset(false);
            if !paused {
                state.time_scale = 1.0;
            }
        }
        Focus::Close(target) => {
            state.camera.set_target(target);
            if !paused {
                state.time_scale = state.settings.camera.slow_motion_ratio;
            }
        }
    }
}
