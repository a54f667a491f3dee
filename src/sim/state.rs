//! Match and round state
//!
//! Everything the tick mutates lives here: both players, the arena, the
//! running scores, the hit-pause machinery and the camera.

use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::dir::Dir;
use super::hit::HitReport;
use super::player::{Player, PlayerId};
use super::rect::Rect;
use super::timer::Countdown;
use crate::scores::ScoreBoard;
use crate::settings::Settings;

/// The room: background bounds and the playable border inside them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arena {
    /// Background image bounds, the camera's full view
    pub bounds: Rect,
    /// Playable region
    pub border: Rect,
}

impl Arena {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            bounds: settings.arena.bounds(),
            border: settings.arena.border(),
        }
    }

    /// Starting box for a player: bottom corner of the border on its side
    pub fn spawn(&self, id: PlayerId, size: glam::IVec2) -> Rect {
        let x = match id {
            PlayerId::One => self.border.left(),
            PlayerId::Two => self.border.right() - size.x,
        };
        Rect::new(x, self.border.bottom() - size.y, size.x, size.y)
    }
}

/// Complete state of a match in progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub settings: Settings,
    pub arena: Arena,
    /// Indexed by [`PlayerId::index`]
    pub players: [Player; 2],
    pub scores: ScoreBoard,
    /// A detected hit is being resolved; suppresses new detections
    pub colliding: bool,
    /// Hit pause (real time)
    pub pause: Countdown,
    /// Hit waiting for the pause to expire
    pub pending: Option<HitReport>,
    /// Multiplier from real to simulated time
    pub time_scale: f32,
    pub camera: Camera,
    /// Driven by the demo pilot rather than by players
    pub demo: bool,
    /// Rounds started since the match began (1-based)
    pub round: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl MatchState {
    pub fn new(settings: Settings, scores: ScoreBoard) -> Self {
        let arena = Arena::from_settings(&settings);
        let size = settings.arena.player_size;
        let players = [
            Player::new(PlayerId::One, arena.spawn(PlayerId::One, size)),
            Player::new(PlayerId::Two, arena.spawn(PlayerId::Two, size)),
        ];
        let camera = Camera::new(arena.bounds, settings.camera.speed);
        Self {
            settings,
            arena,
            players,
            scores,
            colliding: false,
            pause: Countdown::new(),
            pending: None,
            time_scale: 1.0,
            camera,
            demo: false,
            round: 1,
            time_ticks: 0,
        }
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// Put both players back at their spawn points. Scores are kept.
    pub fn reset_round(&mut self) {
        let size = self.settings.arena.player_size;
        for id in PlayerId::ALL {
            let mut player = Player::new(id, self.arena.spawn(id, size));
            // Keep what the controllers are holding
            let old = self.player(id);
            player.register_dir(old.live_dir);
            player.activate_held = old.activate_held;
            self.players[id.index()] = player;
        }
        self.colliding = false;
        self.pause.cancel();
        self.pending = None;
        self.time_scale = 1.0;
        self.camera.reset(true);
        self.round += 1;
        log::info!(
            "Round {} ({}-{})",
            self.round,
            self.scores.get(PlayerId::One),
            self.scores.get(PlayerId::Two)
        );
    }

    /// Clear the scores and start over
    pub fn new_match(&mut self) {
        self.scores.clear();
        self.reset_round();
        self.round = 1;
        log::info!("New match");
    }

    /// The round ends as soon as someone is knocked out
    pub fn round_over(&self) -> bool {
        self.players.iter().any(|p| p.knocked_out)
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.scores.winner(self.settings.scoring)
    }

    /// Hit pause in progress
    pub fn paused(&self) -> bool {
        self.pause.is_running()
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Frame {
        Frame {
            players: [self.view(PlayerId::One), self.view(PlayerId::Two)],
            camera: self.camera.rect(),
            time_scale: self.time_scale,
            colliding: self.colliding,
            round_over: self.round_over(),
        }
    }

    fn view(&self, id: PlayerId) -> PlayerView {
        let p = self.player(id);
        PlayerView {
            id,
            rect: p.rect,
            attachment: p.attachment,
            fixed: p.fixed,
            knocked_out: p.knocked_out,
            loading: p.loading,
            blinking: p.blink.is_running(),
            current_dir: p.current_dir(),
            score: self.scores.get(id),
        }
    }
}

/// Renderer-facing player state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub rect: Rect,
    pub attachment: Dir,
    pub fixed: bool,
    pub knocked_out: bool,
    pub loading: bool,
    pub blinking: bool,
    pub current_dir: Dir,
    pub score: u32,
}

/// Renderer-facing snapshot of one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub players: [PlayerView; 2],
    pub camera: Rect,
    pub time_scale: f32,
    pub colliding: bool,
    pub round_over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_players_spawn_on_the_floor() {
        let state = MatchState::new(Settings::default(), ScoreBoard::default());
        let border = state.arena.border;
        for p in &state.players {
            assert!(border.contains(&p.rect));
            assert_eq!(p.rect.bottom(), border.bottom());
            assert!(p.fixed);
            assert_eq!(p.attachment, Dir::Down);
        }
        assert_eq!(state.players[0].rect.left(), border.left());
        assert_eq!(state.players[1].rect.right(), border.right());
    }

    #[test]
    fn test_reset_keeps_scores_new_match_clears() {
        let mut state = MatchState::new(Settings::default(), ScoreBoard::new(4, 2));
        state.players[1].knock_out();
        assert!(state.round_over());

        state.reset_round();
        assert!(!state.round_over());
        assert_eq!(state.round, 2);
        assert_eq!(state.scores, ScoreBoard::new(4, 2));

        state.new_match();
        assert_eq!(state.round, 1);
        assert_eq!(state.scores, ScoreBoard::default());
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = MatchState::new(Settings::default(), ScoreBoard::new(1, 0));
        state.players[0].register_dir(Dir::Right);
        state.players[1].blink.start(1.0);
        let frame = state.snapshot();
        assert_eq!(frame.players[0].current_dir, Dir::UpRight);
        assert_eq!(frame.players[0].score, 1);
        assert!(frame.players[1].blinking);
        assert_eq!(frame.camera, state.arena.bounds);
        assert_eq!(frame.time_scale, 1.0);
    }
}
