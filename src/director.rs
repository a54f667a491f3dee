//! Round/match director
//!
//! Owns the match state together with its collaborators (score store, pixel
//! masks, optional demo pilot). Actions and ticks go in, explicit
//! [`Transition`] requests come out for the outer scene stack to act on.

use crate::scores::{ScoreBoard, ScoreStore};
use crate::settings::Settings;
use crate::sim::{
    Action, DemoPilot, Dir, Frame, MaskSource, MatchState, PlayerId, SolidBodies, apply_action,
    tick,
};

/// Scene change requested by the director
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Escape pressed: open the pause menu
    Pause,
    /// Demo interrupted: a real match starts
    StartMatch,
    /// Someone was knocked out; reset to play the next round
    RoundOver { knocked_out: PlayerId },
    /// The match is decided
    MatchOver { winner: PlayerId },
}

/// Drives a match from controller actions and frame ticks
pub struct Director<S: ScoreStore, M: MaskSource = SolidBodies> {
    state: MatchState,
    store: S,
    masks: M,
    pilot: Option<DemoPilot>,
}

impl<S: ScoreStore, M: MaskSource> Director<S, M> {
    /// Start a match; scores are loaded from `store`
    pub fn new(settings: Settings, mut store: S, masks: M) -> Self {
        let scores = store.load_scores().unwrap_or_else(|e| {
            log::warn!("Failed to load scores ({e}), starting from zero");
            ScoreBoard::default()
        });
        log::info!(
            "Match starts at {}-{}",
            scores.get(PlayerId::One),
            scores.get(PlayerId::Two)
        );
        Self {
            state: MatchState::new(settings, scores),
            store,
            masks,
            pilot: None,
        }
    }

    /// Attract mode: both players driven by a seeded pilot. Scores start
    /// empty and are never saved.
    pub fn demo(settings: Settings, store: S, masks: M, seed: u64) -> Self {
        let mut state = MatchState::new(settings, ScoreBoard::default());
        state.demo = true;
        log::info!("Demo starts (seed {seed})");
        Self {
            state,
            store,
            masks,
            pilot: Some(DemoPilot::new(seed)),
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_demo(&self) -> bool {
        self.pilot.is_some()
    }

    pub fn snapshot(&self) -> Frame {
        self.state.snapshot()
    }

    pub fn on_direction_input(&mut self, player: u8, dir: Dir) -> Option<Transition> {
        self.on_action(Action::Direction(player, dir))
    }

    pub fn on_activate_input(&mut self, player: u8, pressed: bool) -> Option<Transition> {
        self.on_action(Action::Activate(player, pressed))
    }

    pub fn on_reset_requested(&mut self) -> Option<Transition> {
        self.on_action(Action::Reset(true))
    }

    /// Dispatch one controller action
    pub fn on_action(&mut self, action: Action) -> Option<Transition> {
        if self.is_demo() {
            return match action {
                Action::Activate(_, true) | Action::Escape(true) => Some(self.leave_demo()),
                _ => None,
            };
        }

        match action {
            Action::Direction(..) | Action::Activate(..) => {
                apply_action(&mut self.state, action);
                None
            }
            Action::Reset(true) => {
                self.reset();
                None
            }
            Action::Escape(true) => Some(Transition::Pause),
            Action::NewMatch => {
                self.new_match();
                None
            }
            Action::Reset(false) | Action::Escape(false) => None,
        }
    }

    /// Advance by `dt` seconds of real time
    pub fn tick(&mut self, dt: f32) -> Option<Transition> {
        let events = tick(&mut self.state, &self.masks, dt);
        if let Some(pilot) = &mut self.pilot {
            pilot.drive(&mut self.state);
            return None;
        }

        if events.scored.is_some() {
            self.save();
        }
        let knocked_out = events.knocked_out?;
        match self.state.winner() {
            Some(winner) => {
                log::info!(
                    "Player {} wins the match {}-{}",
                    winner.number(),
                    self.state.scores.get(winner),
                    self.state.scores.get(winner.opponent())
                );
                self.save();
                Some(Transition::MatchOver { winner })
            }
            None => Some(Transition::RoundOver { knocked_out }),
        }
    }

    /// Start the next round; only once the current one is over
    fn reset(&mut self) {
        if !self.state.round_over() {
            log::debug!("Reset ignored, round still running");
            return;
        }
        if self.state.winner().is_some() {
            self.new_match();
        } else {
            self.state.reset_round();
        }
    }

    fn new_match(&mut self) {
        self.state.new_match();
        self.save();
    }

    fn leave_demo(&mut self) -> Transition {
        log::info!("Demo interrupted");
        self.pilot = None;
        self.state.demo = false;
        self.new_match();
        Transition::StartMatch
    }

    fn save(&mut self) {
        if let Err(e) = self.store.save_scores(&self.state.scores) {
            log::error!("Failed to save scores: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::scores::MemoryScoreStore;
    use crate::sim::Rect;
    use glam::Vec2;

    fn director(scores: ScoreBoard) -> Director<MemoryScoreStore> {
        Director::new(Settings::default(), MemoryScoreStore::new(scores), SolidBodies)
    }

    /// Player One dives into a standing Player Two
    fn stage_hit(d: &mut Director<MemoryScoreStore>) {
        let floor = d.state.arena.border.bottom() - 30;
        let one = d.state.player_mut(PlayerId::One);
        one.rect = Rect::new(100, floor, 30, 30);
        one.fixed = false;
        one.attachment = Dir::None;
        one.speed = Vec2::new(5400.0, 0.0);
        d.state.player_mut(PlayerId::Two).rect = Rect::new(140, floor, 30, 30);
    }

    fn run_until_transition(d: &mut Director<MemoryScoreStore>) -> Option<Transition> {
        (0..200).find_map(|_| d.tick(SIM_DT))
    }

    #[test]
    fn test_scores_loaded_at_start() {
        let d = director(ScoreBoard::new(3, 1));
        assert_eq!(d.state().scores, ScoreBoard::new(3, 1));
        assert_eq!(d.snapshot().players[0].score, 3);
    }

    #[test]
    fn test_hit_saves_and_ends_round() {
        let mut d = director(ScoreBoard::default());
        stage_hit(&mut d);
        assert_eq!(
            run_until_transition(&mut d),
            Some(Transition::RoundOver {
                knocked_out: PlayerId::Two
            })
        );
        assert_eq!(d.store().scores(), ScoreBoard::new(1, 0));
        assert_eq!(d.store().saves, 1);
    }

    #[test]
    fn test_reset_only_when_round_over() {
        let mut d = director(ScoreBoard::default());
        d.on_direction_input(1, Dir::Right);
        d.tick(SIM_DT);
        let round = d.state().round;
        d.on_reset_requested();
        assert_eq!(d.state().round, round);

        stage_hit(&mut d);
        run_until_transition(&mut d);
        d.on_reset_requested();
        assert_eq!(d.state().round, round + 1);
        assert!(!d.state().round_over());
        assert_eq!(d.state().scores, ScoreBoard::new(1, 0));
    }

    #[test]
    fn test_winning_hit_ends_match_and_reset_starts_over() {
        let mut d = director(ScoreBoard::new(20, 18));
        stage_hit(&mut d);
        assert_eq!(
            run_until_transition(&mut d),
            Some(Transition::MatchOver {
                winner: PlayerId::One
            })
        );
        assert_eq!(d.store().scores(), ScoreBoard::new(21, 18));

        d.on_reset_requested();
        assert_eq!(d.state().scores, ScoreBoard::default());
        assert_eq!(d.store().scores(), ScoreBoard::default());
        assert_eq!(d.state().round, 1);
    }

    #[test]
    fn test_escape_requests_pause() {
        let mut d = director(ScoreBoard::default());
        assert_eq!(d.on_action(Action::Escape(true)), Some(Transition::Pause));
        assert_eq!(d.on_action(Action::Escape(false)), None);
    }

    #[test]
    fn test_new_match_clears_scores() {
        let mut d = director(ScoreBoard::new(5, 9));
        d.on_action(Action::NewMatch);
        assert_eq!(d.state().scores, ScoreBoard::default());
        assert_eq!(d.store().scores(), ScoreBoard::default());
    }

    #[test]
    fn test_unknown_player_is_ignored() {
        let mut d = director(ScoreBoard::default());
        assert_eq!(d.on_activate_input(9, true), None);
        assert!(!d.state().players.iter().any(|p| p.activate_held));
    }

    #[test]
    fn test_demo_runs_until_interrupted() {
        let mut d = Director::demo(
            Settings::default(),
            MemoryScoreStore::new(ScoreBoard::new(4, 4)),
            SolidBodies,
            3,
        );
        for _ in 0..600 {
            assert_eq!(d.tick(SIM_DT), None);
        }
        assert_eq!(d.store().saves, 0);
        assert_eq!(d.on_direction_input(1, Dir::Up), None);
        assert!(d.is_demo());

        assert_eq!(d.on_activate_input(2, true), Some(Transition::StartMatch));
        assert!(!d.is_demo());
        assert!(!d.state().demo);
        assert_eq!(d.state().scores, ScoreBoard::default());
    }
}
