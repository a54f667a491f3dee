//! Attract-mode pilot
//!
//! Plays both sides with a crude stochastic policy: hold activate whenever
//! fixed, aim at a random compass direction, and let go at a random moment.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::dir::Dir;
use super::state::MatchState;

/// Chance per tick of releasing a prepared jump
pub const RELEASE_CHANCE: f32 = 0.05;

/// Seeded demo controller
#[derive(Debug, Clone)]
pub struct DemoPilot {
    rng: Pcg32,
}

impl DemoPilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Steer both players; call once per tick after the simulation step
    pub fn drive(&mut self, state: &mut MatchState) {
        let physics = state.settings.physics.clone();
        for player in &mut state.players {
            if player.fixed && !player.loading {
                player.press(&physics);
            }
            if player.fixed && player.launch_dir().is_none() {
                let dir = Dir::COMPASS[self.rng.random_range(0..Dir::COMPASS.len())];
                player.register_dir(dir);
            }
            if player.fixed && player.prepared() && self.rng.random::<f32>() < RELEASE_CHANCE {
                player.release();
            }
            if !player.fixed {
                player.register_dir(Dir::None);
            }
            player.knocked_out = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::scores::ScoreBoard;
    use crate::settings::Settings;
    use crate::sim::mask::SolidBodies;
    use crate::sim::tick::tick;

    fn demo_state() -> MatchState {
        let mut state = MatchState::new(Settings::default(), ScoreBoard::default());
        state.demo = true;
        state
    }

    #[test]
    fn test_demo_players_jump_and_stay_contained() {
        let mut state = demo_state();
        let mut pilot = DemoPilot::new(7);
        let mut jumps = 0;
        for _ in 0..3000 {
            let fixed_before = state.players.iter().filter(|p| p.fixed).count();
            tick(&mut state, &SolidBodies, SIM_DT);
            pilot.drive(&mut state);
            let fixed_after = state.players.iter().filter(|p| p.fixed).count();
            if fixed_after < fixed_before {
                jumps += 1;
            }
            for p in &state.players {
                assert!(state.arena.border.contains(&p.rect));
                assert!(!p.knocked_out);
            }
            assert!(state.time_scale == 1.0 || state.time_scale == 0.0);
        }
        assert!(jumps > 5, "demo only jumped {jumps} times");
    }

    #[test]
    fn test_same_seed_same_match() {
        let play = |seed| {
            let mut state = demo_state();
            let mut pilot = DemoPilot::new(seed);
            for _ in 0..600 {
                tick(&mut state, &SolidBodies, SIM_DT);
                pilot.drive(&mut state);
            }
            [state.players[0].rect, state.players[1].rect]
        };
        assert_eq!(play(42), play(42));
    }
}
