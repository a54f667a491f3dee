//! Dojo - headless native runner
//!
//! Runs the attract-mode demo without a window and logs what happens.
//! Usage: `dojo [seconds] [seed]`

use std::process::ExitCode;

use dojo::consts::{MAX_SUBSTEPS, SIM_DT};
use dojo::sim::{PlayerId, SolidBodies};
use dojo::{Director, MemoryScoreStore, Settings};

/// Simulated display refresh; deliberately off the simulation rate
const FRAME_DT: f32 = 1.0 / 50.0;

struct Runner {
    director: Director<MemoryScoreStore, SolidBodies>,
    accumulator: f32,
}

impl Runner {
    fn new(settings: Settings, seed: u64) -> Self {
        let store = MemoryScoreStore::default();
        Self {
            director: Director::demo(settings, store, SolidBodies, seed),
            accumulator: 0.0,
        }
    }

    /// One display frame: as many fixed ticks as the elapsed time allows
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            if let Some(transition) = self.director.tick(SIM_DT) {
                log::info!("Transition: {transition:?}");
            }
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    fn report(&self) {
        let frame = self.director.snapshot();
        for view in &frame.players {
            log::info!(
                "P{} at ({}, {}) {} {:?}",
                view.id.number(),
                view.rect.x,
                view.rect.y,
                if view.fixed { "gripping" } else { "flying" },
                if view.fixed { view.attachment } else { view.current_dir },
            );
        }
        log::debug!("Camera {:?}, time scale {}", frame.camera, frame.time_scale);
    }
}

fn parse_args() -> (f32, u64) {
    let mut args = std::env::args().skip(1);
    let seconds = args.next().and_then(|s| s.parse().ok()).unwrap_or(10.0);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0xD0_70);
    (seconds, seed)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Dojo (headless) starting...");

    let settings = Settings::load_or_default();
    if let Err(e) = settings.validate() {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }

    let (seconds, seed) = parse_args();
    let mut runner = Runner::new(settings, seed);
    let frames = (seconds / FRAME_DT).ceil() as u64;
    let frames_per_report = (1.0 / FRAME_DT).round() as u64;

    for frame in 1..=frames {
        runner.update(FRAME_DT);
        if frame % frames_per_report == 0 {
            runner.report();
        }
    }

    let state = runner.director.state();
    let scores = state.scores;
    log::info!(
        "Demo finished after {} ticks, hits {}-{}",
        state.time_ticks,
        scores.get(PlayerId::One),
        scores.get(PlayerId::Two)
    );
    ExitCode::SUCCESS
}
