//! Dojo - A minimalistic two-player versus fighting game
//!
//! One dojo, one life, one hit wins. Players grab the walls and the ceiling
//! of the room and charge jumps to land on their opponent.
//!
//! Core modules:
//! - `sim`: Simulation core (player physics, wall resolution, sub-stepping,
//!   hit detection, camera/slow-motion)
//! - `director`: Round/match director driving the simulation from actions
//! - `scores`: Score board and persistence interface
//! - `settings`: Tunable configuration

pub mod director;
pub mod error;
pub mod scores;
pub mod settings;
pub mod sim;

pub use director::{Director, Transition};
pub use error::{ConfigError, StoreError};
pub use scores::{JsonScoreStore, MemoryScoreStore, ScoreBoard, ScoreStore};
pub use settings::Settings;

/// Default tuning values (latest revision of the game)
pub mod consts {
    /// Fixed simulation timestep used by the native runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Background image size; the camera's full view
    pub const ROOM_WIDTH: i32 = 640;
    pub const ROOM_HEIGHT: i32 = 360;
    /// Inset of the playable border from the background bounds
    pub const BORDER_MARGIN: i32 = 16;
    /// Player bounding box (multiple of 3 so hitbox cells are exact)
    pub const PLAYER_WIDTH: i32 = 30;
    pub const PLAYER_HEIGHT: i32 = 30;

    /// Gravity (pixels/s², y grows downward)
    pub const GRAVITY: (f32, f32) = (0.0, 981.0);
    /// Per-axis air drag coefficient (s⁻¹)
    pub const AIR_FRICTION: (f32, f32) = (0.5, 0.5);

    /// Jump charge at the end of the pre-jump delay (pixels/s)
    pub const LOAD_SPEED_INIT: f32 = 250.0;
    /// Jump charge accumulation rate (pixels/s²)
    pub const LOAD_SPEED_RATE: f32 = 600.0;
    /// Jump charge cap (pixels/s)
    pub const LOAD_SPEED_MAX: f32 = 1000.0;
    /// Hold time before charging starts (seconds)
    pub const PRE_JUMP_DELAY: f32 = 0.1;

    /// Velocity factor applied to a player bouncing off a fixed opponent
    pub const BOUNCE_DAMPING: f32 = 0.8;

    /// Legs/head/body hitbox size relative to the player box
    pub const HITBOX_RATIO: f32 = 1.0 / 3.0;
    /// Freeze after a decisive hit (seconds, real time)
    pub const HIT_PAUSE: f32 = 1.0;
    /// Freeze after a tie (seconds, real time)
    pub const TIE_PAUSE: f32 = 0.3;
    /// Knockout flash duration (seconds, real time)
    pub const BLINK_DURATION: f32 = 1.0;

    /// Legs-to-opponent distance that triggers slow motion (pixels)
    pub const PROXIMITY_THRESHOLD: f32 = 16.0;
    /// Time scale while in slow motion
    pub const SLOW_MOTION_RATIO: f32 = 0.2;
    /// Camera pan/zoom speed (pixels/s)
    pub const CAMERA_SPEED: f32 = 600.0;

    /// Score to exceed (with a 2-point lead) to win the match
    pub const SCORING: u32 = 20;
}
