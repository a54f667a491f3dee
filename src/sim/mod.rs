//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Timers are countdowns advanced by the tick, never wall-clock callbacks
//! - Seeded RNG only (demo pilot)
//! - Stable iteration order (player one, then player two)
//! - No rendering or platform dependencies; pixel masks come in through
//!   [`MaskSource`]

pub mod camera;
pub mod collision;
pub mod demo;
pub mod dir;
pub mod hit;
pub mod mask;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;
pub mod timer;
pub mod trajectory;

pub use camera::{Camera, Focus};
pub use collision::{WallContact, resolve_walls};
pub use demo::DemoPilot;
pub use dir::Dir;
pub use hit::{HitReport, Hitboxes, detect};
pub use mask::{MaskSource, PixelMask, PlayerMasks, SolidBodies};
pub use player::{Player, PlayerId};
pub use rect::Rect;
pub use state::{Arena, Frame, MatchState, PlayerView};
pub use tick::{Action, TickEvents, apply_action, tick};
pub use timer::Countdown;
pub use trajectory::{resample_index, trajectory};
