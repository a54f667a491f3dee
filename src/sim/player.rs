//! Player physics and state machine
//!
//! A player is in one of four situations:
//! - fixed to a surface of the border (floor, wall or ceiling)
//! - fixed and loading a jump (activate held, charge accumulating)
//! - airborne
//! - knocked out (falls under gravity, ignores input)
//!
//! Positions are integer pixels; velocity is continuous and the sub-pixel
//! leftover of each tick is carried in `remainder`.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::dir::Dir;
use super::rect::Rect;
use super::timer::Countdown;
use crate::settings::PhysicsConfig;

/// Player side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// Zero-based slot
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    /// One-based number as shown to players
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Look up by one-based number; unknown numbers yield `None`
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(PlayerId::One),
            2 => Some(PlayerId::Two),
            _ => None,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

/// A player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Bounding box in pixels
    pub rect: Rect,
    /// Velocity (pixels/s)
    pub speed: Vec2,
    /// Sub-pixel displacement carried between ticks
    pub remainder: Vec2,
    /// Raw directional input as last reported
    pub live_dir: Dir,
    /// Last non-zero direction since the player became fixed
    pub saved_dir: Dir,
    /// Surface currently gripped; `Dir::None` while airborne
    pub attachment: Dir,
    pub fixed: bool,
    pub loading: bool,
    /// Jump charge (pixels/s)
    pub loading_speed: f32,
    /// Pre-jump delay; charging starts when it has elapsed
    pub prepare: Countdown,
    /// Activate button currently held
    pub activate_held: bool,
    pub knocked_out: bool,
    /// Knockout flash (real time)
    pub blink: Countdown,
    /// Intermediate rectangles for the current tick
    #[serde(skip)]
    pub steps: Vec<Rect>,
}

impl Player {
    /// A player standing on the floor at `rect`
    pub fn new(id: PlayerId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            speed: Vec2::ZERO,
            remainder: Vec2::ZERO,
            live_dir: Dir::None,
            saved_dir: Dir::None,
            attachment: Dir::Down,
            fixed: true,
            loading: false,
            loading_speed: 0.0,
            prepare: Countdown::new(),
            activate_held: false,
            knocked_out: false,
            blink: Countdown::new(),
            steps: vec![rect],
        }
    }

    /// Airborne: not fixed to anything
    #[inline]
    pub fn airborne(&self) -> bool {
        !self.fixed
    }

    /// Loading and past the pre-jump delay
    #[inline]
    pub fn prepared(&self) -> bool {
        self.loading && !self.prepare.is_running()
    }

    /// Saved direction with any component pointing into the gripped surface
    /// discarded
    fn usable_saved_dir(&self) -> Dir {
        if self.saved_dir.dot(self.attachment) > 0 {
            Dir::None
        } else {
            self.saved_dir
        }
    }

    /// Direction a jump would take right now.
    ///
    /// `sign(saved - attachment)` per axis, so a jump always leaves the
    /// surface. An idle player on the floor has no launch direction.
    pub fn launch_dir(&self) -> Dir {
        if !self.fixed {
            return Dir::None;
        }
        let saved = self.usable_saved_dir();
        if saved.is_none() && self.attachment == Dir::Down {
            return Dir::None;
        }
        Dir::from_vec(saved.vec() - self.attachment.vec())
    }

    /// Direction shown to the renderer and used for hitbox placement:
    /// the launch direction while fixed, the closest compass direction of
    /// the velocity while airborne.
    pub fn current_dir(&self) -> Dir {
        if self.fixed {
            self.launch_dir()
        } else {
            Dir::closest(self.speed)
        }
    }

    /// Directional input from the controller layer
    pub fn register_dir(&mut self, dir: Dir) {
        self.live_dir = dir;
        if !dir.is_none() {
            self.saved_dir = dir;
        }
    }

    /// Activate pressed: start loading when fixed
    pub fn press(&mut self, physics: &PhysicsConfig) {
        self.activate_held = true;
        if self.knocked_out || !self.fixed || self.loading {
            return;
        }
        self.start_loading(physics);
    }

    fn start_loading(&mut self, physics: &PhysicsConfig) {
        self.loading = true;
        self.loading_speed = physics.load_speed_init;
        self.prepare.start(physics.pre_jump_delay);
    }

    fn stop_loading(&mut self) {
        self.loading = false;
        self.loading_speed = 0.0;
        self.prepare.cancel();
    }

    /// Activate released: jump if the charge is ready. Loading ends either
    /// way. Returns true if the player launched.
    pub fn release(&mut self) -> bool {
        self.activate_held = false;
        if !self.loading {
            return false;
        }
        if self.prepared() && self.jump() {
            return true;
        }
        self.stop_loading();
        false
    }

    /// Activate released while jumps are frozen: drop the charge
    pub fn cancel_loading(&mut self) {
        self.activate_held = false;
        self.stop_loading();
    }

    /// Launch along the current launch direction with the accumulated
    /// charge. No-op (keeps loading) when there is no launch direction.
    pub fn jump(&mut self) -> bool {
        if self.knocked_out || !self.fixed {
            return false;
        }
        let dir = self.launch_dir();
        if dir.is_none() {
            return false;
        }
        self.speed = dir.unit() * self.loading_speed;
        log::debug!(
            "Player {} jumps {:?} at {:.0} px/s",
            self.id.number(),
            dir,
            self.loading_speed
        );
        self.fixed = false;
        self.attachment = Dir::None;
        self.stop_loading();
        true
    }

    /// Knock the player out: it drops off whatever it was gripping
    pub fn knock_out(&mut self) {
        self.knocked_out = true;
        self.fixed = false;
        self.attachment = Dir::None;
        self.stop_loading();
    }

    /// Attach to a border surface after wall resolution.
    /// A knocked-out player only sticks to the floor.
    pub fn attach(&mut self, surface: Dir, physics: &PhysicsConfig) {
        if self.knocked_out && surface != Dir::Down {
            // Slide: drop the velocity component into the surface
            let normal = surface.vec();
            if normal.x != 0 && self.speed.x.signum() as i32 == normal.x {
                self.speed.x = 0.0;
                self.remainder.x = 0.0;
            }
            if normal.y != 0 && self.speed.y.signum() as i32 == normal.y {
                self.speed.y = 0.0;
                self.remainder.y = 0.0;
            }
            self.fixed = false;
            self.attachment = Dir::None;
            return;
        }

        let landing = !self.fixed;
        self.fixed = true;
        self.attachment = surface;
        self.speed = Vec2::ZERO;
        self.remainder = Vec2::ZERO;
        if landing {
            log::debug!("Player {} lands on {:?}", self.id.number(), surface);
            self.saved_dir = self.live_dir;
            self.stop_loading();
            if self.activate_held && !self.knocked_out {
                self.start_loading(physics);
            }
        }
    }

    /// Integrate one tick of motion and return the integer displacement.
    ///
    /// `dt` is the scaled simulation delta (zero while the round is frozen).
    pub fn integrate(&mut self, dt: f32, physics: &PhysicsConfig) -> IVec2 {
        let acc = -self.speed * physics.air_friction + physics.gravity;
        self.speed += acc * dt;
        if self.fixed {
            self.speed = Vec2::ZERO;
        }

        if self.fixed && self.loading {
            if self.prepare.is_running() {
                self.prepare.advance(dt);
            } else {
                self.loading_speed = (self.loading_speed + physics.load_speed_rate * dt)
                    .min(physics.load_speed_max);
            }
        }

        let step = self.speed * dt + self.remainder;
        let int_step = step.round();
        self.remainder = step - int_step;
        int_step.as_ivec2()
    }
}
