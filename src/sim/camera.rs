//! Camera and slow-motion direction
//!
//! When a player's legs come close to the opponent's head or body, time slows
//! down and the camera closes in on both players. The camera itself moves
//! toward its target at a bounded linear speed and snaps once within a step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hit::Hitboxes;
use super::player::Player;
use super::rect::Rect;

/// A camera easing toward a target rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Full view
    base: Rect,
    target: Rect,
    center: Vec2,
    size: Vec2,
    /// Pixels per second, applied to center and size independently
    speed: f32,
}

impl Camera {
    pub fn new(base: Rect, speed: f32) -> Self {
        Self {
            base,
            target: base,
            center: base.center_f(),
            size: base.size().as_vec2(),
            speed,
        }
    }

    pub fn target(&self) -> Rect {
        self.target
    }

    /// Aim at the full view; `force` jumps there immediately
    pub fn reset(&mut self, force: bool) {
        self.target = self.base;
        if force {
            self.center = self.base.center_f();
            self.size = self.base.size().as_vec2();
        }
    }

    pub fn set_target(&mut self, rect: Rect) {
        self.target = rect;
    }

    /// Current view, in whole pixels
    pub fn rect(&self) -> Rect {
        let w = self.size.x.round() as i32;
        let h = self.size.y.round() as i32;
        let x = (self.center.x - self.size.x / 2.0).round() as i32;
        let y = (self.center.y - self.size.y / 2.0).round() as i32;
        Rect::new(x, y, w, h)
    }

    pub fn is_settled(&self) -> bool {
        self.center == self.target.center_f() && self.size == self.target.size().as_vec2()
    }

    /// Move toward the target by at most `speed * dt` on each of width,
    /// height and both center coordinates
    pub fn update(&mut self, dt: f32) {
        let step = self.speed * dt;
        let target_center = self.target.center_f();
        let target_size = self.target.size().as_vec2();
        self.center.x = approach(self.center.x, target_center.x, step);
        self.center.y = approach(self.center.y, target_center.y, step);
        self.size.x = approach(self.size.x, target_size.x, step);
        self.size.y = approach(self.size.y, target_size.y, step);
    }
}

/// Move `current` toward `target` by at most `step`, snapping when close
fn approach(current: f32, target: f32, step: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= step {
        target
    } else {
        current + delta.signum() * step
    }
}

/// What the camera should be doing this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Full view, normal speed
    Wide,
    /// Zoom on the given rectangle, slow motion
    Close(Rect),
}

/// Smallest distance from either player's legs to the other's head or body.
/// `None` when neither player has legs.
pub fn proximity(one: &Player, two: &Player, ratio: f32) -> Option<f32> {
    let boxes = [Hitboxes::of(one, ratio), Hitboxes::of(two, ratio)];
    let mut best: Option<f32> = None;
    for (striker, target) in [(0, 1), (1, 0)] {
        let Some(legs) = boxes[striker].legs_center() else {
            continue;
        };
        for spot in [boxes[target].head, boxes[target].body] {
            let d = legs.distance(spot.center_f());
            best = Some(best.map_or(d, |b| b.min(d)));
        }
    }
    best
}

/// Both players, padded to at least half the view on each axis, kept inside
/// the view
pub fn close_up(one: &Rect, two: &Rect, bounds: &Rect) -> Rect {
    one.union(two)
        .grow_to(bounds.size() / 2)
        .clamp_within(bounds)
}

/// Decide the focus from the players' proximity
pub fn focus(
    one: &Player,
    two: &Player,
    bounds: &Rect,
    threshold: f32,
    ratio: f32,
    paused: bool,
) -> Focus {
    let near = proximity(one, two, ratio).is_some_and(|d| d <= threshold);
    if near || paused {
        Focus::Close(close_up(&one.rect, &two.rect, bounds))
    } else {
        Focus::Wide
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::HITBOX_RATIO;
    use crate::sim::dir::Dir;
    use crate::sim::player::PlayerId;
    use glam::IVec2;

    fn bounds() -> Rect {
        Rect::new(0, 0, 640, 360)
    }

    #[test]
    fn test_camera_converges_exactly() {
        let mut camera = Camera::new(bounds(), 600.0);
        camera.set_target(Rect::new(100, 50, 320, 180));
        for _ in 0..600 {
            camera.update(1.0 / 60.0);
        }
        assert!(camera.is_settled());
        assert_eq!(camera.rect(), Rect::new(100, 50, 320, 180));

        camera.reset(false);
        for _ in 0..600 {
            camera.update(1.0 / 60.0);
        }
        assert_eq!(camera.rect(), bounds());
    }

    #[test]
    fn test_camera_never_overshoots() {
        let mut camera = Camera::new(bounds(), 600.0);
        camera.set_target(Rect::new(0, 0, 320, 180));
        let mut last_w = camera.rect().w;
        for _ in 0..120 {
            camera.update(1.0 / 60.0);
            let w = camera.rect().w;
            assert!(w <= last_w && w >= 320);
            last_w = w;
        }
    }

    #[test]
    fn test_force_reset() {
        let mut camera = Camera::new(bounds(), 10.0);
        camera.set_target(Rect::new(0, 0, 320, 180));
        camera.update(1.0);
        camera.reset(true);
        assert_eq!(camera.rect(), bounds());
        assert!(camera.is_settled());
    }

    #[test]
    fn test_close_up_padding() {
        let r = close_up(&Rect::new(600, 300, 30, 30), &Rect::new(580, 310, 30, 30), &bounds());
        assert_eq!(r.size(), IVec2::new(320, 180));
        assert!(bounds().contains(&r));
        assert_eq!((r.right(), r.bottom()), (640, 360));
    }

    #[test]
    fn test_focus_follows_proximity() {
        let mut one = Player::new(PlayerId::One, Rect::new(100, 60, 30, 30));
        one.fixed = false;
        one.attachment = Dir::None;
        one.speed = Vec2::new(0.0, 300.0);
        let two = Player::new(PlayerId::Two, Rect::new(100, 95, 30, 30));
        // Legs center (115, 85), Two's head center (115, 100): 15px apart
        assert!(matches!(
            focus(&one, &two, &bounds(), 16.0, HITBOX_RATIO, false),
            Focus::Close(_)
        ));

        let far = Player::new(PlayerId::Two, Rect::new(400, 95, 30, 30));
        assert_eq!(focus(&one, &far, &bounds(), 16.0, HITBOX_RATIO, false), Focus::Wide);
        // A hit pause holds the close-up regardless of distance
        assert!(matches!(
            focus(&one, &far, &bounds(), 16.0, HITBOX_RATIO, true),
            Focus::Close(_)
        ));
    }

    #[test]
    fn test_both_fixed_has_no_proximity() {
        let one = Player::new(PlayerId::One, Rect::new(100, 100, 30, 30));
        let two = Player::new(PlayerId::Two, Rect::new(100, 100, 30, 30));
        assert_eq!(proximity(&one, &two, HITBOX_RATIO), None);
    }
}
