//! Inter-player hit detection
//!
//! The player box is split into a 3x3 grid of cells. Whichever cell faces the
//! direction of travel is the "legs": the striking part. The opposite cell is
//! the head, the middle one the body. Only airborne, conscious players have
//! legs; a fixed player cannot strike.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::dir::Dir;
use super::mask::{MaskSource, masks_overlap};
use super::player::{Player, PlayerId};
use super::rect::Rect;

/// Grid cell of `rect` in direction `dir` (`Dir::None` is the middle),
/// sized `ratio` of the box on each axis
pub fn hitbox_cell(rect: &Rect, dir: Dir, ratio: f32) -> Rect {
    let w = ((rect.w as f32 * ratio).round() as i32).clamp(1, rect.w.max(1));
    let h = ((rect.h as f32 * ratio).round() as i32).clamp(1, rect.h.max(1));
    let d = dir.vec();
    let x = rect.x + (rect.w - w) * (d.x + 1) / 2;
    let y = rect.y + (rect.h - h) * (d.y + 1) / 2;
    Rect::new(x, y, w, h)
}

/// Hitboxes of a player at its current rect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hitboxes {
    /// Striking cell; absent while fixed or knocked out
    pub legs: Option<Rect>,
    pub head: Rect,
    pub body: Rect,
}

impl Hitboxes {
    pub fn of(player: &Player, ratio: f32) -> Self {
        let facing = if player.fixed {
            player.attachment
        } else {
            Dir::closest(player.speed)
        };
        // Resting in mid-air (zero speed) still falls feet first
        let facing = if facing.is_none() { Dir::Down } else { facing };

        let legs = (player.airborne() && !player.knocked_out)
            .then(|| hitbox_cell(&player.rect, facing, ratio));
        Self {
            legs,
            head: hitbox_cell(&player.rect, facing.opposite(), ratio),
            body: hitbox_cell(&player.rect, Dir::None, ratio),
        }
    }

    pub fn legs_center(&self) -> Option<Vec2> {
        self.legs.map(|r| r.center_f())
    }
}

/// Outcome of one lock-step sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HitReport {
    /// `hits[i]`: player `i` struck the other player's body
    pub hits: [bool; 2],
    /// Both players' legs met
    pub tie: bool,
}

impl HitReport {
    pub fn is_collision(&self) -> bool {
        self.tie || self.hits.iter().any(|&h| h)
    }

    /// Player who struck without being struck back
    pub fn striker(&self) -> Option<PlayerId> {
        if self.tie {
            return None;
        }
        match self.hits {
            [true, false] => Some(PlayerId::One),
            [false, true] => Some(PlayerId::Two),
            _ => None,
        }
    }

    /// A collision in which nobody scores
    pub fn is_draw(&self) -> bool {
        self.is_collision() && self.striker().is_none()
    }
}

/// Does `striker`'s legs pixel-overlap `target`'s body image?
fn strikes(
    striker: &Player,
    legs: Rect,
    target: &Player,
    masks: &(impl MaskSource + ?Sized),
) -> bool {
    let Some(area) = legs.clip(&target.rect) else {
        return false;
    };
    masks_overlap(
        area,
        masks.body_mask(striker),
        striker.rect.topleft(),
        masks.body_mask(target),
        target.rect.topleft(),
    )
}

/// Classify the contact between two players at their current rects
pub fn detect(
    one: &Player,
    two: &Player,
    masks: &(impl MaskSource + ?Sized),
    ratio: f32,
) -> HitReport {
    let boxes = [Hitboxes::of(one, ratio), Hitboxes::of(two, ratio)];

    if let (Some(a), Some(b)) = (boxes[0].legs, boxes[1].legs) {
        if a.intersects(&b) {
            return HitReport {
                hits: [false, false],
                tie: true,
            };
        }
    }

    let hits = [
        boxes[0].legs.is_some_and(|legs| strikes(one, legs, two, masks)),
        boxes[1].legs.is_some_and(|legs| strikes(two, legs, one, masks)),
    ];
    HitReport { hits, tie: false }
}
