//! Wall collision resolution against the arena border
//!
//! A player box that leaves the border is pushed back in one edge at a time,
//! smallest correction first. The last edge used becomes the surface the
//! player grips.

use glam::IVec2;

use super::dir::Dir;
use super::rect::Rect;

/// Border edges in tie-break priority order
pub const EDGE_PRIORITY: [Dir; 4] = [Dir::Down, Dir::Left, Dir::Right, Dir::Up];

/// Result of a wall resolution pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallContact {
    /// Corrected rectangle
    pub rect: Rect,
    /// Surface of the last applied correction, `None` if the input was
    /// already inside the border
    pub surface: Option<Dir>,
}

impl WallContact {
    pub fn untouched(rect: Rect) -> Self {
        Self {
            rect,
            surface: None,
        }
    }
}

/// Snap one edge of `rect` onto the matching border edge, if it pokes out
fn clamp_edge(rect: &Rect, border: &Rect, edge: Dir) -> Option<Rect> {
    match edge {
        Dir::Down if rect.bottom() > border.bottom() => Some(rect.with_bottom(border.bottom())),
        Dir::Left if rect.left() < border.left() => Some(rect.with_left(border.left())),
        Dir::Right if rect.right() > border.right() => Some(rect.with_right(border.right())),
        Dir::Up if rect.top() < border.top() => Some(rect.with_top(border.top())),
        _ => None,
    }
}

/// Push `rect` back inside `border`.
///
/// Each pass builds one candidate per penetrated edge, applies the candidate
/// with the smallest top-left displacement (ties go to [`EDGE_PRIORITY`]
/// order) and retires that edge. Corner penetrations therefore take two
/// passes. A rectangle that cannot fit is an invariant violation: it panics
/// in debug builds and is left where it is otherwise.
pub fn resolve_walls(rect: Rect, border: &Rect) -> WallContact {
    let mut contact = WallContact::untouched(rect);
    let mut available = [true; EDGE_PRIORITY.len()];

    while !border.contains(&contact.rect) {
        let mut best: Option<(usize, Rect, f32)> = None;
        for (i, &edge) in EDGE_PRIORITY.iter().enumerate() {
            if !available[i] {
                continue;
            }
            let Some(candidate) = clamp_edge(&contact.rect, border, edge) else {
                continue;
            };
            let moved: IVec2 = candidate.topleft() - contact.rect.topleft();
            let distance = moved.as_vec2().length();
            if best.is_none_or(|(_, _, d)| distance < d) {
                best = Some((i, candidate, distance));
            }
        }

        let Some((i, candidate, _)) = best else {
            log::error!(
                "Cannot resolve {:?} into border {:?}, leaving it in place",
                contact.rect,
                border
            );
            debug_assert!(false, "wall resolution failed for {:?}", contact.rect);
            return WallContact::untouched(rect);
        };

        available[i] = false;
        contact.rect = candidate;
        contact.surface = Some(EDGE_PRIORITY[i]);
    }

    contact
}
