//! Compass directions on the 3x3 grid
//!
//! Screen coordinates: `Up` is (0, -1), `Down` is (0, +1).

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// One of the 8 compass directions, or none
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Dir {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Dir {
    /// Fixed enumeration used for nearest-direction lookups.
    /// Earlier entries win ties.
    pub const COMPASS: [Dir; 8] = [
        Dir::Down,
        Dir::Left,
        Dir::Right,
        Dir::Up,
        Dir::DownLeft,
        Dir::DownRight,
        Dir::UpLeft,
        Dir::UpRight,
    ];

    /// Grid vector with components in {-1, 0, 1}
    pub const fn vec(self) -> IVec2 {
        match self {
            Dir::None => IVec2::new(0, 0),
            Dir::Up => IVec2::new(0, -1),
            Dir::Down => IVec2::new(0, 1),
            Dir::Left => IVec2::new(-1, 0),
            Dir::Right => IVec2::new(1, 0),
            Dir::UpLeft => IVec2::new(-1, -1),
            Dir::UpRight => IVec2::new(1, -1),
            Dir::DownLeft => IVec2::new(-1, 1),
            Dir::DownRight => IVec2::new(1, 1),
        }
    }

    /// Direction from the sign of each component
    pub fn from_vec(v: IVec2) -> Dir {
        match (v.x.signum(), v.y.signum()) {
            (0, -1) => Dir::Up,
            (0, 1) => Dir::Down,
            (-1, 0) => Dir::Left,
            (1, 0) => Dir::Right,
            (-1, -1) => Dir::UpLeft,
            (1, -1) => Dir::UpRight,
            (-1, 1) => Dir::DownLeft,
            (1, 1) => Dir::DownRight,
            _ => Dir::None,
        }
    }

    /// Unit-length vector (diagonals normalized)
    pub fn unit(self) -> Vec2 {
        self.vec().as_vec2().normalize_or_zero()
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == Dir::None
    }

    pub fn opposite(self) -> Dir {
        Dir::from_vec(-self.vec())
    }

    pub fn dot(self, other: Dir) -> i32 {
        self.vec().dot(other.vec())
    }

    /// Closest compass direction to an arbitrary vector.
    ///
    /// The vector is scaled onto the unit square (largest component = 1) and
    /// compared by Euclidean distance against every entry of [`Dir::COMPASS`].
    /// Zero vectors map to `Dir::None`.
    pub fn closest(v: Vec2) -> Dir {
        let scale = v.x.abs().max(v.y.abs());
        if scale <= f32::EPSILON || !scale.is_finite() {
            return Dir::None;
        }
        let n = v / scale;

        let mut best = Dir::None;
        let mut best_dist = f32::INFINITY;
        for dir in Dir::COMPASS {
            let dist = n.distance_squared(dir.vec().as_vec2());
            if dist < best_dist {
                best = dir;
                best_dist = dist;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_round_trip() {
        for dir in Dir::COMPASS {
            assert_eq!(Dir::from_vec(dir.vec()), dir);
        }
        assert_eq!(Dir::from_vec(IVec2::new(5, -3)), Dir::UpRight);
        assert_eq!(Dir::from_vec(IVec2::ZERO), Dir::None);
    }

    #[test]
    fn test_closest_direction() {
        assert_eq!(Dir::closest(Vec2::new(100.0, 2.0)), Dir::Right);
        assert_eq!(Dir::closest(Vec2::new(-30.0, -29.0)), Dir::UpLeft);
        assert_eq!(Dir::closest(Vec2::new(0.0, 400.0)), Dir::Down);
        assert_eq!(Dir::closest(Vec2::ZERO), Dir::None);
    }

    #[test]
    fn test_closest_tie_uses_enumeration_order() {
        // (1, 0.5) is equidistant from Right and DownRight; Right is listed first
        assert_eq!(Dir::closest(Vec2::new(2.0, 1.0)), Dir::Right);
        // (-0.5, -1) is equidistant from Up and UpLeft; Up is listed first
        assert_eq!(Dir::closest(Vec2::new(-1.0, -2.0)), Dir::Up);
    }

    #[test]
    fn test_unit_and_opposite() {
        assert!((Dir::UpLeft.unit().length() - 1.0).abs() < 1e-6);
        assert_eq!(Dir::Down.opposite(), Dir::Up);
        assert_eq!(Dir::DownRight.opposite(), Dir::UpLeft);
        assert_eq!(Dir::Down.dot(Dir::DownLeft), 1);
        assert_eq!(Dir::Down.dot(Dir::Up), -1);
    }
}
