//! Trajectory sub-stepping
//!
//! A tick's displacement can be dozens of pixels at full jump charge, enough
//! to pass clean through the opponent. The stepper breaks it into unit moves
//! so every lattice cell the box crosses gets sampled.

use super::dir::Dir;
use super::rect::Rect;

/// Intermediate rectangles from `start` to `end`, both included.
///
/// Walks one pixel at a time (diagonal moves count as one step) along the
/// compass direction closest to the remaining offset. The walk shrinks the
/// Chebyshev distance by one per step, so the result holds exactly
/// `chebyshev(start, end) + 1` rectangles. Identical inputs give `[start]`.
pub fn trajectory(start: Rect, end: Rect) -> Vec<Rect> {
    debug_assert_eq!(start.size(), end.size(), "trajectory endpoints differ in size");
    let target = end.topleft();
    let delta = target - start.topleft();
    let mut steps = Vec::with_capacity(delta.x.abs().max(delta.y.abs()) as usize + 1);

    let mut current = start;
    steps.push(current);
    while current.topleft() != target {
        let remaining = target - current.topleft();
        let dir = Dir::closest(remaining.as_vec2());
        current = current.translate(dir.vec());
        steps.push(current);
    }
    steps
}

/// Index into a sequence of `len` samples for lock-step time `i` out of
/// `max_index`, by nearest-index interpolation
pub fn resample_index(i: usize, len: usize, max_index: usize) -> usize {
    if max_index == 0 || len <= 1 {
        return 0;
    }
    let scaled = (i * (len - 1)) as f32 / max_index as f32;
    (scaled.round() as usize).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    #[test]
    fn test_degenerate_is_single_step() {
        let r = Rect::new(5, 5, 10, 10);
        assert_eq!(trajectory(r, r), vec![r]);
    }

    #[test]
    fn test_straight_line() {
        let start = Rect::new(0, 0, 10, 10);
        let steps = trajectory(start, start.translate(IVec2::new(5, 0)));
        let xs: Vec<i32> = steps.iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![0, 1, 2, 3, 4, 5]);
        assert!(steps.iter().all(|r| r.y == 0));
    }

    #[test]
    fn test_mixed_direction_walk() {
        let start = Rect::new(0, 0, 10, 10);
        let end = start.translate(IVec2::new(6, -2));
        let steps = trajectory(start, end);
        assert_eq!(steps.len(), 7);
        assert_eq!(steps.first(), Some(&start));
        assert_eq!(steps.last(), Some(&end));
        // Every step is a unit king move
        for pair in steps.windows(2) {
            let d = pair[1].topleft() - pair[0].topleft();
            assert!(d.x.abs() <= 1 && d.y.abs() <= 1 && d != IVec2::ZERO);
        }
    }

    #[test]
    fn test_fast_move_samples_the_middle() {
        // A 60px jump across a 30px opponent: the endpoints miss it, a step hits it
        let start = Rect::new(0, 100, 30, 30);
        let end = start.translate(IVec2::new(60, 0));
        let opponent = Rect::new(38, 100, 14, 30);
        assert!(!start.intersects(&opponent) && !end.intersects(&opponent));
        let steps = trajectory(start, end);
        assert!(steps.iter().any(|r| r.intersects(&opponent)));
    }

    #[test]
    fn test_resample_index() {
        assert_eq!(resample_index(0, 1, 10), 0);
        assert_eq!(resample_index(10, 1, 10), 0);
        assert_eq!(resample_index(0, 3, 10), 0);
        assert_eq!(resample_index(5, 3, 10), 1);
        assert_eq!(resample_index(10, 3, 10), 2);
        assert_eq!(resample_index(7, 11, 10), 7);
        assert_eq!(resample_index(0, 5, 0), 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn length_is_chebyshev_plus_one(dx in -80i32..80, dy in -80i32..80) {
                let start = Rect::new(100, 100, 30, 30);
                let end = start.translate(IVec2::new(dx, dy));
                let steps = trajectory(start, end);
                prop_assert_eq!(steps.len(), dx.abs().max(dy.abs()) as usize + 1);
                prop_assert_eq!(steps[0], start);
                prop_assert_eq!(*steps.last().unwrap(), end);
            }
        }
    }
}
