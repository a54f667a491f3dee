//! Integer axis-aligned rectangles
//!
//! Pixel-space boxes with the right/bottom edges exclusive:
//! - `right() = x + w`, `bottom() = y + h`
//! - y grows downward (screen coordinates)

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in integer pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: IVec2, size: IVec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn topleft(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.w, self.h)
    }

    /// Exact center
    #[inline]
    pub fn center_f(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 + self.w as f32 / 2.0,
            self.y as f32 + self.h as f32 / 2.0,
        )
    }

    /// Rectangle with zero or negative area
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Same size, moved by `offset`
    #[inline]
    pub fn translate(&self, offset: IVec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }

    pub fn with_left(&self, left: i32) -> Self {
        Self { x: left, ..*self }
    }

    pub fn with_right(&self, right: i32) -> Self {
        Self {
            x: right - self.w,
            ..*self
        }
    }

    pub fn with_top(&self, top: i32) -> Self {
        Self { y: top, ..*self }
    }

    pub fn with_bottom(&self, bottom: i32) -> Self {
        Self {
            y: bottom - self.h,
            ..*self
        }
    }

    /// Whether `other` lies entirely inside this rectangle (edges may touch)
    pub fn contains(&self, other: &Rect) -> bool {
        self.left() <= other.left()
            && self.top() <= other.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Whether the two rectangles share a region of positive area
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Overlapping region, if any
    pub fn clip(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Grow symmetrically around the center until at least `min_size`
    pub fn grow_to(&self, min_size: IVec2) -> Rect {
        let w = self.w.max(min_size.x);
        let h = self.h.max(min_size.y);
        let dx = w - self.w;
        let dy = h - self.h;
        Rect::new(self.x - dx / 2, self.y - dy / 2, w, h)
    }

    /// Move (and shrink if needed) so the rectangle fits inside `bounds`
    pub fn clamp_within(&self, bounds: &Rect) -> Rect {
        let w = self.w.min(bounds.w);
        let h = self.h.min(bounds.h);
        let x = self.x.clamp(bounds.left(), bounds.right() - w);
        let y = self.y.clamp(bounds.top(), bounds.bottom() - h);
        Rect::new(x, y, w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(r.right(), 40);
        assert_eq!(r.bottom(), 60);
        assert_eq!(r.center_f(), Vec2::new(25.0, 40.0));
        assert_eq!(r.with_bottom(100).y, 60);
        assert_eq!(r.with_right(100).x, 70);
    }

    #[test]
    fn test_contains_touching_edges() {
        let border = Rect::new(0, 0, 100, 100);
        assert!(border.contains(&Rect::new(0, 0, 100, 100)));
        assert!(border.contains(&Rect::new(70, 70, 30, 30)));
        assert!(!border.contains(&Rect::new(71, 70, 30, 30)));
        assert!(!border.contains(&Rect::new(-1, 0, 30, 30)));
    }

    #[test]
    fn test_intersects_requires_area() {
        let a = Rect::new(0, 0, 10, 10);
        // Touching edge only
        assert!(!a.intersects(&Rect::new(10, 0, 10, 10)));
        assert!(a.intersects(&Rect::new(9, 9, 10, 10)));
        // Empty rectangles never intersect
        assert!(!a.intersects(&Rect::new(5, 5, 0, 0)));
    }

    #[test]
    fn test_clip_and_union() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 6, 10, 10);
        assert_eq!(a.clip(&b), Some(Rect::new(5, 6, 5, 4)));
        assert_eq!(a.union(&b), Rect::new(0, 0, 15, 16));
        assert_eq!(a.clip(&Rect::new(20, 20, 1, 1)), None);
    }

    #[test]
    fn test_grow_and_clamp() {
        let bounds = Rect::new(0, 0, 640, 360);
        let grown = Rect::new(600, 10, 20, 20).grow_to(IVec2::new(320, 180));
        assert_eq!(grown.size(), IVec2::new(320, 180));
        let clamped = grown.clamp_within(&bounds);
        assert!(bounds.contains(&clamped));
        assert_eq!(clamped.right(), 640);
        assert_eq!(clamped.top(), 0);

        let huge = Rect::new(-50, -50, 1000, 1000).clamp_within(&bounds);
        assert_eq!(huge, bounds);
    }
}
