//! Axis-aligned rectangle geometry
//!
//! Rectangles are stored as top-left corner plus size, screen coordinates
//! (y grows downward). Overlap is strict: rectangles that only share an edge
//! do not collide, so a body resting on a wall is not "inside" it.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            pos,
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Same size, moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            pos: self.pos + offset,
            size: self.size,
        }
    }

    /// Strict AABB overlap test
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// True if this rectangle overlaps any rectangle in `others`
    pub fn collides_any(&self, others: &[Rect]) -> bool {
        others.iter().any(|r| self.overlaps(r))
    }

    /// Point test, edges inclusive so clipped ray endpoints count as hits
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Clip the segment `start..end` to this rectangle (Liang-Barsky)
    ///
    /// Returns the entry and exit points in segment order, or `None` if the
    /// segment misses the rectangle entirely. Both points are clamped onto
    /// the rectangle so `contains_point` always accepts them.
    pub fn clip_line(&self, start: Vec2, end: Vec2) -> Option<(Vec2, Vec2)> {
        let d = end - start;
        let mut t0 = 0.0_f32;
        let mut t1 = 1.0_f32;

        let edges = [
            (-d.x, start.x - self.left()),
            (d.x, self.right() - start.x),
            (-d.y, start.y - self.top()),
            (d.y, self.bottom() - start.y),
        ];

        for (p, q) in edges {
            if p == 0.0 {
                // Parallel to this edge: reject if outside it
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                if t > t1 {
                    return None;
                }
                t0 = t0.max(t);
            } else {
                if t < t0 {
                    return None;
                }
                t1 = t1.min(t);
            }
        }

        let min = self.pos;
        let max = Vec2::new(self.right(), self.bottom());
        Some((
            (start + d * t0).clamp(min, max),
            (start + d * t1).clamp(min, max),
        ))
    }
}
