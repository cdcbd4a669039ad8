//! Segment intersection and axis-aligned rectangles
//!
//! The collision resolver never computes contact points. It only asks which
//! edge of a rectangle the ball's travel segment crossed, so all we need is an
//! exact orientation-based intersection test.

use glam::Vec2;

/// Turn direction of an ordered point triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Orientation of `(p1, p2, p3)`, from the sign of `(p2 - p1) x (p3 - p2)`.
///
/// Zero is exact: there is no epsilon, so nearly-collinear points are
/// classified by the sign of whatever the float arithmetic produces.
pub fn orientation(p1: Vec2, p2: Vec2, p3: Vec2) -> Orientation {
    let val = (p2.y - p1.y) * (p3.x - p2.x) - (p2.x - p1.x) * (p3.y - p2.y);

    if val == 0.0 {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// True if `p2` lies inside the bounding box spanned by `p1` and `p3`.
///
/// Only meaningful once the three points are known to be collinear.
pub fn on_segment(p1: Vec2, p2: Vec2, p3: Vec2) -> bool {
    p2.x <= p1.x.max(p3.x)
        && p2.x >= p1.x.min(p3.x)
        && p2.y <= p1.y.max(p3.y)
        && p2.y >= p1.y.min(p3.y)
}

/// Whether segment `a1-a2` and segment `b1-b2` share at least one point
pub fn segments_intersect(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    let o1 = orientation(a1, a2, b1);
    let o2 = orientation(a1, a2, b2);
    let o3 = orientation(b1, b2, a1);
    let o4 = orientation(b1, b2, a2);

    // General case: each segment straddles the other's line
    if o1 != o2 && o3 != o4 {
        return true;
    }

    // Collinear endpoints that actually sit on the other segment
    (o1 == Orientation::Collinear && on_segment(a1, b1, a2))
        || (o2 == Orientation::Collinear && on_segment(a1, b2, a2))
        || (o3 == Orientation::Collinear && on_segment(b1, a1, b2))
        || (o4 == Orientation::Collinear && on_segment(b1, a2, b2))
}

/// A line segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn intersects(&self, other: &Segment) -> bool {
        segments_intersect(self.start, self.end, other.start, other.end)
    }
}

/// Axis-aligned rectangle in playfield pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
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

    /// Inclusive overlap on both axes (touching edges count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() >= other.left()
            && self.left() <= other.right()
            && self.bottom() >= other.top()
            && self.top() <= other.bottom()
    }

    pub fn top_edge(&self) -> Segment {
        Segment::new(
            Vec2::new(self.left(), self.top()),
            Vec2::new(self.right(), self.top()),
        )
    }

    pub fn bottom_edge(&self) -> Segment {
        Segment::new(
            Vec2::new(self.left(), self.bottom()),
            Vec2::new(self.right(), self.bottom()),
        )
    }

    pub fn left_edge(&self) -> Segment {
        Segment::new(
            Vec2::new(self.left(), self.top()),
            Vec2::new(self.left(), self.bottom()),
        )
    }

    pub fn right_edge(&self) -> Segment {
        Segment::new(
            Vec2::new(self.right(), self.top()),
            Vec2::new(self.right(), self.bottom()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn test_orientation() {
        assert_eq!(orientation(v(0.0, 0.0), v(1.0, 1.0), v(2.0, 2.0)), Orientation::Collinear);
        // Screen coordinates: y grows downward
        assert_eq!(orientation(v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0)), Orientation::CounterClockwise);
        assert_eq!(orientation(v(0.0, 0.0), v(1.0, 0.0), v(1.0, -1.0)), Orientation::Clockwise);
    }

    #[test]
    fn test_on_segment() {
        assert!(on_segment(v(0.0, 0.0), v(1.0, 1.0), v(2.0, 2.0)));
        assert!(on_segment(v(0.0, 0.0), v(2.0, 2.0), v(2.0, 2.0)));
        assert!(!on_segment(v(0.0, 0.0), v(3.0, 3.0), v(2.0, 2.0)));
    }

    #[test]
    fn test_crossing_segments() {
        assert!(segments_intersect(v(0.0, 0.0), v(10.0, 10.0), v(0.0, 10.0), v(10.0, 0.0)));
        assert!(!segments_intersect(v(0.0, 0.0), v(4.0, 4.0), v(0.0, 10.0), v(10.0, 10.0)));
    }

    #[test]
    fn test_touching_endpoint_counts() {
        // Vertical travel segment ending exactly on a horizontal edge
        assert!(segments_intersect(v(5.0, 0.0), v(5.0, 10.0), v(0.0, 10.0), v(10.0, 10.0)));
    }

    #[test]
    fn test_collinear_overlap_and_gap() {
        assert!(segments_intersect(v(0.0, 0.0), v(5.0, 0.0), v(3.0, 0.0), v(8.0, 0.0)));
        assert!(!segments_intersect(v(0.0, 0.0), v(2.0, 0.0), v(3.0, 0.0), v(8.0, 0.0)));
    }

    #[test]
    fn test_rect_edges_and_overlap() {
        let r = Rect::new(v(10.0, 20.0), v(30.0, 5.0));
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 25.0);
        assert_eq!(r.bottom_edge(), Segment::new(v(10.0, 25.0), v(40.0, 25.0)));
        assert_eq!(r.left_edge(), Segment::new(v(10.0, 20.0), v(10.0, 25.0)));

        assert!(r.overlaps(&Rect::new(v(40.0, 25.0), v(5.0, 5.0))));
        assert!(!r.overlaps(&Rect::new(v(41.0, 25.0), v(5.0, 5.0))));
    }

    proptest! {
        #[test]
        fn intersection_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            cx in -500.0f32..500.0, cy in -500.0f32..500.0,
            dx in -500.0f32..500.0, dy in -500.0f32..500.0,
        ) {
            let (a1, a2, b1, b2) = (v(ax, ay), v(bx, by), v(cx, cy), v(dx, dy));
            prop_assert_eq!(
                segments_intersect(a1, a2, b1, b2),
                segments_intersect(b1, b2, a1, a2)
            );
        }

        #[test]
        fn grid_aligned_symmetry(
            pts in proptest::collection::vec((-8i32..8, -8i32..8), 4)
        ) {
            // Small integer grids hit the collinear branches often
            let p: Vec<Vec2> = pts.iter().map(|&(x, y)| v(x as f32, y as f32)).collect();
            prop_assert_eq!(
                segments_intersect(p[0], p[1], p[2], p[3]),
                segments_intersect(p[2], p[3], p[0], p[1])
            );
        }
    }
}
