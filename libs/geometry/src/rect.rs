//! Axis-aligned rectangles.

use serde::{Deserialize, Serialize};

use crate::bbox::Bbox;
use crate::dir::Dir;
use crate::point::Point;
use crate::side::Side;
use crate::transform::{TransformMut, Transformation, TranslateMut};

/// An axis-aligned rectangle, specified by lower-left and upper-right corners.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq, PartialOrd)]
pub struct Rect {
    /// The lower-left corner.
    p0: Point,
    /// The upper-right corner.
    p1: Point,
}

impl Rect {
    /// Creates a rectangle from all 4 sides (left, bottom, right, top).
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let rect = Rect::from_sides(15., 20., 30., 40.);
    /// assert_eq!(rect.left(), 15.);
    /// assert_eq!(rect.bot(), 20.);
    /// assert_eq!(rect.right(), 30.);
    /// assert_eq!(rect.top(), 40.);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `left > right` or if `bot > top`.
    /// If you want sides to be sorted for you, use [`Rect::new`] instead.
    pub fn from_sides(left: f64, bot: f64, right: f64, top: f64) -> Self {
        assert!(
            left <= right,
            "Rect::from_sides requires that left ({left}) <= right ({right})"
        );
        assert!(
            bot <= top,
            "Rect::from_sides requires that bot ({bot}) <= top ({top})"
        );
        Self {
            p0: Point::new(left, bot),
            p1: Point::new(right, top),
        }
    }

    /// Creates a rectangle from two corners, sorting coordinates as needed.
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            p0: Point::new(a.x.min(b.x), a.y.min(b.y)),
            p1: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Creates a zero-area rectangle containing the given point.
    #[inline]
    pub const fn from_point(p: Point) -> Self {
        Self { p0: p, p1: p }
    }

    /// The lowest x-coordinate (left edge) of the rectangle.
    #[inline]
    pub const fn left(&self) -> f64 {
        self.p0.x
    }

    /// The lowest y-coordinate (bottom edge) of the rectangle.
    #[inline]
    pub const fn bot(&self) -> f64 {
        self.p0.y
    }

    /// The highest x-coordinate (right edge) of the rectangle.
    #[inline]
    pub const fn right(&self) -> f64 {
        self.p1.x
    }

    /// The highest y-coordinate (top edge) of the rectangle.
    #[inline]
    pub const fn top(&self) -> f64 {
        self.p1.y
    }

    /// The coordinate of the given side.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let rect = Rect::from_sides(15., 20., 30., 40.);
    /// assert_eq!(rect.side(Side::Left), 15.);
    /// assert_eq!(rect.side(Side::Top), 40.);
    /// ```
    pub const fn side(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.left(),
            Side::Bot => self.bot(),
            Side::Right => self.right(),
            Side::Top => self.top(),
        }
    }

    /// The width (horizontal extent) of the rectangle.
    #[inline]
    pub fn width(&self) -> f64 {
        self.right() - self.left()
    }

    /// The height (vertical extent) of the rectangle.
    #[inline]
    pub fn height(&self) -> f64 {
        self.top() - self.bot()
    }

    /// The length of this rectangle in the given direction.
    pub fn span(&self, dir: Dir) -> f64 {
        match dir {
            Dir::Horiz => self.width(),
            Dir::Vert => self.height(),
        }
    }

    /// The area of the rectangle.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// The center point of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(
            (self.p0.x + self.p1.x) / 2.,
            (self.p0.y + self.p1.y) / 2.,
        )
    }

    /// The smallest rectangle containing both `self` and `other`.
    pub fn union(self, other: Rect) -> Self {
        Self {
            p0: Point::new(self.p0.x.min(other.p0.x), self.p0.y.min(other.p0.y)),
            p1: Point::new(self.p1.x.max(other.p1.x), self.p1.y.max(other.p1.y)),
        }
    }

    /// The smallest rectangle containing `self` and `other`, where either may
    /// be empty (`None`).
    pub fn union_option(a: Option<Rect>, b: Option<Rect>) -> Option<Rect> {
        match (a, b) {
            (Some(a), Some(b)) => Some(a.union(b)),
            (Some(a), None) => Some(a),
            (None, b) => b,
        }
    }

    /// Expands the rectangle by `amount` on all four sides.
    pub fn expand_all(self, amount: f64) -> Self {
        Self {
            p0: self.p0 - Point::new(amount, amount),
            p1: self.p1 + Point::new(amount, amount),
        }
    }

    /// Returns `true` if `self` and `other` overlap with positive area.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.bot() < other.top()
            && other.bot() < self.top()
    }
}

impl Bbox for Rect {
    fn bbox(&self) -> Option<Rect> {
        Some(*self)
    }
}

impl TranslateMut for Rect {
    fn translate_mut(&mut self, p: Point) {
        self.p0.translate_mut(p);
        self.p1.translate_mut(p);
    }
}

impl TransformMut for Rect {
    fn transform_mut(&mut self, trans: Transformation) {
        // A transformed rect stays axis-aligned only for right-angle
        // rotations; take the bounding box of the mapped corners.
        let corners = [
            trans.apply(self.p0),
            trans.apply(self.p1),
            trans.apply(Point::new(self.p0.x, self.p1.y)),
            trans.apply(Point::new(self.p1.x, self.p0.y)),
        ];
        let mut out = Rect::from_point(corners[0]);
        for c in &corners[1..] {
            out = out.union(Rect::from_point(*c));
        }
        *self = out;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_and_overlap_work() {
        let a = Rect::from_sides(0., 0., 100., 200.);
        let b = Rect::from_sides(-50., 20., 90., 250.);
        assert_eq!(a.union(b), Rect::from_sides(-50., 0., 100., 250.));
        assert!(a.overlaps(&b));
        let c = Rect::from_sides(200., 0., 300., 10.);
        assert!(!a.overlaps(&c));
        // Touching edges do not count as overlap.
        let d = Rect::from_sides(100., 0., 120., 10.);
        assert!(!a.overlaps(&d));
    }

    #[test]
    fn transform_keeps_bounding_box_of_corners() {
        use crate::transform::Transform;
        let r = Rect::from_sides(0., 0., 100., 200.);
        let rot = r.transform(Transformation::rotate(90.));
        assert!((rot.left() - -200.).abs() < 1e-9);
        assert!((rot.right() - 0.).abs() < 1e-9);
        assert!((rot.top() - 100.).abs() < 1e-9);
        assert!((rot.bot() - 0.).abs() < 1e-9);
    }
}
