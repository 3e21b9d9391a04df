//! Polygons with real-valued vertex coordinates.

use serde::{Deserialize, Serialize};

use crate::bbox::Bbox;
use crate::point::Point;
use crate::rect::Rect;
use crate::transform::{TransformMut, Transformation, TranslateMut};

/// A polygon, represented by its ordered vertices.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Creates a polygon with the given vertices.
    pub fn from_verts(vec: Vec<Point>) -> Self {
        Self { points: vec }
    }

    /// The vertices of the polygon.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the polygon has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The area enclosed by the polygon, via the shoelace formula.
    ///
    /// Always non-negative, regardless of vertex winding.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let square = Polygon::from_verts(vec![
    ///     Point::new(0., 0.),
    ///     Point::new(2., 0.),
    ///     Point::new(2., 2.),
    ///     Point::new(0., 2.),
    /// ]);
    /// assert_eq!(square.area(), 4.);
    /// ```
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.;
        }
        let mut acc = 0.;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            acc += a.x * b.y - b.x * a.y;
        }
        acc.abs() / 2.
    }

    /// Snaps every vertex to the nearest multiple of `grid`.
    pub fn snap_to_grid(&self, grid: f64) -> Self {
        Self {
            points: self.points.iter().map(|p| p.snap_to_grid(grid)).collect(),
        }
    }
}

impl Bbox for Polygon {
    fn bbox(&self) -> Option<Rect> {
        let mut iter = self.points.iter();
        let first = iter.next()?;
        let mut bbox = Rect::from_point(*first);
        for p in iter {
            bbox = bbox.union(Rect::from_point(*p));
        }
        Some(bbox)
    }
}

impl TranslateMut for Polygon {
    fn translate_mut(&mut self, p: Point) {
        self.points.translate_mut(p);
    }
}

impl TransformMut for Polygon {
    fn transform_mut(&mut self, trans: Transformation) {
        self.points.transform_mut(trans);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shoelace_area_is_winding_independent() {
        let cw = Polygon::from_verts(vec![
            Point::new(0., 0.),
            Point::new(0., 3.),
            Point::new(4., 3.),
            Point::new(4., 0.),
        ]);
        assert_eq!(cw.area(), 12.);
        let tri = Polygon::from_verts(vec![
            Point::new(0., 0.),
            Point::new(4., 0.),
            Point::new(0., 2.),
        ]);
        assert_eq!(tri.area(), 4.);
    }

    #[test]
    fn degenerate_polygons_have_zero_area() {
        assert_eq!(Polygon::default().area(), 0.);
        let seg = Polygon::from_verts(vec![Point::new(0., 0.), Point::new(1., 1.)]);
        assert_eq!(seg.area(), 0.);
    }
}
