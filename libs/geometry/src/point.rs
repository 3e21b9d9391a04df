//! 2-D points.

use serde::{Deserialize, Serialize};

use crate::dir::Dir;
use crate::snap::snap_to_grid;

/// A point (or displacement vector) in two-dimensional space.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq, PartialOrd)]
pub struct Point {
    /// The x-coordinate of the point, in micrometers.
    pub x: f64,
    /// The y-coordinate of the point, in micrometers.
    pub y: f64,
}

impl Point {
    /// Creates a new [`Point`] from (x,y) coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the origin, `(0, 0)`.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let origin = Point::zero();
    /// assert_eq!(origin, Point::new(0., 0.));
    /// ```
    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0., y: 0. }
    }

    /// Creates a unit vector pointing along `angle` degrees.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// use approx::assert_abs_diff_eq;
    /// let v = Point::from_angle(90.);
    /// assert_abs_diff_eq!(v.x, 0.);
    /// assert_abs_diff_eq!(v.y, 1.);
    /// ```
    pub fn from_angle(angle: f64) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        Self { x: cos, y: sin }
    }

    /// Gets the coordinate associated with direction `dir`.
    pub const fn coord(&self, dir: Dir) -> f64 {
        match dir {
            Dir::Horiz => self.x,
            Dir::Vert => self.y,
        }
    }

    /// The dot product of `self` and `other`.
    pub fn dot(&self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// The Euclidean length of `self` interpreted as a vector.
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// The Euclidean distance between `self` and `other`.
    pub fn distance(&self, other: Point) -> f64 {
        (*self - other).norm()
    }

    /// The angle of `self` interpreted as a vector, in degrees in `[0, 360)`.
    pub fn angle(&self) -> f64 {
        crate::wrap_angle(self.y.atan2(self.x).to_degrees())
    }

    /// Snaps the x and y coordinates of this point to the nearest multiple of `grid`.
    #[inline]
    pub fn snap_to_grid(&self, grid: f64) -> Self {
        Self {
            x: snap_to_grid(self.x, grid),
            y: snap_to_grid(self.y, grid),
        }
    }
}

impl approx::AbsDiffEq for Point {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl std::ops::Add<Point> for Point {
    type Output = Self;
    fn add(self, rhs: Point) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign<Point> for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub<Point> for Point {
    type Output = Self;
    fn sub(self, rhs: Point) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::SubAssign<Point> for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl std::ops::Neg for Point {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from(value: (f64, f64)) -> Self {
        Self {
            x: value.0,
            y: value.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn point_vector_ops_work() {
        let a = Point::new(3., 4.);
        let b = Point::new(-1., 2.);
        assert_eq!(a + b, Point::new(2., 6.));
        assert_eq!(a - b, Point::new(4., 2.));
        assert_eq!(-a, Point::new(-3., -4.));
        assert_abs_diff_eq!(a.norm(), 5.);
        assert_abs_diff_eq!(a.dot(b), 5.);
        assert_abs_diff_eq!(a.distance(b), (4f64 * 4. + 2. * 2.).sqrt());
    }

    #[test]
    fn angle_wraps_to_positive_degrees() {
        assert_abs_diff_eq!(Point::new(0., -1.).angle(), 270.);
        assert_abs_diff_eq!(Point::new(1., 0.).angle(), 0.);
        assert_abs_diff_eq!(Point::new(-2., 0.).angle(), 180.);
    }
}
