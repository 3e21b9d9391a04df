//! Transformation types, traits, and point-set primitives.

use serde::{Deserialize, Serialize};

use crate::point::Point;
use crate::wrap_angle;

/// Rotates `points` counterclockwise by `angle` degrees about `center`.
///
/// The rotation matrix is evaluated once for the whole batch, so repeated
/// rotations accumulate error no faster than a single matrix application
/// per call.
///
/// Rotation by 0 degrees returns the input unchanged.
///
/// # Examples
///
/// ```
/// use geometry::point::Point;
/// use geometry::transform::rotate_points;
/// use approx::assert_abs_diff_eq;
///
/// let pts = rotate_points(&[Point::new(1., 0.)], 90., Point::zero());
/// assert_abs_diff_eq!(pts[0], Point::new(0., 1.), epsilon = 1e-12);
/// ```
pub fn rotate_points(points: &[Point], angle: f64, center: Point) -> Vec<Point> {
    if angle == 0. {
        return points.to_vec();
    }
    let (sin, cos) = angle.to_radians().sin_cos();
    points
        .iter()
        .map(|&p| {
            let d = p - center;
            Point::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos) + center
        })
        .collect()
}

/// Rotates a single point counterclockwise by `angle` degrees about `center`.
pub fn rotate_point(point: Point, angle: f64, center: Point) -> Point {
    if angle == 0. {
        return point;
    }
    let (sin, cos) = angle.to_radians().sin_cos();
    let d = point - center;
    Point::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos) + center
}

/// The error returned when a reflection axis is specified by two coincident
/// points: a zero-length line has no defined reflection.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("degenerate reflection line: endpoints {p1:?} and {p2:?} coincide")]
pub struct DegenerateLineError {
    /// The first endpoint of the offending line.
    pub p1: Point,
    /// The second endpoint of the offending line.
    pub p2: Point,
}

/// Reflects `points` across the infinite line through `p1` and `p2`.
///
/// Each point is projected onto the line direction; the reflection is
/// `2 * (p1 + proj) - point`.
///
/// Fails with [`DegenerateLineError`] if `p1 == p2`.
///
/// # Examples
///
/// ```
/// use geometry::point::Point;
/// use geometry::transform::reflect_points;
/// use approx::assert_abs_diff_eq;
///
/// // Reflect across the x-axis.
/// let pts = reflect_points(
///     &[Point::new(2., 3.)],
///     Point::zero(),
///     Point::new(1., 0.),
/// ).unwrap();
/// assert_abs_diff_eq!(pts[0], Point::new(2., -3.), epsilon = 1e-12);
/// ```
pub fn reflect_points(
    points: &[Point],
    p1: Point,
    p2: Point,
) -> Result<Vec<Point>, DegenerateLineError> {
    let line = p2 - p1;
    let norm_sq = line.dot(line);
    if norm_sq == 0. {
        return Err(DegenerateLineError { p1, p2 });
    }
    Ok(points
        .iter()
        .map(|&p| {
            let proj = line * (line.dot(p - p1) / norm_sq);
            (p1 + proj) * 2. - p
        })
        .collect())
}

/// Reflects a single point across the infinite line through `p1` and `p2`.
pub fn reflect_point(point: Point, p1: Point, p2: Point) -> Result<Point, DegenerateLineError> {
    Ok(reflect_points(std::slice::from_ref(&point), p1, p2)?[0])
}

/// A transformation representing a translation, rotation, and/or reflection
/// of geometry.
///
/// Does not support scaling: the matrix is always orthogonal, so cascades of
/// transformations stay unitary and its inverse is its transpose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    /// The rotation/reflection matrix, row-major.
    pub(crate) mat: [[f64; 2]; 2],
    /// The x-y translation applied after the matrix.
    pub(crate) b: Point,
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transformation {
    /// Returns the identity transform, leaving any transformed object unmodified.
    pub fn identity() -> Self {
        Self {
            mat: [[1., 0.], [0., 1.]],
            b: Point::zero(),
        }
    }

    /// Returns a translation by `(x, y)`.
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            mat: [[1., 0.], [0., 1.]],
            b: Point::new(x, y),
        }
    }

    /// Returns a rotation about the origin by `angle` degrees counterclockwise.
    pub fn rotate(angle: f64) -> Self {
        Self::from_opts(Point::zero(), angle, false)
    }

    /// Returns a reflection about the x-axis.
    pub fn reflect_vert() -> Self {
        Self::from_opts(Point::zero(), 0., true)
    }

    /// Creates a transform from only an offset.
    pub fn from_offset(offset: Point) -> Self {
        Self {
            mat: [[1., 0.], [0., 1.]],
            b: offset,
        }
    }

    /// Creates a transform from the 4-parameter placement: offset, rotation
    /// angle in degrees, and whether to reflect about the x-axis.
    ///
    /// The reflection is applied before the rotation.
    pub fn from_opts(offset: Point, angle: f64, reflect_vert: bool) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        let mat = if reflect_vert {
            // R(angle) * diag(1, -1)
            [[cos, sin], [sin, -cos]]
        } else {
            [[cos, -sin], [sin, cos]]
        };
        Self { mat, b: offset }
    }

    /// Creates a new [`Transformation`] that is the cascade of `parent` and `child`.
    ///
    /// "Parents" and "children" refer to typical layout-instance hierarchies,
    /// in which each level of instance has a nested transformation relative to
    /// its top-level parent. This operation is not commutative.
    pub fn cascade(parent: Transformation, child: Transformation) -> Transformation {
        let mat = matmul(&parent.mat, &child.mat);
        let b = matvec(&parent.mat, child.b) + parent.b;
        Self { mat, b }
    }

    /// The point representing the translation of this transformation.
    pub fn offset_point(&self) -> Point {
        self.b
    }

    /// The counterclockwise rotation encoded by this transformation,
    /// in degrees in `[0, 360)`.
    pub fn rotation_degrees(&self) -> f64 {
        wrap_angle(self.mat[1][0].atan2(self.mat[0][0]).to_degrees())
    }

    /// Returns `true` if this transformation includes a reflection
    /// (its matrix has negative determinant).
    pub fn reflects(&self) -> bool {
        self.mat[0][0] * self.mat[1][1] - self.mat[0][1] * self.mat[1][0] < 0.
    }

    /// Applies this transformation to a single point.
    pub fn apply(&self, p: Point) -> Point {
        matvec(&self.mat, p) + self.b
    }

    /// Maps a direction angle (degrees) through this transformation.
    ///
    /// Rotations add the transformation's angle; reflections reverse the
    /// angle about the reflection axis rather than negating the direction,
    /// so an "outward" direction stays outward.
    pub fn apply_angle(&self, angle: f64) -> f64 {
        if self.reflects() {
            wrap_angle(self.rotation_degrees() - angle)
        } else {
            wrap_angle(self.rotation_degrees() + angle)
        }
    }

    /// Returns the inverse [`Transformation`] of `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use geometry::point::Point;
    /// use geometry::transform::Transformation;
    /// use approx::assert_abs_diff_eq;
    ///
    /// let trans = Transformation::cascade(
    ///     Transformation::rotate(90.),
    ///     Transformation::translate(5., 10.),
    /// );
    /// let p = Point::new(3., -2.);
    /// assert_abs_diff_eq!(trans.inv().apply(trans.apply(p)), p, epsilon = 1e-12);
    /// ```
    pub fn inv(&self) -> Transformation {
        // Orthogonal matrix: inverse is the transpose.
        let mat = [
            [self.mat[0][0], self.mat[1][0]],
            [self.mat[0][1], self.mat[1][1]],
        ];
        let b = matvec(&mat, self.b);
        Self { mat, b: -b }
    }
}

fn matmul(a: &[[f64; 2]; 2], b: &[[f64; 2]; 2]) -> [[f64; 2]; 2] {
    [
        [
            a[0][0] * b[0][0] + a[0][1] * b[1][0],
            a[0][0] * b[0][1] + a[0][1] * b[1][1],
        ],
        [
            a[1][0] * b[0][0] + a[1][1] * b[1][0],
            a[1][0] * b[0][1] + a[1][1] * b[1][1],
        ],
    ]
}

fn matvec(a: &[[f64; 2]; 2], p: Point) -> Point {
    Point::new(
        a[0][0] * p.x + a[0][1] * p.y,
        a[1][0] * p.x + a[1][1] * p.y,
    )
}

/// A trait for specifying how a shape is translated by a [`Point`].
pub trait TranslateMut {
    /// Translates the shape by a [`Point`] through mutation.
    fn translate_mut(&mut self, p: Point);
}

impl<T: TranslateMut> TranslateMut for Vec<T> {
    fn translate_mut(&mut self, p: Point) {
        for i in self.iter_mut() {
            i.translate_mut(p);
        }
    }
}

impl<T: TranslateMut> TranslateMut for Option<T> {
    fn translate_mut(&mut self, p: Point) {
        if let Some(inner) = self.as_mut() {
            inner.translate_mut(p);
        }
    }
}

/// A trait for specifying how a shape is translated by a [`Point`].
///
/// Takes in an owned copy of the shape and returns the translated version.
pub trait Translate: TranslateMut + Sized {
    /// Translates the shape by a [`Point`].
    fn translate(mut self, p: Point) -> Self {
        self.translate_mut(p);
        self
    }
}

impl<T: TranslateMut + Sized> Translate for T {}

/// A trait for specifying how an object is changed by a [`Transformation`].
pub trait TransformMut {
    /// Applies matrix-vector [`Transformation`] `trans`.
    fn transform_mut(&mut self, trans: Transformation);
}

impl<T: TransformMut> TransformMut for Vec<T> {
    fn transform_mut(&mut self, trans: Transformation) {
        for i in self.iter_mut() {
            i.transform_mut(trans);
        }
    }
}

impl<T: TransformMut> TransformMut for Option<T> {
    fn transform_mut(&mut self, trans: Transformation) {
        if let Some(inner) = self.as_mut() {
            inner.transform_mut(trans);
        }
    }
}

/// A trait for specifying how an object is changed by a [`Transformation`].
///
/// Takes in an owned copy of the shape and returns the transformed version.
pub trait Transform: TransformMut + Sized {
    /// Applies matrix-vector [`Transformation`] `trans`.
    fn transform(mut self, trans: Transformation) -> Self {
        self.transform_mut(trans);
        self
    }
}

impl<T: TransformMut + Sized> Transform for T {}

impl TranslateMut for Point {
    fn translate_mut(&mut self, p: Point) {
        *self += p;
    }
}

impl TransformMut for Point {
    fn transform_mut(&mut self, trans: Transformation) {
        *self = trans.apply(*self);
    }
}
