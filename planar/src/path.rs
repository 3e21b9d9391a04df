//! Centerline paths: polyline samples plus end tangents.

use geometry::point::Point;
use geometry::transform::rotate_points;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default angular pitch, in degrees, between samples of an arc.
const ARC_SAMPLE_DEG: f64 = 5.;

/// A sampled centerline with explicit tangent angles at both ends.
///
/// The tangent angles are stored rather than recomputed from the end
/// segments so that appending paths and extruding cross sections see the
/// exact analytic tangents, not sampling artifacts.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    points: Vec<Point>,
    /// Tangent direction at the first point, in degrees.
    start_angle: f64,
    /// Tangent direction at the last point, in degrees.
    end_angle: f64,
}

impl Path {
    /// Creates a path from raw points, deriving the end tangents from the
    /// first and last segments.
    ///
    /// Fails with [`Error::DegeneratePath`] on fewer than 2 points.
    pub fn from_points(points: Vec<Point>) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::DegeneratePath {
                num_points: points.len(),
            });
        }
        let start_angle = (points[1] - points[0]).angle();
        let end_angle = (points[points.len() - 1] - points[points.len() - 2]).angle();
        Ok(Self {
            points,
            start_angle,
            end_angle,
        })
    }

    /// A straight path of the given length along +x, starting at the origin.
    pub fn straight(length: f64, npoints: usize) -> Self {
        let npoints = npoints.max(2);
        let points = (0..npoints)
            .map(|i| Point::new(length * i as f64 / (npoints - 1) as f64, 0.))
            .collect();
        Self {
            points,
            start_angle: 0.,
            end_angle: 0.,
        }
    }

    /// A circular arc starting at the origin heading along +x and turning
    /// through `angle` degrees (positive turns left).
    ///
    /// When `npoints` is `None`, the arc is sampled about every 5 degrees.
    pub fn arc(radius: f64, angle: f64, npoints: Option<usize>) -> Self {
        let npoints =
            npoints.unwrap_or(((angle.abs() / ARC_SAMPLE_DEG).ceil() as usize + 1).max(2));
        let npoints = npoints.max(2);
        let sign = angle.signum();
        let t0 = -90f64.to_radians();
        let t1 = (angle - 90.).to_radians();
        let points = (0..npoints)
            .map(|i| {
                let t = t0 + (t1 - t0) * i as f64 / (npoints - 1) as f64;
                let (sin, cos) = t.sin_cos();
                Point::new(radius * cos * sign, radius * (sin + 1.) * sign)
            })
            .collect();
        Self {
            points,
            start_angle: 0.,
            end_angle: angle,
        }
    }

    /// The sampled centerline points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The tangent direction at the first point, in degrees.
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// The tangent direction at the last point, in degrees.
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// The arc length of the sampled polyline.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .sum()
    }

    /// Appends `other`, rotating and translating it so its start point and
    /// start tangent line up with this path's end point and end tangent.
    ///
    /// The duplicated junction point is dropped.
    pub fn append(&mut self, other: &Path) {
        if self.points.is_empty() {
            *self = other.clone();
            return;
        }
        let turn = self.end_angle - other.start_angle;
        let end = *self.points.last().unwrap();
        let mut incoming = rotate_points(&other.points, turn, other.points[0]);
        let shift = end - incoming[0];
        for p in &mut incoming {
            *p += shift;
        }
        self.points.extend(incoming.into_iter().skip(1));
        self.end_angle = other.end_angle + turn;
    }
}

/// Offsets a sampled curve perpendicular to its direction of travel.
///
/// Positive offsets fall to the right of the direction of travel. Interior
/// corners are miter-corrected so the offset curve stays a constant
/// perpendicular distance from the original; the first and last points are
/// instead placed exactly perpendicular to the given end tangents, so
/// extruded shapes terminate on clean end facets.
///
/// Fails with [`Error::InfeasibleOffset`] when a corner is too sharp to
/// miter or the offset is large enough to fold a segment back on itself.
pub fn centerpoint_offset_curve(
    points: &[Point],
    offset: f64,
    start_angle: f64,
    end_angle: f64,
) -> Result<Vec<Point>> {
    let n = points.len();
    if n < 2 {
        return Err(Error::DegeneratePath { num_points: n });
    }
    // Segment headings, extended by one at each end so every point has a
    // heading on both sides.
    let mut theta = Vec::with_capacity(n + 1);
    theta.push(0.);
    for w in points.windows(2) {
        let d = w[1] - w[0];
        theta.push(d.y.atan2(d.x));
    }
    theta[0] = theta[1];
    theta.push(theta[n - 1]);

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let theta_mid = (std::f64::consts::PI + theta[i + 1] + theta[i]) / 2.;
        let dtheta_int = (std::f64::consts::PI + theta[i] - theta[i + 1]) / 2.;
        let sin_int = dtheta_int.sin();
        if sin_int.abs() < 1e-9 {
            return Err(Error::InfeasibleOffset {
                offset,
                at: points[i],
            });
        }
        let d = offset / sin_int;
        out.push(Point::new(
            points[i].x - d * theta_mid.cos(),
            points[i].y - d * theta_mid.sin(),
        ));
    }

    // End facets perpendicular to the analytic tangents.
    let a0 = start_angle.to_radians();
    out[0] = points[0] + Point::new(a0.sin(), -a0.cos()) * offset;
    let a1 = end_angle.to_radians();
    out[n - 1] = points[n - 1] + Point::new(a1.sin(), -a1.cos()) * offset;

    // An offset past the local radius of curvature reverses a segment.
    for i in 0..n - 1 {
        let orig = points[i + 1] - points[i];
        let off = out[i + 1] - out[i];
        if orig.dot(off) < 0. {
            return Err(Error::InfeasibleOffset {
                offset,
                at: points[i],
            });
        }
    }
    Ok(out)
}
