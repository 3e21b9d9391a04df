//! The sides of an axis-aligned rectangle.

use serde::{Deserialize, Serialize};

use crate::dir::Dir;
use crate::point::Point;

/// An enumeration of the sides of an axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
pub enum Side {
    /// The left side (negative x).
    Left,
    /// The bottom side (negative y).
    Bot,
    /// The right side (positive x).
    Right,
    /// The top side (positive y).
    Top,
}

impl Side {
    /// The direction of the axis this side is perpendicular to.
    ///
    /// The left and right sides are bounded by vertical lines and so are
    /// perpendicular to the horizontal axis.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// assert_eq!(Side::Left.coord_dir(), Dir::Horiz);
    /// assert_eq!(Side::Top.coord_dir(), Dir::Vert);
    /// ```
    pub const fn coord_dir(&self) -> Dir {
        match self {
            Side::Left | Side::Right => Dir::Horiz,
            Side::Bot | Side::Top => Dir::Vert,
        }
    }

    /// The direction along which positions on this side vary.
    pub const fn edge_dir(&self) -> Dir {
        self.coord_dir().other()
    }

    /// The sign of this side: `-1.` for left/bottom, `1.` for right/top.
    pub const fn sign(&self) -> f64 {
        match self {
            Side::Left | Side::Bot => -1.,
            Side::Right | Side::Top => 1.,
        }
    }

    /// The outward direction of this side, in degrees.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// assert_eq!(Side::Right.angle(), 0.);
    /// assert_eq!(Side::Top.angle(), 90.);
    /// assert_eq!(Side::Left.angle(), 180.);
    /// assert_eq!(Side::Bot.angle(), 270.);
    /// ```
    pub const fn angle(&self) -> f64 {
        match self {
            Side::Right => 0.,
            Side::Top => 90.,
            Side::Left => 180.,
            Side::Bot => 270.,
        }
    }

    /// The unit vector pointing out of this side.
    pub fn outward(&self) -> Point {
        match self {
            Side::Right => Point::new(1., 0.),
            Side::Top => Point::new(0., 1.),
            Side::Left => Point::new(-1., 0.),
            Side::Bot => Point::new(0., -1.),
        }
    }
}
