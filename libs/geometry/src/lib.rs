//! 2-D geometric operations for micrometer-unit mask layout.
//!
//! All coordinates are `f64` micrometers. Angles are degrees,
//! counterclockwise from the +x axis.
//!
//! # Examples
//!
//! Create a [rectangle](crate::rect::Rect):
//!
//! ```
//! # use geometry::prelude::*;
//! let rect = Rect::from_sides(10., 20., 30., 40.);
//! ```
#![warn(missing_docs)]

extern crate self as geometry;

pub mod bbox;
pub mod dir;
pub mod point;
pub mod polygon;
pub mod prelude;
pub mod rect;
pub mod side;
pub mod snap;
pub mod transform;

/// Wraps the given angle to the interval `[0, 360)` degrees.
///
/// # Examples
///
/// ```
/// use geometry::wrap_angle;
///
/// assert_eq!(wrap_angle(10.), 10.);
/// assert_eq!(wrap_angle(-10.), 350.);
/// assert_eq!(wrap_angle(-740.), 340.);
/// assert_eq!(wrap_angle(725.), 5.);
/// assert_eq!(wrap_angle(360.), 0.);
/// assert_eq!(wrap_angle(-360.), 0.);
/// ```
pub fn wrap_angle(angle: f64) -> f64 {
    ((angle % 360.) + 360.) % 360.
}
