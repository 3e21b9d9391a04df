//! Manhattan routing: point-to-point and bundled ports-to-side.

use geometry::point::Point;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::port::Port;

mod side;
mod single;

pub use side::route_ports_to_side;
pub use single::route;

/// A completed route: the Manhattan waypoint polyline plus the ports it
/// connects.
///
/// The realized geometry (bend and straight references) lives in the
/// component the route was drawn into; a `Route` is a frozen description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    /// Waypoints of the Manhattan polyline, endpoints first and last.
    ///
    /// Interior waypoints are bend corners; the realized centerline cuts
    /// each corner with an arc of the routing radius.
    pub waypoints: Vec<Point>,
    /// Total centerline length, straights plus arcs.
    pub length: f64,
    /// Number of 90-degree bends.
    pub bend_count: usize,
    /// The starting port.
    pub port1: Port,
    /// The ending port.
    pub port2: Port,
}

/// One unroutable port from a bundled routing call.
#[derive(Debug, Clone)]
pub struct BundleFailure {
    /// Index of the port in the caller's input slice.
    pub index: usize,
    /// The port that could not be routed.
    pub port: Port,
    /// Why it could not be routed.
    pub error: Error,
}
