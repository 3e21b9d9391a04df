//! Result and error types.

use std::sync::Arc;

use arcstr::ArcStr;
use geometry::point::Point;
use geometry::transform::DegenerateLineError;

use crate::port::Port;

/// The result type for layout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A layout error.
#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    /// A coordinate input could not be resolved to a point.
    #[error("could not parse coordinate: expected 2 values, got {len}")]
    InvalidCoordinate {
        /// The number of values in the offending input.
        len: usize,
    },
    /// A reflection line was specified by two coincident points.
    #[error(transparent)]
    DegenerateLine(#[from] DegenerateLineError),
    /// Two ports cannot be connected: widths differ or orientations are not
    /// antiparallel.
    #[error("ports do not match: {a:?} vs. {b:?}")]
    PortMismatch {
        /// The first port.
        a: Box<Port>,
        /// The second port.
        b: Box<Port>,
    },
    /// A port was constructed with a non-positive width.
    #[error("port {name} has non-positive width {width}")]
    InvalidPortWidth {
        /// The name of the offending port.
        name: ArcStr,
        /// The offending width.
        width: f64,
    },
    /// A port name was added to a cell that already has a port by that name.
    #[error("duplicate port name {name}")]
    DuplicatePort {
        /// The duplicated port name.
        name: ArcStr,
    },
    /// A path with fewer than 2 centerline points cannot be extruded.
    #[error("degenerate path: {num_points} centerline point(s), need at least 2")]
    DegeneratePath {
        /// The number of points in the offending path.
        num_points: usize,
    },
    /// A cross section must have at least one section.
    #[error("cross section has no sections")]
    EmptyCrossSection,
    /// A cross section was built with a non-positive bend radius.
    #[error("invalid bend radius {radius}; routing requires a positive radius")]
    InvalidRadius {
        /// The offending radius.
        radius: f64,
    },
    /// Two sections of a cross section overlap without being flagged to
    /// allow it.
    #[error("cross section lanes {a} and {b} overlap")]
    OverlappingSections {
        /// The name of the first overlapping lane.
        a: ArcStr,
        /// The name of the second overlapping lane.
        b: ArcStr,
    },
    /// An offset curve would self-intersect: the requested lane offset
    /// exceeds the local radius of curvature.
    #[error("infeasible offset {offset} at point {at:?}: inner offset curve self-intersects")]
    InfeasibleOffset {
        /// The requested offset distance.
        offset: f64,
        /// A centerline point near the infeasibility.
        at: Point,
    },
    /// No valid Manhattan path exists between the two ports.
    #[error("unroutable ports ({reason}): {a:?} vs. {b:?}")]
    UnroutablePorts {
        /// The start port.
        a: Box<Port>,
        /// The end port.
        b: Box<Port>,
        /// Why routing failed.
        reason: ArcStr,
    },
    /// A port in a bundle cannot jog onto its assigned lane.
    #[error("infeasible bundle: jog {jog} is below the bend diameter {min}")]
    InfeasibleBundle {
        /// The transverse distance between the port and its lane.
        jog: f64,
        /// The minimum feasible jog (one bend diameter).
        min: f64,
    },
    /// A named layer was not found in the layer registry.
    #[error("unknown layer {name}")]
    UnknownLayer {
        /// The requested layer name.
        name: ArcStr,
    },
    /// A named cross section was not found in the cross-section registry.
    #[error("unknown cross section {name}")]
    UnknownCrossSection {
        /// The requested cross-section name.
        name: ArcStr,
    },
    /// An error raised by the component build cache.
    #[error(transparent)]
    Cache(#[from] Arc<cache::error::Error>),
}
