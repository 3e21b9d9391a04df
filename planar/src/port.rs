//! Named, oriented connection points.

use approx::abs_diff_eq;
use arcstr::ArcStr;
use geometry::dir::Dir;
use geometry::point::Point;
use geometry::transform::Transformation;
use geometry::wrap_angle;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layer::Layer;

/// The default tolerance for width and orientation comparisons between ports.
pub const PORT_MATCH_TOLERANCE: f64 = 1e-3;

/// The kind of signal a port carries.
#[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortType {
    /// An optical port.
    #[default]
    Optical,
    /// An electrical port.
    Electrical,
}

impl std::fmt::Display for PortType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortType::Optical => write!(f, "optical"),
            PortType::Electrical => write!(f, "electrical"),
        }
    }
}

/// A named, oriented connection point on a component boundary.
///
/// Ports are immutable values: transforming a port produces a new port and
/// never mutates the original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    name: ArcStr,
    center: Point,
    /// Direction of propagation out of the port, in degrees in `[0, 360)`.
    orientation: f64,
    width: f64,
    layer: Layer,
    port_type: PortType,
}

impl Port {
    /// Creates a new port.
    ///
    /// The orientation is wrapped to `[0, 360)` degrees.
    ///
    /// Fails with [`Error::InvalidPortWidth`] unless `width > 0`.
    pub fn new(
        name: impl Into<ArcStr>,
        center: Point,
        orientation: f64,
        width: f64,
        layer: Layer,
        port_type: PortType,
    ) -> Result<Self> {
        let name = name.into();
        if !(width > 0.) {
            return Err(Error::InvalidPortWidth { name, width });
        }
        Ok(Self {
            name,
            center,
            orientation: wrap_angle(orientation),
            width,
            layer,
            port_type,
        })
    }

    /// The name of the port, unique within its owning component.
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// The center of the port.
    pub fn center(&self) -> Point {
        self.center
    }

    /// The direction of propagation out of the port, in degrees in `[0, 360)`.
    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    /// The width of the port.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// The layer the port sits on.
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// The kind of signal the port carries.
    pub fn port_type(&self) -> PortType {
        self.port_type
    }

    /// The unit vector pointing out of the port.
    pub fn direction(&self) -> Point {
        Point::from_angle(self.orientation)
    }

    /// Returns a copy of this port under a new name.
    pub fn renamed(&self, name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Returns a new port with the center mapped through `trans` and the
    /// orientation rotated (and, if `trans` reflects, mirrored about the
    /// reflection axis so the outward direction stays outward).
    pub fn transform(&self, trans: Transformation) -> Self {
        Self {
            name: self.name.clone(),
            center: trans.apply(self.center),
            orientation: trans.apply_angle(self.orientation),
            width: self.width,
            layer: self.layer,
            port_type: self.port_type,
        }
    }

    /// Checks that `self` and `other` are connectable: equal widths and
    /// antiparallel orientations, both within `tol`.
    ///
    /// Fails with [`Error::PortMismatch`] carrying both ports.
    pub fn check_match(&self, other: &Port, tol: f64) -> Result<()> {
        let widths_match = abs_diff_eq!(self.width, other.width, epsilon = tol);
        let turn = wrap_angle(self.orientation - other.orientation);
        let antiparallel =
            abs_diff_eq!(turn, 180., epsilon = tol);
        if widths_match && antiparallel {
            Ok(())
        } else {
            Err(Error::PortMismatch {
                a: Box::new(self.clone()),
                b: Box::new(other.clone()),
            })
        }
    }

    /// Returns this port as an ordered key-value record.
    ///
    /// Field order is fixed (`name`, `center`, `width`, `orientation`,
    /// `layer`, `port_type`) and significant: records hash and diff
    /// deterministically.
    pub fn to_record(&self) -> IndexMap<&'static str, String> {
        IndexMap::from_iter([
            ("name", self.name.to_string()),
            ("center", format!("({}, {})", self.center.x, self.center.y)),
            ("width", self.width.to_string()),
            ("orientation", self.orientation.to_string()),
            (
                "layer",
                format!("({}, {})", self.layer.layer, self.layer.datatype),
            ),
            ("port_type", self.port_type.to_string()),
        ])
    }
}

/// A coordinate input: either an explicit point or a reference to a port
/// (resolved to the port's center).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CoordinateInput {
    /// An explicit point.
    ExplicitPoint(Point),
    /// A port whose center is the coordinate.
    PortRef(Port),
}

impl From<Point> for CoordinateInput {
    fn from(value: Point) -> Self {
        Self::ExplicitPoint(value)
    }
}

impl From<(f64, f64)> for CoordinateInput {
    fn from(value: (f64, f64)) -> Self {
        Self::ExplicitPoint(value.into())
    }
}

impl From<&Port> for CoordinateInput {
    fn from(value: &Port) -> Self {
        Self::PortRef(value.clone())
    }
}

impl TryFrom<&[f64]> for CoordinateInput {
    type Error = Error;

    /// Parses a raw numeric sequence; anything but exactly 2 values fails
    /// with [`Error::InvalidCoordinate`].
    fn try_from(value: &[f64]) -> Result<Self> {
        match value {
            [x, y] => Ok(Self::ExplicitPoint(Point::new(*x, *y))),
            _ => Err(Error::InvalidCoordinate { len: value.len() }),
        }
    }
}

/// Resolves a coordinate input to a point: a port resolves to its center.
pub fn parse_coordinate(c: &CoordinateInput) -> Point {
    match c {
        CoordinateInput::ExplicitPoint(p) => *p,
        CoordinateInput::PortRef(port) => port.center(),
    }
}

/// Translates an origin/destination pair into an `(dx, dy)` displacement.
///
/// If `destination` is absent, the origin value is treated as the
/// destination and the move starts from the global origin, so a
/// single-argument move acts as an absolute placement. If `axis` is given,
/// the displacement orthogonal to it is zeroed, locking the move to one
/// axis.
///
/// # Examples
///
/// ```
/// use planar::port::parse_move;
/// use geometry::dir::Dir;
///
/// let (dx, dy) = parse_move((0., 0.).into(), Some((3., 4.).into()), None);
/// assert_eq!((dx, dy), (3., 4.));
///
/// let (dx, dy) = parse_move(
///     (1., 1.).into(),
///     Some((4., 5.).into()),
///     Some(Dir::Horiz),
/// );
/// assert_eq!((dx, dy), (3., 0.));
/// ```
pub fn parse_move(
    origin: CoordinateInput,
    destination: Option<CoordinateInput>,
    axis: Option<Dir>,
) -> (f64, f64) {
    let (origin, destination) = match destination {
        Some(d) => (origin, d),
        None => (CoordinateInput::ExplicitPoint(Point::zero()), origin),
    };
    let o = parse_coordinate(&origin);
    let mut d = parse_coordinate(&destination);
    match axis {
        Some(Dir::Horiz) => d.y = o.y,
        Some(Dir::Vert) => d.x = o.x,
        None => {}
    }
    (d.x - o.x, d.y - o.y)
}
