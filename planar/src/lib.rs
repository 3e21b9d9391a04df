//! A computational-geometry engine for hierarchical 2D layout.
//!
//! The crate is organized leaf-first:
//! * [`port`] and [`cross_section`] define the connection-point and
//!   ribbon-profile data model.
//! * [`path`] and [`extrude`] turn a centerline plus a cross section into
//!   polygons and end ports.
//! * [`route`] synthesizes Manhattan connections between ports, drawing
//!   bend and straight cells.
//! * [`component`] and [`context`] host the generated geometry: immutable
//!   components, shared references, and a single-flight build cache.
//!
//! Angles are degrees, lengths are micrometers, and all geometry is `f64`.
#![warn(missing_docs)]

pub mod blocks;
pub mod component;
pub mod context;
pub mod cross_section;
pub mod error;
pub mod extrude;
pub mod layer;
pub mod path;
pub mod port;
pub mod route;

pub mod prelude {
    //! The most commonly used types, re-exported for glob imports.
    pub use crate::blocks::{BendCircular, Straight};
    pub use crate::component::{Component, ComponentBuilder, Reference, Shape};
    pub use crate::context::{Block, Context};
    pub use crate::cross_section::{CrossSection, CrossSectionRegistry, Section};
    pub use crate::error::{Error, Result};
    pub use crate::extrude::extrude;
    pub use crate::layer::{Layer, LayerRegistry};
    pub use crate::path::Path;
    pub use crate::port::{Port, PortType};
    pub use crate::route::{route, route_ports_to_side, Route};
    pub use geometry::prelude::*;
}
