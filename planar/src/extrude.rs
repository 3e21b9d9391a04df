//! Sweeping a cross section along a path to produce polygons and ports.

use geometry::point::Point;
use geometry::polygon::Polygon;
use geometry::wrap_angle;

use crate::component::ComponentBuilder;
use crate::cross_section::CrossSection;
use crate::error::{Error, Result};
use crate::path::{centerpoint_offset_curve, Path};
use crate::port::Port;

/// The manufacturing grid polygon vertices are snapped to.
pub const GRID: f64 = 0.001;

/// Sweeps `xs` along `path`, adding one polygon per section to `cell` plus
/// ports at the path ends for every section that names them.
///
/// Polygon vertices are snapped to the manufacturing grid; port centers are
/// left exact so connected extrusions line up to machine precision.
pub fn extrude(cell: &mut ComponentBuilder, path: &Path, xs: &CrossSection) -> Result<()> {
    let points = path.points();
    if points.len() < 2 {
        return Err(Error::DegeneratePath {
            num_points: points.len(),
        });
    }

    // Stage every lane before touching the cell so a failing lane leaves
    // no partial geometry or ports behind.
    let mut polygons = Vec::new();
    let mut ports = Vec::new();
    for section in xs.sections() {
        let half = section.width / 2.;
        let right = centerpoint_offset_curve(
            points,
            section.offset + half,
            path.start_angle(),
            path.end_angle(),
        )?;
        let left = centerpoint_offset_curve(
            points,
            section.offset - half,
            path.start_angle(),
            path.end_angle(),
        )?;

        let mut verts = right;
        verts.extend(left.into_iter().rev());
        polygons.push((section.layer, Polygon::from_verts(verts).snap_to_grid(GRID)));

        let (ref start_name, ref end_name) = section.port_names;
        if let Some(name) = start_name {
            let a = path.start_angle().to_radians();
            let center = points[0] + Point::new(a.sin(), -a.cos()) * section.offset;
            ports.push(Port::new(
                name.clone(),
                center,
                wrap_angle(path.start_angle() + 180.),
                section.width,
                section.layer,
                section.port_type,
            )?);
        }
        if let Some(name) = end_name {
            let a = path.end_angle().to_radians();
            let center =
                points[points.len() - 1] + Point::new(a.sin(), -a.cos()) * section.offset;
            ports.push(Port::new(
                name.clone(),
                center,
                wrap_angle(path.end_angle()),
                section.width,
                section.layer,
                section.port_type,
            )?);
        }
    }

    for (i, port) in ports.iter().enumerate() {
        if cell.port(port.name()).is_some()
            || ports[..i].iter().any(|p| p.name() == port.name())
        {
            return Err(Error::DuplicatePort {
                name: port.name().clone(),
            });
        }
    }
    for (layer, polygon) in polygons {
        cell.add_polygon(layer, polygon);
    }
    for port in ports {
        cell.add_port(port)?;
    }
    Ok(())
}
