//! Bundled routing of many ports to one side of a component.

use geometry::point::Point;
use geometry::side::Side;
use geometry::wrap_angle;

use crate::component::ComponentBuilder;
use crate::context::Context;
use crate::cross_section::CrossSection;
use crate::error::{Error, Result};
use crate::port::Port;
use crate::route::{single, BundleFailure, Route};

/// Positional slop below which a port is already on its bundle lane.
const LANE_TOL: f64 = 1e-9;

/// Routes every port in `ports` to the line `position` on the given side,
/// as a parallel bundle of non-crossing Manhattan routes.
///
/// Ports are sorted by their transverse coordinate (the coordinate along
/// the target side) and assigned bundle lanes in that order, spaced by the
/// cross section's width plus its separation; keeping the sorted order is
/// what guarantees no two routes in the bundle cross. Each port is then
/// routed independently to a virtual port on the target line facing back
/// into the component.
///
/// Partial-failure semantics: ports that cannot be routed (a required jog
/// shorter than the bend diameter fails with [`Error::InfeasibleBundle`],
/// anything else with the underlying routing error) are reported in the
/// failure list while the remaining routes are still drawn and returned.
pub fn route_ports_to_side(
    ctx: &Context,
    cell: &mut ComponentBuilder,
    ports: &[Port],
    side: Side,
    position: f64,
    xs: &CrossSection,
) -> (Vec<Route>, Vec<BundleFailure>) {
    let pitch = xs.width() + xs.separation();

    // Sort by transverse coordinate; the lane assignment follows this order.
    let mut order: Vec<usize> = (0..ports.len()).collect();
    order.sort_by(|&i, &j| {
        let ti = ports[i].center().coord(side.edge_dir());
        let tj = ports[j].center().coord(side.edge_dir());
        ti.total_cmp(&tj)
    });
    let first_lane = order
        .first()
        .map(|&i| ports[i].center().coord(side.edge_dir()))
        .unwrap_or(0.);

    let mut routes = Vec::new();
    let mut failures = Vec::new();
    for (lane, &index) in order.iter().enumerate() {
        let port = &ports[index];
        let lane_coord = first_lane + lane as f64 * pitch;
        // Staggering the first bend per lane keeps parallel jogs from
        // landing on the same line.
        let start_straight = lane as f64 * pitch;
        match route_one(
            ctx,
            cell,
            port,
            side,
            position,
            lane_coord,
            start_straight,
            xs,
        ) {
            Ok(route) => routes.push(route),
            Err(error) => {
                tracing::warn!(index, port = %port.name(), %error, "bundle port unroutable");
                failures.push(BundleFailure {
                    index,
                    port: port.clone(),
                    error,
                });
            }
        }
    }
    (routes, failures)
}

#[allow(clippy::too_many_arguments)]
fn route_one(
    ctx: &Context,
    cell: &mut ComponentBuilder,
    port: &Port,
    side: Side,
    position: f64,
    lane_coord: f64,
    start_straight: f64,
    xs: &CrossSection,
) -> Result<Route> {
    // A port off its lane jogs over with a pair of opposite bends, so the
    // jog must span at least one bend diameter.
    let jog = (port.center().coord(side.edge_dir()) - lane_coord).abs();
    let min_jog = 2. * xs.radius();
    if jog > LANE_TOL && jog < min_jog {
        return Err(Error::InfeasibleBundle { jog, min: min_jog });
    }

    // A virtual port on the target line, facing back into the component.
    let center = match side.coord_dir() {
        geometry::dir::Dir::Horiz => Point::new(position, lane_coord),
        geometry::dir::Dir::Vert => Point::new(lane_coord, position),
    };
    let target = Port::new(
        arcstr::format!("{}_bundle", port.name()),
        center,
        wrap_angle(side.angle() + 180.),
        port.width(),
        port.layer(),
        port.port_type(),
    )?;
    single::route(ctx, cell, port, &target, xs, start_straight, 0.)
}
