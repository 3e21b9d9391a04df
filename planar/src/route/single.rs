//! Point-to-point Manhattan routing.

use arcstr::ArcStr;
use geometry::point::Point;
use geometry::transform::Transformation;

use crate::blocks::{BendCircular, Straight};
use crate::component::{ComponentBuilder, Reference};
use crate::context::Context;
use crate::cross_section::CrossSection;
use crate::error::{Error, Result};
use crate::port::Port;
use crate::route::Route;

/// Positional slop below which coordinates are considered equal.
const GEOM_TOL: f64 = 1e-9;

/// Angular slop, in degrees, when snapping port orientations to an axis.
const ANGLE_TOL: f64 = 1e-3;

/// A candidate Manhattan polyline between two ports.
struct Candidate {
    waypoints: Vec<Point>,
    bends: usize,
    length: f64,
    first_leg: f64,
}

impl Candidate {
    fn new(waypoints: Vec<Point>, radius: f64) -> Self {
        let bends = waypoints.len() - 2;
        let polyline: f64 = waypoints.windows(2).map(|w| w[0].distance(w[1])).sum();
        // Each bend trades two straight radii for a quarter arc.
        let length =
            polyline + bends as f64 * (std::f64::consts::FRAC_PI_2 - 2.) * radius;
        let first_leg = waypoints[0].distance(waypoints[1]);
        Self {
            waypoints,
            bends,
            length,
            first_leg,
        }
    }
}

fn unroutable(a: &Port, b: &Port, reason: ArcStr) -> Error {
    Error::UnroutablePorts {
        a: Box::new(a.clone()),
        b: Box::new(b.clone()),
        reason,
    }
}

/// Snaps a port's orientation to one of the four axis directions.
fn axis_dir(port: &Port, a: &Port, b: &Port) -> Result<Point> {
    let o = port.orientation();
    let q = (o / 90.).round();
    if (o - q * 90.).abs() > ANGLE_TOL {
        return Err(unroutable(
            a,
            b,
            arcstr::format!(
                "port {} orientation {} is not axis-aligned",
                port.name(),
                o
            ),
        ));
    }
    Ok(match (q as i64).rem_euclid(4) {
        0 => Point::new(1., 0.),
        1 => Point::new(0., 1.),
        2 => Point::new(-1., 0.),
        _ => Point::new(0., -1.),
    })
}

fn cross(u: Point, v: Point) -> f64 {
    u.x * v.y - u.y * v.x
}

/// Routes from `port1` to `port2` with axis-aligned straights and
/// fixed-radius 90-degree bends, drawing the geometry into `cell`.
///
/// The route leaves `port1` along its orientation with at least
/// `start_straight` of clear run before the first bend, and approaches
/// `port2` against its orientation with at least `end_straight` after the
/// last bend. Among valid topologies (straight, L, Z, U) the router picks
/// the one with the fewest bends, breaking ties by total length and then
/// by the length of the first leg.
///
/// Fails with [`Error::UnroutablePorts`] when the ports are coincident,
/// not axis-aligned, facing away from each other, or too close together
/// for the bend radius.
pub fn route(
    ctx: &Context,
    cell: &mut ComponentBuilder,
    port1: &Port,
    port2: &Port,
    xs: &CrossSection,
    start_straight: f64,
    end_straight: f64,
) -> Result<Route> {
    let pa = port1.center();
    let pb = port2.center();
    let d = pb - pa;
    if d.norm() < GEOM_TOL {
        return Err(unroutable(port1, port2, arcstr::literal!("coincident port centers")));
    }
    let u = axis_dir(port1, port1, port2)?;
    let v = axis_dir(port2, port1, port2)?;
    let n = Point::new(-u.y, u.x);
    let r = xs.radius();
    let (ss, es) = (start_straight, end_straight);

    let proj = d.dot(u);
    let lat = d.dot(n);
    let dot_uv = u.dot(v);

    let mut candidates = Vec::new();
    if dot_uv < -0.5 {
        // Antiparallel: straight shot or a Z jog.
        if lat.abs() < GEOM_TOL && proj > GEOM_TOL && proj >= ss + es - GEOM_TOL {
            candidates.push(Candidate::new(vec![pa, pb], r));
        }
        if lat.abs() >= 2. * r - GEOM_TOL && proj >= ss + es + 2. * r - GEOM_TOL {
            // Jog as early as the straight-run minimum allows; bundled
            // callers stagger parallel jogs by raising `start_straight`.
            let t = ss + r;
            let m1 = pa + u * t;
            let m2 = m1 + n * lat;
            candidates.push(Candidate::new(vec![pa, m1, m2, pb], r));
        }
        if proj < GEOM_TOL && candidates.is_empty() {
            return Err(unroutable(
                port1,
                port2,
                arcstr::literal!("ports face away from each other"),
            ));
        }
    } else if dot_uv.abs() < 0.5 {
        // Perpendicular: a single L corner.
        let c = pa + u * proj;
        let leg2 = -(pb - c).dot(v);
        if proj >= ss + r - GEOM_TOL && leg2 >= es + r - GEOM_TOL {
            candidates.push(Candidate::new(vec![pa, c, pb], r));
        }
    } else {
        // Parallel, same direction: a U over the farther escape line.
        if lat.abs() >= 2. * r - GEOM_TOL {
            let sa = pa.dot(u);
            let sb = pb.dot(u);
            let x = (sa + ss + r).max(sb + es + r);
            let m1 = pa + u * (x - sa);
            let m2 = pb + u * (x - sb);
            candidates.push(Candidate::new(vec![pa, m1, m2, pb], r));
        }
    }

    let best = candidates
        .into_iter()
        .min_by(|a, b| {
            a.bends
                .cmp(&b.bends)
                .then(a.length.total_cmp(&b.length))
                .then(a.first_leg.total_cmp(&b.first_leg))
        })
        .ok_or_else(|| {
            unroutable(
                port1,
                port2,
                arcstr::literal!(
                    "no bend topology satisfies the straight-run and radius constraints"
                ),
            )
        })?;

    tracing::debug!(
        from = %port1.name(),
        to = %port2.name(),
        bends = best.bends,
        length = best.length,
        "selected route topology"
    );
    realize(ctx, cell, &best.waypoints, xs)?;

    Ok(Route {
        waypoints: best.waypoints,
        length: best.length,
        bend_count: best.bends,
        port1: port1.clone(),
        port2: port2.clone(),
    })
}

/// Draws the straight and bend cells realizing a Manhattan polyline.
fn realize(
    ctx: &Context,
    cell: &mut ComponentBuilder,
    waypoints: &[Point],
    xs: &CrossSection,
) -> Result<()> {
    let r = xs.radius();
    let nlegs = waypoints.len() - 1;
    for i in 0..nlegs {
        let seg = waypoints[i + 1] - waypoints[i];
        let len = seg.norm();
        let dir = seg * (1. / len);
        let lead = if i > 0 { r } else { 0. };
        let tail = if i + 1 < nlegs { r } else { 0. };
        let straight = len - lead - tail;
        if straight > GEOM_TOL {
            let child = ctx.build(&Straight {
                length: straight,
                cross_section: xs.clone(),
            })?;
            cell.add_reference(Reference::new(
                child,
                Transformation::from_opts(waypoints[i] + dir * lead, dir.angle(), false),
            ));
        }
        if i + 1 < nlegs {
            let next = waypoints[i + 2] - waypoints[i + 1];
            let ndir = next * (1. / next.norm());
            // A right turn places the left-turning bend cell mirrored.
            let right_turn = cross(dir, ndir) < 0.;
            let child = ctx.build(&BendCircular::left90(xs.clone()))?;
            cell.add_reference(Reference::new(
                child,
                Transformation::from_opts(
                    waypoints[i + 1] - dir * r,
                    dir.angle(),
                    right_turn,
                ),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cross_section::Section;
    use crate::layer::Layer;
    use crate::port::PortType;
    use approx::assert_abs_diff_eq;

    fn xs() -> CrossSection {
        CrossSection::new(
            vec![Section::new("core", Layer::new(1, 0), 0.5).with_port_names("o1", "o2")],
            10.,
            3.,
        )
        .unwrap()
    }

    fn port(name: &str, center: Point, orientation: f64) -> Port {
        Port::new(
            arcstr::format!("{name}"),
            center,
            orientation,
            0.5,
            Layer::new(1, 0),
            PortType::Optical,
        )
        .unwrap()
    }

    #[test]
    fn facing_ports_route_straight() {
        let ctx = Context::new();
        let mut cell = ComponentBuilder::new("top");
        let a = port("a", Point::zero(), 0.);
        let b = port("b", Point::new(100., 0.), 180.);
        let r = route(&ctx, &mut cell, &a, &b, &xs(), 0., 0.).unwrap();
        assert_eq!(r.bend_count, 0);
        assert_eq!(r.waypoints, vec![Point::zero(), Point::new(100., 0.)]);
        assert_abs_diff_eq!(r.length, 100.);
        assert_eq!(cell.finish().references().len(), 1);
    }

    #[test]
    fn perpendicular_ports_route_with_one_bend() {
        let ctx = Context::new();
        let mut cell = ComponentBuilder::new("top");
        let a = port("a", Point::zero(), 0.);
        let b = port("b", Point::new(50., 40.), 270.);
        let r = route(&ctx, &mut cell, &a, &b, &xs(), 0., 0.).unwrap();
        assert_eq!(r.bend_count, 1);
        assert_eq!(
            r.waypoints,
            vec![Point::zero(), Point::new(50., 0.), Point::new(50., 40.)]
        );
        // 90 of straight plus a quarter arc replacing the two corner radii.
        let expected = 90. - 20. + std::f64::consts::FRAC_PI_2 * 10.;
        assert_abs_diff_eq!(r.length, expected, epsilon = 1e-9);
        // Two straights and one bend.
        assert_eq!(cell.finish().references().len(), 3);
    }

    #[test]
    fn offset_facing_ports_route_with_a_z() {
        let ctx = Context::new();
        let mut cell = ComponentBuilder::new("top");
        let a = port("a", Point::zero(), 0.);
        let b = port("b", Point::new(100., 30.), 180.);
        let r = route(&ctx, &mut cell, &a, &b, &xs(), 0., 0.).unwrap();
        assert_eq!(r.bend_count, 2);
        assert_eq!(r.waypoints[0], Point::zero());
        assert_eq!(*r.waypoints.last().unwrap(), Point::new(100., 30.));
        assert_eq!(r.waypoints[1], Point::new(10., 0.));
        assert_eq!(r.waypoints[2], Point::new(10., 30.));
    }

    #[test]
    fn same_facing_ports_route_with_a_u() {
        let ctx = Context::new();
        let mut cell = ComponentBuilder::new("top");
        let a = port("a", Point::zero(), 0.);
        let b = port("b", Point::new(-5., 40.), 0.);
        let r = route(&ctx, &mut cell, &a, &b, &xs(), 0., 0.).unwrap();
        assert_eq!(r.bend_count, 2);
        // Escape line at max(0, -5) + radius.
        assert_eq!(r.waypoints[1], Point::new(10., 0.));
        assert_eq!(r.waypoints[2], Point::new(10., 40.));
    }

    #[test]
    fn length_is_monotone_in_straight_run_minimums() {
        let ctx = Context::new();
        let a = port("a", Point::zero(), 0.);
        let b = port("b", Point::new(-5., 40.), 0.);
        let mut prev = 0.;
        for ss in [0., 5., 10., 20.] {
            let mut cell = ComponentBuilder::new("top");
            let r = route(&ctx, &mut cell, &a, &b, &xs(), ss, 0.).unwrap();
            assert!(r.length >= prev);
            prev = r.length;
        }
    }

    #[test]
    fn coincident_ports_are_unroutable() {
        let ctx = Context::new();
        let mut cell = ComponentBuilder::new("top");
        let a = port("a", Point::new(1., 1.), 0.);
        let b = port("b", Point::new(1., 1.), 180.);
        assert!(matches!(
            route(&ctx, &mut cell, &a, &b, &xs(), 0., 0.),
            Err(Error::UnroutablePorts { .. })
        ));
    }

    #[test]
    fn ports_facing_away_are_unroutable() {
        let ctx = Context::new();
        let mut cell = ComponentBuilder::new("top");
        let a = port("a", Point::zero(), 180.);
        let b = port("b", Point::new(100., 0.), 0.);
        assert!(matches!(
            route(&ctx, &mut cell, &a, &b, &xs(), 0., 0.),
            Err(Error::UnroutablePorts { .. })
        ));
    }

    #[test]
    fn jogs_smaller_than_the_bend_diameter_are_unroutable() {
        let ctx = Context::new();
        let mut cell = ComponentBuilder::new("top");
        let a = port("a", Point::zero(), 0.);
        let b = port("b", Point::new(100., 5.), 180.);
        assert!(matches!(
            route(&ctx, &mut cell, &a, &b, &xs(), 0., 0.),
            Err(Error::UnroutablePorts { .. })
        ));
    }

    #[test]
    fn skew_ports_are_unroutable() {
        let ctx = Context::new();
        let mut cell = ComponentBuilder::new("top");
        let a = port("a", Point::zero(), 45.);
        let b = port("b", Point::new(100., 0.), 180.);
        assert!(matches!(
            route(&ctx, &mut cell, &a, &b, &xs(), 0., 0.),
            Err(Error::UnroutablePorts { .. })
        ));
    }
}
