use approx::assert_abs_diff_eq;
use itertools::Itertools;
use planar::prelude::*;

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
fn route_endpoints_match_the_port_centers() {
    let ctx = Context::new();
    let cases = [
        (Point::new(200., 0.), 180.),  // straight
        (Point::new(200., 100.), 180.), // Z
        (Point::new(200., 100.), 270.), // L
        (Point::new(-30., 100.), 0.),  // U
    ];
    for (center, orientation) in cases {
        let mut cell = ComponentBuilder::new("top");
        let a = port("a", Point::zero(), 0.);
        let b = port("b", center, orientation);
        let r = route(&ctx, &mut cell, &a, &b, &xs(), 5., 5.).unwrap();
        assert_eq!(r.waypoints[0], a.center());
        assert_eq!(*r.waypoints.last().unwrap(), b.center());
        assert_eq!(r.port1.name(), a.name());
        assert_eq!(r.port2.name(), b.name());
    }
}

#[test]
fn route_length_accounts_for_bend_arcs() {
    let ctx = Context::new();
    let mut cell = ComponentBuilder::new("top");
    let a = port("a", Point::zero(), 0.);
    let b = port("b", Point::new(50., 40.), 270.);
    let r = route(&ctx, &mut cell, &a, &b, &xs(), 0., 0.).unwrap();
    let expected = 90. - 20. + std::f64::consts::FRAC_PI_2 * 10.;
    assert_abs_diff_eq!(r.length, expected, epsilon = 1e-9);

    // The drawn geometry covers the full route: its bbox spans both ports.
    let bbox = cell.bbox().unwrap();
    assert!(bbox.left() <= 0. && bbox.right() >= 50.);
    assert!(bbox.bot() <= 0. && bbox.top() >= 40.);
}

#[test]
fn route_length_is_monotone_in_straight_run_minimums() {
    let ctx = Context::new();
    let a = port("a", Point::zero(), 0.);
    let b = port("b", Point::new(-30., 100.), 0.);
    let mut prev = 0.;
    for m in [0., 10., 25., 60.] {
        let mut cell = ComponentBuilder::new("top");
        let r = route(&ctx, &mut cell, &a, &b, &xs(), m, m).unwrap();
        assert!(r.length >= prev);
        prev = r.length;
    }
}

#[test]
fn coincident_ports_fail_to_route() {
    let ctx = Context::new();
    let mut cell = ComponentBuilder::new("top");
    let a = port("a", Point::new(3., 7.), 0.);
    let b = port("b", Point::new(3., 7.), 180.);
    assert!(matches!(
        route(&ctx, &mut cell, &a, &b, &xs(), 0., 0.),
        Err(Error::UnroutablePorts { .. })
    ));
}

#[test]
fn bend_cells_are_shared_across_routes() {
    let ctx = Context::new();
    let mut cell = ComponentBuilder::new("top");
    let a = port("a", Point::zero(), 0.);
    let b = port("b", Point::new(100., 80.), 180.);
    let c = port("c", Point::new(0., 200.), 0.);
    let d = port("d", Point::new(100., 280.), 180.);
    route(&ctx, &mut cell, &a, &b, &xs(), 0., 0.).unwrap();
    route(&ctx, &mut cell, &c, &d, &xs(), 0., 0.).unwrap();
    let cell = cell.finish();

    let bends: Vec<_> = cell
        .references()
        .iter()
        .filter(|r| r.cell().name().starts_with("bend_circular"))
        .collect();
    // Two Z routes, two bends each, all realized by one cached bend cell.
    assert_eq!(bends.len(), 4);
    for b in &bends[1..] {
        assert!(std::sync::Arc::ptr_eq(bends[0].cell(), b.cell()));
    }
}

fn cross_sign(o: Point, a: Point, b: Point) -> f64 {
    (a - o).x * (b - o).y - (a - o).y * (b - o).x
}

fn polylines_cross(a: &[Point], b: &[Point]) -> bool {
    a.windows(2).any(|sa| {
        b.windows(2).any(|sb| {
            let d1 = cross_sign(sa[0], sa[1], sb[0]);
            let d2 = cross_sign(sa[0], sa[1], sb[1]);
            let d3 = cross_sign(sb[0], sb[1], sa[0]);
            let d4 = cross_sign(sb[0], sb[1], sa[1]);
            d1 * d2 < 0. && d3 * d4 < 0.
        })
    })
}

#[test]
fn bundle_of_four_ports_reaches_the_side_without_crossing() {
    let ctx = Context::new();
    let mut cell = ComponentBuilder::new("top");
    let ports = vec![
        port("p0", Point::new(0., 90.), 0.),
        port("p1", Point::new(0., 0.), 0.),
        port("p2", Point::new(0., 270.), 0.),
        port("p3", Point::new(0., 180.), 0.),
    ];
    let (routes, failures) =
        route_ports_to_side(&ctx, &mut cell, &ports, Side::Right, 500., &xs());
    assert!(failures.is_empty());
    assert_eq!(routes.len(), 4);

    // Lane assignment preserves sorted transverse order.
    let starts: Vec<f64> = routes.iter().map(|r| r.port1.center().y).collect();
    assert!(starts.windows(2).all(|w| w[0] < w[1]));
    let ends: Vec<f64> = routes
        .iter()
        .map(|r| r.waypoints.last().unwrap().y)
        .collect();
    assert!(ends.windows(2).all(|w| w[0] < w[1]));

    for r in &routes {
        assert_eq!(r.waypoints.last().unwrap().x, 500.);
    }
    for (a, b) in routes.iter().tuple_combinations() {
        assert!(!polylines_cross(&a.waypoints, &b.waypoints));
    }
}
