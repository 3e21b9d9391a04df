use approx::assert_abs_diff_eq;
use planar::prelude::*;

fn strip(width: f64) -> CrossSection {
    CrossSection::new(
        vec![Section::new("core", Layer::new(1, 0), width).with_port_names("o1", "o2")],
        10.,
        3.,
    )
    .unwrap()
}

#[test]
fn straight_extrusion_encloses_the_expected_rectangle() {
    let mut cell = ComponentBuilder::new("wg");
    extrude(&mut cell, &Path::straight(10., 2), &strip(2.)).unwrap();
    let cell = cell.finish();

    assert_eq!(cell.shapes().len(), 1);
    assert_abs_diff_eq!(cell.shapes()[0].polygon().area(), 20., epsilon = 1e-6);
    assert_eq!(cell.bbox(), Some(Rect::from_sides(0., -1., 10., 1.)));

    let ports: Vec<_> = cell.ports().collect();
    assert_eq!(ports.len(), 2);
    for p in &ports {
        assert_eq!(p.width(), 2.);
    }
    let turn = wrap_angle(ports[0].orientation() - ports[1].orientation());
    assert_abs_diff_eq!(turn, 180.);
}

#[test]
fn sbend_ports_connect_back_to_back() {
    // An S-bend: quarter turn left, then quarter turn right.
    let mut path = Path::arc(10., 45., None);
    path.append(&Path::arc(10., -45., None));
    let mut cell = ComponentBuilder::new("sbend");
    extrude(&mut cell, &path, &strip(0.5)).unwrap();
    let cell = cell.finish();

    let o1 = cell.port("o1").unwrap();
    let o2 = cell.port("o2").unwrap();
    // Both ends of an S point along the same axis, facing apart.
    assert_abs_diff_eq!(o1.orientation(), 180., epsilon = 1e-9);
    assert_abs_diff_eq!(o2.orientation(), 0., epsilon = 1e-9);
    o1.check_match(o2, 1e-6).unwrap();
    o1.check_match(&o2.transform(Transformation::rotate(180.)), 1e-6)
        .unwrap_err();
}

#[test]
fn multi_lane_extrusion_emits_one_polygon_per_lane() {
    let xs = CrossSection::new(
        vec![
            Section::new("core", Layer::new(1, 0), 0.5).with_port_names("o1", "o2"),
            Section::new("heater", Layer::new(3, 0), 1.)
                .with_offset(2.)
                .with_port_type(PortType::Electrical)
                .with_port_names("e1", "e2"),
            Section::new("clad", Layer::new(2, 0), 4.).with_allow_overlap(true),
        ],
        10.,
        3.,
    )
    .unwrap();
    let mut cell = ComponentBuilder::new("heated_wg");
    extrude(&mut cell, &Path::straight(20., 2), &xs).unwrap();
    let cell = cell.finish();

    assert_eq!(cell.shapes().len(), 3);
    assert_eq!(cell.ports().count(), 4);
    assert_eq!(cell.port("e1").unwrap().port_type(), PortType::Electrical);
    // The cladding lane draws geometry but no ports.
    assert!(cell.port_records().iter().all(|r| r["name"] != "clad"));
}

#[test]
fn port_records_expose_fields_in_a_fixed_order() {
    let mut cell = ComponentBuilder::new("wg");
    extrude(&mut cell, &Path::straight(10., 2), &strip(2.)).unwrap();
    let records = cell.finish().port_records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name"], "o1");
    for record in &records {
        let keys: Vec<_> = record.keys().copied().collect();
        assert_eq!(
            keys,
            vec!["name", "center", "width", "orientation", "layer", "port_type"]
        );
    }
}

#[test]
fn flatten_resolves_nested_references_to_absolute_coordinates() {
    let mut inner = ComponentBuilder::new("wg");
    extrude(&mut inner, &Path::straight(10., 2), &strip(2.)).unwrap();
    let inner = std::sync::Arc::new(inner.finish());

    let mut top = ComponentBuilder::new("top");
    top.add_reference(Reference::new(
        inner.clone(),
        Transformation::from_offset(Point::new(0., 5.)),
    ));
    top.add_reference(Reference::new(
        inner,
        Transformation::from_opts(Point::new(30., 5.), 180., false),
    ));
    let top = top.finish();

    let flat = top.flatten();
    assert_eq!(flat.len(), 2);
    let b0 = flat[0].bbox().unwrap();
    assert_abs_diff_eq!(b0.left(), 0., epsilon = 1e-9);
    assert_abs_diff_eq!(b0.bot(), 4., epsilon = 1e-9);
    let b1 = flat[1].bbox().unwrap();
    assert_abs_diff_eq!(b1.left(), 20., epsilon = 1e-9);
    assert_abs_diff_eq!(b1.right(), 30., epsilon = 1e-9);
}
