//! Components, references, and the builder that assembles them.

use std::sync::Arc;

use arcstr::ArcStr;
use geometry::bbox::Bbox;
use geometry::point::Point;
use geometry::polygon::Polygon;
use geometry::rect::Rect;
use geometry::transform::{Transform, Transformation, TranslateMut};
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layer::Layer;
use crate::port::Port;

/// A polygon bound to a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    layer: Layer,
    polygon: Polygon,
}

impl Shape {
    /// Creates a new shape.
    pub fn new(layer: Layer, polygon: Polygon) -> Self {
        Self { layer, polygon }
    }

    /// The layer this shape lands on.
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// The geometry of this shape.
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }
}

impl Bbox for Shape {
    fn bbox(&self) -> Option<Rect> {
        self.polygon.bbox()
    }
}

impl TranslateMut for Shape {
    fn translate_mut(&mut self, p: Point) {
        self.polygon.translate_mut(p);
    }
}

impl geometry::transform::TransformMut for Shape {
    fn transform_mut(&mut self, trans: Transformation) {
        self.polygon.transform_mut(trans);
    }
}

/// A placement of a child component inside a parent.
///
/// References share the child via [`Arc`]: placing a component a thousand
/// times stores its geometry once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    cell: Arc<Component>,
    trans: Transformation,
}

impl Reference {
    /// Creates a reference to `cell` at the given placement.
    pub fn new(cell: Arc<Component>, trans: Transformation) -> Self {
        Self { cell, trans }
    }

    /// The referenced component.
    pub fn cell(&self) -> &Arc<Component> {
        &self.cell
    }

    /// The placement of the referenced component in the parent's frame.
    pub fn transformation(&self) -> Transformation {
        self.trans
    }

    /// Looks up a child port by name, mapped into the parent's frame.
    pub fn port(&self, name: &str) -> Option<Port> {
        self.cell.port(name).map(|p| p.transform(self.trans))
    }

    /// Iterates over all child ports, mapped into the parent's frame.
    pub fn ports(&self) -> impl Iterator<Item = Port> + '_ {
        self.cell.ports().map(|p| p.transform(self.trans))
    }
}

impl Bbox for Reference {
    fn bbox(&self) -> Option<Rect> {
        self.cell.bbox().map(|r| r.transform(self.trans))
    }
}

/// A mutable component under construction.
///
/// The bounding box is cached and invalidated on mutation, so repeated
/// placement queries while assembling a large component stay cheap.
#[derive(Debug, Clone)]
pub struct ComponentBuilder {
    name: ArcStr,
    shapes: Vec<Shape>,
    references: Vec<Reference>,
    ports: IndexMap<ArcStr, Port>,
    bbox: std::cell::Cell<Option<Option<Rect>>>,
}

impl ComponentBuilder {
    /// Creates an empty builder.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            shapes: Vec::new(),
            references: Vec::new(),
            ports: IndexMap::new(),
            bbox: std::cell::Cell::new(None),
        }
    }

    /// The name of the component under construction.
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// Adds a polygon on the given layer.
    pub fn add_polygon(&mut self, layer: Layer, polygon: Polygon) {
        self.bbox.set(None);
        self.shapes.push(Shape::new(layer, polygon));
    }

    /// Places a child component.
    pub fn add_reference(&mut self, reference: Reference) {
        self.bbox.set(None);
        self.references.push(reference);
    }

    /// Adds a port.
    ///
    /// Fails with [`Error::DuplicatePort`] if a port with the same name
    /// already exists; ports are never silently replaced.
    pub fn add_port(&mut self, port: Port) -> Result<()> {
        match self.ports.entry(port.name().clone()) {
            indexmap::map::Entry::Occupied(e) => Err(Error::DuplicatePort {
                name: e.key().clone(),
            }),
            indexmap::map::Entry::Vacant(e) => {
                e.insert(port);
                Ok(())
            }
        }
    }

    /// Looks up a port by name.
    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.get(name)
    }

    /// The bounding box of everything added so far, or `None` while empty.
    pub fn bbox(&self) -> Option<Rect> {
        if let Some(b) = self.bbox.get() {
            return b;
        }
        let b = union_bbox(&self.shapes, &self.references);
        self.bbox.set(Some(b));
        b
    }

    /// Freezes this builder into an immutable component.
    pub fn finish(self) -> Component {
        Component {
            name: self.name,
            shapes: self.shapes,
            references: self.references,
            ports: self.ports,
            bbox: OnceCell::new(),
        }
    }
}

fn union_bbox(shapes: &[Shape], references: &[Reference]) -> Option<Rect> {
    let mut acc: Option<Rect> = None;
    for s in shapes {
        acc = Rect::union_option(acc, s.bbox());
    }
    for r in references {
        acc = Rect::union_option(acc, r.bbox());
    }
    acc
}

/// An immutable component: shapes, child placements, and named ports.
///
/// Components are frozen at construction and shared via [`Arc`], so a
/// component can appear under many parents without copying.
#[derive(Debug, Serialize, Deserialize)]
pub struct Component {
    name: ArcStr,
    shapes: Vec<Shape>,
    references: Vec<Reference>,
    ports: IndexMap<ArcStr, Port>,
    #[serde(skip)]
    bbox: OnceCell<Option<Rect>>,
}

impl Component {
    /// The name of the component.
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// The shapes drawn directly in this component, excluding children.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// The child placements of this component.
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    /// Looks up a port by name.
    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.get(name)
    }

    /// Iterates over ports in the order they were added.
    pub fn ports(&self) -> impl Iterator<Item = &Port> + '_ {
        self.ports.values()
    }

    /// The bounding box of this component and all its descendants, or
    /// `None` if the component contains no geometry at all.
    pub fn bbox(&self) -> Option<Rect> {
        *self
            .bbox
            .get_or_init(|| union_bbox(&self.shapes, &self.references))
    }

    /// Flattens the reference graph into absolute-frame shapes.
    ///
    /// Shape order is deterministic: a component's own shapes first, then
    /// each reference's flattened shapes in placement order.
    pub fn flatten(&self) -> Vec<Shape> {
        let mut out = Vec::new();
        self.flatten_into(Transformation::identity(), &mut out);
        out
    }

    fn flatten_into(&self, trans: Transformation, out: &mut Vec<Shape>) {
        for s in &self.shapes {
            out.push(s.clone().transform(trans));
        }
        for r in &self.references {
            r.cell
                .flatten_into(Transformation::cascade(trans, r.trans), out);
        }
    }

    /// Returns all ports as ordered key-value records, in port order.
    pub fn port_records(&self) -> Vec<IndexMap<&'static str, String>> {
        self.ports.values().map(Port::to_record).collect()
    }
}

impl Bbox for Component {
    fn bbox(&self) -> Option<Rect> {
        Component::bbox(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::PortType;
    use approx::assert_abs_diff_eq;

    fn unit_square(name: &str) -> Arc<Component> {
        let mut cell = ComponentBuilder::new(arcstr::format!("{name}"));
        cell.add_polygon(
            Layer::new(1, 0),
            Polygon::from_verts(vec![
                Point::zero(),
                Point::new(1., 0.),
                Point::new(1., 1.),
                Point::new(0., 1.),
            ]),
        );
        cell.add_port(
            Port::new(
                "o1",
                Point::new(0., 0.5),
                180.,
                0.5,
                Layer::new(1, 0),
                PortType::Optical,
            )
            .unwrap(),
        )
        .unwrap();
        Arc::new(cell.finish())
    }

    #[test]
    fn empty_components_have_no_bbox() {
        let cell = ComponentBuilder::new("empty");
        assert_eq!(cell.bbox(), None);
        assert_eq!(cell.finish().bbox(), None);
    }

    #[test]
    fn duplicate_ports_are_rejected() {
        let mut cell = ComponentBuilder::new("dup");
        let port = Port::new(
            "o1",
            Point::zero(),
            0.,
            1.,
            Layer::new(1, 0),
            PortType::Optical,
        )
        .unwrap();
        cell.add_port(port.clone()).unwrap();
        assert!(matches!(
            cell.add_port(port),
            Err(Error::DuplicatePort { .. })
        ));
    }

    #[test]
    fn builder_bbox_tracks_mutation() {
        let mut cell = ComponentBuilder::new("grow");
        cell.add_polygon(
            Layer::new(1, 0),
            Polygon::from_verts(vec![
                Point::zero(),
                Point::new(1., 0.),
                Point::new(1., 1.),
            ]),
        );
        assert_eq!(cell.bbox(), Some(Rect::from_sides(0., 0., 1., 1.)));
        cell.add_polygon(
            Layer::new(1, 0),
            Polygon::from_verts(vec![
                Point::new(5., 5.),
                Point::new(6., 5.),
                Point::new(6., 6.),
            ]),
        );
        assert_eq!(cell.bbox(), Some(Rect::from_sides(0., 0., 6., 6.)));
    }

    #[test]
    fn references_map_ports_and_bboxes_into_the_parent_frame() {
        let child = unit_square("child");
        let r = Reference::new(
            child,
            Transformation::from_opts(Point::new(10., 0.), 90., false),
        );
        let bbox = r.bbox().unwrap();
        assert_abs_diff_eq!(bbox.left(), 9., epsilon = 1e-9);
        assert_abs_diff_eq!(bbox.right(), 10., epsilon = 1e-9);
        assert_abs_diff_eq!(bbox.bot(), 0., epsilon = 1e-9);
        assert_abs_diff_eq!(bbox.top(), 1., epsilon = 1e-9);

        let port = r.port("o1").unwrap();
        assert_abs_diff_eq!(port.center().x, 9.5, epsilon = 1e-9);
        assert_abs_diff_eq!(port.center().y, 0., epsilon = 1e-9);
        assert_abs_diff_eq!(port.orientation(), 270., epsilon = 1e-9);
    }

    #[test]
    fn flatten_composes_nested_placements() {
        let leaf = unit_square("leaf");
        let mut mid = ComponentBuilder::new("mid");
        mid.add_reference(Reference::new(
            leaf,
            Transformation::from_offset(Point::new(2., 0.)),
        ));
        let mid = Arc::new(mid.finish());

        let mut top = ComponentBuilder::new("top");
        top.add_reference(Reference::new(
            mid,
            Transformation::from_opts(Point::zero(), 90., false),
        ));
        let top = top.finish();

        let flat = top.flatten();
        assert_eq!(flat.len(), 1);
        let bbox = flat[0].bbox().unwrap();
        // (2, 0)..(3, 1) rotated 90 degrees about the origin.
        assert_abs_diff_eq!(bbox.left(), -1., epsilon = 1e-9);
        assert_abs_diff_eq!(bbox.right(), 0., epsilon = 1e-9);
        assert_abs_diff_eq!(bbox.bot(), 2., epsilon = 1e-9);
        assert_abs_diff_eq!(bbox.top(), 3., epsilon = 1e-9);
    }
}
