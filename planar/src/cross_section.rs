//! Cross sections: the parallel-lane profile swept along a path.

use arcstr::ArcStr;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layer::Layer;
use crate::port::PortType;

/// One lane of a cross section: a strip of a given width, on a given layer,
/// at a signed perpendicular offset from the path centerline.
///
/// Positive offsets sit to the right of the direction of travel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// The layer the strip lands on.
    pub layer: Layer,
    /// The width of the strip.
    pub width: f64,
    /// Signed perpendicular offset of the strip centerline.
    pub offset: f64,
    /// Name of the section, for diagnostics.
    pub name: ArcStr,
    /// Names for the ports generated at the start and end of the swept strip.
    ///
    /// `None` suppresses the corresponding port.
    pub port_names: (Option<ArcStr>, Option<ArcStr>),
    /// The kind of port generated at the strip ends.
    pub port_type: PortType,
    /// Exempts this section from the pairwise overlap check, for cladding
    /// and other intentionally-overlapping strips.
    pub allow_overlap: bool,
}

impl Section {
    /// Creates a section centered on the path with no end ports.
    pub fn new(name: impl Into<ArcStr>, layer: Layer, width: f64) -> Self {
        Self {
            layer,
            width,
            offset: 0.,
            name: name.into(),
            port_names: (None, None),
            port_type: PortType::default(),
            allow_overlap: false,
        }
    }

    /// Sets the perpendicular offset of the strip.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Names the ports generated at the start and end of the strip.
    pub fn with_port_names(
        mut self,
        start: impl Into<ArcStr>,
        end: impl Into<ArcStr>,
    ) -> Self {
        self.port_names = (Some(start.into()), Some(end.into()));
        self
    }

    /// Sets the kind of port generated at the strip ends.
    pub fn with_port_type(mut self, port_type: PortType) -> Self {
        self.port_type = port_type;
        self
    }

    /// Exempts this section from the overlap check.
    pub fn with_allow_overlap(mut self, allow_overlap: bool) -> Self {
        self.allow_overlap = allow_overlap;
        self
    }

    /// The half-open interval `[offset - width/2, offset + width/2]`
    /// occupied by this strip.
    fn extent(&self) -> (f64, f64) {
        (self.offset - self.width / 2., self.offset + self.width / 2.)
    }
}

/// The full profile swept along a path, plus the routing parameters that
/// travel with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSection {
    sections: Vec<Section>,
    /// Bend radius used when routing with this cross section.
    radius: f64,
    /// Minimum centerline-to-centerline clearance between parallel routes.
    separation: f64,
}

impl CrossSection {
    /// Creates a cross section.
    ///
    /// The first section is the main strip: its width is the width of ports
    /// generated from this cross section.
    ///
    /// Fails with [`Error::EmptyCrossSection`] if `sections` is empty, with
    /// [`Error::InvalidRadius`] if the bend radius is not positive, and
    /// with [`Error::OverlappingSections`] if two strips overlap and
    /// neither opts out via [`Section::with_allow_overlap`].
    pub fn new(sections: Vec<Section>, radius: f64, separation: f64) -> Result<Self> {
        if sections.is_empty() {
            return Err(Error::EmptyCrossSection);
        }
        if radius <= 0. {
            return Err(Error::InvalidRadius { radius });
        }
        for (i, a) in sections.iter().enumerate() {
            if a.allow_overlap {
                continue;
            }
            for b in sections.iter().skip(i + 1) {
                if b.allow_overlap {
                    continue;
                }
                let (a_lo, a_hi) = a.extent();
                let (b_lo, b_hi) = b.extent();
                if a_lo < b_hi && b_lo < a_hi {
                    return Err(Error::OverlappingSections {
                        a: a.name.clone(),
                        b: b.name.clone(),
                    });
                }
            }
        }
        Ok(Self {
            sections,
            radius,
            separation,
        })
    }

    /// The lanes of this cross section, main strip first.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// The width of the main strip.
    pub fn width(&self) -> f64 {
        self.sections[0].width
    }

    /// The bend radius used when routing with this cross section.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The minimum centerline-to-centerline clearance between parallel
    /// routes of this cross section.
    pub fn separation(&self) -> f64 {
        self.separation
    }

    /// Returns a copy with the main strip's width replaced.
    pub fn with_width(&self, width: f64) -> Self {
        let mut out = self.clone();
        out.sections[0].width = width;
        out
    }
}

/// An explicit mapping from cross-section names to cross sections.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CrossSectionRegistry {
    cross_sections: IndexMap<ArcStr, CrossSection>,
}

impl CrossSectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a cross section under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<ArcStr>, xs: CrossSection) {
        self.cross_sections.insert(name.into(), xs);
    }

    /// Looks up a cross section by name.
    ///
    /// Fails with [`Error::UnknownCrossSection`]; there is no fallback.
    pub fn get(&self, name: &str) -> Result<&CrossSection> {
        self.cross_sections
            .get(name)
            .ok_or_else(|| Error::UnknownCrossSection {
                name: ArcStr::from(name),
            })
    }

    /// Iterates over registered cross sections in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ArcStr, &CrossSection)> {
        self.cross_sections.iter()
    }
}
