//! Stock blocks: the straight and bend cells placed by the router.

use arcstr::ArcStr;
use serde::{Deserialize, Serialize};

use crate::component::ComponentBuilder;
use crate::context::{Block, Context};
use crate::cross_section::CrossSection;
use crate::error::Result;
use crate::extrude::extrude;
use crate::path::Path;

/// A straight extrusion of a cross section.
///
/// Ports `o1` (at the origin, facing back) and `o2` (at the far end,
/// facing forward) sit on the first section of the cross section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Straight {
    /// Length of the straight.
    pub length: f64,
    /// Profile to sweep.
    pub cross_section: CrossSection,
}

impl Block for Straight {
    fn name(&self) -> ArcStr {
        arcstr::format!("straight_{}", self.length)
    }

    fn build(&self, _ctx: &Context, cell: &mut ComponentBuilder) -> Result<()> {
        extrude(cell, &Path::straight(self.length, 2), &self.cross_section)
    }
}

/// A circular-arc extrusion of a cross section.
///
/// The arc starts at the origin heading along +x and turns through
/// `angle` degrees (positive turns left), so a 90-degree bend ends at
/// `(radius, radius)` heading along +y.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BendCircular {
    /// Centerline bend radius.
    pub radius: f64,
    /// Turn angle in degrees; positive turns left.
    pub angle: f64,
    /// Profile to sweep.
    pub cross_section: CrossSection,
}

impl BendCircular {
    /// A left-turning 90-degree bend at the cross section's own radius.
    pub fn left90(cross_section: CrossSection) -> Self {
        Self {
            radius: cross_section.radius(),
            angle: 90.,
            cross_section,
        }
    }
}

impl Block for BendCircular {
    fn name(&self) -> ArcStr {
        arcstr::format!("bend_circular_r{}_a{}", self.radius, self.angle)
    }

    fn build(&self, _ctx: &Context, cell: &mut ComponentBuilder) -> Result<()> {
        extrude(
            cell,
            &Path::arc(self.radius, self.angle, None),
            &self.cross_section,
        )
    }
}
