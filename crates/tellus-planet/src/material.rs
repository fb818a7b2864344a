//! Material parameters published to the external surface material.

use glam::Vec2;
use tellus_terrain::BiomeLookupBuffer;

/// Explicit material context for the planet surface.
///
/// The assembler writes here after each pass instead of mutating ambient
/// renderer state; the external material consumes `elevation_min_max` and the
/// lookup texture from this object.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetMaterialParams {
    /// `(min, max)` of the scaled elevation over all built vertices.
    pub elevation_min_max: Vec2,
    /// The synthesized biome color lookup.
    pub lookup: BiomeLookupBuffer,
}

impl Default for PlanetMaterialParams {
    fn default() -> Self {
        Self {
            elevation_min_max: Vec2::ZERO,
            lookup: BiomeLookupBuffer::empty(),
        }
    }
}
