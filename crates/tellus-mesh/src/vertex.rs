//! GPU-ready interleaved vertex format.

use bytemuck::{Pod, Zeroable};
use static_assertions::const_assert_eq;

/// Interleaved vertex handed to the external mesh consumer.
///
/// `uv` packs `(biome blend index, unscaled elevation)` for the surface
/// material's color lookup.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PlanetVertex {
    /// Position in planet-local space.
    pub position: [f32; 3],
    /// Vertex normal.
    pub normal: [f32; 3],
    /// Color-lookup coordinates.
    pub uv: [f32; 2],
}

// The vertex layout is part of the consumer contract.
const_assert_eq!(std::mem::size_of::<PlanetVertex>(), 32);
