//! Generation settings and the face render mask.

use tellus_cubesphere::{CubeFace, SubdivisionLevel};
use tellus_mesh::{MAX_MESH_RESOLUTION, MIN_MESH_RESOLUTION, NormalMode};

/// Which base directions of the cube are built and rendered.
///
/// The mask selects a whole base direction; individual sub-faces of a
/// subdivided direction are never masked separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FaceRenderMask {
    /// Render every face.
    #[default]
    All,
    /// Render only the sub-faces of one base direction.
    Only(CubeFace),
}

impl FaceRenderMask {
    /// Whether faces of `face`'s direction pass the mask.
    #[must_use]
    pub fn permits(self, face: CubeFace) -> bool {
        match self {
            FaceRenderMask::All => true,
            FaceRenderMask::Only(masked) => masked == face,
        }
    }
}

/// Settings for one planet generation.
///
/// Mesh resolution is stored as given and clamped at the point of use, so a
/// regeneration is always well-defined regardless of input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanetSettings {
    /// Vertices per face edge, clamped to `[2, 256]` when building.
    pub mesh_resolution: u32,
    /// Hierarchical face subdivision level.
    pub subdivision_level: SubdivisionLevel,
    /// Normal computation strategy.
    pub normal_mode: NormalMode,
    /// Base-direction visibility mask.
    pub face_render_mask: FaceRenderMask,
}

impl Default for PlanetSettings {
    fn default() -> Self {
        Self {
            mesh_resolution: 64,
            subdivision_level: SubdivisionLevel::default(),
            normal_mode: NormalMode::Smooth,
            face_render_mask: FaceRenderMask::All,
        }
    }
}

impl PlanetSettings {
    /// Mesh resolution clamped into the supported range.
    #[must_use]
    pub fn clamped_resolution(&self) -> u32 {
        self.mesh_resolution
            .clamp(MIN_MESH_RESOLUTION, MAX_MESH_RESOLUTION)
    }
}
