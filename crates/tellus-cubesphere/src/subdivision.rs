//! Hierarchical face subdivision: addressing sub-faces within a base face.

use glam::DVec2;

use crate::{CubeFace, FacePatch};

/// Maximum supported subdivision level. Level 3 already yields 384 faces.
pub const MAX_SUBDIVISION_LEVEL: u8 = 3;

/// How many times each base face is quad-subdivided, in `[0, 3]`.
///
/// Each level splits every face rectangle in half along both axes, so a level
/// `L` face is covered by a `2^L × 2^L` grid of sub-faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct SubdivisionLevel(u8);

impl SubdivisionLevel {
    /// Construct a level, clamping to `[0, MAX_SUBDIVISION_LEVEL]`.
    ///
    /// Out-of-range input is clamped rather than rejected so regeneration is
    /// always well-defined.
    #[must_use]
    pub fn new(level: u8) -> Self {
        Self(level.min(MAX_SUBDIVISION_LEVEL))
    }

    /// The raw level value.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Side length of the sub-face grid on one base face: `2^level`.
    #[must_use]
    pub fn grid_size(self) -> u32 {
        1 << self.0
    }

    /// Number of sub-faces per base face: `4^level`.
    #[must_use]
    pub fn faces_per_direction(self) -> u32 {
        self.grid_size() * self.grid_size()
    }

    /// Total number of faces across all six directions: `6 · 4^level`.
    #[must_use]
    pub fn face_count(self) -> u32 {
        6 * self.faces_per_direction()
    }
}

/// Address of one sub-face: base direction, level, and index within the
/// direction's sub-face grid (row-major, `sub_index < 4^level`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceAddress {
    /// Base cube direction.
    pub face: CubeFace,
    /// Subdivision level of the face grid.
    pub level: SubdivisionLevel,
    /// Row-major index into the `grid_size × grid_size` sub-face grid.
    pub sub_index: u32,
}

/// The patch for a single sub-face address.
///
/// `sub_index` is taken modulo `faces_per_direction`, so any index addresses
/// a valid sub-face.
#[must_use]
pub fn patch_for_address(address: FaceAddress) -> FacePatch {
    let grid = address.level.grid_size();
    let idx = address.sub_index % address.level.faces_per_direction();
    let sub_x = idx % grid;
    let sub_y = idx / grid;

    let g = f64::from(grid);
    FacePatch {
        face: address.face,
        offset: DVec2::new(f64::from(sub_x) / g, f64::from(sub_y) / g),
        scale: DVec2::new(1.0 / g, 1.0 / g),
    }
}

/// All face patches for a subdivision level, in face-major order.
///
/// Patch `i` belongs to base direction `i / faces_per_direction`, which is
/// the ordering the render mask indexes into.
#[must_use]
pub fn patches_for_level(level: SubdivisionLevel) -> Vec<FacePatch> {
    let per_direction = level.faces_per_direction();
    let mut patches = Vec::with_capacity(level.face_count() as usize);
    for face in CubeFace::ALL {
        for sub_index in 0..per_direction {
            patches.push(patch_for_address(FaceAddress {
                face,
                level,
                sub_index,
            }));
        }
    }
    patches
}
