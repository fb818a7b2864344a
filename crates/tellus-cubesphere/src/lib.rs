//! Cube-sphere geometry: face bases, hierarchical face subdivision, and
//! cube-to-sphere projection.

mod cube_face;
mod face_patch;
mod subdivision;

pub use cube_face::CubeFace;
pub use face_patch::FacePatch;
pub use subdivision::{
    FaceAddress, MAX_SUBDIVISION_LEVEL, SubdivisionLevel, patch_for_address, patches_for_level,
};
