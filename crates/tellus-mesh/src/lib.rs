//! Face mesh construction: grid deformation onto the sphere, normal
//! computation, and elevation/biome UV encoding.

mod face_builder;
mod mesh_buffer;
mod vertex;

pub use face_builder::{
    MAX_MESH_RESOLUTION, MIN_MESH_RESOLUTION, NormalMode, build_face, update_face_uvs,
};
pub use mesh_buffer::MeshBuffer;
pub use vertex::PlanetVertex;
