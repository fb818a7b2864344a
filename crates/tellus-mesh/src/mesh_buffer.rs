//! Reusable per-face mesh container.

use glam::{DVec2, DVec3};

use crate::vertex::PlanetVertex;

/// CPU-side mesh data for one face patch.
///
/// `uvs.y` carries the unscaled elevation written during the geometry pass;
/// `uvs.x` carries the biome-blend index written during the color pass. The
/// buffer is owned by the planet assembler and reused across regenerations:
/// [`MeshBuffer::prepare`] resizes in place, so a rebuild at the same
/// resolution keeps `uvs.x` from the previous color pass until it is
/// rewritten.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffer {
    /// Vertex positions, `resolution²` entries.
    pub positions: Vec<DVec3>,
    /// Triangle indices, `6·(resolution−1)²` entries.
    pub indices: Vec<u32>,
    /// Vertex normals, `resolution²` entries.
    pub normals: Vec<DVec3>,
    /// Per-vertex `(blend index, unscaled elevation)` pairs.
    pub uvs: Vec<DVec2>,
}

impl MeshBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resize all channels for an `n × n` vertex grid.
    ///
    /// Existing values within the new bounds are preserved; new slots are
    /// zeroed.
    pub fn prepare(&mut self, n: usize) {
        let vertex_count = n * n;
        let index_count = 6 * n.saturating_sub(1) * n.saturating_sub(1);
        self.positions.resize(vertex_count, DVec3::ZERO);
        self.normals.resize(vertex_count, DVec3::ZERO);
        self.uvs.resize(vertex_count, DVec2::ZERO);
        self.indices.resize(index_count, 0);
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleave into f32 vertices for the external mesh consumer.
    #[must_use]
    pub fn to_vertices(&self) -> Vec<PlanetVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((p, n), uv)| PlanetVertex {
                position: p.as_vec3().to_array(),
                normal: n.as_vec3().to_array(),
                uv: uv.as_vec2().to_array(),
            })
            .collect()
    }
}
