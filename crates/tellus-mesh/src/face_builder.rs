//! Builds one face patch of the planet: grid deformation onto the sphere,
//! elevation displacement, normals, and UV encoding.

use glam::{DVec2, DVec3};
use tellus_cubesphere::FacePatch;
use tellus_terrain::ElevationSource;

use crate::mesh_buffer::MeshBuffer;

/// Minimum vertices per face edge. Below 2 the triangle array would have a
/// negative length, so resolution is clamped before any allocation.
pub const MIN_MESH_RESOLUTION: u32 = 2;
/// Maximum vertices per face edge.
pub const MAX_MESH_RESOLUTION: u32 = 256;

/// How vertex normals are computed for a face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum NormalMode {
    /// Area-weighted accumulation of incident triangle normals per vertex.
    #[default]
    Smooth,
    /// One normal per triangle, written to all three of its vertex slots.
    ///
    /// Vertices are shared across triangles on this grid, so the
    /// last-written triangle wins at shared slots and the result is a
    /// low-poly look rather than true flat shading, which would require
    /// vertex duplication and a different buffer layout.
    Flat,
}

/// Deform a grid of `resolution²` vertices onto the sphere for `patch`.
///
/// Writes positions, indices, normals, and `uv.y` (unscaled elevation) into
/// `mesh`, resizing it as needed. `uv.x` keeps whatever the buffer already
/// held; the color pass fills it via [`update_face_uvs`].
pub fn build_face<E>(
    mesh: &mut MeshBuffer,
    patch: &FacePatch,
    resolution: u32,
    normal_mode: NormalMode,
    elevation: &mut E,
) where
    E: ElevationSource + ?Sized,
{
    let n = resolution.clamp(MIN_MESH_RESOLUTION, MAX_MESH_RESOLUTION) as usize;
    mesh.prepare(n);

    let mut tri = 0;
    for y in 0..n {
        for x in 0..n {
            let i = x + y * n;
            let percent = DVec2::new(x as f64, y as f64) / (n - 1) as f64;
            let direction = patch.point_on_unit_sphere(percent);

            let unscaled = elevation.unscaled_elevation(direction);
            let scaled = elevation.scaled_elevation(unscaled);
            mesh.positions[i] = direction * scaled;
            mesh.uvs[i].y = unscaled;

            if x != n - 1 && y != n - 1 {
                let i = i as u32;
                let n = n as u32;
                mesh.indices[tri] = i;
                mesh.indices[tri + 1] = i + n + 1;
                mesh.indices[tri + 2] = i + n;
                mesh.indices[tri + 3] = i;
                mesh.indices[tri + 4] = i + 1;
                mesh.indices[tri + 5] = i + n + 1;
                tri += 6;
            }
        }
    }

    match normal_mode {
        NormalMode::Smooth => compute_smooth_normals(mesh),
        NormalMode::Flat => compute_flat_normals(mesh),
    }
}

/// Recompute `uv.x` (biome blend index) for every vertex of `patch`.
///
/// Re-derives the same unit-sphere direction as the geometry pass and leaves
/// `uv.y` untouched.
pub fn update_face_uvs<F>(mesh: &mut MeshBuffer, patch: &FacePatch, resolution: u32, blend_index: F)
where
    F: Fn(DVec3) -> f64,
{
    let n = resolution.clamp(MIN_MESH_RESOLUTION, MAX_MESH_RESOLUTION) as usize;
    if mesh.uvs.len() != n * n {
        mesh.prepare(n);
    }
    for y in 0..n {
        for x in 0..n {
            let i = x + y * n;
            let percent = DVec2::new(x as f64, y as f64) / (n - 1) as f64;
            let direction = patch.point_on_unit_sphere(percent);
            mesh.uvs[i].x = blend_index(direction);
        }
    }
}

fn compute_smooth_normals(mesh: &mut MeshBuffer) {
    mesh.normals.fill(DVec3::ZERO);
    for tri in mesh.indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let edge_ab = mesh.positions[b] - mesh.positions[a];
        let edge_ac = mesh.positions[c] - mesh.positions[a];
        // Unnormalized cross product weights by triangle area.
        let cross = edge_ab.cross(edge_ac);
        mesh.normals[a] += cross;
        mesh.normals[b] += cross;
        mesh.normals[c] += cross;
    }
    for normal in &mut mesh.normals {
        *normal = normal.normalize_or_zero();
    }
}

fn compute_flat_normals(mesh: &mut MeshBuffer) {
    for tri in mesh.indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let edge_ab = mesh.positions[b] - mesh.positions[a];
        let edge_ac = mesh.positions[c] - mesh.positions[a];
        let normal = edge_ab.cross(edge_ac).normalize_or_zero();
        // Shared slots end up with the last incident triangle's normal.
        mesh.normals[a] = normal;
        mesh.normals[b] = normal;
        mesh.normals[c] = normal;
    }
}
