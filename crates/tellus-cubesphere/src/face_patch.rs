//! A rectangular patch of a cube face and its projection onto the sphere.

use glam::{DVec2, DVec3};

use crate::CubeFace;

/// A sub-rectangle of one cube face, in face-local `[0, 1]²` coordinates.
///
/// `offset` and `scale` locate the patch within its parent face: the base
/// (unsubdivided) patch has `offset = (0, 0)` and `scale = (1, 1)`, and a
/// level-`L` sub-face covers a `1/2^L × 1/2^L` rectangle. Grid percentages
/// passed to [`FacePatch::point_on_cube`] are first remapped through this
/// rectangle, so every patch of a face samples a disjoint region and the
/// union of all patches tiles the full face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FacePatch {
    /// The cube face this patch lies on.
    pub face: CubeFace,
    /// Lower-left corner of the patch within the face, in `[0, 1]²`.
    pub offset: DVec2,
    /// Extent of the patch along each face axis, in `(0, 1]`.
    pub scale: DVec2,
}

impl FacePatch {
    /// The full, unsubdivided patch covering an entire face.
    #[must_use]
    pub fn base(face: CubeFace) -> Self {
        Self {
            face,
            offset: DVec2::ZERO,
            scale: DVec2::ONE,
        }
    }

    /// Remap a grid percentage into this patch's sub-rectangle of the face.
    #[inline]
    #[must_use]
    pub fn remap(&self, percent: DVec2) -> DVec2 {
        self.offset + percent * self.scale
    }

    /// Map a grid percentage to the corresponding point on the `[-1, 1]` cube.
    ///
    /// `(0.5, 0.5)` on a base patch maps to the face's `local_up`.
    #[inline]
    #[must_use]
    pub fn point_on_cube(&self, percent: DVec2) -> DVec3 {
        let p = self.remap(percent);
        let face = self.face;
        face.local_up() + (p.x - 0.5) * 2.0 * face.axis_a() + (p.y - 0.5) * 2.0 * face.axis_b()
    }

    /// Map a grid percentage to the unit-sphere direction for this patch.
    #[inline]
    #[must_use]
    pub fn point_on_unit_sphere(&self, percent: DVec2) -> DVec3 {
        self.point_on_cube(percent).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_base_patch_center_maps_to_local_up() {
        for face in CubeFace::ALL {
            let patch = FacePatch::base(face);
            let cube_pt = patch.point_on_cube(DVec2::new(0.5, 0.5));
            assert!(
                (cube_pt - face.local_up()).length() < EPSILON,
                "center of {face:?} should map to local_up, got {cube_pt:?}"
            );
        }
    }

    #[test]
    fn test_sphere_points_are_unit_length() {
        for face in CubeFace::ALL {
            let patch = FacePatch::base(face);
            for ui in 0..=10 {
                for vi in 0..=10 {
                    let percent = DVec2::new(ui as f64 / 10.0, vi as f64 / 10.0);
                    let dir = patch.point_on_unit_sphere(percent);
                    assert!(
                        (dir.length() - 1.0).abs() < EPSILON,
                        "not on unit sphere for {face:?} at {percent:?}: {}",
                        dir.length()
                    );
                }
            }
        }
    }

    #[test]
    fn test_cube_points_lie_on_cube_surface() {
        for face in CubeFace::ALL {
            let patch = FacePatch::base(face);
            for ui in 0..=8 {
                for vi in 0..=8 {
                    let percent = DVec2::new(ui as f64 / 8.0, vi as f64 / 8.0);
                    let p = patch.point_on_cube(percent);
                    let max_comp = p.x.abs().max(p.y.abs()).max(p.z.abs());
                    assert!(
                        (max_comp - 1.0).abs() < EPSILON,
                        "cube point not on surface for {face:?}: {p:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_sub_patch_samples_interior_of_parent() {
        let face = CubeFace::PosY;
        let parent = FacePatch::base(face);
        let quadrant = FacePatch {
            face,
            offset: DVec2::new(0.5, 0.0),
            scale: DVec2::new(0.5, 0.5),
        };

        // The quadrant's corners coincide with parent points at the remapped
        // percentages.
        let corners = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)];
        for &(u, v) in &corners {
            let percent = DVec2::new(u, v);
            let from_child = quadrant.point_on_cube(percent);
            let from_parent = parent.point_on_cube(quadrant.remap(percent));
            assert!(
                (from_child - from_parent).length() < EPSILON,
                "sub-patch corner ({u}, {v}) disagrees with parent"
            );
        }
    }

    #[test]
    fn test_remap_identity_for_base_patch() {
        let patch = FacePatch::base(CubeFace::NegZ);
        let percent = DVec2::new(0.3, 0.7);
        assert!((patch.remap(percent) - percent).length() < EPSILON);
    }
}
