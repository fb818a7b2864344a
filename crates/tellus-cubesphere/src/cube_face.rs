//! The six faces of the cube that is deformed onto the sphere.

use glam::DVec3;

/// One face of the generator cube, named by its outward axis direction.
///
/// The discriminant doubles as the face's index into per-face arrays, so the
/// order of `ALL` is load-bearing for face addressing and render masking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum CubeFace {
    /// +X face
    PosX = 0,
    /// −X face
    NegX = 1,
    /// +Y face
    PosY = 2,
    /// −Y face
    NegY = 3,
    /// +Z face
    PosZ = 4,
    /// −Z face
    NegZ = 5,
}

impl CubeFace {
    /// All six faces in canonical (index) order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    /// This face's index into per-face arrays.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Outward-pointing unit normal of the face.
    #[must_use]
    pub fn local_up(self) -> DVec3 {
        match self {
            CubeFace::PosX => DVec3::X,
            CubeFace::NegX => DVec3::NEG_X,
            CubeFace::PosY => DVec3::Y,
            CubeFace::NegY => DVec3::NEG_Y,
            CubeFace::PosZ => DVec3::Z,
            CubeFace::NegZ => DVec3::NEG_Z,
        }
    }

    /// First in-face axis, derived from `local_up` by rotating its components.
    ///
    /// For an axis-aligned `local_up` the `(y, z, x)` rotation always yields a
    /// perpendicular unit vector, and using the same derivation on every face
    /// keeps the per-face UV orientation consistent with the color lookup.
    #[must_use]
    pub fn axis_a(self) -> DVec3 {
        let up = self.local_up();
        DVec3::new(up.y, up.z, up.x)
    }

    /// Second in-face axis: `local_up × axis_a`.
    #[must_use]
    pub fn axis_b(self) -> DVec3 {
        self.local_up().cross(self.axis_a())
    }

    /// The opposite face (e.g. `PosY` → `NegY`).
    #[must_use]
    pub fn opposite(self) -> CubeFace {
        match self {
            CubeFace::PosX => CubeFace::NegX,
            CubeFace::NegX => CubeFace::PosX,
            CubeFace::PosY => CubeFace::NegY,
            CubeFace::NegY => CubeFace::PosY,
            CubeFace::PosZ => CubeFace::NegZ,
            CubeFace::NegZ => CubeFace::PosZ,
        }
    }
}
