//! The pluggable surface query used to classify sample points.

use glam::DVec3;

/// A ray hit on the rendered planet surface.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceHit {
    /// World-space hit point.
    pub point: DVec3,
    /// Tag of the hit object.
    pub tag: String,
    /// Name of the hit object.
    pub name: String,
}

/// Scene collision query against the rendered surface.
///
/// The analyzer never touches the mesh data directly; everything it learns
/// about the surface goes through this trait, so tests can supply a
/// deterministic world instead of a physics scene.
pub trait SurfaceClassifier {
    /// Cast a ray and return the first hit within `max_distance`, if any.
    fn raycast(&self, origin: DVec3, direction: DVec3, max_distance: f64) -> Option<SurfaceHit>;
}

/// Classification of a surface hit by tag/name substring matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SurfaceKind {
    Land,
    Water,
    Unknown,
}

/// Match a hit against the land/water tags.
///
/// Land is checked first; a hit matching neither is `Unknown` and treated as
/// a rejection by the analyzer.
pub(crate) fn classify(hit: &SurfaceHit, land_tag: &str, water_tag: &str) -> SurfaceKind {
    if hit.tag.contains(land_tag) || hit.name.contains(land_tag) {
        SurfaceKind::Land
    } else if hit.tag.contains(water_tag) || hit.name.contains(water_tag) {
        SurfaceKind::Water
    } else {
        SurfaceKind::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(tag: &str, name: &str) -> SurfaceHit {
        SurfaceHit {
            point: DVec3::X,
            tag: tag.into(),
            name: name.into(),
        }
    }

    #[test]
    fn test_classify_by_tag() {
        assert_eq!(classify(&hit("Ground", ""), "Ground", "Ocean"), SurfaceKind::Land);
        assert_eq!(classify(&hit("Ocean", ""), "Ground", "Ocean"), SurfaceKind::Water);
    }

    #[test]
    fn test_classify_by_name_substring() {
        assert_eq!(
            classify(&hit("", "OceanSphere_01"), "Ground", "Ocean"),
            SurfaceKind::Water
        );
        assert_eq!(
            classify(&hit("", "GroundMesh"), "Ground", "Ocean"),
            SurfaceKind::Land
        );
    }

    #[test]
    fn test_land_match_wins_over_water() {
        // A hit matching both tags classifies as land because land is
        // checked first.
        assert_eq!(
            classify(&hit("Ground", "Ocean"), "Ground", "Ocean"),
            SurfaceKind::Land
        );
    }

    #[test]
    fn test_unmatched_hit_is_unknown() {
        assert_eq!(
            classify(&hit("Cloud", "Skybox"), "Ground", "Ocean"),
            SurfaceKind::Unknown
        );
    }
}
