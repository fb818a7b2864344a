//! Sampling, classification, and flood-fill grouping of continents.

use std::collections::VecDeque;

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tellus_config::ContinentConfig;
use tracing::info;

use crate::classifier::{SurfaceClassifier, SurfaceKind, classify};

/// Tuning for one continent analysis.
#[derive(Clone, Debug)]
pub struct AnalyzerSettings {
    /// Number of random surface samples drawn per analysis.
    pub sample_points: usize,
    /// Maximum distance between two samples that still counts as connected,
    /// in world units.
    pub sample_radius: f64,
    /// Components smaller than this are discarded.
    pub min_continent_size: usize,
    /// Fraction of perturbed-ray hits that must classify as stable for a
    /// sample to be accepted.
    pub stability_threshold: f64,
    /// RNG seed; identical settings and classifier reproduce the analysis.
    pub seed: u64,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            sample_points: 1000,
            sample_radius: 12.0,
            min_continent_size: 3,
            stability_threshold: 0.7,
            seed: 0,
        }
    }
}

impl AnalyzerSettings {
    /// Settings from the persisted configuration plus the world seed.
    #[must_use]
    pub fn from_config(config: &ContinentConfig, seed: u64) -> Self {
        Self {
            sample_points: config.sample_points,
            sample_radius: config.sample_radius,
            min_continent_size: config.min_continent_size,
            stability_threshold: config.stability_threshold,
            seed,
        }
    }
}

/// One connected component of accepted land samples.
#[derive(Clone, Debug, PartialEq)]
pub struct ContinentData {
    /// Mean of the component's sample positions.
    pub center: DVec3,
    /// The accepted sample positions, scaled to the planet radius.
    pub points: Vec<DVec3>,
    /// Whether this is the largest continent of the last analysis.
    pub is_main_continent: bool,
}

impl ContinentData {
    /// Number of samples in this continent.
    #[must_use]
    pub fn size(&self) -> usize {
        self.points.len()
    }
}

/// Samples the sphere, classifies land vs. water through a
/// [`SurfaceClassifier`], and groups accepted samples into continents.
///
/// The continent list is rebuilt from scratch on every
/// [`ContinentAnalyzer::analyze_continents`] call; nothing persists between
/// analyses except the settings.
pub struct ContinentAnalyzer {
    settings: AnalyzerSettings,
    continents: Vec<ContinentData>,
    rng: ChaCha8Rng,
    radius: f64,
    land_tag: String,
    water_tag: String,
}

/// Uniform random direction on the unit sphere.
fn random_unit_direction(rng: &mut ChaCha8Rng) -> DVec3 {
    let y: f64 = rng.random_range(-1.0..=1.0);
    let theta: f64 = rng.random_range(0.0..std::f64::consts::TAU);
    let r = (1.0 - y * y).max(0.0).sqrt();
    DVec3::new(r * theta.cos(), y, r * theta.sin())
}

/// Flood-fill accepted samples into connected components.
///
/// Two samples are connected when their Euclidean distance is at most
/// `sample_radius`; connectivity is transitive through the component.
/// Components below `min_size` are dropped. Brute-force neighbor search is
/// deliberate: at the analyzer's sample counts it beats maintaining a
/// spatial index.
fn group_points(points: &[DVec3], sample_radius: f64, min_size: usize) -> Vec<ContinentData> {
    let mut visited = vec![false; points.len()];
    let mut continents = Vec::new();

    for start in 0..points.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut queue = VecDeque::from([start]);
        let mut members = Vec::new();

        while let Some(i) = queue.pop_front() {
            members.push(points[i]);
            for (j, other) in points.iter().enumerate() {
                if !visited[j] && points[i].distance(*other) <= sample_radius {
                    visited[j] = true;
                    queue.push_back(j);
                }
            }
        }

        if members.len() >= min_size {
            let center = members.iter().copied().sum::<DVec3>() / members.len() as f64;
            continents.push(ContinentData {
                center,
                points: members,
                is_main_continent: false,
            });
        }
    }

    continents
}

impl ContinentAnalyzer {
    /// Create an analyzer; no analysis runs until
    /// [`ContinentAnalyzer::analyze_continents`] is called.
    #[must_use]
    pub fn new(settings: AnalyzerSettings) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(settings.seed);
        Self {
            settings,
            continents: Vec::new(),
            rng,
            radius: 0.0,
            land_tag: String::new(),
            water_tag: String::new(),
        }
    }

    /// The settings this analyzer was built with.
    #[must_use]
    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    /// The continents found by the last analysis, largest first.
    #[must_use]
    pub fn continents(&self) -> &[ContinentData] {
        &self.continents
    }

    /// Rebuild the continent list from fresh surface samples.
    ///
    /// Each sample direction is probed with a center-out ray; a first hit
    /// classified by `land_tag` rejects the sample and a first hit
    /// classified by `water_tag` makes it a provisional land sample, which
    /// is then stability-checked with six perturbed rays. Ray misses and
    /// unmatched hits reject the sample. Accepted samples are flood-filled
    /// into components and the largest kept component becomes the main
    /// continent.
    pub fn analyze_continents<C>(
        &mut self,
        classifier: &C,
        radius: f64,
        land_tag: &str,
        water_tag: &str,
    ) -> &[ContinentData]
    where
        C: SurfaceClassifier + ?Sized,
    {
        self.rng = ChaCha8Rng::seed_from_u64(self.settings.seed);
        self.radius = radius;
        self.land_tag = land_tag.to_owned();
        self.water_tag = water_tag.to_owned();

        let max_distance = radius * 10.0;
        let mut accepted = Vec::new();

        for _ in 0..self.settings.sample_points {
            let direction = random_unit_direction(&mut self.rng);
            let point = direction * radius;

            let Some(hit) = classifier.raycast(DVec3::ZERO, direction, max_distance) else {
                continue;
            };
            if classify(&hit, land_tag, water_tag) != SurfaceKind::Water {
                continue;
            }
            if self.is_stable(classifier, point, land_tag, water_tag, max_distance) {
                accepted.push(point);
            }
        }

        let mut continents = group_points(
            &accepted,
            self.settings.sample_radius,
            self.settings.min_continent_size,
        );
        continents.sort_by(|a, b| b.points.len().cmp(&a.points.len()));
        if let Some(largest) = continents.first_mut() {
            largest.is_main_continent = true;
        }

        info!(
            samples = self.settings.sample_points,
            accepted = accepted.len(),
            continents = continents.len(),
            "continent analysis complete"
        );

        self.continents = continents;
        &self.continents
    }

    /// Probe six perturbed directions around `point` and require the stable
    /// fraction of their hits to reach the threshold.
    fn is_stable<C>(
        &self,
        classifier: &C,
        point: DVec3,
        land_tag: &str,
        water_tag: &str,
        max_distance: f64,
    ) -> bool
    where
        C: SurfaceClassifier + ?Sized,
    {
        const OFFSETS: [DVec3; 6] = [
            DVec3::X,
            DVec3::NEG_X,
            DVec3::Y,
            DVec3::NEG_Y,
            DVec3::Z,
            DVec3::NEG_Z,
        ];

        let mut hits = 0u32;
        let mut stable = 0u32;
        for offset in OFFSETS {
            let jittered = (point + offset * 0.1).normalize();
            if let Some(hit) = classifier.raycast(DVec3::ZERO, jittered, max_distance) {
                hits += 1;
                if classify(&hit, land_tag, water_tag) == SurfaceKind::Water {
                    stable += 1;
                }
            }
        }

        hits > 0 && f64::from(stable) / f64::from(hits) >= self.settings.stability_threshold
    }

    /// The largest continent of the last analysis, if any.
    #[must_use]
    pub fn main_continent(&self) -> Option<&ContinentData> {
        self.continents.iter().find(|c| c.is_main_continent)
    }

    /// A random sample from the main continent, re-projected onto the
    /// rendered surface.
    ///
    /// Casts a short ray from outside the sampled point back toward the
    /// center; a land-classified hit wins, otherwise the raw sample is
    /// returned. `None` when the last analysis found no continents, which
    /// callers must treat as a recoverable fallback.
    pub fn random_position_on_main_continent<C>(&mut self, classifier: &C) -> Option<DVec3>
    where
        C: SurfaceClassifier + ?Sized,
    {
        let main = self.continents.iter().position(|c| c.is_main_continent)?;
        let points = &self.continents[main].points;
        let point = points[self.rng.random_range(0..points.len())];

        let direction = point.normalize();
        let origin = direction * (self.radius * 1.5);
        match classifier.raycast(origin, -direction, self.radius) {
            Some(hit) if classify(&hit, &self.land_tag, &self.water_tag) == SurfaceKind::Land => {
                Some(hit.point)
            }
            _ => Some(point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::SurfaceHit;

    /// Classifies by latitude: directions with `y >= split` hit "Ocean",
    /// the rest hit "Ground".
    struct LatitudeWorld {
        radius: f64,
        split: f64,
    }

    impl SurfaceClassifier for LatitudeWorld {
        fn raycast(&self, _origin: DVec3, direction: DVec3, _max: f64) -> Option<SurfaceHit> {
            let dir = direction.normalize();
            let tag = if dir.y >= self.split { "Ocean" } else { "Ground" };
            Some(SurfaceHit {
                point: dir * self.radius,
                tag: tag.into(),
                name: String::new(),
            })
        }
    }

    /// Two polar water caps (`|y| > 0.8`) on an otherwise land planet.
    struct TwoCapWorld {
        radius: f64,
    }

    impl SurfaceClassifier for TwoCapWorld {
        fn raycast(&self, _origin: DVec3, direction: DVec3, _max: f64) -> Option<SurfaceHit> {
            let dir = direction.normalize();
            let tag = if dir.y.abs() > 0.8 { "Ocean" } else { "Ground" };
            Some(SurfaceHit {
                point: dir * self.radius,
                tag: tag.into(),
                name: String::new(),
            })
        }
    }

    /// Uniform world: every ray hits the same tag.
    struct UniformWorld {
        radius: f64,
        tag: &'static str,
    }

    impl SurfaceClassifier for UniformWorld {
        fn raycast(&self, _origin: DVec3, direction: DVec3, _max: f64) -> Option<SurfaceHit> {
            Some(SurfaceHit {
                point: direction.normalize() * self.radius,
                tag: self.tag.into(),
                name: String::new(),
            })
        }
    }

    /// No surface at all: every ray misses.
    struct VoidWorld;

    impl SurfaceClassifier for VoidWorld {
        fn raycast(&self, _origin: DVec3, _direction: DVec3, _max: f64) -> Option<SurfaceHit> {
            None
        }
    }

    fn settings(sample_radius: f64, seed: u64) -> AnalyzerSettings {
        AnalyzerSettings {
            sample_points: 1000,
            sample_radius,
            min_continent_size: 3,
            stability_threshold: 0.7,
            seed,
        }
    }

    #[test]
    fn test_group_points_merges_transitive_chain() {
        // A chain much longer than the connection radius still forms one
        // component through pairwise links.
        let points: Vec<DVec3> = (0..20).map(|i| DVec3::new(i as f64 * 0.9, 0.0, 0.0)).collect();
        let continents = group_points(&points, 1.0, 1);
        assert_eq!(continents.len(), 1);
        assert_eq!(continents[0].size(), 20);
    }

    #[test]
    fn test_group_points_separates_distant_clusters() {
        let mut points: Vec<DVec3> = (0..5).map(|i| DVec3::new(i as f64 * 0.5, 0.0, 0.0)).collect();
        points.extend((0..4).map(|i| DVec3::new(100.0 + i as f64 * 0.5, 0.0, 0.0)));
        let continents = group_points(&points, 1.0, 1);
        assert_eq!(continents.len(), 2);
        let mut sizes: Vec<usize> = continents.iter().map(ContinentData::size).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![4, 5]);
    }

    #[test]
    fn test_group_points_drops_small_components() {
        let points = vec![
            DVec3::ZERO,
            DVec3::new(0.5, 0.0, 0.0),
            DVec3::new(50.0, 0.0, 0.0),
        ];
        let continents = group_points(&points, 1.0, 2);
        assert_eq!(continents.len(), 1);
        assert_eq!(continents[0].size(), 2);
    }

    #[test]
    fn test_group_points_center_is_mean() {
        let points = vec![DVec3::new(1.0, 0.0, 0.0), DVec3::new(3.0, 0.0, 0.0)];
        let continents = group_points(&points, 5.0, 1);
        assert_eq!(continents[0].center, DVec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_hemisphere_world_yields_one_main_continent_of_half_the_samples() {
        // Water hemisphere + land hemisphere with the inverted acceptance
        // rule: the water-tagged half becomes the continent.
        let world = LatitudeWorld {
            radius: 100.0,
            split: 0.0,
        };
        let mut analyzer = ContinentAnalyzer::new(settings(20.0, 7));
        let continents = analyzer.analyze_continents(&world, 100.0, "Ground", "Ocean");

        assert_eq!(continents.len(), 1, "one hemisphere, one continent");
        let main = &continents[0];
        assert!(main.is_main_continent);
        assert!(
            (350..=650).contains(&main.size()),
            "expected about half of 1000 samples, got {}",
            main.size()
        );
        // Every accepted point lies in the water-tagged hemisphere.
        for p in &main.points {
            assert!(p.y >= -0.2 * 100.0, "accepted point far into the land half: {p:?}");
        }
    }

    #[test]
    fn test_two_caps_become_two_continents() {
        let world = TwoCapWorld { radius: 100.0 };
        let mut analyzer = ContinentAnalyzer::new(settings(30.0, 3));
        let continents = analyzer.analyze_continents(&world, 100.0, "Ground", "Ocean");

        assert_eq!(continents.len(), 2, "two separated caps");
        assert!(continents[0].size() >= continents[1].size(), "sorted by size");
        assert!(continents[0].is_main_continent);
        assert!(!continents[1].is_main_continent);
        for continent in continents {
            assert!(
                (40..=180).contains(&continent.size()),
                "cap size {} outside sampling variance",
                continent.size()
            );
        }
    }

    #[test]
    fn test_all_land_world_finds_nothing() {
        // Every first hit classifies as land, which rejects the sample.
        let world = UniformWorld {
            radius: 50.0,
            tag: "Ground",
        };
        let mut analyzer = ContinentAnalyzer::new(settings(10.0, 1));
        let continents = analyzer.analyze_continents(&world, 50.0, "Ground", "Ocean");
        assert!(continents.is_empty());
        assert!(analyzer.main_continent().is_none());
    }

    #[test]
    fn test_all_water_world_accepts_every_sample() {
        let world = UniformWorld {
            radius: 50.0,
            tag: "Ocean",
        };
        let mut analyzer = ContinentAnalyzer::new(settings(200.0, 1));
        let continents = analyzer.analyze_continents(&world, 50.0, "Ground", "Ocean");
        assert_eq!(continents.len(), 1);
        assert_eq!(continents[0].size(), 1000);
    }

    #[test]
    fn test_ray_misses_are_rejections_not_errors() {
        let mut analyzer = ContinentAnalyzer::new(settings(10.0, 5));
        let continents = analyzer.analyze_continents(&VoidWorld, 50.0, "Ground", "Ocean");
        assert!(continents.is_empty());
    }

    #[test]
    fn test_analysis_is_deterministic_per_seed() {
        let world = LatitudeWorld {
            radius: 80.0,
            split: 0.2,
        };
        let mut a = ContinentAnalyzer::new(settings(20.0, 42));
        let mut b = ContinentAnalyzer::new(settings(20.0, 42));
        let ca = a.analyze_continents(&world, 80.0, "Ground", "Ocean").to_vec();
        let cb = b.analyze_continents(&world, 80.0, "Ground", "Ocean").to_vec();
        assert_eq!(ca, cb);
    }

    #[test]
    fn test_reanalysis_discards_previous_continents() {
        let mut analyzer = ContinentAnalyzer::new(settings(200.0, 9));
        let water = UniformWorld {
            radius: 50.0,
            tag: "Ocean",
        };
        analyzer.analyze_continents(&water, 50.0, "Ground", "Ocean");
        assert_eq!(analyzer.continents().len(), 1);

        let land = UniformWorld {
            radius: 50.0,
            tag: "Ground",
        };
        analyzer.analyze_continents(&land, 50.0, "Ground", "Ocean");
        assert!(analyzer.continents().is_empty(), "old continents must not persist");
    }

    #[test]
    fn test_spawn_point_falls_back_to_raw_sample() {
        // The latitude world never returns a land hit for re-projection, so
        // the spawn point is one of the continent's own samples.
        let world = LatitudeWorld {
            radius: 100.0,
            split: 0.0,
        };
        let mut analyzer = ContinentAnalyzer::new(settings(20.0, 13));
        analyzer.analyze_continents(&world, 100.0, "Ground", "Ocean");
        let main_points = analyzer.main_continent().expect("main continent").points.clone();

        let spawn = analyzer
            .random_position_on_main_continent(&world)
            .expect("spawn point");
        assert!(
            main_points.contains(&spawn),
            "fallback spawn should be a raw sample"
        );
    }

    /// Center-out rays see water; surface re-projection rays see land.
    struct ShellWorld {
        radius: f64,
    }

    impl SurfaceClassifier for ShellWorld {
        fn raycast(&self, origin: DVec3, direction: DVec3, _max: f64) -> Option<SurfaceHit> {
            if origin.length() < 1e-9 {
                Some(SurfaceHit {
                    point: direction.normalize() * self.radius,
                    tag: "Ocean".into(),
                    name: String::new(),
                })
            } else {
                // Ray from outside toward the center hits the raised land
                // surface slightly above the sample sphere.
                let dir = -direction.normalize();
                Some(SurfaceHit {
                    point: dir * (self.radius * 1.02),
                    tag: "Ground".into(),
                    name: String::new(),
                })
            }
        }
    }

    #[test]
    fn test_spawn_point_reprojects_onto_land_surface() {
        let world = ShellWorld { radius: 100.0 };
        let mut analyzer = ContinentAnalyzer::new(settings(200.0, 21));
        analyzer.analyze_continents(&world, 100.0, "Ground", "Ocean");

        let spawn = analyzer
            .random_position_on_main_continent(&world)
            .expect("spawn point");
        assert!(
            (spawn.length() - 102.0).abs() < 1e-9,
            "spawn should sit on the re-projected land surface, got radius {}",
            spawn.length()
        );
    }

    #[test]
    fn test_spawn_point_requires_an_analysis() {
        let mut analyzer = ContinentAnalyzer::new(AnalyzerSettings::default());
        assert!(analyzer.random_position_on_main_continent(&VoidWorld).is_none());
    }

    #[test]
    fn test_settings_from_config_carry_the_seed() {
        let config = ContinentConfig::default();
        let settings = AnalyzerSettings::from_config(&config, 77);
        assert_eq!(settings.sample_points, config.sample_points);
        assert_eq!(settings.sample_radius, config.sample_radius);
        assert_eq!(settings.min_continent_size, config.min_continent_size);
        assert_eq!(settings.stability_threshold, config.stability_threshold);
        assert_eq!(settings.seed, 77);
    }
}
