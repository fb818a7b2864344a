//! Elevation sampling over unit-sphere directions.
//!
//! The mesh builder consumes elevation through the [`ElevationSource`] trait;
//! [`NoiseElevation`] is the production implementation, compositing multiple
//! octaves of simplex noise into an unscaled elevation scalar and mapping it
//! into radius space.

use glam::DVec3;
use noise::{NoiseFn, Simplex};

/// Supplies per-direction elevation for the sphere deformation pass.
///
/// `unscaled_elevation` is the single per-point entry into the source; the
/// running min/max of the scaled elevation is updated there, so after a full
/// geometry pass `elevation_min_max` covers every vertex that was built.
pub trait ElevationSource {
    /// Unscaled elevation for a unit-sphere direction. Updates the running
    /// min/max as a side effect.
    fn unscaled_elevation(&mut self, direction: DVec3) -> f64;

    /// Map an unscaled elevation into radius space (distance from center).
    fn scaled_elevation(&self, unscaled: f64) -> f64;

    /// Running `(min, max)` of the scaled elevation across all points
    /// evaluated since the last reset. `(0.0, 0.0)` before any evaluation.
    fn elevation_min_max(&self) -> (f64, f64);

    /// Clear the running min/max ahead of a fresh geometry pass.
    fn reset_min_max(&mut self);
}

/// Parameters for the multi-octave simplex elevation function.
#[derive(Clone, Debug)]
pub struct ElevationParams {
    /// Seed for the underlying simplex noise.
    pub seed: u64,
    /// Frequency of the first octave over the unit sphere. Larger values
    /// produce smaller terrain features.
    pub scale: f64,
    /// Offset subtracted from the composited noise before scaling. Noise
    /// below the offset is floored to zero elevation, which flattens oceans.
    pub offset: f64,
    /// Multiplier applied to the floored noise; controls mountain height
    /// relative to the planet radius.
    pub strength: f64,
    /// Number of octaves to composite. Typical range: 4-6.
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Planet base radius; scaled elevation is `radius * (1 + unscaled)`.
    pub radius: f64,
}

impl Default for ElevationParams {
    fn default() -> Self {
        Self {
            seed: 0,
            scale: 1.2,
            offset: 0.55,
            strength: 0.15,
            octaves: 5,
            persistence: 0.5,
            lacunarity: 2.0,
            radius: 1.0,
        }
    }
}

/// Noise-backed [`ElevationSource`] with a running scaled-elevation range.
pub struct NoiseElevation {
    noise: Simplex,
    params: ElevationParams,
    min: f64,
    max: f64,
    evaluated: bool,
}

impl NoiseElevation {
    /// Create a new source with the given parameters.
    #[must_use]
    pub fn new(params: ElevationParams) -> Self {
        let noise = Simplex::new(params.seed as u32);
        Self {
            noise,
            params,
            min: 0.0,
            max: 0.0,
            evaluated: false,
        }
    }

    /// Return a reference to the current parameters.
    #[must_use]
    pub fn params(&self) -> &ElevationParams {
        &self.params
    }

    fn fbm(&self, direction: DVec3) -> f64 {
        let mut total = 0.0;
        let mut frequency = self.params.scale;
        let mut amplitude = 1.0;
        for _ in 0..self.params.octaves {
            let v = self.noise.get([
                direction.x * frequency,
                direction.y * frequency,
                direction.z * frequency,
            ]);
            // Remap each octave from [-1, 1] to [0, 1] before accumulating.
            total += (v + 1.0) * 0.5 * amplitude;
            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }
        total
    }

    fn track(&mut self, scaled: f64) {
        if !self.evaluated {
            self.min = scaled;
            self.max = scaled;
            self.evaluated = true;
        } else {
            self.min = self.min.min(scaled);
            self.max = self.max.max(scaled);
        }
    }
}

impl ElevationSource for NoiseElevation {
    fn unscaled_elevation(&mut self, direction: DVec3) -> f64 {
        let raw = self.fbm(direction);
        // Everything below the offset flattens to sea level.
        let unscaled = (raw - self.params.offset).max(0.0) * self.params.strength;
        let scaled = self.scaled_elevation(unscaled);
        self.track(scaled);
        unscaled
    }

    fn scaled_elevation(&self, unscaled: f64) -> f64 {
        self.params.radius * (1.0 + unscaled)
    }

    fn elevation_min_max(&self) -> (f64, f64) {
        if self.evaluated {
            (self.min, self.max)
        } else {
            (0.0, 0.0)
        }
    }

    fn reset_min_max(&mut self) {
        self.min = 0.0;
        self.max = 0.0;
        self.evaluated = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn default_source() -> NoiseElevation {
        NoiseElevation::new(ElevationParams {
            seed: 42,
            ..Default::default()
        })
    }

    #[test]
    fn test_determinism_same_seed_same_direction() {
        let mut a = default_source();
        let mut b = default_source();
        let dir = DVec3::new(0.3, 0.8, -0.5).normalize();
        assert!(
            (a.unscaled_elevation(dir) - b.unscaled_elevation(dir)).abs() < EPSILON,
            "same seed + same direction must produce identical elevation"
        );
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = NoiseElevation::new(ElevationParams {
            seed: 1,
            ..Default::default()
        });
        let mut b = NoiseElevation::new(ElevationParams {
            seed: 999,
            ..Default::default()
        });
        // A single direction may coincide by chance (both on the ocean
        // floor), so compare across a spread of directions.
        let mut any_diff = false;
        for i in 0..32 {
            let t = i as f64 / 32.0 * std::f64::consts::TAU;
            let dir = DVec3::new(t.cos(), 0.3, t.sin()).normalize();
            if (a.unscaled_elevation(dir) - b.unscaled_elevation(dir)).abs() > EPSILON {
                any_diff = true;
                break;
            }
        }
        assert!(any_diff, "different seeds should produce different terrain");
    }

    #[test]
    fn test_unscaled_elevation_is_non_negative() {
        let mut source = default_source();
        for i in 0..200 {
            let t = i as f64 * 0.37;
            let dir = DVec3::new(t.cos(), (t * 0.7).sin(), (t * 1.3).cos()).normalize();
            let e = source.unscaled_elevation(dir);
            assert!(e >= 0.0, "elevation floored at zero, got {e}");
        }
    }

    #[test]
    fn test_scaled_elevation_at_least_radius() {
        let source = default_source();
        let r = source.params().radius;
        assert!((source.scaled_elevation(0.0) - r).abs() < EPSILON);
        assert!(source.scaled_elevation(0.2) > r);
    }

    #[test]
    fn test_min_max_tracks_evaluated_points() {
        let mut source = default_source();
        assert_eq!(source.elevation_min_max(), (0.0, 0.0));

        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for i in 0..100 {
            let t = i as f64 * 0.61;
            let dir = DVec3::new(t.sin(), (t * 0.5).cos(), (t * 2.0).sin()).normalize();
            let e = source.unscaled_elevation(dir);
            let s = source.scaled_elevation(e);
            lo = lo.min(s);
            hi = hi.max(s);
        }
        let (min, max) = source.elevation_min_max();
        assert!((min - lo).abs() < EPSILON, "running min {min} != {lo}");
        assert!((max - hi).abs() < EPSILON, "running max {max} != {hi}");
        assert!(min <= max);
    }

    #[test]
    fn test_reset_clears_running_range() {
        let mut source = default_source();
        source.unscaled_elevation(DVec3::X);
        assert_ne!(source.elevation_min_max(), (0.0, 0.0));
        source.reset_min_max();
        assert_eq!(source.elevation_min_max(), (0.0, 0.0));
    }

    #[test]
    fn test_zero_strength_gives_flat_sphere() {
        let mut source = NoiseElevation::new(ElevationParams {
            strength: 0.0,
            ..Default::default()
        });
        for i in 0..50 {
            let t = i as f64 * 0.73;
            let dir = DVec3::new(t.cos(), t.sin(), (t * 0.3).cos()).normalize();
            let e = source.unscaled_elevation(dir);
            assert!(e.abs() < EPSILON, "zero strength should be flat, got {e}");
        }
        let (min, max) = source.elevation_min_max();
        assert!((max - min).abs() < EPSILON);
    }
}
