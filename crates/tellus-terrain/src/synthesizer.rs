//! Biome color-lookup synthesis: continuous blend index over the sphere and
//! the 2D lookup buffer sampled by the surface material.

use glam::{DVec3, Vec2, Vec4};
use noise::{NoiseFn, Simplex};
use tracing::debug;

use crate::biome::BiomeSet;

/// Minimum lookup-texture half-width.
pub const MIN_TEXTURE_RESOLUTION: u32 = 64;
/// Maximum lookup-texture half-width.
pub const MAX_TEXTURE_RESOLUTION: u32 = 1024;

/// The synthesized 2D color lookup.
///
/// One row per biome; the left half of each row is the shared ocean ramp and
/// the right half the biome's own ramp, both tint-blended. The surface
/// material indexes rows by blend index (uv.x) and columns by elevation.
#[derive(Clone, Debug, PartialEq)]
pub struct BiomeLookupBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Vec4>,
}

impl BiomeLookupBuffer {
    /// A zero-row buffer, produced when no biomes are configured.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        }
    }

    /// Buffer width in pixels (twice the texture resolution).
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Buffer height in pixels (one row per biome).
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Linear RGBA pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Vec4 {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.pixels[y * self.width + x]
    }

    /// All pixels in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[Vec4] {
        &self.pixels
    }

    /// Convert to tightly packed 8-bit RGBA for upload as an `image2D`.
    #[must_use]
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            for channel in [p.x, p.y, p.z, p.w] {
                out.push((channel.clamp(0.0, 1.0) * 255.0).round() as u8);
            }
        }
        out
    }
}

/// Synthesizes the biome blend index and the color lookup buffer.
///
/// The secondary simplex field perturbs the latitude-derived height
/// percentage so biome bands meander instead of following exact latitude
/// circles.
pub struct BiomeTextureSynthesizer {
    set: BiomeSet,
    noise: Simplex,
    resolution: u32,
    elevation_min_max: Vec2,
}

/// Clamped linear ramp of `v` across `[a, b]`.
fn inverse_lerp(a: f64, b: f64, v: f64) -> f64 {
    ((v - a) / (b - a)).clamp(0.0, 1.0)
}

impl BiomeTextureSynthesizer {
    /// Create a synthesizer over a biome set.
    ///
    /// `resolution` is the half-width `R` of the lookup buffer, clamped to
    /// `[MIN_TEXTURE_RESOLUTION, MAX_TEXTURE_RESOLUTION]`.
    #[must_use]
    pub fn new(set: BiomeSet, seed: u64, resolution: u32) -> Self {
        Self {
            set,
            noise: Simplex::new(seed as u32),
            resolution: resolution.clamp(MIN_TEXTURE_RESOLUTION, MAX_TEXTURE_RESOLUTION),
            elevation_min_max: Vec2::ZERO,
        }
    }

    /// The biome set driving this synthesizer.
    #[must_use]
    pub fn biome_set(&self) -> &BiomeSet {
        &self.set
    }

    /// Replace the biome set (e.g. after a config reload).
    pub fn set_biome_set(&mut self, set: BiomeSet) {
        self.set = set;
    }

    /// The clamped lookup half-width `R`.
    #[must_use]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Receive the running elevation range from the geometry pass, to be
    /// republished as a material parameter.
    pub fn set_elevation_min_max(&mut self, min: f32, max: f32) {
        self.elevation_min_max = Vec2::new(min, max);
    }

    /// The elevation range last propagated from the geometry pass.
    #[must_use]
    pub fn elevation_min_max(&self) -> Vec2 {
        self.elevation_min_max
    }

    /// Continuous biome-blend index in `[0, 1]` for a unit-sphere direction.
    ///
    /// The height percentage is the magnitude of the polar (y) component,
    /// perturbed by the secondary noise field. The index is a running blend
    /// over the biome list in order; it is monotonic in height only when the
    /// list is sorted by ascending `start_height`, which is not enforced.
    #[must_use]
    pub fn blend_index(&self, direction: DVec3) -> f64 {
        let n = self.noise.get([direction.x, direction.y, direction.z]);
        let height =
            direction.y.abs() + (n - self.set.noise_offset) * self.set.noise_strength;

        // The epsilon keeps the ramp well-defined when blend_amount is zero.
        let blend_range = self.set.blend_amount / 2.0 + 1e-4;

        let mut index = 0.0;
        for (i, biome) in self.set.biomes.iter().enumerate() {
            let dst = height - biome.start_height;
            let weight = inverse_lerp(-blend_range, blend_range, dst);
            index = index * (1.0 - weight) + i as f64 * weight;
        }
        index / (self.set.len().saturating_sub(1)).max(1) as f64
    }

    /// Synthesize the full color lookup buffer.
    ///
    /// Base pass: every row is ocean-left / biome-right, tint-blended. Second
    /// pass: rows flagged as override layers are recomputed from their own
    /// gradient and blended over the base row, at full strength when
    /// `override_other_biomes` is set and at `tint_percent` otherwise.
    #[must_use]
    pub fn synthesize(&self) -> BiomeLookupBuffer {
        if self.set.is_empty() {
            return BiomeLookupBuffer::empty();
        }

        let r = self.resolution as usize;
        let width = 2 * r;
        let height = self.set.len();
        let mut pixels = vec![Vec4::ZERO; width * height];

        for (row, biome) in self.set.biomes.iter().enumerate() {
            for x in 0..width {
                let sample = if x < r {
                    self.set.ocean_gradient.evaluate(x as f32 / (r - 1) as f32)
                } else {
                    biome.gradient.evaluate((x - r) as f32 / (r - 1) as f32)
                };
                let t = biome.tint_percent;
                pixels[row * width + x] = sample * (1.0 - t) + biome.tint * t;
            }
        }

        for (row, biome) in self.set.biomes.iter().enumerate() {
            if !biome.is_override_layer {
                continue;
            }
            let strength = if biome.override_other_biomes {
                1.0
            } else {
                biome.tint_percent
            };
            for x in 0..width {
                let u = if x < r {
                    x as f32 / (r - 1) as f32
                } else {
                    (x - r) as f32 / (r - 1) as f32
                };
                let sample = biome.gradient.evaluate(u);
                let t = biome.tint_percent;
                let over = sample * (1.0 - t) + biome.tint * t;
                let idx = row * width + x;
                pixels[idx] = pixels[idx] * (1.0 - strength) + over * strength;
            }
        }

        debug!(width, height, "synthesized biome lookup");
        BiomeLookupBuffer {
            width,
            height,
            pixels,
        }
    }
}
