//! Terrain surface synthesis: noise-driven elevation, biome definitions, and
//! biome color-lookup texture generation.

mod biome;
mod elevation;
mod gradient;
mod synthesizer;

pub use biome::{BiomeDef, BiomeSet};
pub use elevation::{ElevationParams, ElevationSource, NoiseElevation};
pub use gradient::{Gradient, GradientStop};
pub use synthesizer::{
    BiomeLookupBuffer, BiomeTextureSynthesizer, MAX_TEXTURE_RESOLUTION, MIN_TEXTURE_RESOLUTION,
};
