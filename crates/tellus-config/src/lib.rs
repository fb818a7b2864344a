//! Planet generation configuration with RON persistence.

mod config;
mod error;

pub use config::{
    BiomeEntryConfig, BiomeTableConfig, ContinentConfig, ElevationNoiseConfig, GradientStopConfig,
    MeshConfig, NormalModeConfig, PlanetConfig, RenderMaskConfig, TextureConfig,
};
pub use error::ConfigError;
