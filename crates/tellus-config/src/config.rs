//! Configuration structs with per-section defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level planet generation configuration.
///
/// Every section carries `#[serde(default)]`, so a partial RON file fills the
/// rest from defaults and an empty `()` document yields the default planet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// World seed; the biome noise is decorrelated from it internally.
    pub seed: u64,
    /// Planet base radius in world units.
    pub radius: f64,
    /// Mesh construction settings.
    pub mesh: MeshConfig,
    /// Elevation noise parameters.
    pub noise: ElevationNoiseConfig,
    /// Color lookup texture settings.
    pub texture: TextureConfig,
    /// Ordered biome table and blend parameters.
    pub biomes: BiomeTableConfig,
    /// Continent analysis settings.
    pub continents: ContinentConfig,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            radius: 100.0,
            mesh: MeshConfig::default(),
            noise: ElevationNoiseConfig::default(),
            texture: TextureConfig::default(),
            biomes: BiomeTableConfig::default(),
            continents: ContinentConfig::default(),
        }
    }
}

impl PlanetConfig {
    /// Load a configuration from a RON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its content is not valid RON.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        ron::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Save this configuration as pretty-printed RON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails and
    /// [`ConfigError::Write`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let pretty = ron::ser::PrettyConfig::default();
        let content = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;
        std::fs::write(path, content).map_err(ConfigError::Write)
    }
}

/// Normal computation strategy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum NormalModeConfig {
    /// Per-vertex averaged normals.
    #[default]
    Smooth,
    /// Per-triangle normals for a low-poly look.
    Flat,
}

/// Which base cube direction to render, or all of them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum RenderMaskConfig {
    /// Render every direction.
    #[default]
    All,
    /// +X only.
    PosX,
    /// −X only.
    NegX,
    /// +Y only.
    PosY,
    /// −Y only.
    NegY,
    /// +Z only.
    PosZ,
    /// −Z only.
    NegZ,
}

/// Mesh construction settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MeshConfig {
    /// Vertices per face edge. Clamped to `[2, 256]` by the assembler.
    pub resolution: u32,
    /// Hierarchical subdivision level. Clamped to `[0, 3]` by the assembler.
    pub subdivision_level: u8,
    /// Normal computation strategy.
    pub normal_mode: NormalModeConfig,
    /// Base-direction render mask.
    pub render_mask: RenderMaskConfig,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            resolution: 64,
            subdivision_level: 0,
            normal_mode: NormalModeConfig::Smooth,
            render_mask: RenderMaskConfig::All,
        }
    }
}

/// Elevation noise parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ElevationNoiseConfig {
    /// Base frequency over the unit sphere.
    pub scale: f64,
    /// Ocean-floor offset subtracted before scaling.
    pub offset: f64,
    /// Elevation strength relative to the radius.
    pub strength: f64,
    /// Octave count.
    pub octaves: u32,
    /// Amplitude falloff per octave.
    pub persistence: f64,
    /// Frequency gain per octave.
    pub lacunarity: f64,
}

impl Default for ElevationNoiseConfig {
    fn default() -> Self {
        Self {
            scale: 1.2,
            offset: 0.55,
            strength: 0.15,
            octaves: 5,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

/// Color lookup texture settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextureConfig {
    /// Lookup half-width `R`. Clamped to `[64, 1024]` by the synthesizer.
    pub resolution: u32,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self { resolution: 256 }
    }
}

/// One stop of a serialized color ramp.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GradientStopConfig {
    /// Position along the ramp in `[0, 1]`.
    pub position: f32,
    /// Linear RGBA color.
    pub color: [f32; 4],
}

/// One biome row of the lookup table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BiomeEntryConfig {
    /// Biome name.
    pub name: String,
    /// Height percentage where the biome's band starts.
    pub start_height: f64,
    /// Land color ramp.
    pub gradient: Vec<GradientStopConfig>,
    /// Tint color.
    pub tint: [f32; 4],
    /// Tint strength in `[0, 1]`.
    pub tint_percent: f32,
    /// Participates in the override pass.
    pub is_override_layer: bool,
    /// Override at full strength.
    pub override_other_biomes: bool,
}

impl Default for BiomeEntryConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            start_height: 0.0,
            gradient: Vec::new(),
            tint: [0.0, 0.0, 0.0, 1.0],
            tint_percent: 0.0,
            is_override_layer: false,
            override_other_biomes: false,
        }
    }
}

/// Ordered biome table and blend parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BiomeTableConfig {
    /// Shared ocean ramp.
    pub ocean_gradient: Vec<GradientStopConfig>,
    /// Secondary-noise offset.
    pub noise_offset: f64,
    /// Secondary-noise strength.
    pub noise_strength: f64,
    /// Blend band width around each biome's start height.
    pub blend_amount: f64,
    /// Biomes in blend order (ascending start height expected).
    pub biomes: Vec<BiomeEntryConfig>,
}

impl Default for BiomeTableConfig {
    fn default() -> Self {
        Self {
            ocean_gradient: vec![
                GradientStopConfig {
                    position: 0.0,
                    color: [0.01, 0.07, 0.25, 1.0],
                },
                GradientStopConfig {
                    position: 1.0,
                    color: [0.12, 0.36, 0.60, 1.0],
                },
            ],
            noise_offset: 0.5,
            noise_strength: 0.12,
            blend_amount: 0.12,
            biomes: vec![
                BiomeEntryConfig {
                    name: "tropics".into(),
                    start_height: 0.0,
                    gradient: vec![
                        GradientStopConfig {
                            position: 0.0,
                            color: [0.79, 0.72, 0.43, 1.0],
                        },
                        GradientStopConfig {
                            position: 0.35,
                            color: [0.15, 0.48, 0.13, 1.0],
                        },
                        GradientStopConfig {
                            position: 1.0,
                            color: [0.36, 0.29, 0.21, 1.0],
                        },
                    ],
                    ..Default::default()
                },
                BiomeEntryConfig {
                    name: "temperate".into(),
                    start_height: 0.35,
                    gradient: vec![
                        GradientStopConfig {
                            position: 0.0,
                            color: [0.27, 0.47, 0.18, 1.0],
                        },
                        GradientStopConfig {
                            position: 0.6,
                            color: [0.42, 0.38, 0.28, 1.0],
                        },
                        GradientStopConfig {
                            position: 1.0,
                            color: [0.85, 0.85, 0.88, 1.0],
                        },
                    ],
                    ..Default::default()
                },
                BiomeEntryConfig {
                    name: "tundra".into(),
                    start_height: 0.65,
                    gradient: vec![
                        GradientStopConfig {
                            position: 0.0,
                            color: [0.45, 0.43, 0.36, 1.0],
                        },
                        GradientStopConfig {
                            position: 1.0,
                            color: [0.80, 0.82, 0.84, 1.0],
                        },
                    ],
                    ..Default::default()
                },
                BiomeEntryConfig {
                    name: "polar".into(),
                    start_height: 0.87,
                    gradient: vec![
                        GradientStopConfig {
                            position: 0.0,
                            color: [0.92, 0.95, 0.98, 1.0],
                        },
                        GradientStopConfig {
                            position: 1.0,
                            color: [1.0, 1.0, 1.0, 1.0],
                        },
                    ],
                    tint: [0.85, 0.92, 1.0, 1.0],
                    tint_percent: 0.15,
                    ..Default::default()
                },
            ],
        }
    }
}

/// Continent analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContinentConfig {
    /// Number of random surface samples per analysis.
    pub sample_points: usize,
    /// Connectivity distance between accepted samples, in world units.
    pub sample_radius: f64,
    /// Minimum component size kept as a continent.
    pub min_continent_size: usize,
    /// Fraction of stable perturbed hits required to accept a sample.
    pub stability_threshold: f64,
}

impl Default for ContinentConfig {
    fn default() -> Self {
        Self {
            sample_points: 1000,
            sample_radius: 12.0,
            min_continent_size: 3,
            stability_threshold: 0.7,
        }
    }
}
