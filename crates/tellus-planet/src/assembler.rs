//! The planet assembler: owns the per-face mesh arena and drives the
//! geometry and color passes.

use glam::Vec4;
use tracing::{info, warn};

use tellus_config::{
    BiomeTableConfig, GradientStopConfig, NormalModeConfig, PlanetConfig, RenderMaskConfig,
};
use tellus_cubesphere::{CubeFace, FacePatch, SubdivisionLevel, patches_for_level};
use tellus_mesh::{MeshBuffer, NormalMode, build_face, update_face_uvs};
use tellus_terrain::{
    BiomeDef, BiomeSet, BiomeTextureSynthesizer, ElevationParams, ElevationSource, Gradient,
    GradientStop, NoiseElevation,
};

use crate::material::PlanetMaterialParams;
use crate::settings::{FaceRenderMask, PlanetSettings};

/// One face of the planet: its patch, visibility, and mesh container.
#[derive(Debug)]
pub struct FaceSlot {
    /// The sub-rectangle of the cube face this slot covers.
    pub patch: FacePatch,
    /// Whether the face passed the render mask.
    pub visible: bool,
    /// The mesh buffer owned by the assembler and reused across passes.
    pub mesh: MeshBuffer,
}

/// Whether the face arena must be rebuilt for a new face count.
///
/// Containers are recycled in place whenever the count is unchanged; only a
/// count change discards them, so mesh allocations survive ordinary
/// regenerations.
#[must_use]
pub fn needs_reallocation(old_count: usize, new_count: usize) -> bool {
    old_count != new_count
}

/// Orchestrates planet generation: face addressing, the geometry pass, and
/// the color pass.
///
/// The assembler exclusively owns every [`MeshBuffer`] and the material
/// context; the face builder and texture synthesizer only operate on data
/// passed to them.
pub struct PlanetAssembler<E: ElevationSource> {
    settings: PlanetSettings,
    elevation: E,
    synthesizer: BiomeTextureSynthesizer,
    slots: Vec<FaceSlot>,
    material: PlanetMaterialParams,
}

impl<E: ElevationSource> PlanetAssembler<E> {
    /// Create an assembler; no faces are built until a generate call.
    #[must_use]
    pub fn new(
        settings: PlanetSettings,
        elevation: E,
        synthesizer: BiomeTextureSynthesizer,
    ) -> Self {
        Self {
            settings,
            elevation,
            synthesizer,
            slots: Vec::new(),
            material: PlanetMaterialParams::default(),
        }
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &PlanetSettings {
        &self.settings
    }

    /// Replace the settings; takes effect on the next generate call.
    pub fn set_settings(&mut self, settings: PlanetSettings) {
        self.settings = settings;
    }

    /// The face arena in face-major order.
    #[must_use]
    pub fn faces(&self) -> &[FaceSlot] {
        &self.slots
    }

    /// The material context published to the external surface material.
    #[must_use]
    pub fn material(&self) -> &PlanetMaterialParams {
        &self.material
    }

    /// The elevation source.
    #[must_use]
    pub fn elevation(&self) -> &E {
        &self.elevation
    }

    /// The texture synthesizer.
    #[must_use]
    pub fn synthesizer(&self) -> &BiomeTextureSynthesizer {
        &self.synthesizer
    }

    /// Run the full two-pass pipeline: geometry, then colors.
    pub fn generate_planet(&mut self) {
        self.regenerate_geometry();
        self.regenerate_colors();
    }

    /// Geometry pass: rebuild face addressing, deform every visible face
    /// onto the sphere, and propagate the elevation range into the material.
    pub fn regenerate_geometry(&mut self) {
        self.rebuild_face_slots();
        self.elevation.reset_min_max();

        let resolution = self.settings.clamped_resolution();
        let normal_mode = self.settings.normal_mode;
        let elevation = &mut self.elevation;

        let mut built = 0usize;
        for slot in &mut self.slots {
            if !slot.visible {
                continue;
            }
            build_face(&mut slot.mesh, &slot.patch, resolution, normal_mode, elevation);
            built += 1;
        }

        let (min, max) = elevation.elevation_min_max();
        self.synthesizer
            .set_elevation_min_max(min as f32, max as f32);
        self.material.elevation_min_max = self.synthesizer.elevation_min_max();

        info!(
            faces = built,
            total = self.slots.len(),
            resolution,
            "geometry pass complete"
        );
    }

    /// Color pass: synthesize the lookup buffer and refill `uv.x` on every
    /// visible face.
    ///
    /// A missing biome configuration makes this a diagnosed no-op so a
    /// partially configured planet still regenerates geometry cleanly.
    pub fn regenerate_colors(&mut self) {
        if self.synthesizer.biome_set().is_empty() {
            warn!("no biomes configured; skipping color pass");
            return;
        }

        self.material.lookup = self.synthesizer.synthesize();

        let resolution = self.settings.clamped_resolution();
        let synthesizer = &self.synthesizer;
        for slot in &mut self.slots {
            if !slot.visible {
                continue;
            }
            update_face_uvs(&mut slot.mesh, &slot.patch, resolution, |direction| {
                synthesizer.blend_index(direction)
            });
        }
    }

    /// Recompute face addressing from the subdivision level and render mask,
    /// recycling existing mesh containers when the face count is unchanged.
    fn rebuild_face_slots(&mut self) {
        let patches = patches_for_level(self.settings.subdivision_level);

        if needs_reallocation(self.slots.len(), patches.len()) {
            self.slots = patches
                .into_iter()
                .map(|patch| FaceSlot {
                    patch,
                    visible: true,
                    mesh: MeshBuffer::new(),
                })
                .collect();
        } else {
            for (slot, patch) in self.slots.iter_mut().zip(patches) {
                slot.patch = patch;
            }
        }

        let mask = self.settings.face_render_mask;
        for slot in &mut self.slots {
            slot.visible = mask.permits(slot.patch.face);
        }
    }
}

impl PlanetAssembler<NoiseElevation> {
    /// Build a fully wired assembler from a [`PlanetConfig`].
    #[must_use]
    pub fn from_config(config: &PlanetConfig) -> Self {
        let elevation = NoiseElevation::new(ElevationParams {
            seed: config.seed,
            scale: config.noise.scale,
            offset: config.noise.offset,
            strength: config.noise.strength,
            octaves: config.noise.octaves,
            persistence: config.noise.persistence,
            lacunarity: config.noise.lacunarity,
            radius: config.radius,
        });

        // Decorrelate the biome noise from the elevation noise.
        let biome_seed = config.seed.wrapping_add(0x9E37_79B9);
        let synthesizer = BiomeTextureSynthesizer::new(
            biome_set_from_config(&config.biomes),
            biome_seed,
            config.texture.resolution,
        );

        let settings = PlanetSettings {
            mesh_resolution: config.mesh.resolution,
            subdivision_level: SubdivisionLevel::new(config.mesh.subdivision_level),
            normal_mode: match config.mesh.normal_mode {
                NormalModeConfig::Smooth => NormalMode::Smooth,
                NormalModeConfig::Flat => NormalMode::Flat,
            },
            face_render_mask: match config.mesh.render_mask {
                RenderMaskConfig::All => FaceRenderMask::All,
                RenderMaskConfig::PosX => FaceRenderMask::Only(CubeFace::PosX),
                RenderMaskConfig::NegX => FaceRenderMask::Only(CubeFace::NegX),
                RenderMaskConfig::PosY => FaceRenderMask::Only(CubeFace::PosY),
                RenderMaskConfig::NegY => FaceRenderMask::Only(CubeFace::NegY),
                RenderMaskConfig::PosZ => FaceRenderMask::Only(CubeFace::PosZ),
                RenderMaskConfig::NegZ => FaceRenderMask::Only(CubeFace::NegZ),
            },
        };

        Self::new(settings, elevation, synthesizer)
    }
}

fn gradient_from_config(stops: &[GradientStopConfig]) -> Gradient {
    Gradient::new(
        stops
            .iter()
            .map(|s| GradientStop::new(s.position, Vec4::from_array(s.color)))
            .collect(),
    )
}

fn biome_set_from_config(table: &BiomeTableConfig) -> BiomeSet {
    BiomeSet {
        biomes: table
            .biomes
            .iter()
            .map(|entry| BiomeDef {
                name: entry.name.clone(),
                start_height: entry.start_height,
                gradient: gradient_from_config(&entry.gradient),
                tint: Vec4::from_array(entry.tint),
                tint_percent: entry.tint_percent.clamp(0.0, 1.0),
                is_override_layer: entry.is_override_layer,
                override_other_biomes: entry.override_other_biomes,
            })
            .collect(),
        ocean_gradient: gradient_from_config(&table.ocean_gradient),
        noise_offset: table.noise_offset,
        noise_strength: table.noise_strength,
        blend_amount: table.blend_amount,
    }
}
