use glam::IVec3;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Noise field parameters. Governs both sampling and the solid/air
/// threshold used throughout the pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Base coordinate scale, authored in [0.005, 0.2]
    pub scale: f32,
    /// Fractal octaves, authored in [1, 6]
    pub octave_count: u32,
    /// Per-octave amplitude falloff, authored in [0, 1]
    pub persistence: f32,
    /// Densities below this read as air, at or above as solid
    pub iso_level: f32,
    /// Vertical bias strength: solid ceilings up top, open floors below
    pub gravity_bias: f32,
    /// 0 picks a fresh random seed at generation time
    pub seed: u32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            scale: 0.04,
            octave_count: 4,
            persistence: 0.5,
            iso_level: 0.5,
            gravity_bias: 0.3,
            seed: 0,
        }
    }
}

/// World layout and orchestration knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Number of chunks along each axis
    pub chunk_counts: IVec3,
    /// World-space edge length of one grid cell
    pub cell_size: f32,
    /// Forced-cavity radius around the start anchor
    pub start_radius: f32,
    /// Forced-cavity radius around the goal anchor
    pub goal_radius: f32,
    #[serde(default)]
    pub noise: NoiseConfig,
    /// When false, nothing generates until a caller drives
    /// `generate_with_seed` itself (seed from save data, a test harness, or
    /// another process).
    #[serde(default = "default_auto_generate")]
    pub auto_generate: bool,
}

fn default_auto_generate() -> bool {
    true
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_counts: IVec3::new(4, 2, 4),
            cell_size: 1.0,
            start_radius: 6.0,
            goal_radius: 5.0,
            noise: NoiseConfig::default(),
            auto_generate: true,
        }
    }
}

/// One placeable item category. Categories are tried in declaration order,
/// rarest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    /// Chance in [0, 100] that a shuffled candidate rolls this category
    pub density_percent: f32,
    /// Minimum distance between two items of this category
    pub min_spacing: f32,
    /// Hard cap on placed items of this category
    pub max_count: usize,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementConfig {
    pub categories: Vec<CategoryConfig>,
    /// No items spawn within this distance of the start anchor
    pub exclusion_radius: f32,
    /// Minimum distance between any two placed items, across categories
    pub global_min_spacing: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            categories: vec![
                CategoryConfig {
                    name: "rare".to_string(),
                    density_percent: 4.0,
                    min_spacing: 12.0,
                    max_count: 6,
                    items: vec!["crystal_cluster".to_string(), "golden_idol".to_string()],
                },
                CategoryConfig {
                    name: "common".to_string(),
                    density_percent: 12.0,
                    min_spacing: 4.0,
                    max_count: 48,
                    items: vec![
                        "mushroom".to_string(),
                        "stalagmite".to_string(),
                        "bone_pile".to_string(),
                    ],
                },
            ],
            exclusion_radius: 8.0,
            global_min_spacing: 2.0,
        }
    }
}

/// Full settings bundle kept on disk for the demo binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationSettings {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub placement: PlacementConfig,
}

impl GenerationSettings {
    pub fn load(path: &Path) -> Result<Self, std::io::Error> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let settings = serde_json::from_reader(reader)?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Fall back to defaults when the file is missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(?path, %err, "settings not loaded, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_defaults() {
        let config = NoiseConfig::default();
        assert_eq!(config.scale, 0.04);
        assert_eq!(config.octave_count, 4);
        assert_eq!(config.persistence, 0.5);
        assert_eq!(config.iso_level, 0.5);
        assert_eq!(config.gravity_bias, 0.3);
        assert_eq!(config.seed, 0);
    }

    #[test]
    fn test_settings_json_roundtrip() {
        let settings = GenerationSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let decoded: GenerationSettings = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded.world.chunk_counts, settings.world.chunk_counts);
        assert_eq!(decoded.world.noise.seed, settings.world.noise.seed);
        assert_eq!(
            decoded.placement.categories.len(),
            settings.placement.categories.len()
        );
        assert_eq!(decoded.placement.categories[0].name, "rare");
    }

    #[test]
    fn test_partial_settings_fill_in_defaults() {
        let decoded: GenerationSettings = serde_json::from_str("{}").unwrap();
        assert!(decoded.world.auto_generate);
        assert_eq!(decoded.world.noise.octave_count, 4);
        assert_eq!(decoded.placement.exclusion_radius, 8.0);
    }
}
