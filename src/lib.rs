// Core module with fundamental types
pub mod core;

// Mesh module with Marching Cubes isosurface extraction
pub mod mesh;

// World module with noise sampling and generation orchestration
pub mod world;

// Content module with deterministic item placement
pub mod content;

// Other modules
pub mod constants;

// Re-exports
pub use constants::*;
pub use content::{ContentPlacer, PlacedItem};
pub use core::{
    CategoryConfig, Chunk, GenerationSettings, NoiseConfig, PlacementConfig, ScalarField, Vertex,
    WorldConfig,
};
pub use mesh::{MeshData, build_mesh};
pub use world::{CompletionSignal, NoiseSampler, SubscriberId, WorldGenerator};
