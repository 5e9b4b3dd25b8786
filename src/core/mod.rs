//! Core data structures for the engine
//! Contains configuration, scalar fields, chunks, and mesh vertices.

pub mod chunk;
pub mod config;
pub mod field;
pub mod vertex;

// Re-export commonly used types
pub use chunk::Chunk;
pub use config::{
    CategoryConfig, GenerationSettings, NoiseConfig, PlacementConfig, WorldConfig,
};
pub use field::ScalarField;
pub use vertex::Vertex;
