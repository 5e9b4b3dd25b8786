//! World generation and orchestration modules
//! Contains noise sampling, the chunk-grid generator, and its completion
//! signal.

pub mod generator;
pub mod noise;
pub mod signal;

// Re-export commonly used types
pub use generator::WorldGenerator;
pub use noise::NoiseSampler;
pub use signal::{CompletionSignal, SubscriberId};
