//! Deterministic content placement over generated cavities

pub mod placer;

// Re-export commonly used types
pub use placer::{ContentPlacer, PlacedItem};
