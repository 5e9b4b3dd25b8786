// World constants
pub const CHUNK_SIZE: i32 = 16;
pub const GRID_SIZE: i32 = CHUNK_SIZE + 1;

// Scalar field constants
pub const SOLID: f32 = 1.0;
pub const CAVITY_MARGIN: f32 = 0.1;

// Anchor positions as fractions of the total world extents
pub const START_ANCHOR_FRACTION: [f32; 3] = [0.5, 0.5, 0.5];
pub const GOAL_ANCHOR_FRACTION: [f32; 3] = [0.85, 0.6, 0.85];

// Meshing constants
pub const UV_SCALE: f32 = 0.25;
pub const INTERP_EPSILON: f32 = 1e-5;
