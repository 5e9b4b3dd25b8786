use crate::constants::*;

/// Dense grid of density samples backing one chunk.
///
/// Stored as a single flat buffer of `GRID_SIZE`^3 floats with a computed
/// `(lx, ly, lz)` index so meshing walks memory sequentially. Values below
/// the iso level read as air, values at or above it as solid.
pub struct ScalarField {
    samples: Vec<f32>,
}

impl ScalarField {
    /// Create a field with every sample at the solid sentinel.
    pub fn new() -> Self {
        ScalarField {
            samples: vec![SOLID; (GRID_SIZE * GRID_SIZE * GRID_SIZE) as usize],
        }
    }

    fn in_bounds(lx: i32, ly: i32, lz: i32) -> bool {
        lx >= 0 && lx < GRID_SIZE && ly >= 0 && ly < GRID_SIZE && lz >= 0 && lz < GRID_SIZE
    }

    fn index(lx: i32, ly: i32, lz: i32) -> usize {
        (lx + ly * GRID_SIZE + lz * GRID_SIZE * GRID_SIZE) as usize
    }

    /// Out-of-range reads resolve to the solid sentinel so the extracted
    /// isosurface stays closed at world edges.
    pub fn get(&self, lx: i32, ly: i32, lz: i32) -> f32 {
        if Self::in_bounds(lx, ly, lz) {
            self.samples[Self::index(lx, ly, lz)]
        } else {
            SOLID
        }
    }

    /// Out-of-range writes are ignored.
    pub fn set(&mut self, lx: i32, ly: i32, lz: i32, value: f32) {
        if Self::in_bounds(lx, ly, lz) {
            self.samples[Self::index(lx, ly, lz)] = value;
        }
    }
}

impl Default for ScalarField {
    fn default() -> Self {
        Self::new()
    }
}
