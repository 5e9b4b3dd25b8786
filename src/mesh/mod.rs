//! Isosurface extraction (Marching Cubes) and mesh buffers

pub mod marching;
pub mod tables;

pub use marching::build_mesh;

use crate::core::vertex::Vertex;

/// Triangle-list buffers for one chunk. Indices are 32-bit because a single
/// chunk's surface can exceed 64K vertices.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
