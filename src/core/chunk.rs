use glam::{IVec3, Vec3};

use crate::constants::*;
use crate::core::field::ScalarField;
use crate::mesh::{MeshData, build_mesh};
use crate::world::noise::NoiseSampler;

/// One fixed-size cubic subdivision of the world.
///
/// Owns a scalar field of `GRID_SIZE`^3 samples and the triangle mesh
/// extracted from it. The mesh is rebuilt from scratch on every change,
/// never patched incrementally.
pub struct Chunk {
    pub coord: IVec3,
    pub cell_size: f32,
    field: ScalarField,
    mesh: MeshData,
}

impl Chunk {
    pub fn new(coord: IVec3, cell_size: f32) -> Self {
        Chunk {
            coord,
            cell_size,
            field: ScalarField::new(),
            mesh: MeshData::new(),
        }
    }

    /// World-space position of this chunk's (0, 0, 0) grid point.
    pub fn origin(&self) -> Vec3 {
        self.coord.as_vec3() * CHUNK_SIZE as f32 * self.cell_size
    }

    /// World-space position of a local grid point.
    pub fn grid_point_world(&self, lx: i32, ly: i32, lz: i32) -> Vec3 {
        self.origin() + Vec3::new(lx as f32, ly as f32, lz as f32) * self.cell_size
    }

    /// Sample the noise at every grid point of this chunk, then build the
    /// initial mesh. Sampling uses absolute world coordinates, so adjacent
    /// chunks agree on their shared boundary samples.
    pub fn initialize(&mut self, sampler: &NoiseSampler, iso_level: f32, world_height: f32) {
        for lz in 0..GRID_SIZE {
            for ly in 0..GRID_SIZE {
                for lx in 0..GRID_SIZE {
                    let p = self.grid_point_world(lx, ly, lz);
                    self.field.set(lx, ly, lz, sampler.sample(p.x, p.y, p.z, world_height));
                }
            }
        }
        self.rebuild_mesh(iso_level);
    }

    /// Out-of-range reads return the solid sentinel.
    pub fn get_scalar(&self, lx: i32, ly: i32, lz: i32) -> f32 {
        self.field.get(lx, ly, lz)
    }

    /// Out-of-range writes are ignored.
    pub fn set_scalar(&mut self, lx: i32, ly: i32, lz: i32, value: f32) {
        self.field.set(lx, ly, lz, value);
    }

    /// Re-extract the isosurface from the current scalar field without
    /// resampling the noise.
    pub fn rebuild_mesh(&mut self, iso_level: f32) {
        self.mesh = build_mesh(&self.field, self.origin(), self.cell_size, iso_level);
    }

    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::NoiseConfig;

    #[test]
    fn test_uniform_chunk_yields_empty_mesh() {
        // A fresh chunk is fully solid; no surface passes through it.
        let mut chunk = Chunk::new(IVec3::ZERO, 1.0);
        chunk.rebuild_mesh(0.5);
        assert!(chunk.mesh().is_empty());
    }

    #[test]
    fn test_initialize_is_deterministic() {
        let config = NoiseConfig::default();
        let sampler = NoiseSampler::new(&config, 99);

        let mut a = Chunk::new(IVec3::new(1, 0, 2), 1.0);
        let mut b = Chunk::new(IVec3::new(1, 0, 2), 1.0);
        a.initialize(&sampler, config.iso_level, 32.0);
        b.initialize(&sampler, config.iso_level, 32.0);

        for lz in 0..GRID_SIZE {
            for ly in 0..GRID_SIZE {
                for lx in 0..GRID_SIZE {
                    assert_eq!(a.get_scalar(lx, ly, lz), b.get_scalar(lx, ly, lz));
                }
            }
        }
        assert_eq!(a.mesh().vertices.len(), b.mesh().vertices.len());
        assert_eq!(a.mesh().indices, b.mesh().indices);
    }

    #[test]
    fn test_grid_point_world_uses_chunk_origin() {
        let chunk = Chunk::new(IVec3::new(2, 1, 0), 2.0);
        assert_eq!(chunk.origin(), Vec3::new(64.0, 32.0, 0.0));
        assert_eq!(chunk.grid_point_world(1, 0, 3), Vec3::new(66.0, 32.0, 6.0));
    }

    #[test]
    fn test_set_scalar_then_rebuild_changes_mesh() {
        let mut chunk = Chunk::new(IVec3::ZERO, 1.0);
        chunk.set_scalar(4, 4, 4, 0.0);
        chunk.rebuild_mesh(0.5);
        assert!(!chunk.mesh().is_empty());
    }
}
