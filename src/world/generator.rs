//! World generation orchestration
//!
//! Owns the chunk grid and runs the whole pipeline synchronously: resolve
//! the seed, sample every chunk, carve the forced cavities at the start and
//! goal anchors, rebuild every mesh, then fire the completion signal once.

use glam::{IVec3, Vec3};
use rand::RngExt;

use crate::constants::*;
use crate::core::chunk::Chunk;
use crate::core::config::WorldConfig;
use crate::world::noise::NoiseSampler;
use crate::world::signal::{CompletionSignal, SubscriberId};

pub struct WorldGenerator {
    config: WorldConfig,
    chunks: Vec<Chunk>,
    used_seed: u32,
    start_anchor: Option<Vec3>,
    goal_anchor: Option<Vec3>,
    completion: CompletionSignal,
}

impl WorldGenerator {
    /// Create the generator and, unless the config opts into externally
    /// driven mode, run the first generation immediately.
    pub fn new(config: WorldConfig) -> Self {
        let mut generator = WorldGenerator {
            config,
            chunks: Vec::new(),
            used_seed: 0,
            start_anchor: None,
            goal_anchor: None,
            completion: CompletionSignal::new(),
        };
        if generator.config.auto_generate {
            generator.generate();
        }
        generator
    }

    /// Regenerate the world using the configured seed (0 picks a fresh
    /// random one).
    pub fn generate(&mut self) {
        self.run(None);
    }

    /// Regenerate with a caller-supplied seed, overriding the config.
    pub fn generate_with_seed(&mut self, seed: u32) {
        self.run(Some(seed));
    }

    fn resolve_seed(&self, override_seed: Option<u32>) -> u32 {
        if let Some(seed) = override_seed {
            return seed;
        }
        if self.config.noise.seed == 0 {
            rand::rng().random()
        } else {
            self.config.noise.seed
        }
    }

    fn run(&mut self, override_seed: Option<u32>) {
        let seed = self.resolve_seed(override_seed);
        self.used_seed = seed;
        self.start_anchor = None;
        self.goal_anchor = None;

        // Full teardown; regeneration never reuses partial state.
        self.chunks.clear();

        let counts = self.config.chunk_counts;
        let world_height = counts.y as f32 * CHUNK_SIZE as f32 * self.config.cell_size;
        let iso_level = self.config.noise.iso_level;
        tracing::info!(seed, ?counts, "generating world");

        let sampler = NoiseSampler::new(&self.config.noise, seed);
        for cz in 0..counts.z {
            for cy in 0..counts.y {
                for cx in 0..counts.x {
                    let mut chunk = Chunk::new(IVec3::new(cx, cy, cz), self.config.cell_size);
                    chunk.initialize(&sampler, iso_level, world_height);
                    self.chunks.push(chunk);
                }
            }
        }

        let extents = self.world_extents();
        let start = extents * Vec3::from(START_ANCHOR_FRACTION);
        let goal = extents * Vec3::from(GOAL_ANCHOR_FRACTION);
        self.carve_cavity(start, self.config.start_radius);
        self.carve_cavity(goal, self.config.goal_radius);

        for chunk in &mut self.chunks {
            chunk.rebuild_mesh(iso_level);
        }

        self.start_anchor = Some(start);
        self.goal_anchor = Some(goal);

        let triangles: usize = self.chunks.iter().map(|c| c.mesh().triangle_count()).sum();
        tracing::info!(seed, chunks = self.chunks.len(), triangles, "world generated");

        self.completion.fire();
    }

    /// Clamp every grid sample within `radius` of `center` below the iso
    /// level, so the region reads as open space whatever the noise said.
    /// Every chunk is visited: a sphere straddling a chunk boundary is
    /// carved from both sides.
    fn carve_cavity(&mut self, center: Vec3, radius: f32) {
        let ceiling = self.config.noise.iso_level - CAVITY_MARGIN;
        for chunk in &mut self.chunks {
            for lz in 0..GRID_SIZE {
                for ly in 0..GRID_SIZE {
                    for lx in 0..GRID_SIZE {
                        let p = chunk.grid_point_world(lx, ly, lz);
                        if p.distance(center) < radius {
                            let current = chunk.get_scalar(lx, ly, lz);
                            chunk.set_scalar(lx, ly, lz, current.min(ceiling));
                        }
                    }
                }
            }
        }
    }

    /// Subscribe to the generation-complete signal. Collaborators must not
    /// read chunk or scalar data before it fires.
    pub fn subscribe_completion(&mut self, callback: Box<dyn FnMut()>) -> SubscriberId {
        self.completion.subscribe(callback)
    }

    pub fn unsubscribe_completion(&mut self, id: SubscriberId) {
        self.completion.unsubscribe(id);
    }

    /// Seed actually used by the last generation.
    pub fn used_seed(&self) -> u32 {
        self.used_seed
    }

    /// World-space start anchor, final once generation completes.
    pub fn start_anchor(&self) -> Option<Vec3> {
        self.start_anchor
    }

    /// World-space goal anchor, final once generation completes.
    pub fn goal_anchor(&self) -> Option<Vec3> {
        self.goal_anchor
    }

    pub fn is_generated(&self) -> bool {
        self.start_anchor.is_some()
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    #[cfg(test)]
    pub(crate) fn chunks_mut(&mut self) -> &mut [Chunk] {
        &mut self.chunks
    }

    pub fn chunk_at(&self, coord: IVec3) -> Option<&Chunk> {
        let counts = self.config.chunk_counts;
        if coord.cmplt(IVec3::ZERO).any() || coord.cmpge(counts).any() {
            return None;
        }
        let index = ((coord.z * counts.y + coord.y) * counts.x + coord.x) as usize;
        self.chunks.get(index)
    }

    /// Bounds-checked scalar lookup in global grid coordinates. Outside the
    /// world everything reads solid, matching the per-chunk sentinel.
    pub fn scalar_at(&self, gx: i32, gy: i32, gz: i32) -> f32 {
        let counts = self.config.chunk_counts;
        let max = counts * CHUNK_SIZE;
        if gx < 0 || gy < 0 || gz < 0 || gx > max.x || gy > max.y || gz > max.z {
            return SOLID;
        }
        let coord = IVec3::new(
            (gx / CHUNK_SIZE).min(counts.x - 1),
            (gy / CHUNK_SIZE).min(counts.y - 1),
            (gz / CHUNK_SIZE).min(counts.z - 1),
        );
        match self.chunk_at(coord) {
            Some(chunk) => {
                let local = IVec3::new(gx, gy, gz) - coord * CHUNK_SIZE;
                chunk.get_scalar(local.x, local.y, local.z)
            }
            None => SOLID,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.config.cell_size
    }

    pub fn iso_level(&self) -> f32 {
        self.config.noise.iso_level
    }

    pub fn chunk_counts(&self) -> IVec3 {
        self.config.chunk_counts
    }

    /// Total world size in world units.
    pub fn world_extents(&self) -> Vec3 {
        self.config.chunk_counts.as_vec3() * CHUNK_SIZE as f32 * self.config.cell_size
    }

    /// Offset from the world origin to its center, for collaborators
    /// converting between centered and corner-anchored coordinates.
    pub fn half_extents(&self) -> Vec3 {
        self.world_extents() * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn test_config(seed: u32) -> WorldConfig {
        WorldConfig {
            chunk_counts: IVec3::new(2, 1, 2),
            cell_size: 1.0,
            start_radius: 4.0,
            goal_radius: 3.0,
            noise: crate::core::config::NoiseConfig {
                octave_count: 2,
                seed,
                ..Default::default()
            },
            auto_generate: false,
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let mut a = WorldGenerator::new(test_config(7));
        let mut b = WorldGenerator::new(test_config(7));
        a.generate();
        b.generate();

        assert_eq!(a.used_seed(), 7);
        assert_eq!(a.used_seed(), b.used_seed());
        assert_eq!(a.start_anchor(), b.start_anchor());
        assert_eq!(a.goal_anchor(), b.goal_anchor());

        for (ca, cb) in a.chunks().iter().zip(b.chunks()) {
            for lz in 0..GRID_SIZE {
                for ly in 0..GRID_SIZE {
                    for lx in 0..GRID_SIZE {
                        assert_eq!(ca.get_scalar(lx, ly, lz), cb.get_scalar(lx, ly, lz));
                    }
                }
            }
            assert_eq!(ca.mesh().indices, cb.mesh().indices);
        }
    }

    #[test]
    fn test_seed_resolution_precedence() {
        // Override beats the configured seed.
        let mut world = WorldGenerator::new(test_config(9));
        world.generate_with_seed(42);
        assert_eq!(world.used_seed(), 42);

        // Configured nonzero seed is used as-is.
        world.generate();
        assert_eq!(world.used_seed(), 9);

        // Seed 0 randomizes per call.
        let mut world = WorldGenerator::new(test_config(0));
        world.generate();
        let first = world.used_seed();
        world.generate();
        assert_ne!(first, world.used_seed());
    }

    #[test]
    fn test_forced_cavity_reads_as_air() {
        let mut world = WorldGenerator::new(test_config(11));
        world.generate();

        let iso = world.iso_level();
        let start = world.start_anchor().unwrap();
        let goal = world.goal_anchor().unwrap();
        let mut carved = 0;

        for chunk in world.chunks() {
            for lz in 0..GRID_SIZE {
                for ly in 0..GRID_SIZE {
                    for lx in 0..GRID_SIZE {
                        let p = chunk.grid_point_world(lx, ly, lz);
                        let value = chunk.get_scalar(lx, ly, lz);
                        if p.distance(start) < 4.0 || p.distance(goal) < 3.0 {
                            assert!(value <= iso - 0.1, "sample {value} at {p:?} not carved");
                            carved += 1;
                        }
                    }
                }
            }
        }
        assert!(carved > 0);
    }

    #[test]
    fn test_chunk_boundaries_agree_after_carving() {
        // Noise is sampled at absolute coordinates and carving visits every
        // chunk, so shared boundary grid points must match exactly.
        let mut world = WorldGenerator::new(test_config(23));
        world.generate();

        let left = world.chunk_at(IVec3::new(0, 0, 0)).unwrap();
        let right = world.chunk_at(IVec3::new(1, 0, 0)).unwrap();
        for lz in 0..GRID_SIZE {
            for ly in 0..GRID_SIZE {
                assert_eq!(
                    left.get_scalar(CHUNK_SIZE, ly, lz),
                    right.get_scalar(0, ly, lz)
                );
            }
        }
    }

    #[test]
    fn test_completion_fires_once_per_generate() {
        let mut world = WorldGenerator::new(test_config(5));
        let count = Rc::new(Cell::new(0));
        let count2 = Rc::clone(&count);
        world.subscribe_completion(Box::new(move || count2.set(count2.get() + 1)));

        assert!(!world.is_generated());
        world.generate();
        assert_eq!(count.get(), 1);
        assert!(world.is_generated());

        world.generate();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_scalar_at_matches_chunks_and_closes_world() {
        let mut world = WorldGenerator::new(test_config(31));
        world.generate();

        let chunk = world.chunk_at(IVec3::new(1, 0, 1)).unwrap();
        assert_eq!(world.scalar_at(CHUNK_SIZE + 3, 5, CHUNK_SIZE + 7), chunk.get_scalar(3, 5, 7));

        assert_eq!(world.scalar_at(-1, 0, 0), SOLID);
        assert_eq!(world.scalar_at(0, 1000, 0), SOLID);
    }

    #[test]
    fn test_externally_driven_mode_defers_generation() {
        let world = WorldGenerator::new(test_config(3));
        assert!(!world.is_generated());
        assert!(world.chunks().is_empty());
        assert_eq!(world.used_seed(), 0);
    }
}
