//! Deterministic, bias-free item placement
//!
//! Scans every chunk for walkable floor cells, shuffles the candidates with
//! a seeded RNG and hands them to categories in priority order. Reading the
//! scalar field directly sidesteps the visibility-probe problem: a ray from
//! above the world stops at the first ceiling and never reaches the true
//! interior floor of an enclosed cave.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngExt, SeedableRng};

use crate::constants::*;
use crate::core::chunk::Chunk;
use crate::core::config::{CategoryConfig, PlacementConfig};
use crate::world::generator::WorldGenerator;

/// One item placed during a pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem {
    pub category: String,
    pub item: String,
    pub position: Vec3,
    /// Cosmetic rotation, drawn from the same seeded RNG so the whole pass
    /// stays reproducible.
    pub yaw: f32,
}

pub struct ContentPlacer {
    config: PlacementConfig,
    placed: Vec<PlacedItem>,
    placed_by_category: Vec<Vec<Vec3>>,
}

impl ContentPlacer {
    pub fn new(config: PlacementConfig) -> Self {
        let categories = config.categories.len();
        ContentPlacer {
            config,
            placed: Vec::new(),
            placed_by_category: vec![Vec::new(); categories],
        }
    }

    pub fn placed(&self) -> &[PlacedItem] {
        &self.placed
    }

    /// Run one placement pass. Clears everything placed before, then
    /// detects floor candidates, shuffles them and fills categories until
    /// caps, densities and spacing rules say stop.
    pub fn place(&mut self, world: &WorldGenerator, seed: u32) {
        self.placed.clear();
        self.placed_by_category = vec![Vec::new(); self.config.categories.len()];

        let Some(start) = world.start_anchor() else {
            tracing::warn!("placement requested before world generation, nothing placed");
            return;
        };
        if world.chunks().is_empty() {
            tracing::warn!("world has no chunks, nothing placed");
            return;
        }

        let mut candidates = self.collect_floor_candidates(world, start);
        if candidates.is_empty() {
            tracing::warn!("no floor candidates found, nothing placed");
            return;
        }

        // Fisher-Yates over the flattened candidate list. Without this,
        // chunk-ordered traversal exhausts category caps in the first
        // chunks scanned and starves the rest of the world.
        let mut rng = StdRng::seed_from_u64(seed as u64);
        candidates.shuffle(&mut rng);

        for candidate in candidates {
            self.try_place(candidate, &mut rng);
        }
        tracing::info!(seed, placed = self.placed.len(), "content placement finished");
    }

    /// Topmost air-over-solid grid point of every chunk column, skipping
    /// columns whose candidate falls inside the start exclusion radius.
    fn collect_floor_candidates(&self, world: &WorldGenerator, start: Vec3) -> Vec<Vec3> {
        let iso = world.iso_level();
        let mut candidates = Vec::new();
        for chunk in world.chunks() {
            for lz in 0..GRID_SIZE {
                for lx in 0..GRID_SIZE {
                    if let Some(position) = column_candidate(chunk, lx, lz, iso) {
                        if position.distance(start) >= self.config.exclusion_radius {
                            candidates.push(position);
                        }
                    }
                }
            }
        }
        candidates
    }

    /// Give the candidate to the first category whose cap, item list,
    /// density draw and spacing rules all accept it.
    fn try_place(&mut self, candidate: Vec3, rng: &mut StdRng) {
        for (index, category) in self.config.categories.iter().enumerate() {
            if self.placed_by_category[index].len() >= category.max_count {
                continue;
            }
            if category.items.is_empty() {
                continue;
            }
            if rng.random_range(0.0..100.0) >= category.density_percent {
                continue;
            }
            if !spacing_ok(
                candidate,
                &self.placed_by_category[index],
                category.min_spacing,
                &self.placed,
                self.config.global_min_spacing,
            ) {
                continue;
            }

            let item = category.items[rng.random_range(0..category.items.len())].clone();
            let yaw = rng.random_range(0.0..std::f32::consts::TAU);
            self.placed_by_category[index].push(candidate);
            self.placed.push(PlacedItem {
                category: category.name.clone(),
                item,
                position: candidate,
                yaw,
            });
            // First satisfying category consumes the candidate.
            return;
        }
    }
}

/// Scan a chunk column from the top down for the first air sample sitting
/// on a solid one. Lower transitions in the same column are ignored.
fn column_candidate(chunk: &Chunk, lx: i32, lz: i32, iso: f32) -> Option<Vec3> {
    for ly in (1..GRID_SIZE).rev() {
        let open = chunk.get_scalar(lx, ly, lz) < iso;
        let below_solid = chunk.get_scalar(lx, ly - 1, lz) >= iso;
        if open && below_solid {
            return Some(chunk.grid_point_world(lx, ly, lz));
        }
    }
    None
}

fn spacing_ok(
    candidate: Vec3,
    same_category: &[Vec3],
    min_spacing: f32,
    all_placed: &[PlacedItem],
    global_min_spacing: f32,
) -> bool {
    same_category
        .iter()
        .all(|p| candidate.distance(*p) >= min_spacing)
        && all_placed
            .iter()
            .all(|p| candidate.distance(p.position) >= global_min_spacing)
}
