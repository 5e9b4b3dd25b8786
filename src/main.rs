//! Cave generation demo
//!
//! Generates a world from a settings file (or defaults), runs the content
//! placement pass and reports what was built.

use std::path::PathBuf;

use clap::Parser;

use cavegen::content::ContentPlacer;
use cavegen::core::{GenerationSettings, WorldConfig};
use cavegen::world::WorldGenerator;

#[derive(Parser)]
#[command(name = "cavegen", about = "Deterministic cave world generator")]
struct Args {
    /// Seed override; takes precedence over the settings file
    #[arg(long)]
    seed: Option<u32>,

    /// Path to a JSON settings file
    #[arg(long, default_value = "cavegen.json")]
    config: PathBuf,

    /// Skip the content placement pass
    #[arg(long)]
    no_placement: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let settings = GenerationSettings::load_or_default(&args.config);

    let mut world = WorldGenerator::new(WorldConfig {
        auto_generate: false,
        ..settings.world
    });
    match args.seed {
        Some(seed) => world.generate_with_seed(seed),
        None => world.generate(),
    }

    let vertices: usize = world.chunks().iter().map(|c| c.mesh().vertices.len()).sum();
    let triangles: usize = world.chunks().iter().map(|c| c.mesh().triangle_count()).sum();
    tracing::info!(
        seed = world.used_seed(),
        chunks = world.chunks().len(),
        vertices,
        triangles,
        "world ready"
    );
    if let (Some(start), Some(goal)) = (world.start_anchor(), world.goal_anchor()) {
        tracing::info!(?start, ?goal, "anchors");
    }

    if !args.no_placement {
        let mut placer = ContentPlacer::new(settings.placement);
        placer.place(&world, world.used_seed());
        for item in placer.placed() {
            tracing::debug!(
                category = %item.category,
                item = %item.item,
                position = ?item.position,
                "placed"
            );
        }
        tracing::info!(items = placer.placed().len(), "placement done");
    }
}
