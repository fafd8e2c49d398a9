mod scene;

use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tessel_blocks::{BlockPalette, VoxelType};
use tessel_edit::{ChunkRevisions, set_voxel};
use tessel_lighting::{LightScratch, audit_light, propagate};
use tessel_mesh_cpu::mesh_chunk;
use tessel_path::{ObstacleMask, PathError, find_path, find_target};
use tessel_physics::{ColliderScratch, extract_colliders_into};
use tessel_world::{ChunkCoord, ChunkRegion, World, WorldConfig, load_config_from_path};

use crate::scene::build_scene;

#[derive(Parser, Debug)]
#[command(name = "tessel", about = "Voxel world core: lighting, meshing, colliders, paths")]
struct Args {
    /// World and scene TOML; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides `[scene] seed`
    #[arg(long)]
    seed: Option<i32>,

    /// Overrides `[world] chunk_size`
    #[arg(long)]
    chunk_size: Option<u8>,

    /// Number of random edits to apply after the initial build
    #[arg(long, default_value_t = 64)]
    edits: usize,

    /// Debug-level logging unless RUST_LOG says otherwise
    #[arg(long, short)]
    verbose: bool,
}

fn all_chunks(world: &World, size: u8) -> Vec<ChunkCoord> {
    let s = i32::from(size);
    let d = &world.desc;
    let mut out = Vec::new();
    for cz in 0..d.depth / s {
        for cy in 0..d.height / s {
            for cx in 0..d.width / s {
                out.push(ChunkCoord::new(cx, cy, cz));
            }
        }
    }
    out
}

// Meshes `chunks` in parallel; returns (faces, vertices) totals.
fn mesh_all(world: &World, chunks: &[ChunkCoord], size: u8) -> Result<(usize, usize), Box<dyn Error>> {
    let meshes = chunks
        .par_iter()
        .map(|&c| mesh_chunk(world, ChunkRegion::from_coord(c, size)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(meshes
        .iter()
        .fold((0, 0), |(f, v), m| (f + m.face_count(), v + m.vertices.len())))
}

// Digs out surface cells or drops lamps on top of them; returns how many
// edits changed the world. Grids without interior columns get none.
fn random_edits<R: Rng + ?Sized>(
    world: &mut World,
    scratch: &mut LightScratch,
    revs: &mut ChunkRevisions,
    palette: &BlockPalette,
    rng: &mut R,
    count: usize,
) -> usize {
    let desc = world.desc;
    if desc.width < 3 || desc.depth < 3 {
        return 0;
    }
    let mut applied = 0;
    for _ in 0..count {
        let x = rng.gen_range(1..desc.width - 1);
        let z = rng.gen_range(1..desc.depth - 1);
        let top = world.height_at(x, z);
        let (y, ty) = if rng.gen_bool(0.5) {
            (top, VoxelType::Air)
        } else {
            (top + 1, VoxelType::Light)
        };
        let color = palette.get(ty).color;
        if let Some(report) = set_voxel(world, scratch, x, y, z, ty, color) {
            revs.bump_edit(&report);
            applied += 1;
        }
    }
    applied
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut cfg = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => WorldConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.scene.seed = seed;
    }
    if let Some(size) = args.chunk_size {
        cfg.world.chunk_size = size;
    }
    let size = cfg.world.chunk_size.max(1);
    let desc = cfg.world.desc()?;
    let palette = match &cfg.scene.palette {
        Some(path) => BlockPalette::from_path(path)?,
        None => BlockPalette::default(),
    };
    let mut rng = StdRng::seed_from_u64(cfg.scene.seed as u64);

    let t0 = Instant::now();
    let (mut world, summary) = build_scene(desc, &cfg.scene, &palette, &mut rng);
    let mut scratch = LightScratch::new();
    propagate(&mut world, &mut scratch);
    log::info!(
        "scene {}x{}x{} built and lit in {:?}: {} lamps, {} trees, room {:?}",
        desc.width,
        desc.height,
        desc.depth,
        t0.elapsed(),
        summary.lamps.len(),
        summary.trees,
        summary.room
    );

    let chunks = all_chunks(&world, size);
    if chunks.is_empty() {
        log::warn!("chunk size {} does not fit the {}x{}x{} grid", size, desc.width, desc.height, desc.depth);
    }
    let t1 = Instant::now();
    let (faces, verts) = mesh_all(&world, &chunks, size)?;
    log::info!("meshed {} chunks in {:?}: {} faces, {} vertices", chunks.len(), t1.elapsed(), faces, verts);

    let mut cscratch = ColliderScratch::new();
    let mut boxes = Vec::new();
    for &c in &chunks {
        extract_colliders_into(&world, ChunkRegion::from_coord(c, size), &mut cscratch, &mut boxes)?;
    }
    log::info!("{} collider boxes", boxes.len());

    let mut revs = ChunkRevisions::new(desc, size);
    for &c in &chunks {
        revs.mark_built(c, revs.get_rev(c));
    }
    let applied = random_edits(&mut world, &mut scratch, &mut revs, &palette, &mut rng, args.edits);
    let dirty: Vec<ChunkCoord> = revs
        .dirty_chunks()
        .into_iter()
        .filter(|&c| revs.region(c).fits(&world.desc))
        .collect();
    let t2 = Instant::now();
    let (faces, _) = mesh_all(&world, &dirty, size)?;
    for &c in &dirty {
        revs.mark_built(c, revs.get_rev(c));
    }
    log::info!(
        "{} of {} edits applied; rebuilt {} dirty chunks ({} faces) in {:?}",
        applied,
        args.edits,
        dirty.len(),
        faces,
        t2.elapsed()
    );

    let violations = audit_light(&world);
    for v in violations.iter().take(8) {
        log::warn!("light invariant broken: {}", v);
    }
    if !violations.is_empty() {
        return Err(format!("{} cells hold illegal light", violations.len()).into());
    }

    let agent = cfg.scene.agent_height;
    let obstacles = ObstacleMask::new(desc);
    let center = (desc.width / 2, 0, desc.depth / 2);
    let origin = (center.0, world.height_at(center.0, center.2) + 1, center.2);
    let radius = (desc.width.min(desc.depth) / 4).max(1);
    let goal = (0..32).find_map(|_| find_target(&world, &obstacles, &mut rng, origin, radius, agent));
    match goal {
        Some(goal) => match find_path(&world, &obstacles, agent, origin, goal) {
            Ok(path) => {
                let lit = path.iter().filter(|w| w.light > 0).count();
                log::info!("path {:?} -> {:?}: {} waypoints, {} lit", origin, goal, path.len(), lit);
            }
            Err(e @ (PathError::Unreachable | PathError::SearchLimit { .. })) => {
                log::info!("no path {:?} -> {:?}: {}", origin, goal, e);
            }
            Err(e) => return Err(e.into()),
        },
        None => log::info!("no walkable target near {:?}", origin),
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
