//! Headless driver: fills a noise terrain through the grid's mutation API,
//! ticks the maintenance loop until every cache is clean, and assembles one
//! frustum-culled render batch.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use fastnoise_lite::{FastNoiseLite, NoiseType};
use hashbrown::HashMap;

use cairn_blocks::{Palette, Voxel};
use cairn_geom::{Frustum, Vec3};
use cairn_grid::{BatchOptions, GridError, VoxelGrid};

#[derive(Parser, Debug)]
#[command(name = "cairn", about = "Chunked voxel grid demo driver")]
struct Args {
    /// Chunk dimensions as x,y,z (rounded down to even)
    #[arg(long, default_value = "16,64,16", value_parser = parse_triple)]
    chunk_size: (usize, usize, usize),

    /// Horizontal chunk tiling as x,z (rounded down to even)
    #[arg(long, default_value = "8,8", value_parser = parse_pair)]
    chunks: (usize, usize),

    /// Terrain noise seed
    #[arg(long, default_value_t = 1337)]
    seed: i32,

    /// Emit chunk bounding boxes with the batch
    #[arg(long)]
    draw_chunk_borders: bool,

    /// Palette TOML used to name block ids in the summary
    #[arg(long)]
    palette: Option<PathBuf>,
}

fn parse_triple(s: &str) -> Result<(usize, usize, usize), String> {
    let parts: Vec<usize> = s
        .split(',')
        .map(|p| p.trim().parse::<usize>().map_err(|e| e.to_string()))
        .collect::<Result<_, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok((*x, *y, *z)),
        _ => Err(format!("expected x,y,z, got '{}'", s)),
    }
}

fn parse_pair(s: &str) -> Result<(usize, usize), String> {
    let parts: Vec<usize> = s
        .split(',')
        .map(|p| p.trim().parse::<usize>().map_err(|e| e.to_string()))
        .collect::<Result<_, _>>()?;
    match parts.as_slice() {
        [x, z] => Ok((*x, *z)),
        _ => Err(format!("expected x,z, got '{}'", s)),
    }
}

const STONE: Voxel = Voxel::new(1);
const DIRT: Voxel = Voxel::new(2);
const GRASS: Voxel = Voxel::new(3);

fn main() {
    env_logger::init();
    if let Err(e) = run(Args::parse()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let palette = match &args.palette {
        Some(path) => Palette::from_path(path)?,
        None => Palette::new(),
    };

    let mut grid = VoxelGrid::new(args.chunk_size, args.chunks)?;
    grid.tick();
    let (wsx, wsy, wsz) = grid.world_size();
    log::info!("world {}x{}x{} in {} chunks", wsx, wsy, wsz, grid.total_chunk_count());

    fill_terrain(&grid, args.seed)?;
    let dirty = grid.stats().dirty_chunks;
    let mut ticks = 0usize;
    while grid.stats().dirty_chunks > 0 {
        grid.tick();
        ticks += 1;
    }
    log::info!("{} dirty chunks cleaned over {} ticks", dirty, ticks);

    // Camera hovering over the +x/+z corner, aimed at the world center.
    let eye = Vec3::new(wsx as f32 * 0.6, wsy as f32 * 1.2, wsz as f32 * 0.6);
    let frustum = Frustum::from_camera(
        eye,
        Vec3::ZERO - eye,
        Vec3::UP,
        70.0,
        16.0 / 9.0,
        0.1,
        4.0 * (wsx.max(wsz) as f32),
    );
    let opts = BatchOptions {
        draw_chunk_borders: args.draw_chunk_borders,
        ..Default::default()
    };
    let batch = grid.compute_render_batch(&frustum, &opts);

    println!(
        "chunks: {} drawn, {} culled; batch: {} blocks ({} cached grid-wide)",
        batch.chunks_drawn,
        batch.chunks_culled,
        batch.blocks.len(),
        grid.total_visible_block_count()
    );
    if args.draw_chunk_borders {
        println!("debug borders: {}", batch.chunk_borders.len());
    }

    let mut by_id: HashMap<Voxel, usize> = HashMap::new();
    for vb in &batch.blocks {
        *by_id.entry(vb.voxel).or_default() += 1;
    }
    let mut counts: Vec<(Voxel, usize)> = by_id.into_iter().collect();
    counts.sort_by_key(|(v, _)| v.id);
    for (v, n) in counts {
        println!("  {:>8} x {}", palette.name_of(v), n);
    }
    Ok(())
}

/// Plays the mutator role: a simple heightmap poured in through `set_block`.
fn fill_terrain(grid: &VoxelGrid, seed: i32) -> Result<(), GridError> {
    let mut noise = FastNoiseLite::with_seed(seed);
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_frequency(Some(0.03));

    let (wsx, wsy, wsz) = grid.world_size();
    let (hx, hy, hz) = (wsx as i32 / 2, wsy as i32 / 2, wsz as i32 / 2);
    for wz in -hz..hz {
        for wx in -hx..hx {
            let n = ((noise.get_noise_2d(wx as f32, wz as f32) + 1.0) * 0.5).clamp(0.0, 1.0);
            let top = -hy + (n * (wsy as f32 - 1.0)) as i32;
            for wy in -hy..=top {
                let v = if wy == top {
                    GRASS
                } else if top - wy <= 3 {
                    DIRT
                } else {
                    STONE
                };
                grid.set_block(wx, wy, wz, v)?;
            }
        }
    }
    Ok(())
}
