//! Chunked voxel grid: mutation surface, amortized visibility maintenance,
//! and frustum-culled render batch assembly.
#![forbid(unsafe_code)]

use std::sync::atomic::{AtomicBool, Ordering};

use cairn_blocks::Voxel;
use cairn_geom::Frustum;

mod batch;
mod config;
mod error;
mod mapper;
mod snapshot;

pub use batch::{BatchOptions, RenderBatch};
pub use cairn_chunk::{Chunk, NeighborSampler, VisibleBlock, WorldEdgePolicy};
pub use config::GridConfig;
pub use error::GridError;
pub use mapper::{Mapper, Resolved};
pub use snapshot::WorldSnapshot;

/// Aggregate observability counters. Derived reads only; nothing here
/// participates in correctness.
#[derive(Default, Debug, Clone, Copy)]
pub struct GridStats {
    pub chunks: usize,
    pub block_capacity: usize,
    pub visible_blocks: usize,
    pub dirty_chunks: usize,
}

/// The chunk manager.
///
/// Two roles interact with it. Mutators (terrain generators, editors) share
/// `&VoxelGrid` and call `get_block`/`set_block`/`is_reinit_pending`; the
/// per-chunk block lock and atomic dirty flags make concurrent mutators
/// safe. The single maintainer thread holds the grid exclusively for
/// `tick` and `compute_render_batch`, which take `&mut self` so the visible
/// caches and the frozen debug frustum have exactly one writer.
///
/// Per chunk: Clean -> (write on self or neighbor) -> Dirty -> (tick
/// recomputes) -> Clean. Grid-wide: Stable -> (configure) -> PendingReinit
/// -> (tick rebuilds) -> Stable. There are no other states.
pub struct VoxelGrid {
    cfg: GridConfig,
    mapper: Mapper,
    chunks: Vec<Chunk>,
    pending: Option<GridConfig>,
    pending_flag: AtomicBool,
    edge_policy: WorldEdgePolicy,
    frozen_frustum: Option<Frustum>,
}

impl VoxelGrid {
    /// Create a grid in the pending-reinit state; the first `tick` performs
    /// the initial build. Inputs are rounded down to even components; a
    /// configuration that collapses to zero is rejected.
    pub fn new(
        chunk_size: (usize, usize, usize),
        chunk_count: (usize, usize),
    ) -> Result<Self, GridError> {
        let cfg = Self::normalize(chunk_size, chunk_count)?;
        Ok(Self {
            cfg,
            mapper: Mapper::new(cfg),
            chunks: Vec::new(),
            pending: Some(cfg),
            pending_flag: AtomicBool::new(true),
            edge_policy: WorldEdgePolicy::default(),
            frozen_frustum: None,
        })
    }

    fn normalize(
        chunk_size: (usize, usize, usize),
        chunk_count: (usize, usize),
    ) -> Result<GridConfig, GridError> {
        let raw = GridConfig::new(chunk_size, chunk_count);
        let cfg = raw.normalized();
        if cfg.is_degenerate() {
            return Err(GridError::InvalidConfig);
        }
        if cfg != raw {
            log::info!(
                target: "grid",
                "config rounded down to even: {:?} x {:?}",
                cfg.chunk_size(),
                cfg.chunk_count_2d()
            );
        }
        Ok(cfg)
    }

    /// Request new dimensions. World size and coordinate mapping update
    /// immediately; the chunk rebuild is deferred to the next `tick` so no
    /// caller ever observes a half-destroyed grid.
    pub fn configure(
        &mut self,
        chunk_size: (usize, usize, usize),
        chunk_count: (usize, usize),
    ) -> Result<(), GridError> {
        let cfg = Self::normalize(chunk_size, chunk_count)?;
        self.cfg = cfg;
        self.mapper = Mapper::new(cfg);
        self.pending = Some(cfg);
        self.pending_flag.store(true, Ordering::Release);
        log::debug!(
            target: "grid",
            "reinit requested: chunks {:?}, chunk size {:?}",
            cfg.chunk_count_2d(),
            cfg.chunk_size()
        );
        Ok(())
    }

    /// Mutators must check this before writing; while it reads true, both
    /// reads and writes report `GridError::ReinitPending`.
    pub fn is_reinit_pending(&self) -> bool {
        self.pending_flag.load(Ordering::Acquire)
    }

    pub fn config(&self) -> GridConfig {
        self.cfg
    }

    pub fn world_size(&self) -> (usize, usize, usize) {
        self.cfg.world_size()
    }

    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    pub fn edge_policy(&self) -> WorldEdgePolicy {
        self.edge_policy
    }

    /// Grid-wide by design: a per-chunk setting would produce seam
    /// artifacts with no diagnostic. Existing caches are not invalidated;
    /// callers that flip this mid-run should reimport or re-dirty.
    pub fn set_edge_policy(&mut self, policy: WorldEdgePolicy) {
        self.edge_policy = policy;
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn get_block(&self, wx: i32, wy: i32, wz: i32) -> Result<Voxel, GridError> {
        if self.is_reinit_pending() {
            return Err(GridError::ReinitPending);
        }
        let r = self
            .mapper
            .resolve(wx, wy, wz)
            .ok_or(GridError::OutOfBounds { x: wx, y: wy, z: wz })?;
        Ok(self.chunks[r.chunk_index].get(r.local_index))
    }

    /// Write one voxel and mark the owning chunk dirty, plus the orthogonal
    /// neighbor along each axis the voxel borders on: a seam write can
    /// change the visibility of the adjacent chunk's border voxels.
    pub fn set_block(&self, wx: i32, wy: i32, wz: i32, v: Voxel) -> Result<(), GridError> {
        if self.is_reinit_pending() {
            return Err(GridError::ReinitPending);
        }
        let r = self
            .mapper
            .resolve(wx, wy, wz)
            .ok_or(GridError::OutOfBounds { x: wx, y: wy, z: wz })?;
        let chunk = &self.chunks[r.chunk_index];
        chunk.set(r.local_index, v);
        chunk.mark_dirty();

        let (sx, _, sz) = self.cfg.chunk_size();
        let (nx, nz) = self.cfg.chunk_count_2d();
        if r.lx == 0 && r.cx > 0 {
            self.mark_chunk_dirty(r.cx - 1, r.cz);
        }
        if r.lx == sx - 1 && (r.cx as usize) + 1 < nx {
            self.mark_chunk_dirty(r.cx + 1, r.cz);
        }
        if r.lz == 0 && r.cz > 0 {
            self.mark_chunk_dirty(r.cx, r.cz - 1);
        }
        if r.lz == sz - 1 && (r.cz as usize) + 1 < nz {
            self.mark_chunk_dirty(r.cx, r.cz + 1);
        }
        // y borders touch the world rim only; there are no vertical chunks.
        Ok(())
    }

    fn mark_chunk_dirty(&self, cx: i32, cz: i32) {
        let idx = self.mapper.chunk_index(cx, cz);
        self.chunks[idx].mark_dirty();
    }

    /// One maintenance step. Applies a pending rebuild if one was claimed;
    /// otherwise recomputes the visible cache of the first dirty chunk in
    /// index order. At most one chunk per call, bounding per-frame cost.
    pub fn tick(&mut self) {
        if self
            .pending_flag
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            if let Some(cfg) = self.pending.take() {
                self.rebuild(cfg);
            }
            return;
        }
        for i in 0..self.chunks.len() {
            if self.chunks[i].claim_dirty() {
                let policy = self.edge_policy;
                let vis = {
                    let chunk = &self.chunks[i];
                    chunk.recompute_visible(&*self, policy)
                };
                let n = vis.len();
                self.chunks[i].set_visible(vis);
                log::debug!(target: "grid", "recomputed chunk {}: {} visible", i, n);
                return;
            }
        }
    }

    /// Bulk replace of the chunk array. New chunks are empty and clean with
    /// valid (empty) caches, which is the recompute-all of an empty world.
    fn rebuild(&mut self, cfg: GridConfig) {
        self.cfg = cfg;
        self.mapper = Mapper::new(cfg);
        let (sx, sy, sz) = cfg.chunk_size();
        let (nx, nz) = cfg.chunk_count_2d();
        let mut chunks = Vec::with_capacity(cfg.chunk_count());
        for cz in 0..nz as i32 {
            for cx in 0..nx as i32 {
                chunks.push(Chunk::new(
                    cx,
                    cz,
                    sx,
                    sy,
                    sz,
                    self.mapper.chunk_anchor(cx, cz),
                ));
            }
        }
        self.chunks = chunks;
        log::debug!(
            target: "grid",
            "rebuilt grid: {} chunks of {}x{}x{}",
            self.chunks.len(),
            sx,
            sy,
            sz
        );
    }

    /// Assemble the frame's draw list: frustum-cull chunk bounds, then
    /// append each passing chunk's visible cache in chunk order. Reads the
    /// caches as of the last completed tick.
    pub fn compute_render_batch(&mut self, frustum: &Frustum, opts: &BatchOptions) -> RenderBatch {
        if opts.use_frozen_frustum {
            if self.frozen_frustum.is_none() {
                self.frozen_frustum = Some(*frustum);
            }
        } else {
            self.frozen_frustum = None;
        }
        let test = self.frozen_frustum.as_ref().unwrap_or(frustum);

        let mut out = RenderBatch::default();
        for chunk in &self.chunks {
            let bb = chunk.bounds();
            if !test.intersects_aabb(&bb) {
                out.chunks_culled += 1;
                continue;
            }
            out.chunks_drawn += 1;
            out.blocks.extend_from_slice(chunk.visible());
            if opts.draw_chunk_borders {
                out.chunk_borders.push(bb);
            }
        }
        out
    }

    pub fn total_chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn total_block_capacity(&self) -> usize {
        self.chunks.len() * self.cfg.chunk_volume()
    }

    pub fn total_visible_block_count(&self) -> usize {
        self.chunks.iter().map(|c| c.visible().len()).sum()
    }

    pub fn stats(&self) -> GridStats {
        GridStats {
            chunks: self.chunks.len(),
            block_capacity: self.total_block_capacity(),
            visible_blocks: self.total_visible_block_count(),
            dirty_chunks: self.chunks.iter().filter(|c| c.is_dirty()).count(),
        }
    }

    /// Flat copy of every voxel, chunk-major. Only valid between rebuilds.
    pub fn export_snapshot(&self) -> Result<WorldSnapshot, GridError> {
        if self.is_reinit_pending() {
            return Err(GridError::ReinitPending);
        }
        let mut voxels = Vec::with_capacity(self.total_block_capacity());
        for chunk in &self.chunks {
            voxels.extend(chunk.copy_blocks());
        }
        Ok(WorldSnapshot {
            chunk_size: self.cfg.chunk_size(),
            chunk_count: self.cfg.chunk_count_2d(),
            voxels,
        })
    }

    /// Replace all voxel data from a snapshot with matching dimensions and
    /// mark every chunk dirty so caches rebuild over the following ticks.
    pub fn import_snapshot(&self, snap: &WorldSnapshot) -> Result<(), GridError> {
        if self.is_reinit_pending() {
            return Err(GridError::ReinitPending);
        }
        if snap.chunk_size != self.cfg.chunk_size()
            || snap.chunk_count != self.cfg.chunk_count_2d()
        {
            return Err(GridError::snapshot_mismatch(snap, &self.cfg));
        }
        let expected = self.total_block_capacity();
        if snap.voxels.len() != expected {
            return Err(GridError::SnapshotLength {
                expected,
                got: snap.voxels.len(),
            });
        }
        let vol = self.cfg.chunk_volume();
        for (i, chunk) in self.chunks.iter().enumerate() {
            chunk.fill_from_slice(&snap.voxels[i * vol..(i + 1) * vol]);
            chunk.mark_dirty();
        }
        log::debug!(target: "grid", "imported snapshot: {} voxels", snap.voxels.len());
        Ok(())
    }
}

impl NeighborSampler for VoxelGrid {
    /// Grid-space lookup used by border visibility checks. `None` marks the
    /// world edge, which the scan resolves through the edge policy.
    fn voxel_at(&self, gx: i32, gy: i32, gz: i32) -> Option<Voxel> {
        let (wsx, wsy, wsz) = self.cfg.world_size();
        if gx < 0
            || gx >= wsx as i32
            || gy < 0
            || gy >= wsy as i32
            || gz < 0
            || gz >= wsz as i32
        {
            return None;
        }
        let (cx, cz) = self.mapper.chunk_of(gx, gz);
        let (lx, ly, lz) = self.mapper.local_of(gx, gy, gz, cx, cz);
        let chunk = &self.chunks[self.mapper.chunk_index(cx, cz)];
        Some(chunk.get(self.mapper.local_index(lx, ly, lz)))
    }
}
