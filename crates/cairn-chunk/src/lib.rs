//! Chunk storage, dirty claim, and the visible-block cache.
#![forbid(unsafe_code)]

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use cairn_blocks::Voxel;
use cairn_geom::{Aabb, Vec3};

/// One cached draw entry: render-space position of a voxel center plus its id.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleBlock {
    pub pos: Vec3,
    pub voxel: Voxel,
}

/// How the visibility scan treats a face neighbor that lies outside the world.
///
/// Grid-wide by construction; a per-chunk toggle would produce seam artifacts
/// with no diagnostic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WorldEdgePolicy {
    /// Outside counts as air: rim voxels draw their outward faces.
    #[default]
    Exposed,
    /// Outside counts as solid: no outward-facing skirts at the world rim.
    Sealed,
    /// As `Sealed`, except a rim voxel still draws when the voxel directly
    /// above it (local y+1) is occupied.
    CappedOnly,
}

/// Resolves voxel lookups that cross this chunk's boundary.
///
/// Coordinates are grid-space (zero-based, spanning the whole world).
/// `None` means the coordinate is outside the world entirely.
pub trait NeighborSampler {
    fn voxel_at(&self, gx: i32, gy: i32, gz: i32) -> Option<Voxel>;
}

const FACES: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// Fixed-size dense voxel cell. Blocks sit behind a short per-chunk lock so
/// a mutator thread may write while the maintainer scans a different chunk;
/// the visible cache is plain data written only through `&mut` by the
/// maintainer's tick path.
pub struct Chunk {
    pub cx: i32,
    pub cz: i32,
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
    /// World-space translation of the chunk center, fixed at creation.
    pub anchor: Vec3,
    blocks: RwLock<Vec<Voxel>>,
    dirty: AtomicBool,
    visible: Vec<VisibleBlock>,
}

impl Chunk {
    pub fn new(cx: i32, cz: i32, sx: usize, sy: usize, sz: usize, anchor: Vec3) -> Self {
        Self {
            cx,
            cz,
            sx,
            sy,
            sz,
            anchor,
            blocks: RwLock::new(vec![Voxel::AIR; sx * sy * sz]),
            dirty: AtomicBool::new(false),
            visible: Vec::new(),
        }
    }

    /// Linear index for a local coordinate. y is the middle-stride axis and
    /// z the major axis; border and visibility logic depend on this layout.
    #[inline]
    pub fn local_index(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.sx + z * self.sx * self.sy
    }

    #[inline]
    pub fn volume(&self) -> usize {
        self.sx * self.sy * self.sz
    }

    pub fn get(&self, idx: usize) -> Voxel {
        self.blocks.read().unwrap()[idx]
    }

    /// O(1) write. Does not touch the dirty flag: the grid owns dirtying
    /// because a write can also invalidate neighboring chunks.
    pub fn set(&self, idx: usize, v: Voxel) {
        self.blocks.write().unwrap()[idx] = v;
    }

    pub fn has_non_air(&self) -> bool {
        self.blocks.read().unwrap().iter().any(|v| v.is_solid())
    }

    pub fn copy_blocks(&self) -> Vec<Voxel> {
        self.blocks.read().unwrap().clone()
    }

    /// Bulk replace, used by snapshot import. The slice length must equal
    /// the chunk volume.
    pub fn fill_from_slice(&self, src: &[Voxel]) {
        let mut guard = self.blocks.write().unwrap();
        guard.copy_from_slice(src);
    }

    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Claim the dirty flag (true -> false). At most one caller wins per
    /// marking; a write racing with the subsequent scan re-dirties the chunk
    /// instead of being lost.
    pub fn claim_dirty(&self) -> bool {
        self.dirty
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn visible(&self) -> &[VisibleBlock] {
        &self.visible
    }

    pub fn set_visible(&mut self, visible: Vec<VisibleBlock>) {
        self.visible = visible;
    }

    /// Render-space center of the local voxel: anchor plus the local offset
    /// recentered on x/z; y is offset by half the chunk height only.
    #[inline]
    pub fn block_pos(&self, lx: usize, ly: usize, lz: usize) -> Vec3 {
        Vec3::new(
            self.anchor.x + lx as f32 + 0.5 - self.sx as f32 * 0.5,
            ly as f32 - self.sy as f32 * 0.5,
            self.anchor.z + lz as f32 + 0.5 - self.sz as f32 * 0.5,
        )
    }

    /// World-space bounding volume: anchor plus-minus half the chunk size.
    pub fn bounds(&self) -> Aabb {
        let half = Vec3::new(
            self.sx as f32 * 0.5,
            self.sy as f32 * 0.5,
            self.sz as f32 * 0.5,
        );
        Aabb::from_center_half(Vec3::new(self.anchor.x, 0.0, self.anchor.z), half)
    }

    /// Scan every local voxel and collect the ones with at least one exposed
    /// face. Interior neighbors resolve within this chunk's own array;
    /// lookups that cross the chunk boundary go through `sampler`, which
    /// answers from the adjacent chunk or reports the world edge.
    ///
    /// Only the grid's tick may invoke this, and never concurrently with
    /// another scan of the same chunk.
    pub fn recompute_visible(
        &self,
        sampler: &impl NeighborSampler,
        policy: WorldEdgePolicy,
    ) -> Vec<VisibleBlock> {
        let blocks = self.blocks.read().unwrap();
        if blocks.iter().all(|v| v.is_air()) {
            return Vec::new();
        }
        let (sx, sy, sz) = (self.sx as i32, self.sy as i32, self.sz as i32);
        let base_x = self.cx * sx;
        let base_z = self.cz * sz;
        let mut out = Vec::new();
        for z in 0..sz {
            for y in 0..sy {
                for x in 0..sx {
                    let v = blocks[self.local_index(x as usize, y as usize, z as usize)];
                    if v.is_air() {
                        continue;
                    }
                    let mut exposed = false;
                    let mut hit_world_edge = false;
                    for (dx, dy, dz) in FACES {
                        let (nx, ny, nz) = (x + dx, y + dy, z + dz);
                        let neighbor = if nx >= 0
                            && nx < sx
                            && ny >= 0
                            && ny < sy
                            && nz >= 0
                            && nz < sz
                        {
                            Some(blocks[self.local_index(nx as usize, ny as usize, nz as usize)])
                        } else {
                            sampler.voxel_at(base_x + nx, ny, base_z + nz)
                        };
                        match neighbor {
                            Some(n) if n.is_air() => {
                                exposed = true;
                                break;
                            }
                            Some(_) => {}
                            None => hit_world_edge = true,
                        }
                    }
                    if !exposed && hit_world_edge {
                        exposed = match policy {
                            WorldEdgePolicy::Exposed => true,
                            WorldEdgePolicy::Sealed => false,
                            WorldEdgePolicy::CappedOnly => {
                                y + 1 < sy
                                    && blocks[self.local_index(
                                        x as usize,
                                        (y + 1) as usize,
                                        z as usize,
                                    )]
                                    .is_solid()
                            }
                        };
                    }
                    if exposed {
                        out.push(VisibleBlock {
                            pos: self.block_pos(x as usize, y as usize, z as usize),
                            voxel: v,
                        });
                    }
                }
            }
        }
        out
    }
}
