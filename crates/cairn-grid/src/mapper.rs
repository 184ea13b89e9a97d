//! Pure coordinate mapping between world, chunk, and local block spaces.
//!
//! Public world coordinates are centered: valid positions span
//! `[-world_size/2, world_size/2)` on each axis. Internally the mapper
//! shifts them into zero-based grid space before splitting into chunk and
//! local parts.

use cairn_geom::Vec3;

use crate::config::GridConfig;

/// Fully resolved address of one in-range world coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolved {
    pub cx: i32,
    pub cz: i32,
    pub chunk_index: usize,
    pub lx: usize,
    pub ly: usize,
    pub lz: usize,
    pub local_index: usize,
}

#[derive(Clone, Copy, Debug)]
pub struct Mapper {
    cfg: GridConfig,
}

impl Mapper {
    pub fn new(cfg: GridConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> GridConfig {
        self.cfg
    }

    /// Centered world coordinate to zero-based grid space. `None` when the
    /// coordinate falls outside the world on any axis.
    pub fn world_to_grid(&self, wx: i32, wy: i32, wz: i32) -> Option<(i32, i32, i32)> {
        let (wsx, wsy, wsz) = self.cfg.world_size();
        let (wsx, wsy, wsz) = (wsx as i32, wsy as i32, wsz as i32);
        let gx = wx + wsx / 2;
        let gy = wy + wsy / 2;
        let gz = wz + wsz / 2;
        if gx < 0 || gx >= wsx || gy < 0 || gy >= wsy || gz < 0 || gz >= wsz {
            return None;
        }
        Some((gx, gy, gz))
    }

    /// Horizontal chunk coordinate for a grid-space position. Chunks span
    /// the full height, so y does not participate.
    #[inline]
    pub fn chunk_of(&self, gx: i32, gz: i32) -> (i32, i32) {
        (
            gx.div_euclid(self.cfg.chunk_sx as i32),
            gz.div_euclid(self.cfg.chunk_sz as i32),
        )
    }

    /// Row-major chunk slot.
    #[inline]
    pub fn chunk_index(&self, cx: i32, cz: i32) -> usize {
        cz as usize * self.cfg.chunks_x + cx as usize
    }

    #[inline]
    pub fn local_of(&self, gx: i32, gy: i32, gz: i32, cx: i32, cz: i32) -> (usize, usize, usize) {
        (
            (gx - cx * self.cfg.chunk_sx as i32) as usize,
            gy as usize,
            (gz - cz * self.cfg.chunk_sz as i32) as usize,
        )
    }

    /// Linear local slot: x minor, y middle, z major. Border and visibility
    /// logic depend on this exact layout.
    #[inline]
    pub fn local_index(&self, lx: usize, ly: usize, lz: usize) -> usize {
        lx + ly * self.cfg.chunk_sx + lz * self.cfg.chunk_sx * self.cfg.chunk_sy
    }

    /// One-shot resolution of a centered world coordinate.
    pub fn resolve(&self, wx: i32, wy: i32, wz: i32) -> Option<Resolved> {
        let (gx, gy, gz) = self.world_to_grid(wx, wy, wz)?;
        let (cx, cz) = self.chunk_of(gx, gz);
        let (lx, ly, lz) = self.local_of(gx, gy, gz, cx, cz);
        Some(Resolved {
            cx,
            cz,
            chunk_index: self.chunk_index(cx, cz),
            lx,
            ly,
            lz,
            local_index: self.local_index(lx, ly, lz),
        })
    }

    /// Inverse reconstruction: chunk plus local back to the centered world
    /// coordinate. Round-trips with `resolve` for all in-range inputs.
    pub fn world_from_parts(&self, cx: i32, cz: i32, lx: usize, ly: usize, lz: usize) -> (i32, i32, i32) {
        let (wsx, wsy, wsz) = self.cfg.world_size();
        (
            cx * self.cfg.chunk_sx as i32 + lx as i32 - wsx as i32 / 2,
            ly as i32 - wsy as i32 / 2,
            cz * self.cfg.chunk_sz as i32 + lz as i32 - wsz as i32 / 2,
        )
    }

    /// World-space translation of the chunk center, y pinned to zero.
    pub fn chunk_anchor(&self, cx: i32, cz: i32) -> Vec3 {
        let (wsx, _, wsz) = self.cfg.world_size();
        Vec3::new(
            self.cfg.chunk_sx as f32 * (cx as f32 + 0.5) - wsx as f32 * 0.5,
            0.0,
            self.cfg.chunk_sz as f32 * (cz as f32 + 0.5) - wsz as f32 * 0.5,
        )
    }

    /// Render-space center of a local voxel: the anchor plus the local
    /// offset recentered on x/z; y offset by half the chunk height only.
    pub fn block_world_pos(&self, cx: i32, cz: i32, lx: usize, ly: usize, lz: usize) -> Vec3 {
        let anchor = self.chunk_anchor(cx, cz);
        Vec3::new(
            anchor.x + lx as f32 + 0.5 - self.cfg.chunk_sx as f32 * 0.5,
            ly as f32 - self.cfg.chunk_sy as f32 * 0.5,
            anchor.z + lz as f32 + 0.5 - self.cfg.chunk_sz as f32 * 0.5,
        )
    }
}
