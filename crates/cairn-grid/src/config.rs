//! Grid dimensions and even-rounding normalization.

use serde::{Deserialize, Serialize};

/// Chunk dimensions (3D) and horizontal chunk tiling (2D). Chunks span the
/// full world height, so the vertical world size equals `chunk_sy`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub chunk_sx: usize,
    pub chunk_sy: usize,
    pub chunk_sz: usize,
    pub chunks_x: usize,
    pub chunks_z: usize,
}

impl GridConfig {
    pub const fn new(chunk_size: (usize, usize, usize), chunk_count: (usize, usize)) -> Self {
        Self {
            chunk_sx: chunk_size.0,
            chunk_sy: chunk_size.1,
            chunk_sz: chunk_size.2,
            chunks_x: chunk_count.0,
            chunks_z: chunk_count.1,
        }
    }

    /// Round every component down to even so the world stays symmetric
    /// about the origin. Odd inputs are not errors.
    pub const fn normalized(self) -> Self {
        Self {
            chunk_sx: self.chunk_sx & !1,
            chunk_sy: self.chunk_sy & !1,
            chunk_sz: self.chunk_sz & !1,
            chunks_x: self.chunks_x & !1,
            chunks_z: self.chunks_z & !1,
        }
    }

    pub const fn is_degenerate(&self) -> bool {
        self.chunk_sx == 0
            || self.chunk_sy == 0
            || self.chunk_sz == 0
            || self.chunks_x == 0
            || self.chunks_z == 0
    }

    pub const fn chunk_size(&self) -> (usize, usize, usize) {
        (self.chunk_sx, self.chunk_sy, self.chunk_sz)
    }

    pub const fn chunk_count_2d(&self) -> (usize, usize) {
        (self.chunks_x, self.chunks_z)
    }

    pub const fn world_size(&self) -> (usize, usize, usize) {
        (
            self.chunk_sx * self.chunks_x,
            self.chunk_sy,
            self.chunk_sz * self.chunks_z,
        )
    }

    pub const fn chunk_count(&self) -> usize {
        self.chunks_x * self.chunks_z
    }

    pub const fn chunk_volume(&self) -> usize {
        self.chunk_sx * self.chunk_sy * self.chunk_sz
    }

    pub const fn capacity(&self) -> usize {
        self.chunk_volume() * self.chunk_count()
    }
}
