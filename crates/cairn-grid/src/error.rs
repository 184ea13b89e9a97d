//! Grid error taxonomy. Every variant is a caller-side precondition
//! violation; none are transient or retryable.

use thiserror::Error;

use crate::config::GridConfig;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("world coordinate ({x}, {y}, {z}) is outside the grid")]
    OutOfBounds { x: i32, y: i32, z: i32 },

    #[error("grid reinitialization is pending; run tick() first")]
    ReinitPending,

    #[error("grid configuration has a zero dimension after even rounding")]
    InvalidConfig,

    #[error(
        "snapshot was captured for chunk size {snap_chunk:?} x count {snap_count:?}, \
         grid is {grid_chunk:?} x {grid_count:?}"
    )]
    SnapshotMismatch {
        snap_chunk: (usize, usize, usize),
        snap_count: (usize, usize),
        grid_chunk: (usize, usize, usize),
        grid_count: (usize, usize),
    },

    #[error("snapshot holds {got} voxels, grid expects {expected}")]
    SnapshotLength { expected: usize, got: usize },
}

impl GridError {
    pub fn snapshot_mismatch(snap: &crate::snapshot::WorldSnapshot, grid: &GridConfig) -> Self {
        GridError::SnapshotMismatch {
            snap_chunk: snap.chunk_size,
            snap_count: snap.chunk_count,
            grid_chunk: grid.chunk_size(),
            grid_count: grid.chunk_count_2d(),
        }
    }
}
