use thiserror::Error;

use crate::pos::{format_positions, BlockPos};

/// Why a single structure could not be decomposed.
#[derive(Debug, Error)]
pub enum DecomposeError {
    #[error("Structure is not odd width ({x}, {z})")]
    EvenWidth { x: i32, z: i32 },

    #[error("Center root {center} not found in roots: {}", format_positions(.roots))]
    MissingCenterRoot { center: BlockPos, roots: Vec<BlockPos> },

    #[error("Structure has no logs at y = 0 to grow from")]
    MissingRoots,

    #[error("Malformed placement #{index}: {reason}")]
    MalformedPlacement { index: usize, reason: String },

    #[error(
        "Structure is disconnected - {} unreachable logs at {}",
        .positions.len(),
        format_positions(.positions)
    )]
    DisconnectedLogs { positions: Vec<BlockPos> },

    #[error(
        "Structure is disconnected - {} unreachable leaves at {}",
        .positions.len(),
        format_positions(.positions)
    )]
    DisconnectedLeaves { positions: Vec<BlockPos> },

    #[error("Branch directions form a cycle through {at}")]
    CyclicBranches { at: BlockPos },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DecomposeError>;
