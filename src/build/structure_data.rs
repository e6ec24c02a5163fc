//! Structure Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in structure_operations.rs

use rustc_hash::FxHashMap;

use super::block_data::{AttachError, BlockData};
use super::core::{BlockId, BlockPos, FaceDirection};
use crate::protocol::Operation;

/// Registry of every block in one structure
#[derive(Debug, Clone, Default)]
pub struct StructureData {
    /// All blocks, keyed by identity
    pub blocks: FxHashMap<BlockId, BlockData>,

    /// Coordinate index, kept in lockstep with `blocks`
    pub positions: FxHashMap<BlockPos, BlockId>,

    /// Statistics
    pub stats: StructureStats,
}

/// Statistics for applied operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructureStats {
    pub operations_applied: u64,
    pub operations_failed: u64,
    pub blocks_added: u64,
    pub blocks_removed: u64,
    pub overrides: u64,
}

/// Result of a successfully applied operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// The operation, with the child id resolved
    pub operation: Operation,

    /// Structure-relative direction the operation acted on
    pub direction: FaceDirection,

    /// Every block that left the structure, cascades included
    pub removed: Vec<BlockId>,

    /// Removals the operation caused beyond its own target, in removal order:
    /// displaced blocks and their subtrees for an add, the target's
    /// descendants for a remove
    pub cascade: Vec<Detached>,

    /// An add displaced a pre-existing occupant by slot, coordinate or id
    pub overridden: bool,
}

/// A block taken off its parent as part of a removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detached {
    pub parent: BlockId,
    pub direction: FaceDirection,
    pub child: BlockId,
}

/// Reported, non-fatal failures of `apply`. The structure is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    #[error("parent {parent} is not part of the structure")]
    ParentNotFound { parent: BlockId },

    #[error(transparent)]
    Attach(#[from] AttachError),

    #[error("no child of {parent} found in direction {direction}")]
    ChildNotFound {
        parent: BlockId,
        direction: FaceDirection,
    },

    #[error("add carries no usable child id ({child:?})")]
    InvalidChild { child: Option<BlockId> },

    #[error("adding {child} would remove {victim}, which it depends on")]
    Conflict { child: BlockId, victim: BlockId },
}

/// Outcome of `apply`
pub type ApplyResult = Result<Applied, ApplyError>;
