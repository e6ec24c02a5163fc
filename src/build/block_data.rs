//! Block Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in block_operations.rs

use serde::{Deserialize, Serialize};

use super::core::{BlockId, BlockPos, FaceDirection, FaceMap};
use crate::constants::block::FACE_COUNT;

/// Link from a block to the block it is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParentLink {
    /// Identity of the parent block
    pub id: BlockId,
    /// Structure-relative direction of the parent this block occupies
    pub direction: FaceDirection,
}

/// A single block in a structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockData {
    pub id: BlockId,

    /// Grid position in the structure frame
    pub coordinate: BlockPos,

    /// Physical face pointing along each structure direction
    pub local_faces: FaceMap,

    /// `None` only for the base block
    pub parent: Option<ParentLink>,

    /// Attached children, indexed by structure-relative direction slot
    pub children: [Option<BlockId>; FACE_COUNT],
}

/// Where and how a block would end up if attached, computed before any
/// mutation so a failed attach never leaves partial state behind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub parent: ParentLink,
    pub coordinate: BlockPos,
    pub local_faces: FaceMap,
    /// Child currently filling the target slot, if any
    pub occupant: Option<BlockId>,
}

/// Errors from resolving an attachment on a parent block
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachError {
    #[error("parent {parent} cannot resolve face {face} to a structure direction")]
    UndefinedFace { parent: BlockId, face: FaceDirection },

    #[error("slot {direction} of {parent} is already occupied by {occupant}")]
    SlotOccupied {
        parent: BlockId,
        direction: FaceDirection,
        occupant: BlockId,
    },
}
