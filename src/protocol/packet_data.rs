//! Packet Data - Pure DOP
//!
//! NO METHODS beyond constructors. Just data.
//! All transformations happen in packet_operations.rs

use serde::{Deserialize, Serialize};

use crate::build::{BlockId, FaceDirection};
use crate::constants::wire::PACKET_LEN;

/// One block event exactly as received from the device
pub type RawPacket = [u8; PACKET_LEN];

/// Kind of structural change, derived from the child id on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    Add,
    Remove,
}

/// A decoded block event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub kind: OperationKind,
    /// Block the change happened on
    pub parent_id: BlockId,
    /// Physical face of the parent, in the parent's own labelling
    pub requested_face: FaceDirection,
    /// Block that was attached; unknown for removals until resolved
    pub child_id: Option<BlockId>,
}

impl Operation {
    pub fn add(parent_id: BlockId, requested_face: FaceDirection, child_id: BlockId) -> Self {
        Self {
            kind: OperationKind::Add,
            parent_id,
            requested_face,
            child_id: Some(child_id),
        }
    }

    pub fn remove(parent_id: BlockId, requested_face: FaceDirection) -> Self {
        Self {
            kind: OperationKind::Remove,
            parent_id,
            requested_face,
            child_id: None,
        }
    }
}

/// Successful decoder output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    Operation(Operation),
    /// Verbatim echo of the previous packet; nothing to apply
    Duplicate,
}

/// Errors produced while decoding a packet
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid face id {face} (parent {parent_id}, child {child_id})")]
    InvalidFace {
        parent_id: BlockId,
        child_id: BlockId,
        face: u8,
    },

    #[error("invalid packet length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Counters kept by a stateful decoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderStats {
    pub decoded: u64,
    pub duplicates: u64,
    pub rejected: u64,
}
