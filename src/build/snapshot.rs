//! Structure snapshots
//!
//! A snapshot is the flat list of blocks with their parent links, sorted by
//! id. Restoring rebuilds the children slots and the coordinate index, then
//! verifies the result before handing it out.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::block_data::{BlockData, ParentLink};
use super::block_operations::create_block;
use super::core::{BlockId, BlockPos, FaceDirection, FaceMap};
use super::invariants::{verify_invariants, InvariantViolation};
use super::structure_data::{StructureData, StructureStats};
use crate::constants::snapshot::SNAPSHOT_VERSION;

/// One block as persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub id: BlockId,
    pub coordinate: BlockPos,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentLink>,
    pub local_faces: FaceMap,
}

/// Persistable copy of a structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureSnapshot {
    pub version: u32,
    pub blocks: Vec<BlockRecord>,
}

/// Errors restoring a snapshot
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("block {id} appears more than once")]
    DuplicateId { id: BlockId },

    #[error("coordinate {coordinate} is used by more than one block")]
    DuplicateCoordinate { coordinate: BlockPos },

    #[error("slot {direction} of {parent} is claimed by more than one block")]
    ChildSlotTaken {
        parent: BlockId,
        direction: FaceDirection,
    },

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StructureSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Capture a structure
pub fn take_snapshot(data: &StructureData) -> StructureSnapshot {
    let mut blocks: Vec<BlockRecord> = data
        .blocks
        .values()
        .map(|block| BlockRecord {
            id: block.id,
            coordinate: block.coordinate,
            parent: block.parent,
            local_faces: block.local_faces,
        })
        .collect();
    blocks.sort_by_key(|record| record.id);

    StructureSnapshot {
        version: SNAPSHOT_VERSION,
        blocks,
    }
}

/// Rebuild a structure from a snapshot. Statistics start from zero.
pub fn restore_snapshot(snapshot: &StructureSnapshot) -> Result<StructureData, SnapshotError> {
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::VersionMismatch {
            expected: SNAPSHOT_VERSION,
            found: snapshot.version,
        });
    }

    let mut blocks: FxHashMap<BlockId, BlockData> = FxHashMap::default();
    let mut positions: FxHashMap<BlockPos, BlockId> = FxHashMap::default();

    for record in &snapshot.blocks {
        if blocks.contains_key(&record.id) {
            return Err(SnapshotError::DuplicateId { id: record.id });
        }
        if positions.insert(record.coordinate, record.id).is_some() {
            return Err(SnapshotError::DuplicateCoordinate {
                coordinate: record.coordinate,
            });
        }
        let mut block = create_block(record.id);
        block.coordinate = record.coordinate;
        block.local_faces = record.local_faces;
        block.parent = record.parent;
        blocks.insert(record.id, block);
    }

    for record in &snapshot.blocks {
        let Some(link) = record.parent else { continue };
        // dangling links are left for the invariant check to report
        let Some(parent) = blocks.get_mut(&link.id) else { continue };
        let Some(slot) = link.direction.index() else { continue };
        if parent.children[slot].replace(record.id).is_some() {
            return Err(SnapshotError::ChildSlotTaken {
                parent: link.id,
                direction: link.direction,
            });
        }
    }

    let data = StructureData {
        blocks,
        positions,
        stats: StructureStats::default(),
    };
    verify_invariants(&data)?;

    log::info!("[Structure] Restored snapshot with {} blocks", data.blocks.len());
    Ok(data)
}
