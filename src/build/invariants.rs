//! Structure invariant checks
//!
//! Walks a registry and reports the first broken invariant. Used by tests, by
//! snapshot restore, and by `Structure::apply` when verification is enabled.

use super::block_operations::generation_of;
use super::core::{BlockId, BlockPos, FaceDirection};
use super::structure_data::StructureData;

/// A broken registry invariant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("base block is missing")]
    MissingBase,

    #[error("base block has a parent")]
    BaseHasParent,

    #[error("{block} has no parent")]
    Orphan { block: BlockId },

    #[error("{block} names parent {parent}, which is not in the structure")]
    DanglingParent { block: BlockId, parent: BlockId },

    #[error("{block} claims slot {direction} of {parent}, which holds {found:?}")]
    SlotMismatch {
        block: BlockId,
        parent: BlockId,
        direction: FaceDirection,
        found: Option<BlockId>,
    },

    #[error("{parent} lists child {child} in slot {direction}, which does not link back")]
    ChildMismatch {
        parent: BlockId,
        child: BlockId,
        direction: FaceDirection,
    },

    #[error("{block} is not reachable from the base block")]
    Cycle { block: BlockId },

    #[error("coordinate {coordinate} is indexed to {indexed:?} but holds {actual:?}")]
    PositionIndex {
        coordinate: BlockPos,
        indexed: Option<BlockId>,
        actual: Option<BlockId>,
    },

    #[error("{block} at {actual} should be at {expected}")]
    Misplaced {
        block: BlockId,
        expected: BlockPos,
        actual: BlockPos,
    },

    #[error("{block} has an orientation that does not follow from its parent")]
    Misoriented { block: BlockId },
}

/// Check every registry invariant
pub fn verify_invariants(data: &StructureData) -> Result<(), InvariantViolation> {
    let base = data
        .blocks
        .get(&BlockId::BASE)
        .ok_or(InvariantViolation::MissingBase)?;
    if base.parent.is_some() {
        return Err(InvariantViolation::BaseHasParent);
    }
    if base.coordinate != BlockPos::ORIGIN {
        return Err(InvariantViolation::Misplaced {
            block: BlockId::BASE,
            expected: BlockPos::ORIGIN,
            actual: base.coordinate,
        });
    }

    for (coordinate, id) in &data.positions {
        let actual = data.blocks.get(id).filter(|block| block.coordinate == *coordinate);
        if actual.is_none() {
            return Err(InvariantViolation::PositionIndex {
                coordinate: *coordinate,
                indexed: Some(*id),
                actual: None,
            });
        }
    }
    // every block indexed exactly once
    for block in data.blocks.values() {
        let indexed = data.positions.get(&block.coordinate).copied();
        if indexed != Some(block.id) {
            return Err(InvariantViolation::PositionIndex {
                coordinate: block.coordinate,
                indexed,
                actual: Some(block.id),
            });
        }
    }

    for block in data.blocks.values() {
        for (slot, child) in block.children.iter().enumerate() {
            let Some(child) = child else { continue };
            let direction = FaceDirection::from_index(slot);
            let links_back = data
                .blocks
                .get(child)
                .and_then(|c| c.parent)
                .is_some_and(|link| link.id == block.id && link.direction == direction);
            if !links_back {
                return Err(InvariantViolation::ChildMismatch {
                    parent: block.id,
                    child: *child,
                    direction,
                });
            }
        }

        if block.id.is_base() {
            continue;
        }
        let link = block.parent.ok_or(InvariantViolation::Orphan { block: block.id })?;
        let parent = data.blocks.get(&link.id).ok_or(InvariantViolation::DanglingParent {
            block: block.id,
            parent: link.id,
        })?;
        let found = link.direction.index().and_then(|i| parent.children[i]);
        if found != Some(block.id) {
            return Err(InvariantViolation::SlotMismatch {
                block: block.id,
                parent: parent.id,
                direction: link.direction,
                found,
            });
        }

        let expected = parent.coordinate + link.direction.offset();
        if block.coordinate != expected {
            return Err(InvariantViolation::Misplaced {
                block: block.id,
                expected,
                actual: block.coordinate,
            });
        }

        let requested_face = parent.local_faces.physical_at(link.direction);
        let expected_faces = generation_of(parent)
            .row(requested_face)
            .map(|row| parent.local_faces.permuted(row));
        if !block.local_faces.is_permutation() || expected_faces != Some(block.local_faces) {
            return Err(InvariantViolation::Misoriented { block: block.id });
        }
    }

    // every parent chain must end at the base within len steps
    for block in data.blocks.values() {
        let mut current = block;
        let mut steps = 0;
        while let Some(link) = current.parent {
            steps += 1;
            if steps > data.blocks.len() {
                return Err(InvariantViolation::Cycle { block: block.id });
            }
            match data.blocks.get(&link.id) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        if !current.id.is_base() {
            return Err(InvariantViolation::Cycle { block: block.id });
        }
    }

    Ok(())
}
