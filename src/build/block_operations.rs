//! Block Operations - Pure DOP Functions
//!
//! Orientation and coordinate derivation for single blocks. Nothing here
//! touches the structure registry; the structure decides what to do about
//! occupied slots and duplicates.

use super::block_data::{AttachError, BlockData, ParentLink, Placement};
use super::core::{BlockId, BlockPos, FaceDirection, FaceMap, Generation};
use crate::constants::block::FACE_COUNT;

/// Create a detached block
pub fn create_block(id: BlockId) -> BlockData {
    BlockData {
        id,
        coordinate: BlockPos::ORIGIN,
        local_faces: FaceMap::IDENTITY,
        parent: None,
        children: [None; FACE_COUNT],
    }
}

/// Create the base block every structure is rooted at
pub fn create_base_block() -> BlockData {
    create_block(BlockId::BASE)
}

/// Structure-relative direction a physical face of `block` points along.
///
/// Returns `Undefined` when the face cannot be resolved.
pub fn relative_direction_of(block: &BlockData, physical: FaceDirection) -> FaceDirection {
    block.local_faces.relative_direction_of(physical)
}

/// Child attached in a structure-relative direction
pub fn child_at(block: &BlockData, direction: FaceDirection) -> Option<BlockId> {
    direction.index().and_then(|i| block.children[i])
}

/// Attachment table that applies to children of `parent`
pub fn generation_of(parent: &BlockData) -> Generation {
    if parent.id.is_base() {
        Generation::First
    } else {
        Generation::Subsequent
    }
}

/// Compute where a child attached to `requested_face` of `parent` would go
pub fn plan_attach(parent: &BlockData, requested_face: FaceDirection) -> Result<Placement, AttachError> {
    let direction = relative_direction_of(parent, requested_face);
    let row = match (direction.is_defined(), generation_of(parent).row(requested_face)) {
        (true, Some(row)) => row,
        _ => {
            return Err(AttachError::UndefinedFace {
                parent: parent.id,
                face: requested_face,
            })
        }
    };

    let placement = Placement {
        parent: ParentLink {
            id: parent.id,
            direction,
        },
        coordinate: parent.coordinate + direction.offset(),
        local_faces: parent.local_faces.permuted(row),
        occupant: child_at(parent, direction),
    };

    log::debug!(
        "[Block] {} face {} resolves to {} -> {} faces {}",
        parent.id,
        requested_face,
        direction,
        placement.coordinate,
        placement.local_faces
    );

    Ok(placement)
}

/// Apply a placement computed by [`plan_attach`]. Overwrites the parent slot.
pub fn commit_placement(child: &mut BlockData, parent: &mut BlockData, placement: &Placement) {
    child.parent = Some(placement.parent);
    child.coordinate = placement.coordinate;
    child.local_faces = placement.local_faces;
    if let Some(i) = placement.parent.direction.index() {
        parent.children[i] = Some(child.id);
    }
}

/// Attach `child` to `requested_face` of `parent`.
///
/// All-or-nothing: fails without touching either block when the face cannot
/// be resolved or the target slot is occupied. Clearing an occupied slot
/// needs the structure, which removes the occupant's whole subtree first.
pub fn attach(
    child: &mut BlockData,
    parent: &mut BlockData,
    requested_face: FaceDirection,
) -> Result<(), AttachError> {
    let placement = plan_attach(parent, requested_face)?;
    if let Some(occupant) = placement.occupant {
        return Err(AttachError::SlotOccupied {
            parent: parent.id,
            direction: placement.parent.direction,
            occupant,
        });
    }
    commit_placement(child, parent, &placement);
    Ok(())
}

/// Clear the slot a child occupies on its parent
pub fn detach_child(parent: &mut BlockData, direction: FaceDirection) -> Option<BlockId> {
    direction.index().and_then(|i| parent.children[i].take())
}
