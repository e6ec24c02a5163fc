//! Structure Operations - Pure DOP Functions
//!
//! Applying decoded operations to a structure registry. Every function keeps
//! the registry invariants intact: one block per id, one block per
//! coordinate, children slots mirroring parent links, and every block
//! reachable from the base block.

use rustc_hash::FxHashMap;

use super::block_data::BlockData;
use super::block_operations;
use super::core::{BlockId, BlockPos, FaceDirection};
use super::structure_data::{Applied, ApplyError, ApplyResult, Detached, StructureData, StructureStats};
use crate::protocol::{Operation, OperationKind};

/// Create a structure holding only the base block
pub fn create_structure() -> StructureData {
    let base = block_operations::create_base_block();
    let mut data = StructureData {
        blocks: FxHashMap::default(),
        positions: FxHashMap::default(),
        stats: StructureStats::default(),
    };
    data.positions.insert(base.coordinate, base.id);
    data.blocks.insert(base.id, base);
    data
}

/// Apply one operation. Failures leave the structure untouched.
pub fn apply(data: &mut StructureData, operation: Operation) -> ApplyResult {
    let result = match operation.kind {
        OperationKind::Add => apply_add(data, operation),
        OperationKind::Remove => apply_remove(data, operation),
    };

    match &result {
        Ok(applied) => {
            data.stats.operations_applied += 1;
            data.stats.blocks_removed += applied.removed.len() as u64;
            if applied.overridden {
                data.stats.overrides += 1;
            }
            log::info!(
                "[Structure] {:?} {} on {} ({}) applied, {} removed",
                operation.kind,
                applied.operation.child_id.map_or_else(|| "-".to_string(), |id| id.to_string()),
                operation.parent_id,
                applied.direction,
                applied.removed.len()
            );
        }
        Err(err) => {
            data.stats.operations_failed += 1;
            log::warn!("[Structure] {:?} on {} failed: {}", operation.kind, operation.parent_id, err);
        }
    }

    result
}

fn apply_add(data: &mut StructureData, operation: Operation) -> ApplyResult {
    let child_id = match operation.child_id {
        Some(id) if !id.is_base() => id,
        other => return Err(ApplyError::InvalidChild { child: other }),
    };

    let parent = data
        .blocks
        .get(&operation.parent_id)
        .ok_or(ApplyError::ParentNotFound {
            parent: operation.parent_id,
        })?;
    let placement = block_operations::plan_attach(parent, operation.requested_face)?;

    // Everything that has to go before the new block can be installed: the
    // slot occupant, whatever sits on the target coordinate, and an older
    // block with the same id. Each takes its subtree with it.
    let mut doomed: Vec<BlockId> = Vec::with_capacity(3);
    let candidates = [
        placement.occupant,
        data.positions.get(&placement.coordinate).copied(),
        data.blocks.contains_key(&child_id).then_some(child_id),
    ];
    for id in candidates.into_iter().flatten() {
        if !doomed.contains(&id) {
            doomed.push(id);
        }
    }

    for victim in &doomed {
        if victim.is_base() || is_ancestor_or_self(data, *victim, operation.parent_id) {
            return Err(ApplyError::Conflict {
                child: child_id,
                victim: *victim,
            });
        }
    }

    let mut cascade = Vec::new();
    for victim in &doomed {
        if data.blocks.contains_key(victim) {
            log::debug!("[Structure] {} displaces {}", child_id, victim);
            cascade.extend(remove_subtree(data, *victim));
        }
    }

    let mut child = block_operations::create_block(child_id);
    let parent = data
        .blocks
        .get_mut(&operation.parent_id)
        .ok_or(ApplyError::ParentNotFound {
            parent: operation.parent_id,
        })?;
    block_operations::commit_placement(&mut child, parent, &placement);

    data.positions.insert(child.coordinate, child.id);
    data.blocks.insert(child.id, child);
    data.stats.blocks_added += 1;

    Ok(Applied {
        operation,
        direction: placement.parent.direction,
        removed: cascade.iter().map(|detached| detached.child).collect(),
        overridden: !cascade.is_empty(),
        cascade,
    })
}

fn apply_remove(data: &mut StructureData, operation: Operation) -> ApplyResult {
    let parent = data
        .blocks
        .get(&operation.parent_id)
        .ok_or(ApplyError::ParentNotFound {
            parent: operation.parent_id,
        })?;

    let (child_id, direction) = match operation.child_id {
        Some(id) => {
            let link = data
                .blocks
                .get(&id)
                .and_then(|child| child.parent)
                .filter(|link| link.id == parent.id);
            match link {
                Some(link) => (id, link.direction),
                None => {
                    return Err(ApplyError::ChildNotFound {
                        parent: parent.id,
                        direction: block_operations::relative_direction_of(
                            parent,
                            operation.requested_face,
                        ),
                    })
                }
            }
        }
        None => {
            let direction = block_operations::relative_direction_of(parent, operation.requested_face);
            match block_operations::child_at(parent, direction) {
                Some(id) => (id, direction),
                None => {
                    return Err(ApplyError::ChildNotFound {
                        parent: parent.id,
                        direction,
                    })
                }
            }
        }
    };

    let mut cascade = remove_subtree(data, child_id);
    let removed = cascade.iter().map(|detached| detached.child).collect();
    // the target itself is the operation, not part of its cascade
    cascade.retain(|detached| detached.child != child_id);

    Ok(Applied {
        operation: Operation {
            child_id: Some(child_id),
            ..operation
        },
        direction,
        removed,
        cascade,
        overridden: false,
    })
}

/// Remove a block and all of its descendants.
///
/// Returns one entry per removed block with the link it was cut from, the
/// root first. The base block is never removed.
pub fn remove_subtree(data: &mut StructureData, root: BlockId) -> Vec<Detached> {
    if root.is_base() {
        log::error!("[Structure] Refusing to remove the base block");
        return Vec::new();
    }

    if let Some(link) = data.blocks.get(&root).and_then(|block| block.parent) {
        if let Some(parent) = data.blocks.get_mut(&link.id) {
            block_operations::detach_child(parent, link.direction);
        }
    }

    let mut removed = Vec::new();
    let mut pending = vec![root];
    while let Some(id) = pending.pop() {
        let Some(mut block) = data.blocks.remove(&id) else {
            continue;
        };
        if data.positions.get(&block.coordinate) == Some(&id) {
            data.positions.remove(&block.coordinate);
        }
        if let Some(link) = block.parent.take() {
            removed.push(Detached {
                parent: link.id,
                direction: link.direction,
                child: id,
            });
        }
        for (slot, child) in block.children.iter().enumerate() {
            if let Some(child) = child {
                log::debug!(
                    "[Structure] Cascading removal {} -> {} ({})",
                    id,
                    child,
                    FaceDirection::from_index(slot)
                );
                pending.push(*child);
            }
        }
    }

    removed
}

/// True when `ancestor` is `block` or lies on its parent chain
pub fn is_ancestor_or_self(data: &StructureData, ancestor: BlockId, block: BlockId) -> bool {
    let mut current = Some(block);
    let mut steps = 0;
    while let Some(id) = current {
        if id == ancestor {
            return true;
        }
        // a chain longer than the registry means a cycle; the checker reports it
        if steps > data.blocks.len() {
            return false;
        }
        steps += 1;
        current = data.blocks.get(&id).and_then(|b| b.parent).map(|link| link.id);
    }
    false
}

/// Get a block by id
pub fn get_block(data: &StructureData, id: BlockId) -> Option<&BlockData> {
    data.blocks.get(&id)
}

/// Get the block occupying a coordinate
pub fn block_at(data: &StructureData, coordinate: BlockPos) -> Option<&BlockData> {
    data.positions.get(&coordinate).and_then(|id| data.blocks.get(id))
}

/// Children of a block paired with the direction they occupy
pub fn children_of(data: &StructureData, id: BlockId) -> Vec<(FaceDirection, BlockId)> {
    data.blocks
        .get(&id)
        .map(|block| {
            block
                .children
                .iter()
                .enumerate()
                .filter_map(|(slot, child)| child.map(|c| (FaceDirection::from_index(slot), c)))
                .collect()
        })
        .unwrap_or_default()
}

/// Number of parent links between a block and the base block
pub fn depth_of(data: &StructureData, id: BlockId) -> Option<usize> {
    let mut block = data.blocks.get(&id)?;
    let mut depth = 0;
    while let Some(link) = block.parent {
        depth += 1;
        if depth > data.blocks.len() {
            return None;
        }
        block = data.blocks.get(&link.id)?;
    }
    Some(depth)
}

/// All descendants of a block, not including the block itself
pub fn descendants_of(data: &StructureData, id: BlockId) -> Vec<BlockId> {
    let mut out = Vec::new();
    let mut pending: Vec<BlockId> = children_of(data, id).into_iter().map(|(_, c)| c).collect();
    while let Some(next) = pending.pop() {
        out.push(next);
        pending.extend(children_of(data, next).into_iter().map(|(_, c)| c));
    }
    out
}
