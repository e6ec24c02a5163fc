//! Outcome Data - Pure DOP
//!
//! NO METHODS beyond constructors. Just data.

use serde::{Deserialize, Serialize};

use crate::build::{ApplyError, ApplyResult, AttachError, BlockId, Detached, FaceDirection};
use crate::constants::wire::DETACH_CHILD_ID;
use crate::error::FailureKind;
use crate::protocol::{DecodeError, Operation, OperationKind};

/// One record per decoded-or-rejected packet, plus one per cascaded removal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    /// `None` when the packet was too malformed to tell
    pub operation_type: Option<OperationKind>,
    pub parent_id: Option<BlockId>,
    pub child_id: Option<BlockId>,
    /// `Undefined` when the operation never resolved a direction
    pub resolved_direction: FaceDirection,
    pub success: bool,
    pub failure: Option<FailureKind>,
    /// Blocks that left the structure, cascades included
    pub removed: Vec<BlockId>,
    /// An add displaced a pre-existing occupant
    pub overridden: bool,
}

impl OutcomeRecord {
    /// Record for an operation that reached the structure
    pub fn from_result(operation: &Operation, result: &ApplyResult) -> Self {
        match result {
            Ok(applied) => Self {
                operation_type: Some(applied.operation.kind),
                parent_id: Some(applied.operation.parent_id),
                child_id: applied.operation.child_id,
                resolved_direction: applied.direction,
                success: true,
                failure: None,
                removed: applied.removed.clone(),
                overridden: applied.overridden,
            },
            Err(err) => {
                let resolved_direction = match err {
                    ApplyError::ChildNotFound { direction, .. } => *direction,
                    ApplyError::Attach(AttachError::SlotOccupied { direction, .. }) => *direction,
                    _ => FaceDirection::Undefined,
                };
                Self {
                    operation_type: Some(operation.kind),
                    parent_id: Some(operation.parent_id),
                    child_id: operation.child_id,
                    resolved_direction,
                    success: false,
                    failure: Some(err.kind()),
                    removed: Vec::new(),
                    overridden: false,
                }
            }
        }
    }

    /// Record for a block removed as a side effect of another operation
    pub fn cascaded(detached: &Detached) -> Self {
        Self {
            operation_type: Some(OperationKind::Remove),
            parent_id: Some(detached.parent),
            child_id: Some(detached.child),
            resolved_direction: detached.direction,
            success: true,
            failure: None,
            removed: vec![detached.child],
            overridden: false,
        }
    }

    /// Record for a packet the decoder refused
    pub fn rejected(err: &DecodeError) -> Self {
        let (operation_type, parent_id, child_id) = match err {
            DecodeError::InvalidFace {
                parent_id,
                child_id,
                ..
            } if child_id.raw() == DETACH_CHILD_ID => {
                (Some(OperationKind::Remove), Some(*parent_id), None)
            }
            DecodeError::InvalidFace {
                parent_id,
                child_id,
                ..
            } => (Some(OperationKind::Add), Some(*parent_id), Some(*child_id)),
            DecodeError::InvalidLength { .. } => (None, None, None),
        };

        Self {
            operation_type,
            parent_id,
            child_id,
            resolved_direction: FaceDirection::Undefined,
            success: false,
            failure: Some(err.kind()),
            removed: Vec::new(),
            overridden: false,
        }
    }
}
