//! Structure handle
//!
//! Owns one registry and its settings. Apply operations one at a time, in
//! arrival order; each call runs to completion or fails without mutation.

use super::block_data::BlockData;
use super::core::{BlockId, BlockPos, FaceDirection};
use super::invariants::{verify_invariants, InvariantViolation};
use super::snapshot::{restore_snapshot, take_snapshot, SnapshotError, StructureSnapshot};
use super::structure_data::{ApplyResult, StructureData, StructureStats};
use super::structure_operations;
use crate::config::StructureConfig;
use crate::notify::{OutcomeRecord, OutcomeSink};
use crate::protocol::{Operation, OperationKind};

/// A block structure rooted at the base block
#[derive(Debug, Clone)]
pub struct Structure {
    data: StructureData,
    config: StructureConfig,
}

impl Structure {
    pub fn new() -> Self {
        Self::with_config(StructureConfig::default())
    }

    pub fn with_config(config: StructureConfig) -> Self {
        log::info!("[Structure] Created (verify_invariants={})", config.verify_invariants);
        Self {
            data: structure_operations::create_structure(),
            config,
        }
    }

    /// Apply one operation
    pub fn apply(&mut self, operation: Operation) -> ApplyResult {
        let result = structure_operations::apply(&mut self.data, operation);
        if self.config.verify_invariants {
            if let Err(violation) = verify_invariants(&self.data) {
                log::error!("[Structure] Invariant violated after {:?}: {}", operation, violation);
            }
        }
        result
    }

    /// Apply one operation and publish its outcome.
    ///
    /// Every block the operation removed beyond its own target gets a Remove
    /// record of its own, in the order things happened: displaced blocks
    /// before the add that displaced them, descendants after their root.
    pub fn apply_and_report(&mut self, operation: Operation, sink: &mut dyn OutcomeSink) -> ApplyResult {
        let result = self.apply(operation);
        let record = OutcomeRecord::from_result(&operation, &result);
        match &result {
            Ok(applied) if applied.operation.kind == OperationKind::Add => {
                for detached in &applied.cascade {
                    sink.publish(OutcomeRecord::cascaded(detached));
                }
                sink.publish(record);
            }
            Ok(applied) => {
                sink.publish(record);
                for detached in &applied.cascade {
                    sink.publish(OutcomeRecord::cascaded(detached));
                }
            }
            Err(_) => sink.publish(record),
        }
        result
    }

    pub fn block(&self, id: BlockId) -> Option<&BlockData> {
        structure_operations::get_block(&self.data, id)
    }

    pub fn block_at(&self, coordinate: BlockPos) -> Option<&BlockData> {
        structure_operations::block_at(&self.data, coordinate)
    }

    pub fn blocks(&self) -> impl Iterator<Item = &BlockData> {
        self.data.blocks.values()
    }

    /// Number of blocks, base included
    pub fn len(&self) -> usize {
        self.data.blocks.len()
    }

    /// True when only the base block is present
    pub fn has_only_base(&self) -> bool {
        self.data.blocks.len() <= 1
    }

    pub fn children_of(&self, id: BlockId) -> Vec<(FaceDirection, BlockId)> {
        structure_operations::children_of(&self.data, id)
    }

    pub fn depth_of(&self, id: BlockId) -> Option<usize> {
        structure_operations::depth_of(&self.data, id)
    }

    pub fn descendants_of(&self, id: BlockId) -> Vec<BlockId> {
        structure_operations::descendants_of(&self.data, id)
    }

    pub fn verify(&self) -> Result<(), InvariantViolation> {
        verify_invariants(&self.data)
    }

    pub fn snapshot(&self) -> StructureSnapshot {
        take_snapshot(&self.data)
    }

    pub fn from_snapshot(snapshot: &StructureSnapshot, config: StructureConfig) -> Result<Self, SnapshotError> {
        Ok(Self {
            data: restore_snapshot(snapshot)?,
            config,
        })
    }

    pub fn stats(&self) -> StructureStats {
        self.data.stats
    }

    pub fn data(&self) -> &StructureData {
        &self.data
    }
}

impl Default for Structure {
    fn default() -> Self {
        Self::new()
    }
}
