//! Structure Module
//!
//! The block tree built from device events. Blocks are nodes keyed by id,
//! each attached to one face of its parent, with a grid coordinate and a
//! face permutation derived from the parent at attach time.
//!
//! Layout follows the data/operations split:
//! - `*_data.rs` hold plain data
//! - `*_operations.rs` hold the functions that transform it
//! - [`Structure`] is the handle most callers use

pub mod core;

// Data modules
pub mod block_data;
pub mod structure_data;

// Operations modules
pub mod block_operations;
pub mod structure_operations;

pub mod invariants;
pub mod snapshot;
pub mod structure;

pub use self::core::{
    classify, AttachRow, BlockId, BlockPos, ColorClass, FaceDirection, FaceMap, Generation,
    FIRST_GENERATION, SUBSEQUENT_GENERATION,
};
pub use block_data::{AttachError, BlockData, ParentLink, Placement};
pub use invariants::{verify_invariants, InvariantViolation};
pub use snapshot::{BlockRecord, SnapshotError, StructureSnapshot};
pub use structure::Structure;
pub use structure_data::{Applied, ApplyError, ApplyResult, Detached, StructureData, StructureStats};
