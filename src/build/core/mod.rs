//! Core build data types and fundamental structures
//!
//! This module contains the leaf types every other part of the engine is
//! built on: faces and directions, block identities, grid positions, and the
//! orientation permutation tables.

mod block_id;
mod face;
mod orientation;
mod position;

pub use block_id::{classify, BlockId, ColorClass};
pub use face::FaceDirection;
pub use orientation::{AttachRow, FaceMap, Generation, FIRST_GENERATION, SUBSEQUENT_GENERATION};
pub use position::BlockPos;
