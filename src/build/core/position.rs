use cgmath::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Integer grid position in the structure frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const ORIGIN: BlockPos = BlockPos { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Manhattan distance, used to sanity check parent/child adjacency
    pub fn manhattan(self, other: BlockPos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }
}

impl Add<Vector3<i32>> for BlockPos {
    type Output = BlockPos;

    fn add(self, offset: Vector3<i32>) -> BlockPos {
        BlockPos {
            x: self.x + offset.x,
            y: self.y + offset.y,
            z: self.z + offset.z,
        }
    }
}

impl From<BlockPos> for Vector3<i32> {
    fn from(pos: BlockPos) -> Self {
        Vector3::new(pos.x, pos.y, pos.z)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
