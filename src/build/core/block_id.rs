use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::block::{BASE_BLOCK_ID, END_BLOCK_ID, MAX_BLOCK_ID};

/// Identity of a physical block as reported by the device (24 bits).
///
/// Built through [`BlockId::new`], which masks to the device's id width.
/// Serialized as the bare number; deserializing masks the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
#[repr(transparent)]
pub struct BlockId(u32);

impl BlockId {
    pub const BASE: BlockId = BlockId(BASE_BLOCK_ID);
    pub const END: BlockId = BlockId(END_BLOCK_ID);

    /// Create a new BlockId, masking the value to 24 bits
    pub const fn new(id: u32) -> Self {
        BlockId(id & MAX_BLOCK_ID)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn is_base(self) -> bool {
        self.0 == BASE_BLOCK_ID
    }

    pub fn color(self) -> ColorClass {
        classify(self)
    }
}

impl From<u32> for BlockId {
    fn from(id: u32) -> Self {
        BlockId::new(id)
    }
}

impl From<BlockId> for u32 {
    fn from(id: BlockId) -> Self {
        id.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BlockId::BASE => write!(f, "Base"),
            _ => write!(f, "Block({})", self.0),
        }
    }
}

/// Color family of a block, derived from its identity range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorClass {
    Base,
    White,
    Black,
    Red,
    Orange,
    Yellow,
    Green,
    Indigo,
    Blue,
    Purple,
    Pink,
    End,
}

/// Identity ranges per color. Ids outside every range classify as white.
const COLOR_RANGES: [(u32, u32, ColorClass); 10] = [
    (1_038_576, 2_097_151, ColorClass::White),
    (2_097_152, 3_145_727, ColorClass::Black),
    (3_145_728, 4_194_303, ColorClass::Red),
    (4_194_304, 5_242_879, ColorClass::Orange),
    (5_242_880, 6_291_455, ColorClass::Yellow),
    (6_291_456, 7_340_031, ColorClass::Green),
    (7_340_032, 8_388_607, ColorClass::Indigo),
    (8_388_608, 9_437_183, ColorClass::Blue),
    (9_437_184, 10_485_759, ColorClass::Purple),
    (10_485_760, 11_534_335, ColorClass::Pink),
];

/// Classify a block identity into its color family
pub fn classify(id: BlockId) -> ColorClass {
    match id {
        BlockId::BASE => ColorClass::Base,
        BlockId::END => ColorClass::End,
        BlockId(raw) => COLOR_RANGES
            .iter()
            .find(|(low, high, _)| (*low..=*high).contains(&raw))
            .map(|(_, _, color)| *color)
            .unwrap_or(ColorClass::White),
    }
}
