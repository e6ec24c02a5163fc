//! Constants shared by the decoder and the structure engine

/// Wire format of a single block event
pub mod wire {
    /// Length of one block event record in bytes
    pub const PACKET_LEN: usize = 7;

    /// Byte range holding the big-endian parent id
    pub const PARENT_ID_RANGE: std::ops::Range<usize> = 0..3;

    /// Offset of the requested face byte
    pub const FACE_OFFSET: usize = 3;

    /// Byte range holding the big-endian child id
    pub const CHILD_ID_RANGE: std::ops::Range<usize> = 4..7;

    /// Child id reported when a block was detached
    pub const DETACH_CHILD_ID: u32 = 0;
}

/// Block identity and geometry
pub mod block {
    /// Number of faces on a block
    pub const FACE_COUNT: usize = 6;

    /// Largest identity the 24-bit id fields can carry
    pub const MAX_BLOCK_ID: u32 = 0x00FF_FFFF;

    /// Identity of the base block every structure is rooted at
    pub const BASE_BLOCK_ID: u32 = 0;

    /// Reserved identity of the terminal piece
    pub const END_BLOCK_ID: u32 = MAX_BLOCK_ID;
}

/// Session defaults
pub mod session {
    /// Prefix used when naming newly seen devices
    pub const DEFAULT_NAME_PREFIX: &str = "CUBE";

    /// Capacity of the bounded outcome channel
    pub const DEFAULT_OUTCOME_CHANNEL_CAPACITY: usize = 256;
}

/// Persisted structure format
pub mod snapshot {
    /// Version written into every snapshot
    pub const SNAPSHOT_VERSION: u32 = 1;
}
